use super::Map;
use std::hash::Hash;
use time::Date;

/// A single dated price, as stored by the price-curve store.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSeriesPoint {
    /// The date the price applies to
    #[cfg_attr(feature = "schemars", schemars(schema_with = "super::date_schema"))]
    pub date: Date,
    /// The price
    pub price: f64,
    /// The market region
    pub state: String,
    /// The value type (e.g. "base", "peak")
    pub value_type: String,
    /// The profile or scenario tag
    pub scenario: String,
    /// The financial year tag
    pub financial_year: String,
    /// The curve the point belongs to
    pub curve_name: String,
}

impl TimeSeriesPoint {
    /// The identifier of the series this point belongs to under `view`
    pub fn series(&self, view: SeriesView) -> &str {
        match view {
            SeriesView::State => &self.state,
            SeriesView::ValueType => &self.value_type,
        }
    }
}

/// Which tag of a point identifies its series when charting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum SeriesView {
    /// One series per state
    #[default]
    State,
    /// One series per value type
    ValueType,
}

/// The granularity points are resampled onto.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Interval {
    /// Calendar months, labelled "Mar 2025"
    #[default]
    Monthly,
    /// Calendar quarters, labelled "Q1 2025"
    Quarterly,
    /// Calendar years, labelled "2025"
    Yearly,
}

/// One time bucket of a resampled series.
///
/// Only the series that had at least one point in the bucket appear in `values`;
/// an absent series is not the same thing as a zero price. Serializes flat, as
/// `{"label": "Mar 2025", "NSW": 85.2, ...}`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TimeSeriesRow<K: Eq + Hash> {
    /// The bucket label
    pub label: String,
    /// The first day of the bucket
    #[cfg_attr(feature = "serde", serde(skip))]
    #[cfg_attr(feature = "schemars", schemars(skip))]
    pub start: Date,
    /// The average price per series
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub values: Map<K>,
}
