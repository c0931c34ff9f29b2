use super::{Map, Monthly};

/// Average market price per calendar month, keyed by state.
///
/// A price curve is a snapshot: once fetched for a given query it is never
/// modified, only replaced by a newer snapshot.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct PriceCurve(pub Map<String, Monthly>);

impl PriceCurve {
    /// The monthly prices for `state`, if the curve covers it
    pub fn prices(&self, state: &str) -> Option<&Monthly> {
        self.0.get(state)
    }

    /// The curve to value against when the price-curve store cannot provide one.
    pub fn fallback() -> Self {
        [
            (
                "NSW",
                [
                    85.20, 78.50, 72.30, 68.90, 74.60, 92.40, 105.80, 98.10, 80.70, 71.20, 74.90,
                    82.60,
                ],
            ),
            (
                "VIC",
                [
                    79.40, 74.10, 69.80, 66.20, 73.50, 95.30, 108.20, 101.40, 83.60, 70.10, 71.80,
                    76.90,
                ],
            ),
            (
                "QLD",
                [
                    88.60, 82.30, 75.10, 67.40, 65.90, 78.20, 86.40, 81.70, 72.50, 70.80, 79.60,
                    86.30,
                ],
            ),
            (
                "SA",
                [
                    92.80, 86.70, 78.40, 74.30, 82.10, 104.60, 118.90, 110.20, 91.50, 78.60, 81.20,
                    89.40,
                ],
            ),
            (
                "TAS",
                [
                    68.30, 65.10, 63.40, 64.80, 70.20, 82.50, 90.10, 86.40, 75.30, 66.70, 64.20,
                    66.90,
                ],
            ),
        ]
        .into_iter()
        .map(|(state, prices)| (state.to_owned(), Monthly::new(prices)))
        .collect()
    }
}

impl std::ops::Deref for PriceCurve {
    type Target = Map<String, Monthly>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<(String, Monthly)> for PriceCurve {
    fn from_iter<I: IntoIterator<Item = (String, Monthly)>>(iter: I) -> Self {
        Self(Map::from_iter(iter))
    }
}

/// Selects a price-curve snapshot, or the raw points behind it.
///
/// Only the curve name is required; every other dimension narrows the selection
/// when present. The dimensions are opaque tags to the valuation itself.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriceCurveQuery {
    /// The name of the curve
    pub curve_name: String,
    /// Restrict to a financial year (e.g. "FY26")
    #[cfg_attr(feature = "serde", serde(default))]
    pub financial_year: Option<String>,
    /// Restrict to a profile or scenario tag
    #[cfg_attr(feature = "serde", serde(default))]
    pub scenario: Option<String>,
    /// Restrict to a value type (e.g. "base", "peak")
    #[cfg_attr(feature = "serde", serde(default))]
    pub value_type: Option<String>,
}

impl PriceCurveQuery {
    /// A query for every point of the named curve
    pub fn new(curve_name: impl Into<String>) -> Self {
        Self {
            curve_name: curve_name.into(),
            ..Default::default()
        }
    }
}

/// What a stored curve has to offer, used to populate curve selectors.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurveMetadata {
    /// Financial years with data
    pub financial_years: Vec<String>,
    /// Profile and scenario tags with data
    pub scenarios: Vec<String>,
    /// Value types with data
    pub value_types: Vec<String>,
    /// States with data
    pub states: Vec<String>,
}
