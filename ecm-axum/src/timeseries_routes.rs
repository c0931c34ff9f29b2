//! REST API endpoints for charting price data.

use crate::{ApiApplication, store_error};
use aide::{
    axum::{ApiRouter, routing::get_with},
    transform::TransformOperation,
};
use axum::{
    Json,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use ecm_core::{
    models::{Interval, PriceCurveQuery, SeriesView, TimeSeriesRow},
    ports::PriceCurveRepository as _,
};
use ecm_valuation::{aggregate, write_series_csv};

/// Which points to chart, and how.
#[derive(serde::Deserialize, schemars::JsonSchema)]
struct TimeSeriesQuery {
    /// The name of the curve
    curve_name: String,
    /// Restrict to one financial year
    financial_year: Option<String>,
    /// Restrict to one profile or scenario
    scenario: Option<String>,
    /// Restrict to one value type
    value_type: Option<String>,
    /// Whether series are states or value types
    #[serde(default)]
    view: SeriesView,
    /// The bucket size
    #[serde(default)]
    interval: Interval,
}

impl TimeSeriesQuery {
    fn curve(&self) -> PriceCurveQuery {
        PriceCurveQuery {
            curve_name: self.curve_name.clone(),
            financial_year: self.financial_year.clone(),
            scenario: self.scenario.clone(),
            value_type: self.value_type.clone(),
        }
    }
}

/// Creates a router with time-series endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route_with(
            "/",
            get_with(get_timeseries::<T>, get_timeseries_docs),
            |route| route.tag("timeseries"),
        )
        .api_route_with(
            "/export",
            get_with(export_timeseries::<T>, export_timeseries_docs),
            |route| route.tag("timeseries"),
        )
}

async fn resample<T: ApiApplication>(
    app: &T,
    query: &TimeSeriesQuery,
) -> Result<Vec<TimeSeriesRow<String>>, (StatusCode, String)> {
    let points = app
        .database()
        .query_price_points(&query.curve())
        .await
        .map_err(store_error(format!(
            "failed to query points of curve {}",
            query.curve_name
        )))?;
    Ok(aggregate(&points, query.view, query.interval))
}

async fn get_timeseries<T: ApiApplication>(
    State(app): State<T>,
    Query(query): Query<TimeSeriesQuery>,
) -> Result<Json<Vec<TimeSeriesRow<String>>>, (StatusCode, String)> {
    Ok(Json(resample(&app, &query).await?))
}

fn get_timeseries_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("Resample price points")
        .description(
            r#"
            Average the matching price points over calendar months, quarters or
            years, with one series per state or per value type. Each row holds
            a label such as "Mar 2025", "Q1 2025" or "2025", and one field per
            series that has data in that bucket. Series without data in a
            bucket are omitted from its row.
            "#,
        )
        .response_with::<500, String, _>(|res| res.description("Database query failed"))
}

async fn export_timeseries<T: ApiApplication>(
    State(app): State<T>,
    Query(query): Query<TimeSeriesQuery>,
) -> Result<Response, (StatusCode, String)> {
    let rows = resample(&app, &query).await?;

    let mut csv = Vec::new();
    write_series_csv(&rows, &mut csv).map_err(store_error("failed to write csv"))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"timeseries.csv\"",
            ),
        ],
        csv,
    )
        .into_response())
}

fn export_timeseries_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("Export resampled price points")
        .description("The rows of the resampling endpoint as `text/csv`, with an empty cell wherever a series has no data.")
        .response_with::<500, String, _>(|res| res.description("Database query failed"))
}
