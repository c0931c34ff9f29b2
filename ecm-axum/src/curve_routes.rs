//! REST API endpoints for price curves.
//!
//! Price data is ingested as raw dated points. The monthly curve used for
//! valuation is derived from those points on request.

use crate::{ApiApplication, store_error};
use aide::{
    axum::{
        ApiRouter,
        routing::{get, get_with, post_with},
    },
    transform::TransformOperation,
};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use ecm_core::{
    models::{CurveMetadata, PriceCurve, PriceCurveQuery, TimeSeriesPoint},
    ports::PriceCurveRepository as _,
};
use tracing::{Level, event};

/// Query parameter selecting a curve by name.
#[derive(serde::Deserialize, schemars::JsonSchema)]
#[schemars(inline)]
struct CurveName {
    /// The name of the curve
    curve_name: String,
}

/// Response to a price-point ingest.
#[derive(serde::Serialize, schemars::JsonSchema)]
#[schemars(inline)]
struct Inserted {
    /// The number of points stored
    inserted: usize,
}

/// Creates a router with curve-related endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route_with(
            "/",
            get_with(get_price_curve::<T>, get_price_curve_docs),
            |route| route.tag("curve"),
        )
        .api_route_with("/metadata", get(get_curve_metadata::<T>), |route| {
            route.tag("curve")
        })
        .api_route_with(
            "/points",
            post_with(insert_price_points::<T>, insert_price_points_docs),
            |route| route.tag("curve"),
        )
}

async fn get_price_curve<T: ApiApplication>(
    State(app): State<T>,
    Query(query): Query<PriceCurveQuery>,
) -> Result<Json<PriceCurve>, (StatusCode, String)> {
    app.database()
        .get_price_curve(&query)
        .await
        .map_err(store_error(format!("failed to get curve {}", query.curve_name)))?
        .map(Json)
        .ok_or((
            StatusCode::NOT_FOUND,
            format!("no complete monthly prices for curve {}", query.curve_name),
        ))
}

fn get_price_curve_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("Get monthly price curve")
        .description(
            r#"
            Derive the monthly price curve of every state from the stored
            points matching the query. A month's price is the average of the
            points dated in that calendar month, across all years selected.
            States missing any month are left out.
            "#,
        )
        .response_with::<404, String, _>(|res| res.description("No state has twelve months of data"))
        .response_with::<500, String, _>(|res| res.description("Database query failed"))
}

/// Describe the financial years, scenarios, value types and states available for a curve.
///
/// # Returns
///
/// - `200 OK`: The available dimensions
/// - `404 Not Found`: The curve has no data
/// - `500 Internal Server Error`: Database query failed
async fn get_curve_metadata<T: ApiApplication>(
    State(app): State<T>,
    Query(CurveName { curve_name }): Query<CurveName>,
) -> Result<Json<CurveMetadata>, (StatusCode, String)> {
    app.database()
        .get_curve_metadata(&curve_name)
        .await
        .map_err(store_error(format!("failed to describe curve {curve_name}")))?
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, format!("unknown curve {curve_name}")))
}

async fn insert_price_points<T: ApiApplication>(
    State(app): State<T>,
    Json(points): Json<Vec<TimeSeriesPoint>>,
) -> Result<(StatusCode, Json<Inserted>), (StatusCode, String)> {
    let inserted = app
        .database()
        .insert_price_points(points)
        .await
        .map_err(store_error("failed to store price points"))?;

    event!(Level::INFO, inserted, "price points stored");
    Ok((StatusCode::CREATED, Json(Inserted { inserted })))
}

fn insert_price_points_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("Ingest price points")
        .description("Append dated price points to the store. Points are never deduplicated.")
        .response_with::<500, String, _>(|res| res.description("Database operation failed"))
}
