//! REST API endpoints for mark-to-market valuation.
//!
//! Every request values the stored contracts afresh against the selected
//! price curve, the stored volume shapes and the application's valuation
//! config. When no curve is selected, or the store cannot provide the one
//! selected, the built-in fallback curve is used instead.

use crate::{ApiApplication, ContractId, current_settings, store_error};
use aide::{
    axum::{
        ApiRouter,
        routing::{get, get_with},
    },
    transform::TransformOperation,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use ecm_core::{
    models::{MtmReport, PortfolioReport, PriceCurve, PriceCurveQuery, SortKey, SortOrder},
    ports::{ContractRepository as _, PriceCurveRepository as _},
};
use ecm_valuation::{ValuationError, Valuer, portfolio, rank, write_mtm_csv};
use tracing::{Level, event};

/// Path parameter for contract-specific valuations.
#[derive(serde::Deserialize, schemars::JsonSchema)]
#[schemars(inline)]
struct ContractPath<T> {
    /// The unique identifier of the contract
    contract_id: T,
}

/// The market inputs to value against, and how to order the results.
#[derive(serde::Deserialize, schemars::JsonSchema)]
struct ValuationQuery {
    /// The price curve to value against; the fallback curve if absent
    curve_name: Option<String>,
    /// Restrict the curve to one financial year
    financial_year: Option<String>,
    /// Restrict the curve to one profile or scenario
    scenario: Option<String>,
    /// Restrict the curve to one value type
    value_type: Option<String>,
    /// Rank the contracts by this field; store order if absent
    sort: Option<SortKey>,
    /// The direction of the ranking
    #[serde(default)]
    order: SortOrder,
}

impl ValuationQuery {
    fn curve(&self) -> Option<PriceCurveQuery> {
        self.curve_name.as_ref().map(|curve_name| PriceCurveQuery {
            curve_name: curve_name.clone(),
            financial_year: self.financial_year.clone(),
            scenario: self.scenario.clone(),
            value_type: self.value_type.clone(),
        })
    }
}

/// Where the prices of a valuation came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
enum CurveSource {
    /// The price-curve store
    Store,
    /// The built-in fallback curve
    Fallback,
}

/// The valuation of every contract, and of the portfolio they form.
#[derive(serde::Serialize, schemars::JsonSchema)]
struct ValuationResponse<Id> {
    /// Where the prices came from
    curve: CurveSource,
    /// One report per contract
    contracts: Vec<MtmReport<Id>>,
    /// The contracts taken together
    portfolio: PortfolioReport,
}

/// The valuation of a single contract.
#[derive(serde::Serialize, schemars::JsonSchema)]
struct ContractValuation<Id> {
    /// Where the prices came from
    curve: CurveSource,
    /// The contract's report
    #[serde(flatten)]
    report: MtmReport<Id>,
}

/// Creates a router with valuation endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route_with(
            "/",
            get_with(value_portfolio::<T>, value_portfolio_docs),
            |route| route.tag("valuation"),
        )
        .api_route_with(
            "/export",
            get_with(export_valuation::<T>, export_valuation_docs),
            |route| route.tag("valuation"),
        )
        .api_route_with("/{contract_id}", get(value_contract::<T>), |route| {
            route.tag("valuation")
        })
}

/// Fetch the curve selected by `query`, falling back to the built-in curve.
async fn price_curve<T: ApiApplication>(
    app: &T,
    query: Option<PriceCurveQuery>,
) -> (PriceCurve, CurveSource) {
    let Some(query) = query else {
        return (PriceCurve::fallback(), CurveSource::Fallback);
    };

    match app.database().get_price_curve(&query).await {
        Ok(Some(curve)) => (curve, CurveSource::Store),
        Ok(None) => {
            event!(
                Level::WARN,
                curve = query.curve_name.as_str(),
                "no complete curve in store, valuing against fallback curve"
            );
            (PriceCurve::fallback(), CurveSource::Fallback)
        }
        Err(err) => {
            event!(
                Level::ERROR,
                err = err.to_string(),
                curve = query.curve_name.as_str(),
                "failed to get curve, valuing against fallback curve"
            );
            (PriceCurve::fallback(), CurveSource::Fallback)
        }
    }
}

fn unvaluable(err: ValuationError) -> (StatusCode, String) {
    (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
}

async fn valuation<T: ApiApplication>(
    app: &T,
    query: &ValuationQuery,
) -> Result<ValuationResponse<ContractId<T>>, (StatusCode, String)> {
    let settings = current_settings(app).await?;
    let contracts = app
        .database()
        .list_contracts()
        .await
        .map_err(store_error("failed to list contracts"))?;
    let (curve, source) = price_curve(app, query.curve()).await;

    let valuer = Valuer::new(&settings.volume_shapes, &curve, app.valuation_config());
    let mut records = valuer.value_all(&contracts).map_err(unvaluable)?;
    if let Some(key) = query.sort {
        rank(&mut records, key, query.order);
    }

    Ok(ValuationResponse {
        curve: source,
        portfolio: portfolio(&records),
        contracts: records.iter().map(MtmReport::from).collect(),
    })
}

async fn value_portfolio<T: ApiApplication>(
    State(app): State<T>,
    Query(query): Query<ValuationQuery>,
) -> Result<Json<ValuationResponse<ContractId<T>>>, (StatusCode, String)> {
    Ok(Json(valuation(&app, &query).await?))
}

fn value_portfolio_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("Value all contracts")
        .description(
            r#"
            Compute the monthly mark-to-market of every contract, together
            with its total, monthly average, extremes and volatility, and the
            same figures for the portfolio as a whole.

            The response states whether the prices came from the store or
            from the built-in fallback curve.
            "#,
        )
        .response_with::<422, String, _>(|res| {
            res.description("A contract references a state or shape that cannot be resolved")
        })
        .response_with::<500, String, _>(|res| res.description("Database query failed"))
}

async fn export_valuation<T: ApiApplication>(
    State(app): State<T>,
    Query(query): Query<ValuationQuery>,
) -> Result<Response, (StatusCode, String)> {
    let valuation = valuation(&app, &query).await?;

    let mut csv = Vec::new();
    write_mtm_csv(&valuation.contracts, &mut csv).map_err(store_error("failed to write csv"))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"valuation.csv\"",
            ),
        ],
        csv,
    )
        .into_response())
}

fn export_valuation_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("Export contract valuations")
        .description("The per-contract valuations as `text/csv`, one line per contract.")
        .response_with::<422, String, _>(|res| {
            res.description("A contract references a state or shape that cannot be resolved")
        })
        .response_with::<500, String, _>(|res| res.description("Database query failed"))
}

/// Value a single contract.
///
/// # Returns
///
/// - `200 OK`: The contract's valuation
/// - `404 Not Found`: Contract does not exist
/// - `422 Unprocessable Entity`: The contract's state or shape cannot be resolved
/// - `500 Internal Server Error`: Database query failed
async fn value_contract<T: ApiApplication>(
    State(app): State<T>,
    Path(ContractPath { contract_id }): Path<ContractPath<ContractId<T>>>,
    Query(query): Query<ValuationQuery>,
) -> Result<Json<ContractValuation<ContractId<T>>>, (StatusCode, String)> {
    let contract = app
        .database()
        .get_contract(contract_id.clone())
        .await
        .map_err(store_error(format!("failed to get contract {contract_id}")))?
        .ok_or((
            StatusCode::NOT_FOUND,
            format!("unknown contract {contract_id}"),
        ))?;
    let settings = current_settings(&app).await?;
    let (curve, source) = price_curve(&app, query.curve()).await;

    let record = Valuer::new(&settings.volume_shapes, &curve, app.valuation_config())
        .value(&contract)
        .map_err(unvaluable)?;

    Ok(Json(ContractValuation {
        curve: source,
        report: record.into(),
    }))
}
