//! REST API endpoints for contract operations.
//!
//! Contracts are validated against the current settings whenever they are
//! written, so that every stored contract references a known state, unit,
//! indexation rule, category and volume shape.

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
    extract::{Path, State},
    http::StatusCode,
};
use ecm_core::{
    models::{ContractData, ContractError, ContractRecord},
    ports::ContractRepository as _,
};
use tracing::{Level, event};

/// Path parameter for contract-specific endpoints.
#[derive(serde::Deserialize, schemars::JsonSchema)]
#[schemars(inline)]
struct Id<T> {
    /// The unique identifier of the contract
    contract_id: T,
}

/// Creates a router with contract-related endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route_with(
            "/",
            get_with(list_contracts::<T>, list_contracts_docs)
                .post_with(create_contract::<T>, create_contract_docs),
            |route| route.tag("contract"),
        )
        .api_route_with(
            "/{contract_id}",
            get(read_contract::<T>)
                .put_with(update_contract::<T>, update_contract_docs)
                .delete(delete_contract::<T>),
            |route| route.tag("contract"),
        )
}

fn rejected(err: ContractError) -> (StatusCode, String) {
    (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
}

async fn list_contracts<T: ApiApplication>(
    State(app): State<T>,
) -> Result<Json<Vec<ContractRecord<ContractId<T>>>>, (StatusCode, String)> {
    let contracts = app
        .database()
        .list_contracts()
        .await
        .map_err(store_error("failed to list contracts"))?;
    Ok(Json(contracts))
}

fn list_contracts_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("List contracts")
        .description("List every contract, in the order they were created.")
        .response_with::<500, String, _>(|res| res.description("Database query failed"))
}

async fn create_contract<T: ApiApplication>(
    State(app): State<T>,
    Json(data): Json<ContractData>,
) -> Result<(StatusCode, Json<ContractRecord<ContractId<T>>>), (StatusCode, String)> {
    let settings = current_settings(&app).await?;
    data.validate(&settings).map_err(rejected)?;

    let contract_id = app.generate_contract_id(&data);
    let record = app
        .database()
        .create_contract(contract_id, data, app.now())
        .await
        .map_err(store_error("failed to create contract"))?;

    event!(Level::INFO, contract_id = %record.id, name = record.data.name.as_str(), "contract created");
    Ok((StatusCode::CREATED, Json(record)))
}

fn create_contract_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("Create contract")
        .description(
            r#"
            Create a new contract. The identifier is assigned by the server and
            returned as part of the stored record.

            The contract must reference a state, unit, indexation rule and
            volume shape known to the settings, and a category belonging to
            its type. Its annual volume must be non-negative and its end date
            must not precede its start date.
            "#,
        )
        .response_with::<422, String, _>(|res| res.description("Contract failed validation"))
        .response_with::<500, String, _>(|res| res.description("Database operation failed"))
}

/// Retrieve a single contract.
///
/// # Returns
///
/// - `200 OK`: The contract
/// - `404 Not Found`: Contract does not exist
/// - `500 Internal Server Error`: Database query failed
async fn read_contract<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { contract_id }): Path<Id<ContractId<T>>>,
) -> Result<Json<ContractRecord<ContractId<T>>>, (StatusCode, String)> {
    app.database()
        .get_contract(contract_id.clone())
        .await
        .map_err(store_error(format!("failed to get contract {contract_id}")))?
        .map(Json)
        .ok_or((
            StatusCode::NOT_FOUND,
            format!("unknown contract {contract_id}"),
        ))
}

async fn update_contract<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { contract_id }): Path<Id<ContractId<T>>>,
    Json(data): Json<ContractData>,
) -> Result<Json<ContractRecord<ContractId<T>>>, (StatusCode, String)> {
    let settings = current_settings(&app).await?;
    data.validate(&settings).map_err(rejected)?;

    app.database()
        .update_contract(contract_id.clone(), data, app.now())
        .await
        .map_err(store_error(format!("failed to update contract {contract_id}")))?
        .map(Json)
        .ok_or((
            StatusCode::NOT_FOUND,
            format!("unknown contract {contract_id}"),
        ))
}

fn update_contract_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("Replace contract")
        .description("Replace every field of an existing contract. The same validation as on creation applies.")
        .response_with::<404, String, _>(|res| res.description("Contract does not exist"))
        .response_with::<422, String, _>(|res| res.description("Contract failed validation"))
        .response_with::<500, String, _>(|res| res.description("Database operation failed"))
}

/// Delete a contract.
///
/// # Returns
///
/// - `204 No Content`: Contract deleted
/// - `404 Not Found`: Contract does not exist
/// - `500 Internal Server Error`: Database operation failed
async fn delete_contract<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { contract_id }): Path<Id<ContractId<T>>>,
) -> Result<StatusCode, (StatusCode, String)> {
    let deleted = app
        .database()
        .delete_contract(contract_id.clone())
        .await
        .map_err(store_error(format!("failed to delete contract {contract_id}")))?;

    if deleted {
        event!(Level::INFO, contract_id = %contract_id, "contract deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((
            StatusCode::NOT_FOUND,
            format!("unknown contract {contract_id}"),
        ))
    }
}
