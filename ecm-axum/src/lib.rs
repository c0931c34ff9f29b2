#![warn(missing_docs)]
// Note: this overwrites the links in the README to point to the rust docs of the sibling crates.
//! [ecm_core]: https://docs.rs/ecm_core/latest/ecm_core/index.html
//! [ecm_sqlite]: https://docs.rs/ecm_sqlite/latest/ecm_sqlite/index.html
#![doc = include_str!("../README.md")]

mod contract_routes;
mod curve_routes;
mod settings_routes;
mod timeseries_routes;
mod valuation_routes;

use aide::{
    axum::{ApiRouter, routing::get},
    openapi::OpenApi,
};
use axum::{Extension, Json, http::StatusCode};
use ecm_core::{
    models::Settings,
    ports::{Application, Repository, SettingsRepository as _},
};
use schemars::JsonSchema;
use serde::{Serialize, de::DeserializeOwned};
use std::{fmt::Display, sync::Arc};
use tower_http::cors::CorsLayer;
use tracing::{Level, event};

mod openapi;
use openapi::{api_docs, docs_routes};

pub mod config;
use config::AxumConfig;

/// Response for the health check endpoint
#[derive(Serialize, JsonSchema)]
#[schemars(inline)]
struct HealthResponse {
    status: String,
}

/// Simple health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Construct a full API router with the given state and config
pub fn router<T: ApiApplication>(state: T, config: AxumConfig) -> axum::Router {
    let mut api = OpenApi::default();
    let router = ApiRouter::new()
        .api_route("/health", get(health_check))
        .nest("/contract", contract_routes::router())
        .nest("/curve", curve_routes::router())
        .nest("/timeseries", timeseries_routes::router())
        .nest("/valuation", valuation_routes::router())
        .nest("/settings", settings_routes::router())
        .nest_api_service("/docs", docs_routes())
        .finish_api_with(&mut api, api_docs)
        .layer(Extension(Arc::new(api))) // Arc is very important here or you will face massive memory and performance issues
        .layer(Extension(Arc::new(config.clone())))
        .with_state(state);

    if config.permissive_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

/// Starts the HTTP server with the provided configuration
pub async fn start_server<T: ApiApplication>(
    config: AxumConfig,
    app: T,
) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

    event!(
        Level::INFO,
        address = %listener.local_addr()?,
        "listening for requests"
    );

    let service = router(app, config);
    axum::serve(listener, service).await
}

/// Axum imposes all sorts of constraints on what can pass for state. This
/// trait, coupled with a blanket implementation, specifies it all upfront and
/// in one place. If a function takes a generic `T: ApiApplication`, then
/// everything one might reasonably want to do should work.
pub trait ApiApplication:
    Clone
    + Send
    + Sync
    + 'static
    + Application<
        Repository: Clone
                        + Send
                        + Sync
                        + 'static
                        + Repository<
            DateTime: Clone + Display + Serialize + DeserializeOwned + JsonSchema + Send + Sync,
            ContractId: Clone
                            + Display
                            + Serialize
                            + DeserializeOwned
                            + JsonSchema
                            + Send
                            + Sync
                            + 'static,
        >,
    >
{
}

// this is the blanket implementation
impl<T: Clone + Send + Sync + 'static> ApiApplication for T where
    T: Application<
            Repository: Clone
                            + Send
                            + Sync
                            + 'static
                            + Repository<
                DateTime: Clone + Display + Serialize + DeserializeOwned + JsonSchema + Send + Sync,
                ContractId: Clone
                                + Display
                                + Serialize
                                + DeserializeOwned
                                + JsonSchema
                                + Send
                                + Sync
                                + 'static,
            >,
        >
{
}

/// The contract identifier type of an application's store
pub(crate) type ContractId<T> = <<T as Application>::Repository as Repository>::ContractId;

/// Log a store failure and turn it into a 500 response carrying `message`.
pub(crate) fn store_error<E: Display>(
    message: impl Into<String>,
) -> impl FnOnce(E) -> (StatusCode, String) {
    let message = message.into();
    move |err| {
        event!(Level::ERROR, err = err.to_string(), "{message}");
        (StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

/// The stored settings, or the reference settings if none were ever stored.
pub(crate) async fn current_settings<T: ApiApplication>(
    app: &T,
) -> Result<Settings, (StatusCode, String)> {
    let settings = app
        .database()
        .get_settings()
        .await
        .map_err(store_error("failed to get settings"))?;
    Ok(settings.unwrap_or_default())
}
