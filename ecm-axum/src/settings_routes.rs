//! REST API endpoints for the reference settings.

use crate::{ApiApplication, current_settings, store_error};
use aide::{
    axum::{ApiRouter, routing::get_with},
    transform::TransformOperation,
};
use axum::{Json, extract::State, http::StatusCode};
use ecm_core::{models::Settings, ports::SettingsRepository as _};
use tracing::{Level, event};

/// Creates a router with settings endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new().api_route_with(
        "/",
        get_with(get_settings::<T>, get_settings_docs)
            .put_with(replace_settings::<T>, replace_settings_docs),
        |route| route.tag("settings"),
    )
}

async fn get_settings<T: ApiApplication>(
    State(app): State<T>,
) -> Result<Json<Settings>, (StatusCode, String)> {
    Ok(Json(current_settings(&app).await?))
}

fn get_settings_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("Get settings")
        .description("The volume shapes and reference enumerations contracts are validated and valued against. The reference configuration is returned until settings are first stored.")
        .response_with::<500, String, _>(|res| res.description("Database query failed"))
}

async fn replace_settings<T: ApiApplication>(
    State(app): State<T>,
    Json(settings): Json<Settings>,
) -> Result<Json<Settings>, (StatusCode, String)> {
    let default_shape = app.valuation_config().default_shape;
    if !settings.volume_shapes.contains_key(&default_shape) {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("settings must define the default volume shape {default_shape}"),
        ));
    }

    app.database()
        .update_settings(settings.clone(), app.now())
        .await
        .map_err(store_error("failed to store settings"))?;

    event!(Level::INFO, shapes = settings.volume_shapes.len(), "settings replaced");
    Ok(Json(settings))
}

fn replace_settings_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("Replace settings")
        .description(
            r#"
            Replace the settings as a whole. Existing contracts are not
            revalidated; they are checked against the new settings the next
            time they are written.
            "#,
        )
        .response_with::<422, String, _>(|res| {
            res.description("The default volume shape is missing")
        })
        .response_with::<500, String, _>(|res| res.description("Database operation failed"))
}
