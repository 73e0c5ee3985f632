use axum::{Form, Json, extract::State};
use std::collections::HashMap;

use crate::api::error::ApiError;
use crate::domain::SettingsView;
use crate::infrastructure::AppState;
use crate::infrastructure::auth::ShopSession;
use crate::services::{self, FieldSet, SaveOutcome};

/// Current reward settings for the caller's store, defaulted when none were saved
#[utoipa::path(
    get,
    path = "/api/settings",
    responses(
        (status = 200, description = "Settings view model", body = SettingsView),
        (status = 401, description = "Session token missing or invalid"),
        (status = 500, description = "Settings could not be read")
    )
)]
pub async fn get_settings(
    State(state): State<AppState>,
    ShopSession(identity): ShopSession,
) -> Result<Json<SettingsView>, ApiError> {
    let view = services::load_settings(state.settings_repo.as_ref(), &identity).await?;
    Ok(Json(view))
}

/// Save the submitted field set for the caller's store
#[utoipa::path(
    post,
    path = "/api/settings",
    request_body(
        content = HashMap<String, String>,
        content_type = "application/x-www-form-urlencoded",
        description = "affiliate_reward_type/value, customer_reward_type/value, next_order_discount_type/value"
    ),
    responses(
        (status = 200, description = "Settings saved", body = SaveOutcome),
        (status = 400, description = "Unrecognised reward type or rejected value"),
        (status = 401, description = "Session token missing or invalid"),
        (status = 500, description = "Settings could not be written")
    )
)]
pub async fn save_settings(
    State(state): State<AppState>,
    ShopSession(identity): ShopSession,
    Form(fields): Form<FieldSet>,
) -> Result<Json<SaveOutcome>, ApiError> {
    let outcome = services::save_settings(
        state.settings_repo.as_ref(),
        &identity,
        &fields,
        state.save_options,
    )
    .await?;
    Ok(Json(outcome))
}
