use axum::{
    Form,
    extract::{OriginalUri, State},
    response::{Html, Redirect},
};

use crate::api::error::ApiError;
use crate::infrastructure::AppState;
use crate::infrastructure::auth::ShopSession;
use crate::services::{self, FieldSet};
use crate::view::{SettingsForm, render_settings_page};

pub async fn settings_page(
    State(state): State<AppState>,
    ShopSession(identity): ShopSession,
) -> Result<Html<String>, ApiError> {
    let view = services::load_settings(state.settings_repo.as_ref(), &identity).await?;
    let form = SettingsForm::from_view_model(&view);
    Ok(Html(render_settings_page(&form)))
}

/// Save, then send the browser back to the page so it reloads fresh settings
pub async fn submit_settings_page(
    State(state): State<AppState>,
    ShopSession(identity): ShopSession,
    OriginalUri(uri): OriginalUri,
    Form(fields): Form<FieldSet>,
) -> Result<Redirect, ApiError> {
    services::save_settings(
        state.settings_repo.as_ref(),
        &identity,
        &fields,
        state.save_options,
    )
    .await?;

    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| "/app".to_string());
    Ok(Redirect::to(&target))
}
