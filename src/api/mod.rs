pub mod error;
pub mod health;
pub mod page;
pub mod settings;

use axum::{
    Router,
    routing::get,
};

use crate::infrastructure::AppState;

/// JSON endpoints, mounted under `/api`
pub fn api_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Reward settings: loader and action
        .route(
            "/settings",
            get(settings::get_settings).post(settings::save_settings),
        )
        .with_state(state)
}

/// Server-rendered settings page, mounted under `/app`
pub fn page_router_with_state(state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            get(page::settings_page).post(page::submit_settings_page),
        )
        .with_state(state)
}

