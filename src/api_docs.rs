use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::settings::get_settings,
        api::settings::save_settings,
    ),
    components(
        schemas(
            crate::domain::RewardType,
            crate::domain::RewardSettings,
            crate::domain::SettingsView,
            crate::services::SaveOutcome,
        )
    ),
    tags(
        (name = "affiliate-rewards", description = "Affiliate reward settings API")
    )
)]
pub struct ApiDoc;
