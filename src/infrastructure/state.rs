//! Application state containing collaborators and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::{RewardSettingsRepository, SessionAuthenticator};
use crate::infrastructure::auth::JwtSessionAuthenticator;
use crate::infrastructure::config::Config;
use crate::infrastructure::SeaOrmRewardSettingsRepository;
use crate::services::SaveOptions;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection
    db: DatabaseConnection,
    /// Reward settings repository
    pub settings_repo: Arc<dyn RewardSettingsRepository>,
    /// Resolves the store behind each request
    pub authenticator: Arc<dyn SessionAuthenticator>,
    /// How submitted field sets are coerced
    pub save_options: SaveOptions,
}

impl AppState {
    /// Create a new AppState wired to SeaORM and session-token auth
    pub fn new(db: DatabaseConnection, config: &Config) -> Self {
        let settings_repo = Arc::new(SeaOrmRewardSettingsRepository::new(db.clone()));
        let authenticator = Arc::new(JwtSessionAuthenticator::new(
            &config.api_secret,
            config.api_key.as_deref(),
        ));

        Self {
            db,
            settings_repo,
            authenticator,
            save_options: SaveOptions {
                strict_values: config.strict_values,
            },
        }
    }

    /// Replace the authentication collaborator
    pub fn with_authenticator(mut self, authenticator: Arc<dyn SessionAuthenticator>) -> Self {
        self.authenticator = authenticator;
        self
    }

    /// Replace the persistence collaborator
    pub fn with_settings_repo(mut self, repo: Arc<dyn RewardSettingsRepository>) -> Self {
        self.settings_repo = repo;
        self
    }

    /// Get the database connection
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

