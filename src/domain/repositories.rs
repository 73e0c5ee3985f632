//! Repository trait definitions
//!
//! These traits define the contract for data access and caller identity.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;

use super::DomainError;
use super::rewards::RewardSettings;

/// Repository trait for per-store reward settings
#[async_trait]
pub trait RewardSettingsRepository: Send + Sync {
    /// Find the settings row for a store, if one was ever saved
    async fn find_by_shop(&self, shop_domain: &str) -> Result<Option<RewardSettings>, DomainError>;

    /// Insert or overwrite the row keyed by `settings.shop_domain` in one statement
    async fn upsert(&self, settings: &RewardSettings) -> Result<(), DomainError>;
}

/// Resolved caller identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopIdentity {
    /// Store identifier, e.g. `shop1.myshopify.com`
    pub shop: String,
}

/// Resolves the store a request is acting for
#[async_trait]
pub trait SessionAuthenticator: Send + Sync {
    /// Verify a session token and return the store it was issued for.
    /// Fails with `DomainError::Unauthorized`.
    async fn resolve_caller_identity(&self, token: &str) -> Result<ShopIdentity, DomainError>;
}
