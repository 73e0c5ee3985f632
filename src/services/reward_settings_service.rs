//! Reward Settings Service - load and save a store's reward configuration

use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{
    DomainError, RewardCategory, RewardSettings, RewardSettingsRepository, SettingsView,
    ShopIdentity,
};
use crate::services::settings_form::{FieldSet, SaveOptions, parse_settings_form};

/// Acknowledgement returned by a successful save
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SaveOutcome {
    pub success: bool,
}

/// Read path: the store's saved settings, or the defaults if it never saved any.
///
/// A read failure is returned as an error, not treated as "no settings".
pub async fn load_settings(
    repo: &dyn RewardSettingsRepository,
    identity: &ShopIdentity,
) -> Result<SettingsView, DomainError> {
    let settings = match repo.find_by_shop(&identity.shop).await? {
        Some(settings) => settings,
        None => {
            tracing::debug!("No reward settings for {}, using defaults", identity.shop);
            RewardSettings::defaults_for(&identity.shop)
        }
    };

    Ok(SettingsView {
        shop: identity.shop.clone(),
        settings,
    })
}

/// Write path: coerce the submitted field set and upsert it under the caller's store
pub async fn save_settings(
    repo: &dyn RewardSettingsRepository,
    identity: &ShopIdentity,
    fields: &FieldSet,
    options: SaveOptions,
) -> Result<SaveOutcome, DomainError> {
    let settings = parse_settings_form(&identity.shop, fields, options, Utc::now())?;

    for category in RewardCategory::ALL {
        if settings.rule(category).value.is_nan() {
            tracing::warn!(
                "{} for {} is not a number, storing NaN",
                category.value_key(),
                identity.shop
            );
        }
    }

    if let Err(e) = repo.upsert(&settings).await {
        tracing::error!("Failed to save reward settings for {}: {}", identity.shop, e);
        return Err(e);
    }

    tracing::info!("Reward settings saved for {}", identity.shop);
    Ok(SaveOutcome { success: true })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RewardType;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory stand-in for the persistence collaborator
    #[derive(Default)]
    struct MemoryRepo {
        rows: Mutex<HashMap<String, RewardSettings>>,
        fail_reads: bool,
        fail_writes: bool,
    }

    #[async_trait]
    impl RewardSettingsRepository for MemoryRepo {
        async fn find_by_shop(
            &self,
            shop_domain: &str,
        ) -> Result<Option<RewardSettings>, DomainError> {
            if self.fail_reads {
                return Err(DomainError::Database("connection reset".into()));
            }
            Ok(self.rows.lock().unwrap().get(shop_domain).cloned())
        }

        async fn upsert(&self, settings: &RewardSettings) -> Result<(), DomainError> {
            if self.fail_writes {
                return Err(DomainError::Database("permission denied".into()));
            }
            self.rows
                .lock()
                .unwrap()
                .insert(settings.shop_domain.clone(), settings.clone());
            Ok(())
        }
    }

    fn identity(shop: &str) -> ShopIdentity {
        ShopIdentity {
            shop: shop.to_string(),
        }
    }

    fn form(affiliate: (&str, &str)) -> FieldSet {
        [
            ("affiliate_reward_type", affiliate.0),
            ("affiliate_reward_value", affiliate.1),
            ("customer_reward_type", "percentage"),
            ("customer_reward_value", "5"),
            ("next_order_discount_type", "percentage"),
            ("next_order_discount_value", "5"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[tokio::test]
    async fn test_load_without_row_returns_defaults() {
        let repo = MemoryRepo::default();
        let view = load_settings(&repo, &identity("shop1.myshopify.com"))
            .await
            .unwrap();

        assert_eq!(view.shop, "shop1.myshopify.com");
        assert_eq!(view.settings, RewardSettings::defaults_for("shop1.myshopify.com"));
    }

    #[tokio::test]
    async fn test_save_then_load_returns_saved_values() {
        let repo = MemoryRepo::default();
        let who = identity("shop1.myshopify.com");

        let outcome = save_settings(&repo, &who, &form(("fixed", "25")), SaveOptions::default())
            .await
            .unwrap();
        assert_eq!(outcome, SaveOutcome { success: true });

        let view = load_settings(&repo, &who).await.unwrap();
        assert_eq!(view.settings.affiliate_reward_type, RewardType::Fixed);
        assert_eq!(view.settings.affiliate_reward_value, 25.0);
        assert_eq!(view.settings.customer_reward_value, 5.0);
        assert!(view.settings.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_read_failure_is_not_treated_as_missing() {
        let repo = MemoryRepo {
            fail_reads: true,
            ..Default::default()
        };
        let err = load_settings(&repo, &identity("s.myshopify.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Database(_)));
    }

    #[tokio::test]
    async fn test_write_failure_carries_message() {
        let repo = MemoryRepo {
            fail_writes: true,
            ..Default::default()
        };
        let err = save_settings(
            &repo,
            &identity("s.myshopify.com"),
            &form(("percentage", "10")),
            SaveOptions::default(),
        )
        .await
        .unwrap_err();
        assert_eq!(err, DomainError::Database("permission denied".into()));
    }

    #[tokio::test]
    async fn test_invalid_form_writes_nothing() {
        let repo = MemoryRepo::default();
        let who = identity("s.myshopify.com");
        let result =
            save_settings(&repo, &who, &form(("bonus", "10")), SaveOptions::default()).await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert!(repo.rows.lock().unwrap().is_empty());
    }
}
