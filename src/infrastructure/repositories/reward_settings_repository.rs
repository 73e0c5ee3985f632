//! SeaORM implementation of RewardSettingsRepository

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::domain::{DomainError, RewardSettings, RewardSettingsRepository};
use crate::models::reward_settings::{ActiveModel, Column, Entity as RewardSettingsEntity};

/// SeaORM-based implementation of RewardSettingsRepository
pub struct SeaOrmRewardSettingsRepository {
    db: DatabaseConnection,
}

impl SeaOrmRewardSettingsRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RewardSettingsRepository for SeaOrmRewardSettingsRepository {
    async fn find_by_shop(&self, shop_domain: &str) -> Result<Option<RewardSettings>, DomainError> {
        let row = RewardSettingsEntity::find()
            .filter(Column::ShopDomain.eq(shop_domain))
            .one(&self.db)
            .await?;

        row.map(RewardSettings::try_from).transpose()
    }

    async fn upsert(&self, settings: &RewardSettings) -> Result<(), DomainError> {
        let now = chrono::Utc::now().to_rfc3339();
        let row = ActiveModel::from_settings(settings, &now);

        // Single INSERT .. ON CONFLICT(shop_domain) DO UPDATE, no existence check
        RewardSettingsEntity::insert(row)
            .on_conflict(
                OnConflict::column(Column::ShopDomain)
                    .update_columns([
                        Column::AffiliateRewardType,
                        Column::AffiliateRewardValue,
                        Column::CustomerRewardType,
                        Column::CustomerRewardValue,
                        Column::NextOrderDiscountType,
                        Column::NextOrderDiscountValue,
                        Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RewardType;
    use crate::infrastructure::db::init_db;
    use sea_orm::PaginatorTrait;

    async fn setup_repo() -> (SeaOrmRewardSettingsRepository, DatabaseConnection) {
        let db = init_db("sqlite::memory:").await.expect("Failed to init db");
        (SeaOrmRewardSettingsRepository::new(db.clone()), db)
    }

    fn sample(shop: &str) -> RewardSettings {
        RewardSettings {
            shop_domain: shop.to_string(),
            affiliate_reward_type: RewardType::Fixed,
            affiliate_reward_value: 25.0,
            customer_reward_type: RewardType::Percentage,
            customer_reward_value: 5.0,
            next_order_discount_type: RewardType::Percentage,
            next_order_discount_value: 7.5,
            updated_at: Some("2026-01-01T00:00:00+00:00".to_string()),
        }
    }

    #[tokio::test]
    async fn test_find_missing_shop_returns_none() {
        let (repo, _db) = setup_repo().await;
        let found = repo.find_by_shop("nobody.myshopify.com").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_upsert_inserts_then_overwrites_single_row() {
        let (repo, db) = setup_repo().await;

        let first = sample("shop1.myshopify.com");
        repo.upsert(&first).await.expect("first write");

        let mut second = first.clone();
        second.customer_reward_type = RewardType::Fixed;
        second.customer_reward_value = 12.0;
        second.updated_at = Some("2026-01-02T00:00:00+00:00".to_string());
        repo.upsert(&second).await.expect("second write");

        let rows = RewardSettingsEntity::find().count(&db).await.unwrap();
        assert_eq!(rows, 1);

        let stored = repo.find_by_shop("shop1.myshopify.com").await.unwrap();
        assert_eq!(stored, Some(second));
    }

    #[tokio::test]
    async fn test_rows_are_isolated_by_shop() {
        let (repo, _db) = setup_repo().await;
        repo.upsert(&sample("a.myshopify.com")).await.unwrap();

        let mut other = sample("b.myshopify.com");
        other.affiliate_reward_value = 1.0;
        repo.upsert(&other).await.unwrap();

        let a = repo.find_by_shop("a.myshopify.com").await.unwrap().unwrap();
        assert_eq!(a.affiliate_reward_value, 25.0);
    }

    #[tokio::test]
    async fn test_nan_value_round_trips_through_null() {
        let (repo, _db) = setup_repo().await;
        let mut settings = sample("nan.myshopify.com");
        settings.affiliate_reward_value = f64::NAN;
        repo.upsert(&settings).await.unwrap();

        let stored = repo.find_by_shop("nan.myshopify.com").await.unwrap().unwrap();
        assert!(stored.affiliate_reward_value.is_nan());
        assert_eq!(stored.customer_reward_value, 5.0);
    }

    #[tokio::test]
    async fn test_unrecognised_stored_type_is_a_database_error() {
        use sea_orm::{ConnectionTrait, Statement};

        let (repo, db) = setup_repo().await;
        db.execute(Statement::from_string(
            db.get_database_backend(),
            "INSERT INTO reward_settings (shop_domain, affiliate_reward_type, updated_at) \
             VALUES ('odd.myshopify.com', 'bogus', '2026-01-01T00:00:00+00:00')"
                .to_owned(),
        ))
        .await
        .unwrap();

        let err = repo.find_by_shop("odd.myshopify.com").await.unwrap_err();
        assert!(matches!(err, DomainError::Database(_)));
    }
}
