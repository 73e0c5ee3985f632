use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, RewardSettings, RewardType};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reward_settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub shop_domain: String,
    pub affiliate_reward_type: String,
    pub affiliate_reward_value: Option<f64>, // NULL stands for NaN
    pub customer_reward_type: String,
    pub customer_reward_value: Option<f64>,
    pub next_order_discount_type: String,
    pub next_order_discount_value: Option<f64>,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// SQLite has no NaN; it is stored as NULL and read back as NaN.
fn to_column(value: f64) -> Option<f64> {
    if value.is_nan() { None } else { Some(value) }
}

fn from_column(value: Option<f64>) -> f64 {
    value.unwrap_or(f64::NAN)
}

fn stored_type(column: &str, raw: &str) -> Result<RewardType, DomainError> {
    raw.parse().map_err(|_| {
        DomainError::Database(format!("Unrecognised {} '{}' in reward_settings", column, raw))
    })
}

impl TryFrom<Model> for RewardSettings {
    type Error = DomainError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            affiliate_reward_type: stored_type(
                "affiliate_reward_type",
                &model.affiliate_reward_type,
            )?,
            affiliate_reward_value: from_column(model.affiliate_reward_value),
            customer_reward_type: stored_type("customer_reward_type", &model.customer_reward_type)?,
            customer_reward_value: from_column(model.customer_reward_value),
            next_order_discount_type: stored_type(
                "next_order_discount_type",
                &model.next_order_discount_type,
            )?,
            next_order_discount_value: from_column(model.next_order_discount_value),
            updated_at: Some(model.updated_at),
            shop_domain: model.shop_domain,
        })
    }
}

impl ActiveModel {
    /// Build a fully-set row from a settings record, stamping `now` when the
    /// record carries no timestamp of its own
    pub fn from_settings(settings: &RewardSettings, now: &str) -> Self {
        Self {
            shop_domain: Set(settings.shop_domain.clone()),
            affiliate_reward_type: Set(settings.affiliate_reward_type.to_string()),
            affiliate_reward_value: Set(to_column(settings.affiliate_reward_value)),
            customer_reward_type: Set(settings.customer_reward_type.to_string()),
            customer_reward_value: Set(to_column(settings.customer_reward_value)),
            next_order_discount_type: Set(settings.next_order_discount_type.to_string()),
            next_order_discount_value: Set(to_column(settings.next_order_discount_value)),
            updated_at: Set(settings
                .updated_at
                .clone()
                .unwrap_or_else(|| now.to_string())),
        }
    }
}
