//! Reward configuration records
//!
//! A store carries three independent reward rules (affiliate commission,
//! customer discount and next-order coupon), each a type/value pair.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use super::DomainError;

/// How a reward value is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RewardType {
    /// Percentage of the order total (0-100 expected, not enforced)
    #[default]
    Percentage,
    /// Fixed currency amount
    Fixed,
}

impl RewardType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RewardType::Percentage => "percentage",
            RewardType::Fixed => "fixed",
        }
    }
}

impl fmt::Display for RewardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RewardType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "percentage" => Ok(RewardType::Percentage),
            "fixed" => Ok(RewardType::Fixed),
            other => Err(DomainError::Validation(format!(
                "Invalid reward type '{}'. Must be 'percentage' or 'fixed'",
                other
            ))),
        }
    }
}

/// The three reward rules configured per store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RewardCategory {
    Affiliate,
    Customer,
    NextOrder,
}

impl RewardCategory {
    pub const ALL: [RewardCategory; 3] = [
        RewardCategory::Affiliate,
        RewardCategory::Customer,
        RewardCategory::NextOrder,
    ];

    /// Field-set key carrying this category's type
    pub fn type_key(&self) -> &'static str {
        match self {
            RewardCategory::Affiliate => "affiliate_reward_type",
            RewardCategory::Customer => "customer_reward_type",
            RewardCategory::NextOrder => "next_order_discount_type",
        }
    }

    /// Field-set key carrying this category's value
    pub fn value_key(&self) -> &'static str {
        match self {
            RewardCategory::Affiliate => "affiliate_reward_value",
            RewardCategory::Customer => "customer_reward_value",
            RewardCategory::NextOrder => "next_order_discount_value",
        }
    }
}

/// A single type/value pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewardRule {
    pub reward_type: RewardType,
    pub value: f64,
}

/// Settings row for one store, keyed by `shop_domain`
///
/// Values are plain `f64` so that a coerced not-a-number survives the
/// round trip; serde_json writes NaN as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RewardSettings {
    pub shop_domain: String,
    pub affiliate_reward_type: RewardType,
    pub affiliate_reward_value: f64,
    pub customer_reward_type: RewardType,
    pub customer_reward_value: f64,
    pub next_order_discount_type: RewardType,
    pub next_order_discount_value: f64,
    /// RFC 3339 timestamp of the last write; absent for defaults
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl RewardSettings {
    /// Settings shown to a store that has never saved any
    pub fn defaults_for(shop_domain: &str) -> Self {
        Self {
            shop_domain: shop_domain.to_string(),
            affiliate_reward_type: RewardType::Percentage,
            affiliate_reward_value: 10.0,
            customer_reward_type: RewardType::Percentage,
            customer_reward_value: 5.0,
            next_order_discount_type: RewardType::Percentage,
            next_order_discount_value: 5.0,
            updated_at: None,
        }
    }

    pub fn rule(&self, category: RewardCategory) -> RewardRule {
        let (reward_type, value) = match category {
            RewardCategory::Affiliate => (self.affiliate_reward_type, self.affiliate_reward_value),
            RewardCategory::Customer => (self.customer_reward_type, self.customer_reward_value),
            RewardCategory::NextOrder => (
                self.next_order_discount_type,
                self.next_order_discount_value,
            ),
        };
        RewardRule { reward_type, value }
    }

    pub fn set_rule(&mut self, category: RewardCategory, rule: RewardRule) {
        match category {
            RewardCategory::Affiliate => {
                self.affiliate_reward_type = rule.reward_type;
                self.affiliate_reward_value = rule.value;
            }
            RewardCategory::Customer => {
                self.customer_reward_type = rule.reward_type;
                self.customer_reward_value = rule.value;
            }
            RewardCategory::NextOrder => {
                self.next_order_discount_type = rule.reward_type;
                self.next_order_discount_value = rule.value;
            }
        }
    }
}

/// Data handed from the read path to the page, already defaulted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SettingsView {
    pub shop: String,
    pub settings: RewardSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reward_type_parses_known_values() {
        assert_eq!("percentage".parse::<RewardType>(), Ok(RewardType::Percentage));
        assert_eq!("fixed".parse::<RewardType>(), Ok(RewardType::Fixed));
    }

    #[test]
    fn test_reward_type_rejects_unknown_values() {
        let err = "Fixed".parse::<RewardType>().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!("".parse::<RewardType>().is_err());
    }

    #[test]
    fn test_defaults() {
        let settings = RewardSettings::defaults_for("shop1.myshopify.com");
        assert_eq!(
            settings.rule(RewardCategory::Affiliate),
            RewardRule {
                reward_type: RewardType::Percentage,
                value: 10.0
            }
        );
        assert_eq!(settings.rule(RewardCategory::Customer).value, 5.0);
        assert_eq!(settings.rule(RewardCategory::NextOrder).value, 5.0);
        assert!(settings.updated_at.is_none());
    }

    #[test]
    fn test_serialized_shape_uses_flat_keys() {
        let json = serde_json::to_value(RewardSettings::defaults_for("a.myshopify.com")).unwrap();
        assert_eq!(json["affiliate_reward_type"], "percentage");
        assert_eq!(json["next_order_discount_value"], 5.0);
        assert!(json.get("updated_at").is_none());
    }
}
