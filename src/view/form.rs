//! Local editable state of the settings page
//!
//! Mirrors the loaded settings into six editable fields. Values are kept as
//! the raw text the merchant typed until they are submitted.

use crate::domain::{RewardCategory, RewardType, SettingsView};
use crate::services::FieldSet;

/// Render a number the way the page shows it: `10`, `7.5`, `NaN`
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if value == 0.0 {
        "0".to_string()
    } else {
        format!("{}", value)
    }
}

/// `15%` for percentages, `$15` for fixed amounts
pub fn display_amount(reward_type: RewardType, value: &str) -> String {
    match reward_type {
        RewardType::Percentage => format!("{}%", value),
        RewardType::Fixed => format!("${}", value),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuleDraft {
    pub reward_type: RewardType,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewLine {
    pub label: &'static str,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SettingsForm {
    shop: String,
    affiliate: RuleDraft,
    customer: RuleDraft,
    next_order: RuleDraft,
    submitting: bool,
}

impl SettingsForm {
    /// Initial state, taken once from the loader's view model
    pub fn from_view_model(view: &SettingsView) -> Self {
        let draft = |category| {
            let rule = view.settings.rule(category);
            RuleDraft {
                reward_type: rule.reward_type,
                value: format_number(rule.value),
            }
        };

        Self {
            shop: view.shop.clone(),
            affiliate: draft(RewardCategory::Affiliate),
            customer: draft(RewardCategory::Customer),
            next_order: draft(RewardCategory::NextOrder),
            submitting: false,
        }
    }

    pub fn shop(&self) -> &str {
        &self.shop
    }

    pub fn draft(&self, category: RewardCategory) -> &RuleDraft {
        match category {
            RewardCategory::Affiliate => &self.affiliate,
            RewardCategory::Customer => &self.customer,
            RewardCategory::NextOrder => &self.next_order,
        }
    }

    fn draft_mut(&mut self, category: RewardCategory) -> &mut RuleDraft {
        match category {
            RewardCategory::Affiliate => &mut self.affiliate,
            RewardCategory::Customer => &mut self.customer,
            RewardCategory::NextOrder => &mut self.next_order,
        }
    }

    /// Switch a category's type; its value text is left as typed
    pub fn select_type(&mut self, category: RewardCategory, reward_type: RewardType) {
        self.draft_mut(category).reward_type = reward_type;
    }

    pub fn set_value(&mut self, category: RewardCategory, text: impl Into<String>) {
        self.draft_mut(category).value = text.into();
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// All six fields as the flat payload the save endpoint expects
    pub fn field_set(&self) -> FieldSet {
        let mut fields = FieldSet::new();
        for category in RewardCategory::ALL {
            let draft = self.draft(category);
            fields.insert(
                category.type_key().to_string(),
                draft.reward_type.to_string(),
            );
            fields.insert(category.value_key().to_string(), draft.value.clone());
        }
        fields
    }

    /// Start a save. Returns `None` while a previous save is still in flight.
    pub fn begin_save(&mut self) -> Option<FieldSet> {
        if self.submitting {
            return None;
        }
        self.submitting = true;
        Some(self.field_set())
    }

    pub fn finish_save(&mut self) {
        self.submitting = false;
    }

    pub fn preview(&self) -> Vec<PreviewLine> {
        let amount = |category| {
            let draft = self.draft(category);
            display_amount(draft.reward_type, &draft.value)
        };

        vec![
            PreviewLine {
                label: "Affiliates earn: ",
                text: format!("{} per sale", amount(RewardCategory::Affiliate)),
            },
            PreviewLine {
                label: "Customers get: ",
                text: format!("{} off", amount(RewardCategory::Customer)),
            },
            PreviewLine {
                label: "Next order coupon: ",
                text: format!("{} off", amount(RewardCategory::NextOrder)),
            },
        ]
    }
}
