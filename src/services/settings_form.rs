//! Field-set coercion
//!
//! The settings form arrives as a flat string-keyed payload. This is the
//! single place where it becomes a typed `RewardSettings`.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::domain::{DomainError, RewardCategory, RewardRule, RewardSettings, RewardType};

/// Flat form payload, e.g. `affiliate_reward_value => "10"`
pub type FieldSet = HashMap<String, String>;

/// Coercion policy for submitted values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveOptions {
    /// Reject values with no numeric prefix instead of storing NaN
    pub strict_values: bool,
}

fn count_digits(bytes: &[u8], start: usize) -> usize {
    bytes
        .get(start..)
        .map(|rest| rest.iter().take_while(|b| b.is_ascii_digit()).count())
        .unwrap_or(0)
}

/// Parse the longest numeric prefix of `text`, the way a browser's
/// `parseFloat` does. No numeric prefix gives NaN.
pub fn parse_float(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_digits = count_digits(bytes, end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(bytes, end + 1);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(bytes, exp_end);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

fn parse_type(fields: &FieldSet, key: &str) -> Result<RewardType, DomainError> {
    fields
        .get(key)
        .ok_or_else(|| DomainError::Validation(format!("Missing field '{}'", key)))?
        .parse()
}

fn parse_value(fields: &FieldSet, key: &str, options: SaveOptions) -> Result<f64, DomainError> {
    let value = fields.get(key).map(|v| parse_float(v)).unwrap_or(f64::NAN);

    if value.is_nan() && options.strict_values {
        return Err(DomainError::Validation(format!(
            "Field '{}' must be a number",
            key
        )));
    }

    Ok(value)
}

/// Turn a submitted field set into the record written for `shop`
pub fn parse_settings_form(
    shop: &str,
    fields: &FieldSet,
    options: SaveOptions,
    now: DateTime<Utc>,
) -> Result<RewardSettings, DomainError> {
    let mut settings = RewardSettings::defaults_for(shop);

    for category in RewardCategory::ALL {
        let rule = RewardRule {
            reward_type: parse_type(fields, category.type_key())?,
            value: parse_value(fields, category.value_key(), options)?,
        };
        settings.set_rule(category, rule);
    }

    settings.updated_at = Some(now.to_rfc3339());
    Ok(settings)
}
