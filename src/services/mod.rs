//! Services Layer
//!
//! This module contains the business logic behind the settings page.
//! Handlers resolve the caller and hand the collaborators in explicitly.

pub mod reward_settings_service;
pub mod settings_form;

// Re-export for convenience
pub use reward_settings_service::{SaveOutcome, load_settings, save_settings};
pub use settings_form::{FieldSet, SaveOptions, parse_float, parse_settings_form};
