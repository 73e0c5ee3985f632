//! Presentation: form state and the rendered settings page

pub mod form;
pub mod page;

pub use form::{PreviewLine, RuleDraft, SettingsForm, display_amount, format_number};
pub use page::render_settings_page;
