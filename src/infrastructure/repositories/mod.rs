//! Repository implementations using SeaORM

pub mod reward_settings_repository;

pub use reward_settings_repository::SeaOrmRewardSettingsRepository;
