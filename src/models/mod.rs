pub mod reward_settings;
