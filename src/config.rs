use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const VERIFY_INPUT_ORDER_ENV: &str = "SERIES_MERGE_VERIFY_INPUT_ORDER";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Check that every raw input is sorted by labels and log a warning when it is not.
    /// Out-of-order input is never rejected or reordered; it only degrades deduplication.
    pub verify_input_order: bool,
}

impl Settings {
    pub fn from_env() -> Self {
        let mut settings = Settings::default();
        if let Some(verify) = get_setting_from_env::<bool>(VERIFY_INPUT_ORDER_ENV) {
            settings.verify_input_order = verify;
        }
        settings
    }

    pub fn verify_input_order(mut self, verify: bool) -> Self {
        self.verify_input_order = verify;
        self
    }
}

static GLOBAL_SETTINGS: OnceLock<Settings> = OnceLock::new();

pub fn get_global_settings() -> &'static Settings {
    GLOBAL_SETTINGS.get_or_init(Settings::from_env)
}

fn get_setting_from_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().to_ascii_lowercase().parse::<T>().ok())
}
