//! Build-time configuration and the user's display settings.

use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;
use yew::prelude::*;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

const SETTINGS_KEY: &str = "settings";

/// Settings baked in at compile time through environment variables.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// Base URL every API path is appended to, without a trailing slash.
    pub api_base_url: String,
    pub log_level: LevelFilter,
}

impl AppConfig {
    /// Reads `FINTRACK_API_URL` and `FINTRACK_LOG` as they were when the
    /// bundle was compiled.
    pub fn from_env() -> Self {
        Self::resolve(option_env!("FINTRACK_API_URL"), option_env!("FINTRACK_LOG"))
    }

    fn resolve(api_url: Option<&str>, log_level: Option<&str>) -> Self {
        let api_base_url = api_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string();

        let log_level = log_level
            .and_then(|level| level.trim().parse::<LevelFilter>().ok())
            .unwrap_or(LevelFilter::INFO);

        Self {
            api_base_url,
            log_level,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    pub currency_code: String,
    pub currency_symbol: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            currency_code: "USD".to_string(),
            currency_symbol: "$".to_string(),
        }
    }
}

impl AppSettings {
    pub fn for_currency(code: &str) -> Self {
        Self {
            currency_code: code.to_string(),
            currency_symbol: currency_symbol_for(code).to_string(),
        }
    }
}

pub fn currency_symbol_for(code: &str) -> &'static str {
    match code {
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        "INR" => "₹",
        "PHP" => "₱",
        _ => "$",
    }
}

pub fn load_settings() -> AppSettings {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(raw)) = storage.get_item(SETTINGS_KEY) {
                if let Ok(settings) = serde_json::from_str::<AppSettings>(&raw) {
                    return settings;
                }
            }
        }
    }
    AppSettings::default()
}

pub fn save_settings(settings: &AppSettings) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(raw) = serde_json::to_string(settings) {
                let _ = storage.set_item(SETTINGS_KEY, &raw);
            }
        }
    }
}

/// The currency symbol from the settings context, `$` outside a provider.
#[hook]
pub fn use_currency_symbol() -> String {
    let settings = use_context::<UseStateHandle<AppSettings>>();
    settings
        .as_ref()
        .map(|s| s.currency_symbol.clone())
        .unwrap_or_else(|| AppSettings::default().currency_symbol)
}

#[cfg(test)]
mod tests {
    use tracing::level_filters::LevelFilter;

    use super::{AppConfig, AppSettings, DEFAULT_API_URL};

    #[test]
    fn falls_back_to_defaults() {
        let config = AppConfig::resolve(None, None);

        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert_eq!(config.log_level, LevelFilter::INFO);
    }

    #[test]
    fn strips_trailing_slash_from_api_url() {
        let config = AppConfig::resolve(Some("https://example.com/api/"), Some("debug"));

        assert_eq!(config.api_base_url, "https://example.com/api");
        assert_eq!(config.log_level, LevelFilter::DEBUG);
    }

    #[test]
    fn ignores_blank_url_and_unknown_level() {
        let config = AppConfig::resolve(Some("   "), Some("loud"));

        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert_eq!(config.log_level, LevelFilter::INFO);
    }

    #[test]
    fn currency_settings_pick_matching_symbol() {
        assert_eq!(AppSettings::for_currency("EUR").currency_symbol, "€");
        assert_eq!(AppSettings::for_currency("???").currency_symbol, "$");
    }
}
