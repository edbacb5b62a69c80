//! Settings loaded from TOML.
//!
//! - `Settings::default()` parses the embedded `default_settings.toml`
//! - `Settings::load(path)` reads and validates a custom file
//! - the resulting value is built once at startup and handed to the objects
//!   that need it; there is no global instance

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::client::Endpoint;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub service: ServiceSettings,
    pub render: RenderSettings,
    pub ui: UiSettings,
    pub messages: Messages,
    pub speech: SpeechSettings,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path)?;
        parse_settings_toml(&content)
    }
}

impl Default for Settings {
    fn default() -> Self {
        parse_settings_toml(DEFAULT_SETTINGS_TOML).expect("embedded settings TOML must be valid")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceSettings {
    pub base_url: String,
    pub timeout_ms: u64,
    pub endpoint: Endpoint,
}

impl ServiceSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderSettings {
    pub highlight_style: String,
}

/// Geometry of the trigger button and popup, in page pixels.
#[derive(Debug, Clone, Deserialize)]
pub struct UiSettings {
    pub button_size: f64,
    pub button_offset: f64,
    pub popup_gap: f64,
    pub loading_message: String,
}

/// Visible fallbacks substituted for failed annotations.
#[derive(Debug, Clone, Deserialize)]
pub struct Messages {
    pub unreachable: String,
    pub parse_error: String,
    pub no_input: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpeechSettings {
    pub locale: String,
    pub rate: f32,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_positive {
        ($section:ident . $field:ident) => {
            if !(s.$section.$field > Default::default()) {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }
    macro_rules! check_non_negative {
        ($section:ident . $field:ident) => {
            if s.$section.$field < 0.0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be non-negative".to_string(),
                });
            }
        };
    }
    macro_rules! check_non_empty {
        ($section:ident . $field:ident) => {
            if s.$section.$field.trim().is_empty() {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        };
    }

    check_non_empty!(service.base_url);
    if !s.service.base_url.starts_with("http://") && !s.service.base_url.starts_with("https://") {
        return Err(SettingsError::InvalidValue {
            field: "service.base_url".to_string(),
            reason: "must start with http:// or https://".to_string(),
        });
    }
    check_positive!(service.timeout_ms);

    check_non_empty!(render.highlight_style);

    check_positive!(ui.button_size);
    check_non_negative!(ui.button_offset);
    check_non_negative!(ui.popup_gap);

    check_non_empty!(messages.unreachable);
    check_non_empty!(messages.parse_error);
    check_non_empty!(messages.no_input);

    check_non_empty!(speech.locale);
    check_positive!(speech.rate);
    if s.speech.rate > 10.0 {
        return Err(SettingsError::InvalidValue {
            field: "speech.rate".to_string(),
            reason: "must be at most 10".to_string(),
        });
    }

    Ok(())
}
