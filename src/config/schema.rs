use serde::{Deserialize, Serialize};

pub const DEFAULT_TICK_RATE_MS: u64 = 250;
pub const DEFAULT_ENVIRONMENTAL_COLOR: &str = "#C5DCA0";
pub const DEFAULT_SOCIAL_COLOR: &str = "#76C1BF";
pub const DEFAULT_GOVERNANCE_COLOR: &str = "#508CA4";

/// Dashboard preferences.
///
/// Every field is optional; a missing file behaves like `{}`.
///
/// Example YAML:
/// ```yaml
/// default_company: Apple
/// theme: dark
/// palette:
///   environmental: "#C5DCA0"
///   social: "#76C1BF"
///   governance: "#508CA4"
/// tick_rate_ms: 250
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Company selected when the dashboard opens (default: first in the dataset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_company: Option<String>,

    #[serde(default)]
    pub theme: ThemeMode,

    /// Category colour overrides, as "#RRGGBB"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub palette: Option<PaletteConfig>,

    /// Dashboard tick interval in milliseconds
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

fn default_tick_rate_ms() -> u64 {
    DEFAULT_TICK_RATE_MS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_company: None,
            theme: ThemeMode::Auto,
            palette: None,
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
        }
    }
}

impl Config {
    /// Fully spelled-out config written by `init`
    pub fn template() -> Self {
        Self {
            default_company: Some("Apple".to_string()),
            theme: ThemeMode::Auto,
            palette: Some(PaletteConfig::default()),
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Detect from the terminal background
    #[default]
    Auto,
    Dark,
    Light,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PaletteConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environmental: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub governance: Option<String>,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            environmental: Some(DEFAULT_ENVIRONMENTAL_COLOR.to_string()),
            social: Some(DEFAULT_SOCIAL_COLOR.to_string()),
            governance: Some(DEFAULT_GOVERNANCE_COLOR.to_string()),
        }
    }
}
