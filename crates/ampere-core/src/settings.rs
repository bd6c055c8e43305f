//! User settings shared by all screens

use serde::{Deserialize, Serialize};

use crate::backend::BackendConfig;
use crate::units::{FiatRate, Units};

/// Color scheme selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
}

impl std::str::FromStr for ThemeName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Ok(ThemeName::Dark),
            "light" => Ok(ThemeName::Light),
            other => Err(format!("unknown theme: {}", other)),
        }
    }
}

/// Wallet settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Color scheme
    #[serde(default)]
    pub theme: ThemeName,

    /// Units shown at startup
    #[serde(default)]
    pub units: Units,

    /// Optional fiat rate; enables the fiat unit
    #[serde(default)]
    pub fiat: Option<FiatRate>,

    /// Where payments are sent
    #[serde(default)]
    pub backend: BackendConfig,
}
