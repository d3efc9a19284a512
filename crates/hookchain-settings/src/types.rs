//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase", default)]`, so partial
//! JSON files are accepted and missing fields keep their defaults.

use serde::{Deserialize, Serialize};

/// Hook name fired to let modules check their own validity.
pub const CHECK_MODULE: &str = "checkModule";

/// Hook name fired just before a page is rendered.
pub const SHOW_RENDERING: &str = "showRendering";

/// Root settings type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HookchainSettings {
    /// Settings schema version.
    pub version: String,
    /// Application name.
    pub name: String,
    /// Logging configuration.
    pub logging: LoggingSettings,
    /// Hook bootstrap configuration.
    pub hooks: HookSettings,
}

impl Default for HookchainSettings {
    fn default() -> Self {
        Self {
            version: "0.1.0".to_string(),
            name: "hookchain".to_string(),
            logging: LoggingSettings::default(),
            hooks: HookSettings::default(),
        }
    }
}

/// Logging configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Minimum level for the stderr subscriber (`trace` .. `error`).
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Hooks the host creates at startup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HookSettings {
    /// Names passed to `create` during bootstrap, in order.
    pub well_known: Vec<String>,
}

impl Default for HookSettings {
    fn default() -> Self {
        Self {
            well_known: vec![CHECK_MODULE.to_string(), SHOW_RENDERING.to_string()],
        }
    }
}
