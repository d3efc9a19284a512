//! # hookchain-settings
//!
//! Configuration for hookchain hosts, loaded from three layers (in priority
//! order):
//! 1. **Compiled defaults** — [`HookchainSettings::default()`]
//! 2. **User file** — `~/.hookchain/settings.json` (deep-merged over defaults)
//! 3. **Environment variables** — `HOOKCHAIN_*` overrides (highest priority)
//!
//! The hook registry never reads settings on its own; the host passes the
//! [`HookSettings`] section to the bootstrap step.
//!
//! # Usage
//!
//! ```no_run
//! use hookchain_settings::get_settings;
//!
//! let settings = get_settings();
//! for name in &settings.hooks.well_known {
//!     println!("bootstrapping hook {name}");
//! }
//! ```

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{
    apply_overrides, deep_merge, load_settings, load_settings_from_path, load_settings_with,
    settings_path,
};
pub use types::*;

use std::sync::OnceLock;

static SETTINGS: OnceLock<HookchainSettings> = OnceLock::new();

/// Get the process-wide settings, loading them on first access.
///
/// Falls back to compiled defaults if loading fails.
pub fn get_settings() -> &'static HookchainSettings {
    SETTINGS.get_or_init(|| {
        load_settings().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "failed to load settings, using defaults");
            HookchainSettings::default()
        })
    })
}

/// Initialize the process-wide settings with a specific value.
///
/// Returns the value back if settings were already initialized.
#[allow(clippy::result_large_err)]
pub fn init_settings(settings: HookchainSettings) -> std::result::Result<(), HookchainSettings> {
    SETTINGS.set(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn re_exports_work() {
        let _settings = HookchainSettings::default();
        let _path = settings_path();
        assert!(settings_path().ends_with(".hookchain/settings.json"));
    }

    #[test]
    fn well_known_constants_are_defaults() {
        let hooks = HookSettings::default();
        assert!(hooks.well_known.iter().any(|n| n == CHECK_MODULE));
        assert!(hooks.well_known.iter().any(|n| n == SHOW_RENDERING));
    }
}
