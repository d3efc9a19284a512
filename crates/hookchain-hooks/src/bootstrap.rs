//! Startup creation of the host's well-known hooks.
//!
//! The registry core has no built-in hook names. Hosts list the names they
//! expose in [`HookSettings::well_known`] and create them once at startup,
//! before any module registers callbacks.

use hookchain_settings::HookSettings;
use tracing::info;

use crate::hook::HookHandle;
use crate::registry::HookRegistry;

/// Create one hook per configured name, in order.
pub fn create_well_known<T>(
    registry: &HookRegistry<T>,
    settings: &HookSettings,
) -> Vec<HookHandle<T>> {
    let handles: Vec<HookHandle<T>> = settings
        .well_known
        .iter()
        .map(|name| registry.create(name))
        .collect();
    info!(count = handles.len(), "well-known hooks created");
    handles
}
