//! A single named hook and its callback chain.
//!
//! Callbacks run in registration order. Each one receives the whole
//! parameter vector; a `Some` return replaces the running result (position
//! 0) before the next callback runs, a `None` return leaves it alone. The
//! value left in position 0 is the trigger's result.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, trace, warn};

use crate::callback::{Callback, CallbackId};
use crate::errors::{HookError, Result};
use crate::types::{HookArgs, HookState};

/// Shared handle to a hook owned by a registry.
pub type HookHandle<T> = Arc<Hook<T>>;

/// A named, append-only chain of callbacks.
pub struct Hook<T> {
    name: String,
    callbacks: RwLock<Vec<Callback<T>>>,
}

impl<T> Hook<T> {
    /// Create an empty hook. `name` should already be a slug.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            callbacks: RwLock::new(Vec::new()),
        }
    }

    /// The hook's slug.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of registered callbacks.
    pub fn len(&self) -> usize {
        self.callbacks.read().len()
    }

    /// Whether no callback is registered.
    pub fn is_empty(&self) -> bool {
        self.callbacks.read().is_empty()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> HookState {
        if self.is_empty() {
            HookState::Empty
        } else {
            HookState::Populated
        }
    }

    /// Ids of the registered callbacks, in invocation order.
    pub fn callback_ids(&self) -> Vec<CallbackId> {
        self.callbacks.read().iter().map(|c| c.id().clone()).collect()
    }

    /// Append a callback.
    ///
    /// Fails with [`HookError::DuplicateCallback`] if a callback with the
    /// same id is already registered. Returns `self` for chaining.
    pub fn register_hook(&self, callback: Callback<T>) -> Result<&Self> {
        let mut callbacks = self.callbacks.write();
        if callbacks.iter().any(|c| c.id() == callback.id()) {
            return Err(HookError::DuplicateCallback {
                hook: self.name.clone(),
                callback: callback.id().clone(),
            });
        }

        debug!(hook = %self.name, callback = %callback.id(), position = callbacks.len(), "registering callback");
        callbacks.push(callback);
        Ok(self)
    }

    /// Run the chain.
    ///
    /// Absent `params` default to a single empty result slot. The callback
    /// list is snapshotted first, so callbacks may register further
    /// callbacks; those run from the next trigger on. A callback error stops
    /// the chain and is returned as [`HookError::Callback`].
    pub fn trigger_hook(&self, params: Option<HookArgs<T>>) -> Result<Option<T>> {
        let chain: Vec<Callback<T>> = self.callbacks.read().clone();
        let mut params = params.unwrap_or_default();

        for (index, callback) in chain.iter().enumerate() {
            trace!(hook = %self.name, index, callback = %callback.id(), "invoking callback");
            match callback.call(&params) {
                Ok(Some(value)) => params.set_result(value),
                Ok(None) => {}
                Err(source) => {
                    warn!(hook = %self.name, index, callback = %callback.id(), error = %source, "callback failed, aborting chain");
                    return Err(HookError::Callback {
                        hook: self.name.clone(),
                        index,
                        source,
                    });
                }
            }
        }

        Ok(params.into_result())
    }
}

impl<T> std::fmt::Debug for Hook<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hook")
            .field("name", &self.name)
            .field("callback_count", &self.len())
            .finish()
    }
}
