//! Hook registry.
//!
//! Maps hook slugs to [`Hook`] instances. Every entry point folds the given
//! name to its slug first, so lookups are case-insensitive. Entries are only
//! ever added; [`create`](HookRegistry::create) on an existing slug replaces
//! the hook and drops its callbacks.

use std::collections::HashMap;
use std::sync::Arc;

use hookchain_settings::HookSettings;
use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::callback::{Callback, Invocable};
use crate::errors::{HookError, Result};
use crate::hook::{Hook, HookHandle};
use crate::types::{HookArgs, TriggerArg, TriggerOptions};

/// Fold a hook name to its registry key.
///
/// Folds one character at a time, so a letter's key never depends on its
/// neighbours (`Σ` is always `σ`, even word-final).
pub fn slug(name: &str) -> String {
    name.chars().flat_map(char::to_lowercase).collect()
}

/// Registry of named hooks.
///
/// Generic over the payload type threaded through callbacks; defaults to
/// [`serde_json::Value`]. Safe to share across threads. Locks are never held
/// while callbacks run.
pub struct HookRegistry<T = serde_json::Value> {
    hooks: RwLock<HashMap<String, HookHandle<T>>>,
    callables: RwLock<HashMap<String, Callback<T>>>,
}

impl<T> Default for HookRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> HookRegistry<T> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            hooks: RwLock::new(HashMap::new()),
            callables: RwLock::new(HashMap::new()),
        }
    }

    /// Create a registry with the configured well-known hooks already defined.
    #[must_use]
    pub fn from_settings(settings: &HookSettings) -> Self {
        let registry = Self::new();
        let _ = crate::bootstrap::create_well_known(&registry, settings);
        registry
    }

    /// Define a hook, replacing any hook already stored under the same slug.
    pub fn create(&self, name: &str) -> HookHandle<T> {
        let key = slug(name);
        let hook = Arc::new(Hook::new(key.clone()));

        let previous = self.hooks.write().insert(key.clone(), Arc::clone(&hook));
        match previous {
            Some(old) if !old.is_empty() => {
                warn!(hook = %key, discarded = old.len(), "hook re-created, dropping its callbacks");
            }
            _ => debug!(hook = %key, "hook created"),
        }
        hook
    }

    /// Publish a callback under a callable name for later registration by name.
    ///
    /// Callable names are case-sensitive. Re-defining a name replaces it.
    pub fn define_callable(&self, name: impl Into<String>, callback: Callback<T>) {
        let name = name.into();
        debug!(callable = %name, callback = %callback.id(), "callable defined");
        let _ = self.callables.write().insert(name, callback);
    }

    /// Append a callback to the named hook.
    ///
    /// Fails with [`HookError::UnknownHook`] if the hook was never created,
    /// [`HookError::NotInvocable`] if a named invocable has no published
    /// callable, and [`HookError::DuplicateCallback`] if it is already there.
    pub fn register(&self, name: &str, invocable: impl Into<Invocable<T>>) -> Result<HookHandle<T>> {
        let hook = self.lookup(name)?;
        let callback = match invocable.into() {
            Invocable::Callback(callback) => callback,
            Invocable::Named(target) => self.callables.read().get(&target).cloned().ok_or_else(|| {
                HookError::NotInvocable {
                    hook: hook.name().to_string(),
                    target,
                }
            })?,
        };

        let _ = hook.register_hook(callback)?;
        Ok(hook)
    }

    /// Trigger a hook; fails if it does not exist.
    ///
    /// `args[0]` seeds the running result, the rest are passed through to
    /// every callback.
    pub fn trigger(&self, name: &str, args: Vec<T>) -> Result<Option<T>> {
        self.trigger_with_options(name, TriggerOptions::default(), args)
    }

    /// Trigger a hook; a missing hook yields `Ok(None)`.
    pub fn trigger_silent(&self, name: &str, args: Vec<T>) -> Result<Option<T>> {
        self.trigger_with_options(name, TriggerOptions::silent(), args)
    }

    /// Trigger a hook with explicit options.
    pub fn trigger_with_options(
        &self,
        name: &str,
        options: TriggerOptions,
        args: Vec<T>,
    ) -> Result<Option<T>> {
        self.dispatch(name, options, HookArgs::from_vec(args))
    }

    /// Trigger using the flag-or-first-value calling convention.
    ///
    /// `first` is either the silent flag (a plain `bool` converts to
    /// [`TriggerArg::Silent`]) or [`TriggerArg::Value`], the first payload
    /// argument. See [`TriggerArg::resolve`].
    pub fn trigger_with(
        &self,
        name: &str,
        first: impl Into<TriggerArg<T>>,
        rest: Vec<T>,
    ) -> Result<Option<T>> {
        let (options, params) = first.into().resolve(rest);
        self.dispatch(name, options, params)
    }

    /// Handle to the hook stored under `name`, if any.
    pub fn get(&self, name: &str) -> Option<HookHandle<T>> {
        self.hooks.read().get(&slug(name)).cloned()
    }

    /// Whether a hook exists under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.hooks.read().contains_key(&slug(name))
    }

    /// Number of defined hooks.
    pub fn len(&self) -> usize {
        self.hooks.read().len()
    }

    /// Whether no hook is defined.
    pub fn is_empty(&self) -> bool {
        self.hooks.read().is_empty()
    }

    /// Slugs of all defined hooks, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.hooks.read().keys().cloned().collect();
        names.sort();
        names
    }

    fn lookup(&self, name: &str) -> Result<HookHandle<T>> {
        let key = slug(name);
        // Clone the handle out so the map lock is released before callbacks run.
        let hook = self.hooks.read().get(&key).cloned();
        hook.ok_or(HookError::UnknownHook { name: key })
    }

    fn dispatch(&self, name: &str, options: TriggerOptions, params: HookArgs<T>) -> Result<Option<T>> {
        match self.lookup(name) {
            Ok(hook) => hook.trigger_hook(Some(params)),
            Err(err) if options.silent && err.is_unknown_hook() => {
                debug!(error = %err, "silent trigger of missing hook");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}

impl<T> std::fmt::Debug for HookRegistry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookRegistry")
            .field("hook_count", &self.len())
            .finish()
    }
}
