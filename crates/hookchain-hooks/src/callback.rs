//! Callbacks and their identities.
//!
//! Closures cannot be compared, so every [`Callback`] carries a
//! [`CallbackId`]. Cloning a callback keeps its id; constructing a new one
//! mints a fresh id even if the closure body is identical. Duplicate
//! detection on a hook compares ids.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::HookArgs;

/// Error a callback may return to abort the chain.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

/// What a callback returns: `Some` replaces the running result, `None` keeps it.
pub type CallbackResult<T> = std::result::Result<Option<T>, CallbackError>;

type CallbackFn<T> = dyn Fn(&HookArgs<T>) -> CallbackResult<T> + Send + Sync;

/// Stable identity of a registered callback.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallbackId(String);

impl CallbackId {
    /// Mint a new random id (UUID v7, time-ordered).
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Return the inner string as a slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CallbackId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CallbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for CallbackId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CallbackId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// An invocable hook callback.
pub struct Callback<T> {
    id: CallbackId,
    func: Arc<CallbackFn<T>>,
}

impl<T> Callback<T> {
    /// Wrap a closure under a freshly minted id.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&HookArgs<T>) -> CallbackResult<T> + Send + Sync + 'static,
    {
        Self::with_id(CallbackId::new(), func)
    }

    /// Wrap a closure under a caller-chosen id.
    ///
    /// Two callbacks built with the same id count as the same callback.
    pub fn with_id<F>(id: impl Into<CallbackId>, func: F) -> Self
    where
        F: Fn(&HookArgs<T>) -> CallbackResult<T> + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            func: Arc::new(func),
        }
    }

    /// Identity used for duplicate detection.
    #[must_use]
    pub fn id(&self) -> &CallbackId {
        &self.id
    }

    /// Invoke the callback with the current parameter vector.
    pub fn call(&self, args: &HookArgs<T>) -> CallbackResult<T> {
        (self.func)(args)
    }
}

impl<T> Clone for Callback<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            func: Arc::clone(&self.func),
        }
    }
}

impl<T> fmt::Debug for Callback<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback").field("id", &self.id).finish()
    }
}

/// What a caller hands to [`HookRegistry::register`](crate::registry::HookRegistry::register).
#[derive(Debug, Clone)]
pub enum Invocable<T> {
    /// A concrete callback.
    Callback(Callback<T>),
    /// The name of a callable published with
    /// [`HookRegistry::define_callable`](crate::registry::HookRegistry::define_callable),
    /// resolved at registration time.
    Named(String),
}

impl<T> From<Callback<T>> for Invocable<T> {
    fn from(callback: Callback<T>) -> Self {
        Self::Callback(callback)
    }
}

impl<T> From<&str> for Invocable<T> {
    fn from(name: &str) -> Self {
        Self::Named(name.to_owned())
    }
}

impl<T> From<String> for Invocable<T> {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}
