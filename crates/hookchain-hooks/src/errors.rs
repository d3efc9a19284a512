//! Hook error types.

use thiserror::Error;

use crate::callback::{CallbackError, CallbackId};

/// Errors raised by the registry and by individual hooks.
#[derive(Debug, Error)]
pub enum HookError {
    /// No hook exists under the given name.
    #[error("no hook named '{name}'")]
    UnknownHook {
        /// Slug that was looked up.
        name: String,
    },

    /// The same callback was registered twice on one hook.
    #[error("callback {callback} is already registered on hook '{hook}'")]
    DuplicateCallback {
        /// Hook slug.
        hook: String,
        /// Identity of the rejected callback.
        callback: CallbackId,
    },

    /// A named invocable did not resolve to a published callable.
    #[error("'{target}' is not callable (registering on hook '{hook}')")]
    NotInvocable {
        /// Hook slug.
        hook: String,
        /// Callable name that failed to resolve.
        target: String,
    },

    /// A callback failed; the rest of the chain did not run.
    #[error("callback #{index} of hook '{hook}' failed: {source}")]
    Callback {
        /// Hook slug.
        hook: String,
        /// Position of the failing callback in registration order.
        index: usize,
        /// Error returned by the callback.
        #[source]
        source: CallbackError,
    },
}

impl HookError {
    /// Whether this is an [`UnknownHook`](Self::UnknownHook) error.
    #[must_use]
    pub fn is_unknown_hook(&self) -> bool {
        matches!(self, Self::UnknownHook { .. })
    }
}

/// Result type for hook operations.
pub type Result<T> = std::result::Result<T, HookError>;
