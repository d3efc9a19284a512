//! # hookchain-hooks
//!
//! Synchronous named-event dispatcher.
//!
//! Hosts create named hooks, modules register callbacks on them, and any code
//! holding the registry can trigger a hook by name. Callbacks run in
//! registration order and thread a running result through the chain:
//!
//! - position 0 of the [`HookArgs`] vector is the running result,
//! - a callback returning `Some(v)` replaces it, `None` leaves it,
//! - the final position-0 value is what the trigger returns.
//!
//! Hook names are case-insensitive (folded to a lower-case slug).
//!
//! ## Example
//!
//! ```rust
//! use hookchain_hooks::{Callback, HookArgs, HookRegistry};
//!
//! let registry = HookRegistry::<i64>::new();
//! let _ = registry.create("Price");
//! let _ = registry.register("price", Callback::new(|a: &HookArgs<i64>| Ok(a.result().map(|x| x + 1))));
//! let _ = registry.register("PRICE", Callback::new(|a: &HookArgs<i64>| Ok(a.result().map(|x| x * 2))));
//! assert_eq!(registry.trigger("price", vec![3]).unwrap(), Some(8));
//! ```

#![deny(unsafe_code)]

pub mod bootstrap;
pub mod callback;
pub mod errors;
pub mod hook;
pub mod registry;
pub mod types;

pub use callback::{Callback, CallbackError, CallbackId, CallbackResult, Invocable};
pub use errors::{HookError, Result};
pub use hook::{Hook, HookHandle};
pub use registry::{HookRegistry, slug};
pub use types::{HookArgs, HookState, TriggerArg, TriggerOptions};
