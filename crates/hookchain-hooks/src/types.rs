//! Trigger arguments and hook state.

use serde::{Deserialize, Serialize};

/// The parameter vector passed to every callback of a trigger.
///
/// Position 0 is the running result. Positions 1.. are the trailing context
/// arguments, which the dispatcher never modifies.
#[derive(Debug, Clone, PartialEq)]
pub struct HookArgs<T> {
    result: Option<T>,
    rest: Vec<T>,
}

impl<T> HookArgs<T> {
    /// Build from an explicit result slot and trailing arguments.
    #[must_use]
    pub fn new(result: Option<T>, rest: Vec<T>) -> Self {
        Self { result, rest }
    }

    /// Build from a flat argument list; the first element seeds the result.
    #[must_use]
    pub fn from_vec(params: Vec<T>) -> Self {
        let mut iter = params.into_iter();
        let result = iter.next();
        Self {
            result,
            rest: iter.collect(),
        }
    }

    /// The running result (position 0).
    pub fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    /// Trailing context arguments (positions 1..).
    pub fn rest(&self) -> &[T] {
        &self.rest
    }

    /// Positional access; `get(0)` is the running result.
    pub fn get(&self, index: usize) -> Option<&T> {
        match index {
            0 => self.result.as_ref(),
            n => self.rest.get(n - 1),
        }
    }

    /// Number of positions, counting the result slot.
    pub fn arity(&self) -> usize {
        1 + self.rest.len()
    }

    /// Consume the vector, keeping only the result.
    pub fn into_result(self) -> Option<T> {
        self.result
    }

    pub(crate) fn set_result(&mut self, value: T) {
        self.result = Some(value);
    }
}

impl<T> Default for HookArgs<T> {
    /// `[absent]`: one empty result slot, no trailing arguments.
    fn default() -> Self {
        Self {
            result: None,
            rest: Vec::new(),
        }
    }
}

/// Options for a trigger call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TriggerOptions {
    /// Return `None` instead of failing when the hook does not exist.
    pub silent: bool,
}

impl TriggerOptions {
    /// Options with `silent` set.
    #[must_use]
    pub fn silent() -> Self {
        Self { silent: true }
    }
}

/// The second positional argument of a legacy-style trigger: either the
/// silent flag or the first payload value.
#[derive(Debug, Clone, PartialEq)]
pub enum TriggerArg<T> {
    /// Only the silent flag; the payload comes entirely from the rest.
    Silent(bool),
    /// First payload value; silent is implicitly `false`.
    Value(T),
}

impl<T> TriggerArg<T> {
    /// Resolve into options and the parameter vector.
    ///
    /// `Silent(b)` yields `silent = b` with params built from `rest`;
    /// `Value(v)` yields `silent = false` with params `[v, rest..]`.
    #[must_use]
    pub fn resolve(self, rest: Vec<T>) -> (TriggerOptions, HookArgs<T>) {
        match self {
            Self::Silent(silent) => (TriggerOptions { silent }, HookArgs::from_vec(rest)),
            Self::Value(first) => (TriggerOptions::default(), HookArgs::new(Some(first), rest)),
        }
    }
}

impl<T> From<bool> for TriggerArg<T> {
    fn from(silent: bool) -> Self {
        Self::Silent(silent)
    }
}

/// Lifecycle state of a hook. Transitions only go from `Empty` to `Populated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HookState {
    /// Created, no callbacks yet.
    Empty,
    /// At least one callback registered.
    Populated,
}

impl std::fmt::Display for HookState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Populated => write!(f, "populated"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_single_absent_slot() {
        let args = HookArgs::<i64>::default();
        assert_eq!(args.arity(), 1);
        assert!(args.result().is_none());
        assert!(args.rest().is_empty());
    }

    #[test]
    fn from_vec_seeds_result() {
        let args = HookArgs::from_vec(vec![3, 7, 9]);
        assert_eq!(args.result(), Some(&3));
        assert_eq!(args.rest(), &[7, 9]);
        assert_eq!(args.get(0), Some(&3));
        assert_eq!(args.get(2), Some(&9));
        assert_eq!(args.get(3), None);
        assert_eq!(args.arity(), 3);
    }

    #[test]
    fn from_empty_vec_matches_default() {
        assert_eq!(HookArgs::<i64>::from_vec(Vec::new()), HookArgs::default());
    }

    #[test]
    fn set_result_replaces_slot_only() {
        let mut args = HookArgs::new(None, vec![1, 2]);
        args.set_result(10);
        assert_eq!(args.result(), Some(&10));
        assert_eq!(args.rest(), &[1, 2]);
        assert_eq!(args.into_result(), Some(10));
    }

    #[test]
    fn silent_flag_resolution() {
        let (opts, args) = TriggerArg::<i64>::Silent(true).resolve(vec![5, 6]);
        assert!(opts.silent);
        assert_eq!(args.result(), Some(&5));
        assert_eq!(args.rest(), &[6]);

        let (opts, args) = TriggerArg::<i64>::from(false).resolve(Vec::new());
        assert!(!opts.silent);
        assert_eq!(args, HookArgs::default());
    }

    #[test]
    fn value_resolution_prepends_first() {
        let (opts, args) = TriggerArg::Value(1).resolve(vec![2, 3]);
        assert!(!opts.silent);
        assert_eq!(args.result(), Some(&1));
        assert_eq!(args.rest(), &[2, 3]);
    }

    #[test]
    fn bool_payloads_need_explicit_value() {
        let (opts, args) = TriggerArg::Value(true).resolve(Vec::new());
        assert!(!opts.silent);
        assert_eq!(args.result(), Some(&true));
    }

    #[test]
    fn state_display_and_serde() {
        assert_eq!(HookState::Empty.to_string(), "empty");
        assert_eq!(
            serde_json::to_string(&HookState::Populated).unwrap(),
            "\"populated\""
        );
    }

    #[test]
    fn silent_options() {
        assert!(TriggerOptions::silent().silent);
        assert!(!TriggerOptions::default().silent);
    }
}
