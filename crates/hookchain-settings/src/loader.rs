//! Settings loading.
//!
//! Layers, lowest priority first: compiled defaults, the user's
//! `~/.hookchain/settings.json`, then `HOOKCHAIN_*` variables. The merged
//! result is validated before it reaches the hook bootstrap.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::{Result, SettingsError};
use crate::types::HookchainSettings;

/// Overrides `logging.level`.
pub const ENV_LOG_LEVEL: &str = "HOOKCHAIN_LOG_LEVEL";

/// Overrides `hooks.wellKnown` with a comma-separated list.
pub const ENV_HOOKS: &str = "HOOKCHAIN_HOOKS";

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// `~/.hookchain/settings.json`, or under `/tmp` when `HOME` is unset.
pub fn settings_path() -> PathBuf {
    std::env::var_os("HOME")
        .map_or_else(|| PathBuf::from("/tmp"), PathBuf::from)
        .join(".hookchain")
        .join("settings.json")
}

/// Load from [`settings_path`] with the process environment applied.
pub fn load_settings() -> Result<HookchainSettings> {
    load_settings_from_path(&settings_path())
}

/// Load from `path` with the process environment applied.
pub fn load_settings_from_path(path: &Path) -> Result<HookchainSettings> {
    load_settings_with(path, |key| std::env::var(key).ok())
}

/// Load from `path`, reading overrides through `lookup` instead of the
/// process environment.
///
/// A missing file leaves the defaults untouched; an unreadable or malformed
/// one is an error.
pub fn load_settings_with(
    path: &Path,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<HookchainSettings> {
    let mut layered = serde_json::to_value(HookchainSettings::default())?;
    if let Some(user) = read_user_layer(path)? {
        layered = deep_merge(layered, user);
    }

    let mut settings: HookchainSettings = serde_json::from_value(layered)?;
    apply_overrides(&mut settings, lookup);
    validate(&settings)?;
    Ok(settings)
}

fn read_user_layer(path: &Path) -> Result<Option<Value>> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            debug!(?path, "merging user settings file");
            Ok(Some(serde_json::from_str(&content)?))
        }
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(?path, "no user settings file");
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

/// Merge `source` into `target`.
///
/// Objects merge key by key; any other `source` value wins outright, except
/// `null`, which keeps what `target` had.
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut into), Value::Object(from)) => {
            for (key, value) in from.into_iter().filter(|(_, v)| !v.is_null()) {
                let slot = into.entry(key).or_insert(Value::Null);
                let previous = slot.take();
                *slot = deep_merge(previous, value);
            }
            Value::Object(into)
        }
        (_, source) => source,
    }
}

/// Apply `HOOKCHAIN_*` overrides fetched through `lookup`.
///
/// Unset keys change nothing; values that do not parse are skipped with a
/// warning.
pub fn apply_overrides(settings: &mut HookchainSettings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(raw) = lookup(ENV_LOG_LEVEL) {
        match parse_log_level(&raw) {
            Some(level) => settings.logging.level = level,
            None => warn!(key = ENV_LOG_LEVEL, value = %raw, "invalid log level override, ignoring"),
        }
    }
    if let Some(raw) = lookup(ENV_HOOKS) {
        match parse_hook_list(&raw) {
            Some(names) => settings.hooks.well_known = names,
            None => warn!(key = ENV_HOOKS, value = %raw, "empty hook list override, ignoring"),
        }
    }
}

/// Reject settings the registry bootstrap cannot use.
pub fn validate(settings: &HookchainSettings) -> Result<()> {
    if let Some(pos) = settings
        .hooks
        .well_known
        .iter()
        .position(|name| name.trim().is_empty())
    {
        return Err(SettingsError::InvalidValue(format!(
            "hooks.wellKnown[{pos}] is blank"
        )));
    }
    if parse_log_level(&settings.logging.level).is_none() {
        return Err(SettingsError::InvalidValue(format!(
            "unknown logging.level '{}'",
            settings.logging.level
        )));
    }
    Ok(())
}

/// Normalize a log level name, accepting `warning` for `warn`.
pub fn parse_log_level(val: &str) -> Option<String> {
    let lower = val.trim().to_lowercase();
    let lower = if lower == "warning" { "warn".to_string() } else { lower };
    LOG_LEVELS.contains(&lower.as_str()).then_some(lower)
}

/// Split a comma-separated hook list, dropping blanks.
///
/// Returns `None` when nothing remains.
pub fn parse_hook_list(val: &str) -> Option<Vec<String>> {
    let names: Vec<String> = val
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect();
    (!names.is_empty()).then_some(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HookSettings;
    use assert_matches::assert_matches;

    // ── deep_merge ──────────────────────────────────────────────────

    #[test]
    fn merge_nested_override() {
        let target = serde_json::json!({"logging": {"level": "warn"}, "name": "hookchain"});
        let source = serde_json::json!({"logging": {"level": "debug"}});
        let merged = deep_merge(target, source);
        assert_eq!(merged["logging"]["level"], "debug");
        assert_eq!(merged["name"], "hookchain");
    }

    #[test]
    fn merge_array_replaces() {
        let target = serde_json::json!({"wellKnown": ["a", "b"]});
        let source = serde_json::json!({"wellKnown": ["c"]});
        assert_eq!(deep_merge(target, source)["wellKnown"], serde_json::json!(["c"]));
    }

    #[test]
    fn merge_null_preserves_target() {
        let target = serde_json::json!({"a": 1});
        let source = serde_json::json!({"a": null});
        assert_eq!(deep_merge(target, source)["a"], 1);
    }

    // ── parsing ─────────────────────────────────────────────────────

    #[test]
    fn log_level_parsing() {
        assert_eq!(parse_log_level("DEBUG").as_deref(), Some("debug"));
        assert_eq!(parse_log_level(" warning ").as_deref(), Some("warn"));
        assert_eq!(parse_log_level("loud"), None);
    }

    #[test]
    fn hook_list_parsing() {
        assert_eq!(
            parse_hook_list("checkModule, showRendering,,"),
            Some(vec!["checkModule".to_string(), "showRendering".to_string()])
        );
        assert_eq!(parse_hook_list(" , "), None);
    }

    // ── validate ────────────────────────────────────────────────────

    #[test]
    fn validate_rejects_blank_hook_name() {
        let mut settings = HookchainSettings::default();
        settings.hooks.well_known.push("  ".to_string());
        let err = validate(&settings).unwrap_err();
        assert_matches!(err, SettingsError::InvalidValue(ref msg) if msg.contains("[2]"));
    }

    #[test]
    fn validate_rejects_unknown_level() {
        let mut settings = HookchainSettings::default();
        settings.logging.level = "loud".to_string();
        assert_matches!(validate(&settings), Err(SettingsError::InvalidValue(_)));
    }

    // ── apply_overrides ─────────────────────────────────────────────

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
    }

    #[test]
    fn overrides_replace_level_and_hooks() {
        let mut settings = HookchainSettings::default();
        apply_overrides(
            &mut settings,
            vars(&[(ENV_LOG_LEVEL, "Warning"), (ENV_HOOKS, "beforeSave, afterSave")]),
        );
        assert_eq!(settings.logging.level, "warn");
        assert_eq!(settings.hooks.well_known, vec!["beforeSave", "afterSave"]);
    }

    #[test]
    fn unset_overrides_change_nothing() {
        let mut settings = HookchainSettings::default();
        apply_overrides(&mut settings, |_| None);
        assert_eq!(settings, HookchainSettings::default());
    }

    #[test]
    fn invalid_level_override_is_ignored() {
        let mut settings = HookchainSettings::default();
        settings.logging.level = "debug".to_string();
        apply_overrides(&mut settings, vars(&[(ENV_LOG_LEVEL, "loud")]));
        assert_eq!(settings.logging.level, "debug");
    }

    #[test]
    fn blank_hook_list_override_is_ignored() {
        let defaults = HookSettings::default().well_known;
        for raw in ["", " , ,", ","] {
            let mut settings = HookchainSettings::default();
            apply_overrides(&mut settings, vars(&[(ENV_HOOKS, raw)]));
            assert_eq!(settings.hooks.well_known, defaults, "override {raw:?}");
        }
    }

    // ── load_settings_with ──────────────────────────────────────────

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings_with(&dir.path().join("nope.json"), |_| None).unwrap();
        assert_eq!(settings, HookchainSettings::default());
    }

    #[test]
    fn file_values_merge_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"hooks": {"wellKnown": ["beforeSave"]}}"#).unwrap();

        let settings = load_settings_with(&path, |_| None).unwrap();
        assert_eq!(settings.name, "hookchain");
        assert_eq!(settings.hooks.well_known, vec!["beforeSave"]);
    }

    #[test]
    fn overrides_win_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"logging": {"level": "info"}, "hooks": {"wellKnown": ["beforeSave"]}}"#,
        )
        .unwrap();

        let settings =
            load_settings_with(&path, vars(&[(ENV_LOG_LEVEL, "trace"), (ENV_HOOKS, ",")])).unwrap();
        assert_eq!(settings.logging.level, "trace");
        assert_eq!(settings.hooks.well_known, vec!["beforeSave"]);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_matches!(load_settings_with(&path, |_| None), Err(SettingsError::Json(_)));
    }

    #[test]
    fn unreadable_path_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert_matches!(load_settings_with(dir.path(), |_| None), Err(SettingsError::Io(_)));
    }

    #[test]
    fn blank_name_in_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"hooks": {"wellKnown": [""]}}"#).unwrap();
        assert_matches!(
            load_settings_with(&path, |_| None),
            Err(SettingsError::InvalidValue(_))
        );
    }
}
