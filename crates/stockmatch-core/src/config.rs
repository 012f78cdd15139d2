use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::rules::{load_rules, ExtractionRules};
use crate::ConfigError;

/// Reads `.env` (when present) into the process environment, then builds the
/// config from `STOCKMATCH_*` variables.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Same as [`load_app_config`] without touching `.env`.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Resolve the extraction rules for `config`: the rules file when one is
/// configured (an explicit `override_path` wins), the built-in defaults
/// otherwise, with the env-level fallback column applied last.
///
/// # Errors
///
/// Returns `ConfigError` if the rules file cannot be loaded or is invalid.
pub fn resolve_rules(
    config: &AppConfig,
    override_path: Option<&std::path::Path>,
) -> Result<ExtractionRules, ConfigError> {
    let path = override_path.or(config.rules_path.as_deref());
    let mut rules = match path {
        Some(p) => load_rules(p)?,
        None => ExtractionRules::default(),
    };
    if let Some(column) = config.usage_fallback_column {
        rules.usage.fallback_column = column;
    }
    Ok(rules)
}

/// Builds the config from an env-var lookup; tests pass a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let defaults = AppConfig::default();

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_usize = |var: &str| -> Result<Option<usize>, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .map(Some)
                .map_err(|e| invalid(var, e.to_string())),
            Err(_) => Ok(None),
        }
    };

    let log_level = lookup("STOCKMATCH_LOG_LEVEL").unwrap_or(defaults.log_level);
    let rules_path = lookup("STOCKMATCH_RULES_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    let max_concurrent_folders = parse_usize("STOCKMATCH_MAX_CONCURRENT_FOLDERS")?
        .unwrap_or(defaults.max_concurrent_folders);
    if max_concurrent_folders == 0 {
        return Err(invalid(
            "STOCKMATCH_MAX_CONCURRENT_FOLDERS",
            "must be at least 1".to_string(),
        ));
    }

    let fallback_encoding =
        lookup("STOCKMATCH_FALLBACK_ENCODING").unwrap_or(defaults.fallback_encoding);

    let csv_delimiter = match lookup("STOCKMATCH_CSV_DELIMITER") {
        Ok(raw) => parse_delimiter(&raw).ok_or_else(|| {
            invalid(
                "STOCKMATCH_CSV_DELIMITER",
                format!("{raw:?} is not a single ASCII character"),
            )
        })?,
        Err(_) => defaults.csv_delimiter,
    };

    let usage_fallback_column = parse_usize("STOCKMATCH_USAGE_FALLBACK_COLUMN")?;

    Ok(AppConfig {
        log_level,
        rules_path,
        max_concurrent_folders,
        fallback_encoding,
        csv_delimiter,
        usage_fallback_column,
    })
}

/// Parse a delimiter setting. `\t` and `tab` are accepted for tab-separated
/// exports.
fn parse_delimiter(raw: &str) -> Option<u8> {
    if matches!(raw, "\\t" | "tab") {
        return Some(b'\t');
    }
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => u8::try_from(c).ok(),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
