pub mod app_config;
pub mod config;
pub mod records;
pub mod rules;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env, resolve_rules};
pub use records::{
    DeadstockRecord, FileRole, MatchResult, Presence, StoreEntry, StoreUsage, UsageCell,
    UsageRecord,
};
pub use rules::{load_rules, parse_rules, DeadstockRules, ExtractionRules, RoleRules, UsageRules};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read rules file {path}: {source}")]
    RulesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rules file: {0}")]
    RulesFileParse(#[from] serde_yaml::Error),

    #[error("rules validation failed: {0}")]
    Validation(String),
}
