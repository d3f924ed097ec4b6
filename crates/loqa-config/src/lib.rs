//! # loqa-config
//!
//! Layered configuration loading for loqa using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`LOQA_*` prefix, `__` as separator)
//! 2. An explicit file passed on the command line (`--config`)
//! 3. Project-level `.loqa/config.toml`
//! 4. User-level `~/.config/loqa/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `LOQA_COLUMNS__SOURCE` -> `columns.source`,
//! `LOQA_VERIFY__SAMPLE_SIZE` -> `verify.sample_size`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use loqa_config::LoqaConfig;
//!
//! let config = LoqaConfig::load_with_dotenv(None).expect("config");
//! println!("source column: {}", config.columns.source);
//! ```

mod columns;
mod error;
mod fix;
mod general;
mod terminology;
mod verify;

pub use columns::ColumnsConfig;
pub use error::ConfigError;
pub use fix::FixConfig;
pub use general::GeneralConfig;
pub use terminology::TerminologyConfig;
pub use verify::VerifyConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use loqa_core::SourceTableCatalog;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoqaConfig {
    #[serde(default)]
    pub columns: ColumnsConfig,
    #[serde(default)]
    pub terminology: TerminologyConfig,
    /// Source-table labels in worklist preference order.
    #[serde(default)]
    pub tables: SourceTableCatalog,
    #[serde(default)]
    pub fix: FixConfig,
    #[serde(default)]
    pub verify: VerifyConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl LoqaConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    pub fn load(extra: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(extra).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading `.env` from the current directory.
    pub fn load_with_dotenv(extra: Option<&Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load(extra)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer more providers.
    #[must_use]
    pub fn figment(extra: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".loqa/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        if let Some(path) = extra {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed("LOQA_").split("__"))
    }

    /// Reject values that would make a run meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns.source.trim().is_empty() {
            return Err(invalid("columns.source", "must not be empty"));
        }
        if self.columns.row_id.trim().is_empty() {
            return Err(invalid("columns.row_id", "must not be empty"));
        }
        if self.fix.backup_suffix.trim().is_empty() {
            return Err(invalid(
                "fix.backup_suffix",
                "must not be empty (backups would overwrite the tables)",
            ));
        }
        if self.verify.sample_size == 0 && !self.verify.full_audit {
            return Err(invalid(
                "verify.sample_size",
                "must be at least 1 unless verify.full_audit is set",
            ));
        }
        if let Some(entry) = self
            .tables
            .labels()
            .iter()
            .find(|entry| entry.label.trim().is_empty())
        {
            return Err(invalid(
                "tables",
                &format!("label for patterns {:?} is empty", entry.patterns),
            ));
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("loqa").join("config.toml"))
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
