use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::utils::{LedgerError, Result};

/// Default ledger document, relative to the process working directory.
pub const DEFAULT_LEDGER_FILE: &str = "certificate_ledger.json";

/// What to do when the persisted ledger fails to load or validate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorruptPolicy {
    /// Discard the damaged document and restart from genesis. Keeps
    /// verification available at the cost of losing prior entries.
    #[default]
    Reset,
    /// Surface the damage as an error instead of losing entries.
    Fail,
}

/// Ledger service configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Path of the persisted ledger document.
    pub ledger_path: PathBuf,
    /// Recovery policy for a corrupt or invalid persisted ledger.
    pub on_corrupt: CorruptPolicy,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            ledger_path: PathBuf::from(DEFAULT_LEDGER_FILE),
            on_corrupt: CorruptPolicy::Reset,
        }
    }
}

impl LedgerConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data =
            fs::read_to_string(path).map_err(|e| LedgerError::Config(e.to_string()))?;
        let cfg = toml::from_str(&data).map_err(|e| LedgerError::Config(e.to_string()))?;
        Ok(cfg)
    }
}
