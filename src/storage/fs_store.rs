use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::ledger::Chain;
use crate::storage::traits::LedgerStore;
use crate::utils::{LedgerError, Result};

/// Ledger persistence backed by a single JSON document on local disk.
///
/// Every persist rewrites the whole document; the file is always a
/// consistent snapshot of the chain, never a partial append.
pub struct FsLedgerStore {
    path: PathBuf,
}

impl FsLedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerStore for FsLedgerStore {
    fn load(&self) -> Result<Option<Chain>> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(LedgerError::Storage(e)),
        };
        let mut chain: Chain =
            serde_json::from_str(&json).map_err(|e| LedgerError::Corrupt(e.to_string()))?;
        chain.reindex();
        debug!(blocks = chain.len(), path = %self.path.display(), "loaded ledger");
        Ok(Some(chain))
    }

    fn persist(&self, chain: &Chain) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let json = serde_json::to_string_pretty(chain).map_err(io::Error::from)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::CertificateKind;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FsLedgerStore {
        FsLedgerStore::new(dir.path().join("ledger.json"))
    }

    #[test]
    fn missing_file_loads_as_none() {
        let dir = TempDir::new().unwrap();
        assert!(store_in(&dir).load().unwrap().is_none());
    }

    #[test]
    fn persisted_chain_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let mut chain = Chain::new();
        chain.append("fp-1", CertificateKind::Birth, 1);
        chain.append("fp-2", CertificateKind::Death, 2);
        store.persist(&chain).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.blocks(), chain.blocks());
        assert!(loaded.is_valid());
        assert_eq!(loaded.find("fp-2").map(|b| b.index), Some(2));
    }

    #[test]
    fn garbage_document_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "not a ledger").unwrap();
        assert!(matches!(store.load(), Err(LedgerError::Corrupt(_))));
    }

    #[test]
    fn truncated_document_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.persist(&Chain::new()).unwrap();

        let json = fs::read_to_string(store.path()).unwrap();
        fs::write(store.path(), &json[..json.len() / 2]).unwrap();
        assert!(matches!(store.load(), Err(LedgerError::Corrupt(_))));
    }

    #[test]
    fn persist_replaces_previous_content() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let mut chain = Chain::new();
        store.persist(&chain).unwrap();
        chain.append("fp-1", CertificateKind::Birth, 1);
        store.persist(&chain).unwrap();

        assert_eq!(store.load().unwrap().unwrap().len(), 2);
    }
}
