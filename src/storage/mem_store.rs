use parking_lot::RwLock;

use crate::ledger::Chain;
use crate::storage::traits::LedgerStore;
use crate::utils::Result;

/// In-memory ledger store (good for tests/dev).
#[derive(Default)]
pub struct MemLedgerStore {
    inner: RwLock<Option<Chain>>,
}

impl MemLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerStore for MemLedgerStore {
    fn load(&self) -> Result<Option<Chain>> {
        Ok(self.inner.read().clone().map(|mut chain| {
            chain.reindex();
            chain
        }))
    }

    fn persist(&self, chain: &Chain) -> Result<()> {
        *self.inner.write() = Some(chain.clone());
        Ok(())
    }
}
