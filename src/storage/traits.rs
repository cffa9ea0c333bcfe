use crate::ledger::Chain;
use crate::utils::Result;

/// Trait for a ledger persistence engine.
///
/// `load` distinguishes "nothing persisted yet" (`Ok(None)`) from a
/// document that exists but cannot be parsed (`Err(Corrupt)`). Whether a
/// corrupt or invalid document is recovered or surfaced is decided by the
/// service, not here.
pub trait LedgerStore: Send + Sync + 'static {
    /// Read the persisted chain, if the backing resource exists.
    fn load(&self) -> Result<Option<Chain>>;

    /// Write the full chain, replacing any previous content.
    fn persist(&self, chain: &Chain) -> Result<()>;
}
