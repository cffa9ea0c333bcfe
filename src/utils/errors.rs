use thiserror::Error;

/// Unified error type for the certificate ledger.
///
/// A verification miss and a failed chain validation are not errors: they
/// come back as negative [`VerificationResult`](crate::service::VerificationResult)s.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("storage failure: {0}")]
    Storage(#[from] std::io::Error),

    #[error("persisted ledger is corrupt: {0}")]
    Corrupt(String),

    #[error("config error: {0}")]
    Config(String),
}

/// Convenience alias
pub type Result<T> = std::result::Result<T, LedgerError>;
