//! certledger: append-only, hash-linked ledger anchoring fingerprints of
//! issued civil-registration certificates.
//!
//! - certificate: the records fingerprints are derived from
//! - crypto: digest primitives
//! - ledger: immutable blocks and the validated hash chain
//! - storage: pluggable persistence (single JSON document on disk)
//! - service: the façade the registration and verification workflows call
//!
//! The ledger proves a certificate was genuinely issued and has not been
//! altered since; the authoritative record stays in the registry database.

pub mod certificate;
pub mod config;
pub mod crypto;
pub mod ledger;
pub mod service;
pub mod storage;
pub mod utils;

pub use certificate::{BirthCertificate, DeathCertificate};
pub use config::{CorruptPolicy, LedgerConfig};
pub use ledger::{Block, CertificateKind, Chain, ChainFault};
pub use service::{LedgerService, LedgerStats, VerificationResult};
pub use storage::{FsLedgerStore, LedgerStore, MemLedgerStore};
pub use utils::{LedgerError, Result};
