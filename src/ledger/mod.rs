//! Ledger core: immutable blocks and the hash-linked chain.
//!
//! - Block: one entry anchoring a certificate fingerprint
//! - Chain: ordered collection, linkage validation, fingerprint lookup

pub mod block;
pub mod chain;

pub use block::{Block, CertificateKind, GENESIS_FINGERPRINT, GENESIS_PREVIOUS_HASH};
pub use chain::{Chain, ChainFault};
