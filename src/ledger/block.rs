use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::crypto::sha256_hex;

/// Previous-hash sentinel carried by the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "0";

/// Fingerprint anchored by the genesis block.
pub const GENESIS_FINGERPRINT: &str = "GENESIS";

/// Kind tag of a ledger entry. Travels next to the fingerprint; it is part
/// of the block hash but never of the fingerprint digest itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CertificateKind {
    Genesis,
    Birth,
    Death,
}

impl fmt::Display for CertificateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CertificateKind::Genesis => "Genesis",
            CertificateKind::Birth => "Birth",
            CertificateKind::Death => "Death",
        })
    }
}

/// One immutable ledger entry anchoring a certificate fingerprint.
///
/// `hash` covers every other field, so recomputing it from the stored
/// fields must reproduce the stored value exactly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Block {
    pub index: u64,
    pub timestamp: DateTime<Utc>,
    pub certificate_hash: String,
    pub certificate_kind: CertificateKind,
    pub certificate_id: u64,
    pub previous_hash: String,
    pub hash: String,
}

impl Block {
    /// Build a block at `index`, stamped now, sealed with its own hash.
    pub fn new(
        index: u64,
        certificate_hash: impl Into<String>,
        certificate_kind: CertificateKind,
        certificate_id: u64,
        previous_hash: impl Into<String>,
    ) -> Self {
        let mut block = Self {
            index,
            timestamp: Utc::now(),
            certificate_hash: certificate_hash.into(),
            certificate_kind,
            certificate_id,
            previous_hash: previous_hash.into(),
            hash: String::new(),
        };
        block.hash = block.compute_hash();
        block
    }

    /// The fixed first block of every chain.
    pub fn genesis() -> Self {
        Self::new(
            0,
            GENESIS_FINGERPRINT,
            CertificateKind::Genesis,
            0,
            GENESIS_PREVIOUS_HASH,
        )
    }

    /// Digest of this block's own fields, concatenated in declaration
    /// order. The timestamp contributes at fixed nanosecond precision so
    /// the digest survives a serialization round trip.
    pub fn compute_hash(&self) -> String {
        let data = format!(
            "{}{}{}{}{}{}",
            self.index,
            self.timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true),
            self.certificate_hash,
            self.certificate_kind,
            self.certificate_id,
            self.previous_hash,
        );
        sha256_hex(data.as_bytes())
    }
}
