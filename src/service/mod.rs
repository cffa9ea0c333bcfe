//! Ledger service: the façade the registration and verification workflows
//! call.
//!
//! - append: idempotent per fingerprint, persists the whole chain
//! - verify: whole-chain validation first, then fingerprint lookup
//! - stats: aggregate snapshot, recomputed on every call
//!
//! One instance per process owns the chain; share it behind an Arc. The
//! chain loads lazily on first use: a valid persisted document is adopted,
//! anything else is handled per [`CorruptPolicy`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::certificate::{BirthCertificate, DeathCertificate};
use crate::config::{CorruptPolicy, LedgerConfig};
use crate::ledger::{Block, CertificateKind, Chain};
use crate::storage::{FsLedgerStore, LedgerStore};
use crate::utils::{LedgerError, Result};

/// Outcome of checking a fingerprint against the ledger.
///
/// Always an answer, never an error: a broken chain or an unknown
/// fingerprint comes back as a negative result with a message fit to show
/// an end user.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationResult {
    pub is_valid: bool,
    pub exists_on_ledger: bool,
    pub message: String,
    pub block: Option<Block>,
    pub ledger_timestamp: Option<DateTime<Utc>>,
}

impl VerificationResult {
    fn negative(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            exists_on_ledger: false,
            message: message.into(),
            block: None,
            ledger_timestamp: None,
        }
    }

    fn authentic(block: &Block) -> Self {
        Self {
            is_valid: true,
            exists_on_ledger: true,
            message: format!(
                "certificate is authentic, registered {} UTC",
                block.timestamp.format("%Y-%m-%d %H:%M:%S")
            ),
            block: Some(block.clone()),
            ledger_timestamp: Some(block.timestamp),
        }
    }
}

/// Aggregate snapshot of the ledger.
#[derive(Debug, Clone, Serialize)]
pub struct LedgerStats {
    pub total_blocks: usize,
    pub birth_count: usize,
    pub death_count: usize,
    pub is_valid: bool,
    pub last_timestamp: DateTime<Utc>,
}

/// Process-wide ledger façade. All chain access, mutating or not, goes
/// through here.
pub struct LedgerService {
    store: Arc<dyn LedgerStore>,
    on_corrupt: CorruptPolicy,
    chain: RwLock<Option<Chain>>,
}

impl LedgerService {
    /// Service over the configured file-backed store.
    pub fn new(config: LedgerConfig) -> Self {
        Self::with_store(
            Arc::new(FsLedgerStore::new(config.ledger_path)),
            config.on_corrupt,
        )
    }

    /// Service over an injected store engine.
    pub fn with_store(store: Arc<dyn LedgerStore>, on_corrupt: CorruptPolicy) -> Self {
        Self {
            store,
            on_corrupt,
            chain: RwLock::new(None),
        }
    }

    /// Anchor `fingerprint` on the ledger and return it.
    ///
    /// Idempotent per fingerprint value: a repeat returns the same string
    /// without growing the chain or touching storage. On a new fingerprint
    /// the scan, append and persist run as one unit under the write lock.
    /// A persist failure is returned to the caller while the new block
    /// stays in memory; the next successful append rewrites the full
    /// document and heals the gap.
    pub fn append_certificate(
        &self,
        fingerprint: &str,
        kind: CertificateKind,
        certificate_id: u64,
    ) -> Result<String> {
        self.ensure_loaded()?;
        let mut guard = self.chain.write();
        let chain = guard.as_mut().expect("chain loaded by ensure_loaded");

        if chain.find(fingerprint).is_some() {
            return Ok(fingerprint.to_string());
        }

        let index = chain.append(fingerprint, kind, certificate_id).index;
        if let Err(e) = self.store.persist(chain) {
            error!(index, "ledger persist failed: {e}");
            return Err(e);
        }
        info!(index, kind = %kind, certificate_id, "anchored certificate fingerprint");
        Ok(fingerprint.to_string())
    }

    /// Fingerprint a birth certificate and anchor it.
    pub fn append_birth(&self, certificate: &BirthCertificate) -> Result<String> {
        self.append_certificate(
            &certificate.fingerprint(),
            CertificateKind::Birth,
            certificate.id,
        )
    }

    /// Fingerprint a death certificate and anchor it.
    pub fn append_death(&self, certificate: &DeathCertificate) -> Result<String> {
        self.append_certificate(
            &certificate.fingerprint(),
            CertificateKind::Death,
            certificate.id,
        )
    }

    /// Check a caller-supplied fingerprint against the ledger.
    ///
    /// A chain that fails validation short-circuits every lookup; an
    /// unknown fingerprint is a negative result, not an error.
    pub fn verify_fingerprint(&self, fingerprint: &str) -> Result<VerificationResult> {
        self.ensure_loaded()?;
        let guard = self.chain.read();
        let chain = guard.as_ref().expect("chain loaded by ensure_loaded");

        if let Err(fault) = chain.validate() {
            warn!("ledger failed validation during verify: {fault}");
            return Ok(VerificationResult::negative("ledger integrity compromised"));
        }
        match chain.find(fingerprint) {
            Some(block) => Ok(VerificationResult::authentic(block)),
            None => Ok(VerificationResult::negative(
                "certificate hash not found on ledger",
            )),
        }
    }

    /// Recompute a birth certificate's fingerprint and verify it.
    pub fn verify_birth(&self, certificate: &BirthCertificate) -> Result<VerificationResult> {
        self.verify_fingerprint(&certificate.fingerprint())
    }

    /// Recompute a death certificate's fingerprint and verify it.
    pub fn verify_death(&self, certificate: &DeathCertificate) -> Result<VerificationResult> {
        self.verify_fingerprint(&certificate.fingerprint())
    }

    /// Aggregate snapshot; counts are full scans, recomputed per call.
    pub fn stats(&self) -> Result<LedgerStats> {
        self.ensure_loaded()?;
        let guard = self.chain.read();
        let chain = guard.as_ref().expect("chain loaded by ensure_loaded");

        Ok(LedgerStats {
            total_blocks: chain.len(),
            birth_count: chain.blocks_of_kind(CertificateKind::Birth).count(),
            death_count: chain.blocks_of_kind(CertificateKind::Death).count(),
            is_valid: chain.is_valid(),
            last_timestamp: chain.latest().timestamp,
        })
    }

    /// Load-validate-or-recreate, once per process lifetime. Double-checked
    /// so concurrent first calls load exactly once.
    fn ensure_loaded(&self) -> Result<()> {
        if self.chain.read().is_some() {
            return Ok(());
        }
        let mut guard = self.chain.write();
        if guard.is_none() {
            *guard = Some(self.open_chain()?);
        }
        Ok(())
    }

    fn open_chain(&self) -> Result<Chain> {
        match self.store.load() {
            Ok(Some(chain)) => match chain.validate() {
                Ok(()) => Ok(chain),
                Err(fault) => self.recover(LedgerError::Corrupt(fault.to_string())),
            },
            Ok(None) => {
                info!("no persisted ledger found, creating genesis chain");
                self.fresh_chain()
            }
            Err(cause) => self.recover(cause),
        }
    }

    /// Apply the corrupt-load policy to an unusable persisted document.
    fn recover(&self, cause: LedgerError) -> Result<Chain> {
        match self.on_corrupt {
            CorruptPolicy::Reset => {
                warn!("persisted ledger unusable ({cause}), resetting to genesis");
                self.fresh_chain()
            }
            CorruptPolicy::Fail => Err(cause),
        }
    }

    /// Genesis-only chain, persisted immediately so the backing document
    /// is replaced before anything else reads it.
    fn fresh_chain(&self) -> Result<Chain> {
        let chain = Chain::new();
        self.store.persist(&chain)?;
        Ok(chain)
    }
}
