use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::block::{Block, CertificateKind};

/// A structural defect found while validating the chain.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChainFault {
    #[error("chain has no blocks")]
    Empty,

    #[error("block {index} does not hash to its stored value")]
    HashMismatch { index: usize },

    #[error("block {index} does not link to its predecessor")]
    BrokenLink { index: usize },
}

/// The ordered, hash-linked sequence of all ledger blocks.
///
/// Blocks are only ever appended; insertion order equals index order. The
/// fingerprint map is a lookup accelerator derived from the block list and
/// is never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chain {
    blocks: Vec<Block>,
    #[serde(skip)]
    by_fingerprint: HashMap<String, usize>,
}

impl Chain {
    /// A fresh chain holding only the genesis block.
    pub fn new() -> Self {
        let mut chain = Self {
            blocks: Vec::new(),
            by_fingerprint: HashMap::new(),
        };
        chain.push(Block::genesis());
        chain
    }

    /// Rebuild the fingerprint map after deserialization. On a duplicate
    /// fingerprint (possible only in a hand-edited document) the earliest
    /// position wins, matching lookup order.
    pub(crate) fn reindex(&mut self) {
        self.by_fingerprint.clear();
        for (pos, block) in self.blocks.iter().enumerate() {
            self.by_fingerprint
                .entry(block.certificate_hash.clone())
                .or_insert(pos);
        }
    }

    fn push(&mut self, block: Block) {
        let pos = self.blocks.len();
        self.by_fingerprint
            .entry(block.certificate_hash.clone())
            .or_insert(pos);
        self.blocks.push(block);
    }

    /// Number of blocks, genesis included.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// All blocks in chain order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// The most recently appended block.
    pub fn latest(&self) -> &Block {
        self.blocks
            .last()
            .expect("chain holds at least the genesis block")
    }

    /// The earliest block anchoring `fingerprint`, if any.
    pub fn find(&self, fingerprint: &str) -> Option<&Block> {
        self.by_fingerprint
            .get(fingerprint)
            .map(|&pos| &self.blocks[pos])
    }

    /// Blocks tagged with `kind`, in chain order.
    pub fn blocks_of_kind(&self, kind: CertificateKind) -> impl Iterator<Item = &Block> {
        self.blocks
            .iter()
            .filter(move |block| block.certificate_kind == kind)
    }

    /// Append a block anchoring `fingerprint`, linked to the current tip.
    /// Deduplication is the caller's job; the chain itself links whatever
    /// it is handed.
    pub fn append(
        &mut self,
        fingerprint: &str,
        kind: CertificateKind,
        certificate_id: u64,
    ) -> &Block {
        let previous_hash = self.latest().hash.clone();
        let block = Block::new(
            self.blocks.len() as u64,
            fingerprint,
            kind,
            certificate_id,
            previous_hash,
        );
        self.push(block);
        self.latest()
    }

    /// Check the two structural invariants over every position i > 0:
    /// the block hashes to its stored value, and its `previous_hash` equals
    /// the predecessor's `hash`. A chain without a genesis block is also
    /// rejected.
    pub fn validate(&self) -> Result<(), ChainFault> {
        if self.blocks.is_empty() {
            return Err(ChainFault::Empty);
        }
        for i in 1..self.blocks.len() {
            let current = &self.blocks[i];
            if current.hash != current.compute_hash() {
                return Err(ChainFault::HashMismatch { index: i });
            }
            if current.previous_hash != self.blocks[i - 1].hash {
                return Err(ChainFault::BrokenLink { index: i });
            }
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::new()
    }
}
