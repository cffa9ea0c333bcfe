use sha2::{Digest, Sha256};

/// SHA-256 of `data`, rendered as lowercase hex.
///
/// The single digest primitive of the crate: block hashes and certificate
/// fingerprints are both produced here.
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
