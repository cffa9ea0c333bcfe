//! Crypto module: digest primitives for block hashes and fingerprints.

pub mod digest;

pub use digest::sha256_hex;
