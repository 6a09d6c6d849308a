//! # Hashing & Canonical JSON
//!
//! Sidecar identifiers are digests of a JSON document, so two parties only
//! agree on the identifier if they agree on the exact bytes being hashed.
//! This module pins both halves:
//!
//! - **Canonical bytes**: RFC 8785 JSON Canonicalization Scheme (keys
//!   sorted by UTF-16 code units, no insignificant whitespace, ECMAScript
//!   number formatting), via `json-canon`.
//! - **Digest**: SHA-256, the only multihash the method registers.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::config::SHA256_DIGEST_LENGTH;
use crate::error::Result;

/// Compute the SHA-256 hash of the input data.
///
/// # Example
///
/// ```
/// use did_btc1::crypto::sha256;
///
/// let hash = sha256(b"did:btc1");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> [u8; SHA256_DIGEST_LENGTH] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Serializes `value` into its RFC 8785 canonical byte form.
///
/// Field order in the Rust struct does not matter; the output sorts keys.
/// Array order does matter and is preserved.
pub fn canonical_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    Ok(json_canon::to_string(value)?.into_bytes())
}

/// SHA-256 over the canonical JSON bytes of `value`.
pub fn canonical_digest<T: Serialize + ?Sized>(value: &T) -> Result<[u8; SHA256_DIGEST_LENGTH]> {
    Ok(sha256(&canonical_json(value)?))
}
