//! # Cryptographic Primitives for did:btc1
//!
//! Thin, typed wrappers over audited libraries. Nothing in here implements
//! curve arithmetic, hashing or HD derivation itself:
//!
//! - **secp256k1 + BIP-32** via `bitcoin` (which re-exports `secp256k1`).
//! - **BIP-39** mnemonics via `bip39`.
//! - **SHA-256** via `sha2`.
//! - **RFC 8785** canonical JSON via `json-canon`.
//!
//! The only hand-written encoding is the fixed CIDv1 layout in [`cid`],
//! which is a handful of varints in front of a digest.

pub mod cid;
pub mod hash;
pub mod jwk;
pub mod keys;

pub use cid::Cid;
pub use hash::{canonical_digest, canonical_json, sha256};
pub use jwk::JsonWebKey;
pub use keys::{generate_mnemonic, parse_mnemonic, Btc1Keypair, KeyError};
