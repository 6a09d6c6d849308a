//! Error types for `did:btc1` operations.
//!
//! Every fallible operation in this crate returns a [`Btc1Error`]. The
//! validation kinds are raised before any key material exists; the rest are
//! terminal to the call that produced them. Nothing is retried internally.
//!
//! Resolution failures are deliberately absent: they travel as data inside
//! [`ResolutionMetadata`](crate::identity::resolution::ResolutionMetadata).

use thiserror::Error;

use crate::crypto::keys::KeyError;

/// Errors that can occur while creating a DID or selecting a signing method.
#[derive(Debug, Error)]
pub enum Btc1Error {
    /// A caller-supplied verification method uses an algorithm the method
    /// has no registered key type for.
    #[error("unsupported verification method algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Two caller-supplied verification methods share an id.
    #[error("verification method ids are not unique: '{0}' appears more than once")]
    DuplicateMethodId(String),

    /// A caller-supplied service is missing `id`, `type` or `serviceEndpoint`.
    #[error("service is missing required property: {0}")]
    IncompleteService(String),

    /// The network name is not one of mainnet, testnet, signet or regtest.
    #[error("invalid network: {0}")]
    InvalidNetwork(String),

    /// HD derivation did not yield a usable key pair.
    #[error("key derivation failed: {0}")]
    KeyDerivation(#[from] KeyError),

    /// The document belongs to a different DID method.
    #[error("method not supported: {0}")]
    MethodMismatch(String),

    /// No verification method with embedded key material could be selected.
    #[error("no signing key: {0}")]
    NoSigningKey(String),

    /// The identifier string is not a well-formed `did:btc1` DID.
    #[error("invalid DID: {0}")]
    InvalidDid(String),

    /// Bech32 or canonical-JSON encoding failed.
    #[error("encoding error: {0}")]
    Encoding(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Btc1Error>;

impl From<bech32::EncodeError> for Btc1Error {
    fn from(e: bech32::EncodeError) -> Self {
        Btc1Error::Encoding(e.to_string())
    }
}

impl From<serde_json::Error> for Btc1Error {
    fn from(e: serde_json::Error) -> Self {
        Btc1Error::Encoding(e.to_string())
    }
}
