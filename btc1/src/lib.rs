// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # did:btc1 Core Library
//!
//! Creates Bitcoin-anchored decentralized identifiers and picks the key a
//! signer should use from their documents.
//!
//! A `did:btc1` identifier comes in two flavours:
//!
//! - **Deterministic**: the identifier *is* the compressed secp256k1 public
//!   key, bech32-encoded. Anyone holding the DID can rebuild its initial
//!   document.
//! - **Sidecar**: the identifier is the content hash of the initial
//!   document, which travels alongside the DID.
//!
//! ## Architecture
//!
//! - **config**: Method constants and the [`Network`] enum.
//! - **crypto**: BIP-39/BIP-32 key derivation, JWKs, hashing and CIDs.
//! - **identity**: Documents, beacons, identifier encoding, the
//!   [`DidBtc1`] method and resolution results.
//! - **error**: The crate-wide [`Btc1Error`].
//!
//! ## Example
//!
//! ```no_run
//! use did_btc1::{CreateOptions, DidBtc1, DidMethod};
//!
//! let created = DidBtc1.create(&CreateOptions::new().network("signet"))?;
//! let key = DidBtc1.get_signing_method(&created.did_document, None)?;
//! println!("{} signs with {}", created.did, key.id);
//! # Ok::<(), did_btc1::Btc1Error>(())
//! ```

pub mod config;
pub mod crypto;
pub mod error;
pub mod identity;

pub use config::Network;
pub use crypto::{Btc1Keypair, JsonWebKey};
pub use error::{Btc1Error, Result};
pub use identity::{
    Btc1Identifier, CreateOptions, CreationResult, DidBtc1, DidDocument, DidMethod,
    IdentifierMode, ResolutionOptions, ResolutionResult, Service, ServiceEndpoint,
    VerificationMethod, VerificationRelationship,
};
