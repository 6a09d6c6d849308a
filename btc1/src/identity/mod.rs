//! # Identity Module
//!
//! Creation and use of `did:btc1` identifiers. The stack is layered:
//!
//! 1. **Document**: W3C DID Core types (services, verification methods,
//!    the intermediate document and the finished document).
//! 2. **Beacon**: p2pkh, p2wpkh and p2tr addresses for the default
//!    singleton beacon services.
//! 3. **Assembler**: builds the intermediate document from a public key.
//! 4. **Identifier**: deterministic (`k`) and sidecar (`x`) bech32
//!    encodings, and parsing them back.
//! 5. **Method**: [`DidBtc1`], the validation gate, creation pipeline and
//!    signing-method selection.
//! 6. **Resolution**: result types and the resolver entry point.
//!
//! ## Design Decisions
//!
//! - The network is not part of the identifier. It selects the BIP-44 coin
//!   type and the beacon address parameters, nothing more.
//! - Sidecar identifiers hash the document before `id` and
//!   `verificationMethod` are added, so the hash cannot depend on itself.
//! - Bech32 (not Bech32m) for payloads. The HRP distinguishes key payloads
//!   from CID payloads.

pub mod assembler;
pub mod beacon;
pub mod document;
pub mod identifier;
pub mod method;
pub mod options;
pub mod resolution;

pub use assembler::assemble;
pub use beacon::BeaconAddresses;
pub use document::{
    extract_fragment, DidDocument, IntermediateDocument, Service, ServiceEndpoint,
    VerificationMethod, VerificationRelationship,
};
pub use identifier::{encode_deterministic, encode_sidecar, Btc1Identifier};
pub use method::{DidBtc1, DidMethod};
pub use options::{CreateOptions, CreationResult, IdentifierMode, VerificationMethodOptions};
pub use resolution::{
    resolve, DocumentMetadata, ResolutionError, ResolutionMetadata, ResolutionOptions,
    ResolutionResult,
};
