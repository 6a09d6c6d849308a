//! # The `did:btc1` Method
//!
//! [`DidBtc1`] is the entry point a hosting DID framework talks to. It is a
//! stateless unit struct; every call is independent and owns all of its
//! intermediate values.
//!
//! ## Creation pipeline
//!
//! ```text
//! CreateOptions
//!   -> validation gate (algorithm, ids, services, network)
//!   -> BIP-39 mnemonic -> BIP-32 key at m/44'/<coin>'/0'/0/0
//!   -> JWK + intermediate document
//!   -> deterministic or sidecar encoding
//!   -> CreationResult
//! ```
//!
//! The gate runs to completion before any entropy is drawn, so a rejected
//! request never produces key material.

use std::collections::HashSet;

use async_trait::async_trait;
use bip39::Mnemonic;
use bitcoin::secp256k1::PublicKey;
use tracing::{debug, info};

use crate::config::{Network, DEFAULT_VERSION, METHOD_NAME, SUPPORTED_ALGORITHM};
use crate::crypto::jwk::JsonWebKey;
use crate::crypto::keys::{generate_mnemonic, parse_mnemonic, Btc1Keypair};
use crate::error::{Btc1Error, Result};
use crate::identity::assembler::assemble;
use crate::identity::document::{extract_fragment, DidDocument, IntermediateDocument, VerificationMethod};
use crate::identity::identifier::{encode_deterministic, encode_sidecar};
use crate::identity::options::{CreateOptions, CreationResult, IdentifierMode};
use crate::identity::resolution::{self, ResolutionOptions, ResolutionResult};

/// The operations a DID method exposes to a hosting framework.
#[async_trait]
pub trait DidMethod: Send + Sync {
    /// The registered method name, without the `did:` prefix.
    fn name(&self) -> &'static str;

    /// Creates a new DID and its document.
    fn create(&self, options: &CreateOptions) -> Result<CreationResult>;

    /// Picks the verification method a signer should use from `document`.
    fn get_signing_method<'a>(
        &self,
        document: &'a DidDocument,
        method_id: Option<&str>,
    ) -> Result<&'a VerificationMethod>;

    /// Resolves `did` to its document. Failures are reported inside the
    /// result, never as a Rust error.
    async fn resolve(&self, did: &str, options: &ResolutionOptions) -> ResolutionResult;
}

/// The `did:btc1` method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DidBtc1;

impl DidBtc1 {
    pub fn new() -> Self {
        Self
    }

    /// Checks `options` and returns the network to use.
    ///
    /// Checks run in a fixed order and the first failure wins:
    /// unsupported algorithm, duplicate method id, incomplete service,
    /// unknown network.
    pub fn validate(options: &CreateOptions) -> Result<Network> {
        if let Some(methods) = &options.verification_methods {
            if let Some(vm) = methods.iter().find(|vm| vm.algorithm != SUPPORTED_ALGORITHM) {
                return Err(Btc1Error::UnsupportedAlgorithm(vm.algorithm.clone()));
            }

            let mut seen = HashSet::new();
            for id in methods.iter().filter_map(|vm| vm.id.as_deref()) {
                if !seen.insert(id) {
                    return Err(Btc1Error::DuplicateMethodId(id.to_string()));
                }
            }
        }

        if let Some(services) = &options.services {
            for (index, service) in services.iter().enumerate() {
                if let Some(property) = service.missing_property() {
                    return Err(Btc1Error::IncompleteService(format!(
                        "services[{index}] has no {property}"
                    )));
                }
            }
        }

        match options.network.as_deref() {
            Some(name) => name.parse(),
            None => Ok(Network::default()),
        }
    }

    /// Creates a DID whose key is derived from a caller-held BIP-39 phrase.
    ///
    /// Runs the same gate and pipeline as [`DidMethod::create`]. The result
    /// never carries the mnemonic, since the caller already has it.
    pub fn create_from_mnemonic(&self, phrase: &str, options: &CreateOptions) -> Result<CreationResult> {
        let network = Self::validate(options)?;
        let mnemonic = parse_mnemonic(phrase)?;
        Self::build(&mnemonic, network, options)
    }

    /// Encodes a deterministic DID from key material the caller already holds.
    pub fn create_deterministic(
        intermediate: IntermediateDocument,
        version: u32,
        public_key: &PublicKey,
        jwk: JsonWebKey,
    ) -> Result<CreationResult> {
        encode_deterministic(intermediate, version, public_key, jwk)
    }

    /// Encodes a sidecar DID for a document assembled by the caller.
    pub fn create_sidecar(
        intermediate: IntermediateDocument,
        version: u32,
        jwk: JsonWebKey,
    ) -> Result<CreationResult> {
        encode_sidecar(intermediate, version, jwk)
    }

    fn build(mnemonic: &Mnemonic, network: Network, options: &CreateOptions) -> Result<CreationResult> {
        let version = options.version.unwrap_or(DEFAULT_VERSION);
        let mode = options.mode.unwrap_or_default();
        debug!(%network, path = %network.derivation_path(), version, "deriving initial key");

        let keypair = Btc1Keypair::from_mnemonic(mnemonic, network)?;
        let jwk = JsonWebKey::from_keypair(&keypair);
        let intermediate = assemble(keypair.public_key(), network, options.services.as_deref());
        debug!(services = intermediate.service.len(), %mode, "intermediate document assembled");

        let result = match mode {
            IdentifierMode::Deterministic => {
                encode_deterministic(intermediate, version, keypair.public_key(), jwk)?
            }
            IdentifierMode::Sidecar => encode_sidecar(intermediate, version, jwk)?,
        };
        info!(did = %result.did, %mode, "created DID");
        Ok(result)
    }
}

#[async_trait]
impl DidMethod for DidBtc1 {
    fn name(&self) -> &'static str {
        METHOD_NAME
    }

    /// Generates fresh entropy and creates a DID from it.
    ///
    /// Deterministic results carry the new mnemonic; it is the only copy.
    /// Sidecar results discard it.
    fn create(&self, options: &CreateOptions) -> Result<CreationResult> {
        let network = Self::validate(options)?;
        debug!(%network, "create options validated");

        let mnemonic = generate_mnemonic()?;
        let mut result = Self::build(&mnemonic, network, options)?;
        if options.mode.unwrap_or_default() == IdentifierMode::Deterministic {
            result.mnemonic = Some(mnemonic.to_string());
        }
        Ok(result)
    }

    /// Uses the method whose id fragment matches `method_id`, or failing
    /// that the fragment of the first `assertionMethod` entry. The chosen
    /// method must embed a public key.
    fn get_signing_method<'a>(
        &self,
        document: &'a DidDocument,
        method_id: Option<&str>,
    ) -> Result<&'a VerificationMethod> {
        match document.method_name() {
            Some(METHOD_NAME) => {}
            Some(other) => {
                return Err(Btc1Error::MethodMismatch(format!(
                    "document belongs to did:{other}"
                )))
            }
            None => {
                return Err(Btc1Error::InvalidDid(format!(
                    "document id '{}' is not a DID",
                    document.id
                )))
            }
        }

        let fragment = method_id
            .and_then(extract_fragment)
            .or_else(|| {
                document
                    .assertion_method
                    .first()
                    .and_then(|entry| extract_fragment(entry.id()))
            })
            .ok_or_else(|| {
                Btc1Error::NoSigningKey("no method id given and no assertionMethod entry".into())
            })?;

        match document.find_verification_method(fragment) {
            Some(vm) if vm.public_key_jwk.is_some() => Ok(vm),
            Some(vm) => Err(Btc1Error::NoSigningKey(format!(
                "verification method '{}' has no embedded key",
                vm.id
            ))),
            None => Err(Btc1Error::NoSigningKey(format!(
                "no verification method with fragment '{fragment}'"
            ))),
        }
    }

    async fn resolve(&self, did: &str, options: &ResolutionOptions) -> ResolutionResult {
        resolution::resolve(did, options).await
    }
}
