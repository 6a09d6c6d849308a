//! Request and response types for DID creation.
//!
//! All option members are optional and fall back to the method defaults
//! (mainnet, version 1, deterministic mode, three beacon services). The
//! structs are plain data: the orchestrator reads them, never writes them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::identity::document::{DidDocument, Service};

/// How the method-specific identifier is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierMode {
    /// Identifier is the bech32 public key (`k` HRP, `k1` tag).
    #[default]
    Deterministic,
    /// Identifier is the bech32 CID of the intermediate document (`x` HRP,
    /// `x1` tag).
    Sidecar,
}

impl IdentifierMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentifierMode::Deterministic => "deterministic",
            IdentifierMode::Sidecar => "sidecar",
        }
    }
}

impl fmt::Display for IdentifierMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdentifierMode {
    type Err = String;

    /// Case-insensitive `deterministic` or `sidecar`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "deterministic" => Ok(IdentifierMode::Deterministic),
            "sidecar" => Ok(IdentifierMode::Sidecar),
            other => Err(format!(
                "unknown identifier type '{other}', expected 'deterministic' or 'sidecar'"
            )),
        }
    }
}

/// A verification method the caller asks to have in the document.
///
/// Only `algorithm` and `id` take part in validation today; every new
/// document still carries exactly one generated `#initialKey`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationMethodOptions {
    pub algorithm: String,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub controller: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub purposes: Vec<String>,
}

/// Options accepted by [`DidBtc1::create`](crate::identity::method::DidBtc1::create).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOptions {
    /// Network name. Kept as a string so that unknown names reach the
    /// validation gate instead of failing deserialization.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub network: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub version: Option<u32>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none", default)]
    pub mode: Option<IdentifierMode>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub verification_methods: Option<Vec<VerificationMethodOptions>>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub services: Option<Vec<Service>>,
}

impl CreateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn network(mut self, network: impl Into<String>) -> Self {
        self.network = Some(network.into());
        self
    }

    pub fn version(mut self, version: u32) -> Self {
        self.version = Some(version);
        self
    }

    pub fn mode(mut self, mode: IdentifierMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn verification_methods(mut self, methods: Vec<VerificationMethodOptions>) -> Self {
        self.verification_methods = Some(methods);
        self
    }

    pub fn services(mut self, services: Vec<Service>) -> Self {
        self.services = Some(services);
        self
    }
}

/// What a successful creation hands back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreationResult {
    pub did: String,

    pub did_document: DidDocument,

    /// The generated phrase. Only present for deterministic DIDs created
    /// from fresh entropy; the caller must store it, nothing else does.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub mnemonic: Option<String>,
}

impl From<IdentifierMode> for CreateOptions {
    fn from(mode: IdentifierMode) -> Self {
        CreateOptions::new().mode(mode)
    }
}
