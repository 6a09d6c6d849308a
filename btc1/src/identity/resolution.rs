//! DID resolution results.
//!
//! Resolution never fails with a Rust error. Every outcome, including
//! malformed input, is a [`ResolutionResult`] whose metadata carries a
//! W3C DID-resolution error code, so callers branch on data.
//!
//! Reading a `did:btc1` document from its beacons is not implemented. The
//! resolver classifies the identifier and then reports `internalError`.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Network;
use crate::error::Btc1Error;
use crate::identity::document::DidDocument;
use crate::identity::identifier::Btc1Identifier;

/// Caller-supplied resolution options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionOptions {
    /// Gateway that aggregates beacon signals.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub aggregator_uri: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub network: Option<Network>,
}

/// Error codes from the DID specification registries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResolutionError {
    InvalidDid,
    MethodNotSupported,
    /// Reserved for beacon-reading resolution. The stub never reports it.
    NotFound,
    InternalError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionMetadata {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<ResolutionError>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub created: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub updated: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub deactivated: Option<bool>,
}

/// Outcome of a resolution: a document, or an error in the metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionResult {
    pub did_document: Option<DidDocument>,

    pub did_resolution_metadata: ResolutionMetadata,

    pub did_document_metadata: DocumentMetadata,
}

impl ResolutionResult {
    /// An empty result carrying `error`.
    pub fn error(error: ResolutionError, message: impl Into<String>) -> Self {
        Self {
            did_document: None,
            did_resolution_metadata: ResolutionMetadata {
                error: Some(error),
                error_message: Some(message.into()),
            },
            did_document_metadata: DocumentMetadata::default(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.did_resolution_metadata.error.is_some()
    }
}

/// Resolves a `did:btc1` identifier.
pub async fn resolve(did: &str, options: &ResolutionOptions) -> ResolutionResult {
    let aggregator = options.aggregator_uri.as_deref().unwrap_or("none");
    let network = options.network.map_or("unspecified", |n| n.as_str());
    warn!(did, aggregator, network, "did:btc1 resolution requested but not implemented");

    match Btc1Identifier::parse(did) {
        Ok(identifier) => {
            debug!(mode = %identifier.mode(), version = identifier.version(), "identifier classified");
            ResolutionResult::error(
                ResolutionError::InternalError,
                format!("not implemented: {aggregator}"),
            )
        }
        Err(Btc1Error::MethodMismatch(message)) => {
            ResolutionResult::error(ResolutionError::MethodNotSupported, message)
        }
        Err(e) => ResolutionResult::error(ResolutionError::InvalidDid, e.to_string()),
    }
}
