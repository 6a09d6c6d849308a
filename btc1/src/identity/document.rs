//! # DID Document Types
//!
//! W3C DID Core documents as produced by this method. A document is built in
//! two stages:
//!
//! 1. An [`IntermediateDocument`] with contexts, verification relationships
//!    and services, but no `id` and no `verificationMethod`. This is what the
//!    sidecar mode hashes, which is why it cannot contain the identifier.
//! 2. A [`DidDocument`], the intermediate document merged with the final
//!    `id` and its single verification method.
//!
//! Every relationship references the same `#initialKey` fragment, so a new
//! document always has exactly one key.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::crypto::jwk::JsonWebKey;

/// A `serviceEndpoint` value: a URI, a map, or a set of either.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServiceEndpoint {
    Uri(String),
    Map(Map<String, Value>),
    Set(Vec<ServiceEndpoint>),
}

impl ServiceEndpoint {
    /// The URI, when the endpoint is a single string.
    pub fn as_uri(&self) -> Option<&str> {
        match self {
            ServiceEndpoint::Uri(uri) => Some(uri),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ServiceEndpoint::Uri(uri) => uri.is_empty(),
            ServiceEndpoint::Map(map) => map.is_empty(),
            ServiceEndpoint::Set(set) => set.is_empty(),
        }
    }
}

impl From<String> for ServiceEndpoint {
    fn from(uri: String) -> Self {
        ServiceEndpoint::Uri(uri)
    }
}

impl From<&str> for ServiceEndpoint {
    fn from(uri: &str) -> Self {
        ServiceEndpoint::Uri(uri.to_string())
    }
}

/// A service entry.
///
/// All three members default to empty when absent from JSON so that
/// caller-supplied services can be deserialized first and rejected by the
/// validation gate with a precise error. A `null` endpoint counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(default)]
    pub id: String,

    #[serde(rename = "type", default)]
    pub type_: String,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub service_endpoint: Option<ServiceEndpoint>,
}

impl Service {
    pub fn new(
        id: impl Into<String>,
        type_: impl Into<String>,
        service_endpoint: impl Into<ServiceEndpoint>,
    ) -> Self {
        Self {
            id: id.into(),
            type_: type_.into(),
            service_endpoint: Some(service_endpoint.into()),
        }
    }

    /// The endpoint URI, when the endpoint is a single string.
    pub fn endpoint_uri(&self) -> Option<&str> {
        self.service_endpoint.as_ref().and_then(ServiceEndpoint::as_uri)
    }

    /// Name of the first required member that is empty, if any.
    pub fn missing_property(&self) -> Option<&'static str> {
        if self.id.is_empty() {
            Some("id")
        } else if self.type_.is_empty() {
            Some("type")
        } else if self.service_endpoint.as_ref().map_or(true, ServiceEndpoint::is_empty) {
            Some("serviceEndpoint")
        } else {
            None
        }
    }
}

/// A verification method entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationMethod {
    /// Fragment-addressable id, e.g. `#initialKey`.
    pub id: String,

    #[serde(rename = "type")]
    pub type_: String,

    /// The DID that controls this key.
    pub controller: String,

    /// Embedded key material. Absent on methods that reference keys held
    /// elsewhere; such methods cannot be used for signing.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub public_key_jwk: Option<JsonWebKey>,
}

/// An entry of a verification relationship such as `assertionMethod`:
/// either a reference to a method by id, or a method embedded in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VerificationRelationship {
    Reference(String),
    Embedded(VerificationMethod),
}

impl VerificationRelationship {
    /// The referenced or embedded method id.
    pub fn id(&self) -> &str {
        match self {
            VerificationRelationship::Reference(id) => id,
            VerificationRelationship::Embedded(vm) => &vm.id,
        }
    }

    pub fn embedded(&self) -> Option<&VerificationMethod> {
        match self {
            VerificationRelationship::Reference(_) => None,
            VerificationRelationship::Embedded(vm) => Some(vm),
        }
    }
}

impl From<String> for VerificationRelationship {
    fn from(id: String) -> Self {
        VerificationRelationship::Reference(id)
    }
}

impl From<&str> for VerificationRelationship {
    fn from(id: &str) -> Self {
        VerificationRelationship::Reference(id.to_string())
    }
}

/// A DID document before its identifier is known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntermediateDocument {
    #[serde(rename = "@context")]
    pub context: Vec<String>,

    pub authentication: Vec<String>,

    pub assertion_method: Vec<String>,

    pub capability_invocation: Vec<String>,

    pub capability_delegation: Vec<String>,

    pub service: Vec<Service>,
}

/// A finished `did:btc1` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DidDocument {
    #[serde(rename = "@context")]
    pub context: Vec<String>,

    pub id: String,

    #[serde(default)]
    pub verification_method: Vec<VerificationMethod>,

    #[serde(default)]
    pub authentication: Vec<VerificationRelationship>,

    #[serde(default)]
    pub assertion_method: Vec<VerificationRelationship>,

    #[serde(default)]
    pub capability_invocation: Vec<VerificationRelationship>,

    #[serde(default)]
    pub capability_delegation: Vec<VerificationRelationship>,

    #[serde(default)]
    pub service: Vec<Service>,
}

impl DidDocument {
    /// Merges an intermediate document with its identifier and keys.
    pub fn from_intermediate(
        intermediate: IntermediateDocument,
        id: String,
        verification_method: Vec<VerificationMethod>,
    ) -> Self {
        let IntermediateDocument {
            context,
            authentication,
            assertion_method,
            capability_invocation,
            capability_delegation,
            service,
        } = intermediate;

        let references = |ids: Vec<String>| -> Vec<VerificationRelationship> {
            ids.into_iter().map(VerificationRelationship::from).collect()
        };

        Self {
            context,
            id,
            verification_method,
            authentication: references(authentication),
            assertion_method: references(assertion_method),
            capability_invocation: references(capability_invocation),
            capability_delegation: references(capability_delegation),
            service,
        }
    }

    /// The method segment of `id` (`btc1` for `did:btc1:...`), or `None`
    /// when `id` is not a DID at all.
    pub fn method_name(&self) -> Option<&str> {
        let mut parts = self.id.splitn(3, ':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some("did"), Some(method), Some(_)) if !method.is_empty() => Some(method),
            _ => None,
        }
    }

    /// Finds the verification method whose id has the given fragment.
    ///
    /// Top-level `verificationMethod` entries are searched first, then
    /// methods embedded in the verification relationships.
    pub fn find_verification_method(&self, fragment: &str) -> Option<&VerificationMethod> {
        let embedded = [
            &self.authentication,
            &self.assertion_method,
            &self.capability_invocation,
            &self.capability_delegation,
        ]
        .into_iter()
        .flatten()
        .filter_map(VerificationRelationship::embedded);

        self.verification_method
            .iter()
            .chain(embedded)
            .find(|vm| extract_fragment(&vm.id) == Some(fragment))
    }

    /// Serialize this document to a pretty-printed JSON string.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a document from a JSON string.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Returns the part of a DID URL after its last `#`.
///
/// Inputs without a `#` are returned whole, so `initialKey`, `#initialKey`
/// and `did:btc1:k1...#initialKey` all yield `initialKey`. Empty input has
/// no fragment.
pub fn extract_fragment(input: &str) -> Option<&str> {
    if input.is_empty() {
        return None;
    }
    input.rsplit('#').next()
}
