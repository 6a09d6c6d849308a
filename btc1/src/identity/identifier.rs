//! # Identifier Encoding
//!
//! Turns an intermediate document plus key material into a finished DID and
//! document, and parses identifiers back into their parts.
//!
//! ```text
//! version 1:   did:btc1:<bech32>
//! otherwise:   did:btc1:<version>:<k1|x1>:<bech32>
//! ```
//!
//! The bech32 payload is the 33-byte compressed public key under HRP `k`
//! (deterministic) or the 37-byte CIDv1 of the canonical intermediate
//! document under HRP `x` (sidecar). The HRP alone tells the two apart, so
//! the `k1`/`x1` tag only appears once a version is spelled out.

use bech32::primitives::decode::CheckedHrpstring;
use bech32::{Bech32, Hrp};
use bitcoin::secp256k1::PublicKey;

use crate::config::{
    DEFAULT_VERSION, DETERMINISTIC_TAG, DID_PREFIX, HRP_EXTERNAL, HRP_KEY, INITIAL_KEY_FRAGMENT,
    METHOD_NAME, SIDECAR_TAG, VERIFICATION_METHOD_TYPE,
};
use crate::crypto::cid::Cid;
use crate::crypto::jwk::JsonWebKey;
use crate::crypto::keys::public_key_from_bytes;
use crate::error::{Btc1Error, Result};
use crate::identity::document::{DidDocument, IntermediateDocument, VerificationMethod};
use crate::identity::options::{CreationResult, IdentifierMode};

const KEY_HRP: Hrp = Hrp::parse_unchecked(HRP_KEY);
const EXTERNAL_HRP: Hrp = Hrp::parse_unchecked(HRP_EXTERNAL);

impl IdentifierMode {
    fn hrp(&self) -> Hrp {
        match self {
            IdentifierMode::Deterministic => KEY_HRP,
            IdentifierMode::Sidecar => EXTERNAL_HRP,
        }
    }

    fn tag(&self) -> &'static str {
        match self {
            IdentifierMode::Deterministic => DETERMINISTIC_TAG,
            IdentifierMode::Sidecar => SIDECAR_TAG,
        }
    }
}

fn did_string(mode: IdentifierMode, version: u32, payload: &[u8]) -> Result<String> {
    let encoded = bech32::encode::<Bech32>(mode.hrp(), payload)?;
    if version == DEFAULT_VERSION {
        Ok(format!("{DID_PREFIX}:{encoded}"))
    } else {
        Ok(format!("{DID_PREFIX}:{version}:{}:{encoded}", mode.tag()))
    }
}

fn finish(intermediate: IntermediateDocument, did: String, jwk: JsonWebKey) -> CreationResult {
    let initial_key = VerificationMethod {
        id: INITIAL_KEY_FRAGMENT.to_string(),
        type_: VERIFICATION_METHOD_TYPE.to_string(),
        controller: did.clone(),
        public_key_jwk: Some(jwk),
    };
    CreationResult {
        did_document: DidDocument::from_intermediate(intermediate, did.clone(), vec![initial_key]),
        did,
        mnemonic: None,
    }
}

/// Finishes a deterministic DID: the identifier is `public_key` itself.
pub fn encode_deterministic(
    intermediate: IntermediateDocument,
    version: u32,
    public_key: &PublicKey,
    jwk: JsonWebKey,
) -> Result<CreationResult> {
    let did = did_string(IdentifierMode::Deterministic, version, &public_key.serialize())?;
    Ok(finish(intermediate, did, jwk))
}

/// Finishes a sidecar DID: the identifier is the CID of `intermediate`,
/// computed before the document gains its `id` and key.
pub fn encode_sidecar(
    intermediate: IntermediateDocument,
    version: u32,
    jwk: JsonWebKey,
) -> Result<CreationResult> {
    let cid = Cid::for_json(&intermediate)?;
    let did = did_string(IdentifierMode::Sidecar, version, &cid.to_bytes())?;
    Ok(finish(intermediate, did, jwk))
}

/// The decoded parts of a `did:btc1` identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Btc1Identifier {
    Deterministic { version: u32, public_key: PublicKey },
    Sidecar { version: u32, cid: Cid },
}

impl Btc1Identifier {
    /// Parses and checks a `did:btc1` string.
    ///
    /// A DID of another method is a [`Btc1Error::MethodMismatch`]; anything
    /// else that does not decode is [`Btc1Error::InvalidDid`]. An explicit
    /// `k1`/`x1` tag must agree with the bech32 HRP.
    pub fn parse(did: &str) -> Result<Self> {
        let rest = did
            .strip_prefix("did:")
            .ok_or_else(|| Btc1Error::InvalidDid(format!("'{did}' is not a DID")))?;
        let (method, specific) = rest
            .split_once(':')
            .ok_or_else(|| Btc1Error::InvalidDid(format!("'{did}' has no method-specific id")))?;
        if method != METHOD_NAME {
            return Err(Btc1Error::MethodMismatch(format!(
                "expected did:{METHOD_NAME}, got did:{method}"
            )));
        }

        let segments: Vec<&str> = specific.split(':').collect();
        let (version, tag, payload) = match segments.as_slice() {
            [payload] => (DEFAULT_VERSION, None, *payload),
            [version, tag, payload] => {
                let version = version.parse::<u32>().map_err(|_| {
                    Btc1Error::InvalidDid(format!("version '{version}' is not a number"))
                })?;
                (version, Some(*tag), *payload)
            }
            _ => {
                return Err(Btc1Error::InvalidDid(format!(
                    "'{did}' has {} method-specific segments",
                    segments.len()
                )))
            }
        };

        // Bech32 only. Bech32m checksums are rejected.
        let checked = CheckedHrpstring::new::<Bech32>(payload)
            .map_err(|e| Btc1Error::InvalidDid(format!("bech32 payload: {e}")))?;
        let hrp = checked.hrp();
        let data: Vec<u8> = checked.byte_iter().collect();
        let mode = if hrp == KEY_HRP {
            IdentifierMode::Deterministic
        } else if hrp == EXTERNAL_HRP {
            IdentifierMode::Sidecar
        } else {
            return Err(Btc1Error::InvalidDid(format!("unknown HRP '{hrp}'")));
        };

        if let Some(tag) = tag {
            if tag != mode.tag() {
                return Err(Btc1Error::InvalidDid(format!(
                    "tag '{tag}' does not match {mode} payload"
                )));
            }
        }

        match mode {
            IdentifierMode::Deterministic => {
                let public_key = public_key_from_bytes(&data)
                    .map_err(|e| Btc1Error::InvalidDid(e.to_string()))?;
                Ok(Btc1Identifier::Deterministic { version, public_key })
            }
            IdentifierMode::Sidecar => Ok(Btc1Identifier::Sidecar {
                version,
                cid: Cid::from_bytes(&data)?,
            }),
        }
    }

    pub fn version(&self) -> u32 {
        match self {
            Btc1Identifier::Deterministic { version, .. } | Btc1Identifier::Sidecar { version, .. } => {
                *version
            }
        }
    }

    pub fn mode(&self) -> IdentifierMode {
        match self {
            Btc1Identifier::Deterministic { .. } => IdentifierMode::Deterministic,
            Btc1Identifier::Sidecar { .. } => IdentifierMode::Sidecar,
        }
    }

    /// Re-encodes the identifier in canonical form.
    pub fn to_did(&self) -> Result<String> {
        match self {
            Btc1Identifier::Deterministic { version, public_key } => {
                did_string(self.mode(), *version, &public_key.serialize())
            }
            Btc1Identifier::Sidecar { version, cid } => {
                did_string(self.mode(), *version, &cid.to_bytes())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Network;
    use crate::crypto::keys::{parse_mnemonic, Btc1Keypair};
    use crate::identity::assembler::assemble;

    const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon \
                                 abandon abandon abandon abandon abandon about";

    fn keypair() -> Btc1Keypair {
        Btc1Keypair::from_mnemonic(&parse_mnemonic(TEST_MNEMONIC).unwrap(), Network::Mainnet).unwrap()
    }

    fn deterministic(version: u32) -> CreationResult {
        let kp = keypair();
        let intermediate = assemble(kp.public_key(), Network::Mainnet, None);
        encode_deterministic(intermediate, version, kp.public_key(), JsonWebKey::from_keypair(&kp))
            .unwrap()
    }

    fn sidecar(version: u32) -> CreationResult {
        let kp = keypair();
        let intermediate = assemble(kp.public_key(), Network::Mainnet, None);
        encode_sidecar(intermediate, version, JsonWebKey::from_keypair(&kp)).unwrap()
    }

    #[test]
    fn test_version_one_omits_version_and_tag() {
        let result = deterministic(1);
        assert!(result.did.starts_with("did:btc1:k1"), "{}", result.did);
        assert_eq!(result.did.split(':').count(), 3);

        let result = sidecar(1);
        assert!(result.did.starts_with("did:btc1:x1"), "{}", result.did);
        assert_eq!(result.did.split(':').count(), 3);
    }

    #[test]
    fn test_other_versions_are_spelled_out() {
        assert!(deterministic(2).did.starts_with("did:btc1:2:k1:k1"));
        assert!(sidecar(7).did.starts_with("did:btc1:7:x1:x1"));
    }

    #[test]
    fn test_document_carries_single_initial_key() {
        let result = deterministic(1);
        let doc = &result.did_document;
        assert_eq!(doc.id, result.did);
        assert_eq!(doc.verification_method.len(), 1);

        let vm = &doc.verification_method[0];
        assert_eq!(vm.id, "#initialKey");
        assert_eq!(vm.type_, "JsonWebKey");
        assert_eq!(vm.controller, result.did);
        assert!(vm.public_key_jwk.is_some());
        assert!(result.mnemonic.is_none());
    }

    #[test]
    fn test_sidecar_is_content_addressed() {
        let kp = keypair();
        let intermediate = assemble(kp.public_key(), Network::Mainnet, None);
        let expected = Cid::for_json(&intermediate).unwrap();

        let result = encode_sidecar(intermediate, 1, JsonWebKey::from_keypair(&kp)).unwrap();
        match Btc1Identifier::parse(&result.did).unwrap() {
            Btc1Identifier::Sidecar { version, cid } => {
                assert_eq!(version, 1);
                assert_eq!(cid, expected);
            }
            other => panic!("expected sidecar, got {other:?}"),
        }
    }

    #[test]
    fn test_sidecar_depends_on_services() {
        let kp = keypair();
        let jwk = JsonWebKey::from_keypair(&kp);
        let mainnet = encode_sidecar(assemble(kp.public_key(), Network::Mainnet, None), 1, jwk.clone());
        let regtest = encode_sidecar(assemble(kp.public_key(), Network::Regtest, None), 1, jwk);
        assert_ne!(mainnet.unwrap().did, regtest.unwrap().did);
    }

    #[test]
    fn test_parse_deterministic() {
        let result = deterministic(3);
        let parsed = Btc1Identifier::parse(&result.did).unwrap();
        assert_eq!(parsed.version(), 3);
        assert_eq!(parsed.mode(), IdentifierMode::Deterministic);
        assert_eq!(
            parsed,
            Btc1Identifier::Deterministic { version: 3, public_key: *keypair().public_key() }
        );
        assert_eq!(parsed.to_did().unwrap(), result.did);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Btc1Identifier::parse("not-a-did"), Err(Btc1Error::InvalidDid(_))));
        assert!(matches!(Btc1Identifier::parse("did:btc1"), Err(Btc1Error::InvalidDid(_))));
        assert!(matches!(
            Btc1Identifier::parse("did:key:z6Mkexample"),
            Err(Btc1Error::MethodMismatch(_))
        ));
        assert!(matches!(Btc1Identifier::parse("did:btc1:k1garbage"), Err(Btc1Error::InvalidDid(_))));
        assert!(matches!(Btc1Identifier::parse("did:btc1:1:k1"), Err(Btc1Error::InvalidDid(_))));
    }

    #[test]
    fn test_parse_rejects_mismatched_tag() {
        let did = deterministic(2).did.replacen(":k1:", ":x1:", 1);
        assert!(matches!(Btc1Identifier::parse(&did), Err(Btc1Error::InvalidDid(_))));
    }

    #[test]
    fn test_parse_rejects_wrong_length_key() {
        let short = bech32::encode::<Bech32>(KEY_HRP, &[2u8; 20]).unwrap();
        let did = format!("did:btc1:{short}");
        assert!(matches!(Btc1Identifier::parse(&did), Err(Btc1Error::InvalidDid(_))));
    }

    #[test]
    fn test_parse_rejects_bech32m_checksum() {
        let key = keypair().public_key().serialize();
        let payload = bech32::encode::<bech32::Bech32m>(KEY_HRP, &key).unwrap();
        let did = format!("did:btc1:{payload}");
        assert!(matches!(Btc1Identifier::parse(&did), Err(Btc1Error::InvalidDid(_))));
        assert!(Btc1Identifier::parse(&deterministic(1).did).is_ok());
    }
}
