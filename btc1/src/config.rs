//! # Method Configuration & Constants
//!
//! Every fixed string and number that shapes a `did:btc1` identifier lives
//! here. Changing any of these changes the identifiers this crate produces,
//! which means every previously issued DID stops round-tripping. Treat edits
//! here as a method version bump, not a refactor.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Btc1Error;

// ---------------------------------------------------------------------------
// Method Identity
// ---------------------------------------------------------------------------

/// Registered DID method name.
pub const METHOD_NAME: &str = "btc1";

/// The prefix shared by every identifier of this method.
pub const DID_PREFIX: &str = "did:btc1";

/// Default method version. Version 1 identifiers omit the version/tag
/// segment entirely, so `did:btc1:k1...` stays readable by older parsers.
pub const DEFAULT_VERSION: u32 = 1;

/// Mode tag placed in versioned identifiers created from a public key.
pub const DETERMINISTIC_TAG: &str = "k1";

/// Mode tag placed in versioned identifiers created from a document digest.
pub const SIDECAR_TAG: &str = "x1";

/// Bech32 human-readable part for key payloads.
pub const HRP_KEY: &str = "k";

/// Bech32 human-readable part for CID payloads.
pub const HRP_EXTERNAL: &str = "x";

// ---------------------------------------------------------------------------
// Document Vocabulary
// ---------------------------------------------------------------------------

/// JSON-LD context for DID Core v1.
pub const DID_CORE_CONTEXT: &str = "https://www.w3.org/ns/did/v1";

/// JSON-LD context for the btc1 method vocabulary.
pub const BTC1_CONTEXT: &str = "https://github.com/dcdpr/did-btc1";

/// Fragment of the single verification method every new document carries.
pub const INITIAL_KEY_FRAGMENT: &str = "#initialKey";

/// Verification method type used for the initial key.
pub const VERIFICATION_METHOD_TYPE: &str = "JsonWebKey";

/// Service type for the default beacons.
pub const SINGLETON_BEACON_TYPE: &str = "SingletonBeacon";

/// URI scheme prefixed to every default beacon address.
pub const BITCOIN_URI_SCHEME: &str = "bitcoin:";

/// Service ids of the three default beacons, in document order.
pub const BEACON_P2PKH_ID: &str = "#initial_p2pkh";
pub const BEACON_P2WPKH_ID: &str = "#initial_p2wpkh";
pub const BEACON_P2TR_ID: &str = "#initial_p2tr";

// ---------------------------------------------------------------------------
// Key Material
// ---------------------------------------------------------------------------

/// The only curve this method registers a key type for.
pub const SUPPORTED_ALGORITHM: &str = "secp256k1";

/// JWK `kty` for elliptic-curve keys.
pub const JWK_KEY_TYPE: &str = "EC";

/// Mnemonic entropy in bits. 128 bits gives a 12-word phrase.
pub const MNEMONIC_ENTROPY_BITS: usize = 128;

/// Number of words a freshly generated mnemonic has.
pub const MNEMONIC_WORD_COUNT: usize = MNEMONIC_ENTROPY_BITS / 32 * 3;

/// BIP-44 purpose level.
pub const BIP44_PURPOSE: u32 = 44;

/// Length of a compressed secp256k1 public key.
pub const COMPRESSED_PUBLIC_KEY_LENGTH: usize = 33;

/// Length of a secp256k1 secret scalar and of each affine coordinate.
pub const SCALAR_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Content Identifiers
// ---------------------------------------------------------------------------

/// CID version used for sidecar identifiers.
pub const CID_VERSION: u64 = 1;

/// Multicodec code for `json`.
pub const MULTICODEC_JSON: u64 = 0x0200;

/// Multihash code for `sha2-256`.
pub const MULTIHASH_SHA2_256: u64 = 0x12;

/// Digest length in bytes for `sha2-256`.
pub const SHA256_DIGEST_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Networks
// ---------------------------------------------------------------------------

/// The four Bitcoin networks a `did:btc1` document can anchor to.
///
/// The network only influences key derivation (BIP-44 coin type) and the
/// beacon addresses placed in the default services. It is not encoded into
/// the identifier itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
    Signet,
    Regtest,
}

impl Network {
    /// All recognised networks, in declaration order.
    pub const ALL: [Network; 4] = [
        Network::Mainnet,
        Network::Testnet,
        Network::Signet,
        Network::Regtest,
    ];

    /// Lowercase network name as it appears in options and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Signet => "signet",
            Network::Regtest => "regtest",
        }
    }

    /// BIP-44 coin type: 0 for mainnet, 1 for every test-like network.
    pub fn coin_type(&self) -> u32 {
        match self {
            Network::Mainnet => 0,
            _ => 1,
        }
    }

    /// Derivation path of the initial key: `m/44'/<coin_type>'/0'/0/0`.
    pub fn derivation_path(&self) -> String {
        format!("m/{}'/{}'/0'/0/0", BIP44_PURPOSE, self.coin_type())
    }

    /// Address parameters used for the beacon services.
    ///
    /// Testnet and signet share the testnet address parameters (`tb1`,
    /// `m`/`n` prefixes); regtest keeps its own `bcrt1` segwit prefix.
    pub fn bitcoin_network(&self) -> bitcoin::Network {
        match self {
            Network::Mainnet => bitcoin::Network::Bitcoin,
            Network::Testnet | Network::Signet => bitcoin::Network::Testnet,
            Network::Regtest => bitcoin::Network::Regtest,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = Btc1Error;

    /// Parses one of the four network names. Matching is exact: `Mainnet`
    /// is not a network name, `mainnet` is.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Network::ALL
            .into_iter()
            .find(|n| n.as_str() == s)
            .ok_or_else(|| Btc1Error::InvalidNetwork(s.to_string()))
    }
}
