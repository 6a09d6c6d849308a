//! # Key Management
//!
//! secp256k1 key material for `did:btc1` identities, derived the way every
//! Bitcoin wallet does it:
//!
//! ```text
//! 128 bits OS entropy
//!     -> BIP-39 English mnemonic (12 words)
//!     -> PBKDF2 seed (empty passphrase, 64 bytes)
//!     -> BIP-32 master key
//!     -> m/44'/<coin_type>'/0'/0/0
//! ```
//!
//! The coin type is 0 on mainnet and 1 everywhere else, so the same mnemonic
//! yields different keys (and therefore different DIDs) per network family.
//!
//! ## Security considerations
//!
//! - Entropy comes from `OsRng`. There is no fallback RNG.
//! - `Debug` never prints the secret scalar.
//! - Key bytes are never logged from this module.

use std::fmt;
use std::str::FromStr;

use bip39::Mnemonic;
use bitcoin::bip32::{DerivationPath, Xpriv};
use bitcoin::secp256k1::{PublicKey, Secp256k1, SecretKey};
use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;

use crate::config::{Network, COMPRESSED_PUBLIC_KEY_LENGTH, MNEMONIC_ENTROPY_BITS, SCALAR_LENGTH};

/// Errors that can occur while producing key material.
///
/// Messages describe which step failed, never the key bytes involved.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("invalid derivation path: {0}")]
    InvalidDerivationPath(String),

    #[error("hd derivation produced no usable key: {0}")]
    Derivation(String),

    #[error("invalid public key bytes: not a valid secp256k1 point")]
    InvalidPublicKey,
}

/// Generates a fresh 12-word English mnemonic from OS entropy.
pub fn generate_mnemonic() -> Result<Mnemonic, KeyError> {
    let mut entropy = [0u8; MNEMONIC_ENTROPY_BITS / 8];
    OsRng.fill_bytes(&mut entropy);
    Mnemonic::from_entropy(&entropy).map_err(|e| KeyError::InvalidMnemonic(e.to_string()))
}

/// Parses a caller-supplied mnemonic phrase, validating words and checksum.
pub fn parse_mnemonic(phrase: &str) -> Result<Mnemonic, KeyError> {
    Mnemonic::parse(phrase).map_err(|e| KeyError::InvalidMnemonic(e.to_string()))
}

/// A secp256k1 keypair bound to a `did:btc1` identity.
///
/// Holds the 32-byte secret scalar and its 33-byte compressed public point.
/// Never serialised by this crate; the only export of the secret is the
/// JWK `d` member built by [`JsonWebKey`](crate::crypto::jwk::JsonWebKey).
#[derive(Clone, PartialEq, Eq)]
pub struct Btc1Keypair {
    secret_key: SecretKey,
    public_key: PublicKey,
}

impl Btc1Keypair {
    /// Derives the initial key for `network` from a BIP-39 mnemonic.
    pub fn from_mnemonic(mnemonic: &Mnemonic, network: Network) -> Result<Self, KeyError> {
        let seed = mnemonic.to_seed("");
        Self::from_seed(&seed, network)
    }

    /// Derives the initial key for `network` from a raw BIP-32 seed.
    pub fn from_seed(seed: &[u8], network: Network) -> Result<Self, KeyError> {
        let secp = Secp256k1::new();

        let master = Xpriv::new_master(network.bitcoin_network(), seed)
            .map_err(|e| KeyError::Derivation(e.to_string()))?;

        let path = DerivationPath::from_str(&network.derivation_path())
            .map_err(|e| KeyError::InvalidDerivationPath(e.to_string()))?;

        let child = master
            .derive_priv(&secp, &path)
            .map_err(|e| KeyError::Derivation(e.to_string()))?;

        let public_key = PublicKey::from_secret_key(&secp, &child.private_key);
        Ok(Self {
            secret_key: child.private_key,
            public_key,
        })
    }

    /// The public point.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// The 33-byte SEC1 compressed public key. This is the deterministic
    /// identifier payload.
    pub fn public_key_bytes(&self) -> [u8; COMPRESSED_PUBLIC_KEY_LENGTH] {
        self.public_key.serialize()
    }

    /// The 32-byte secret scalar. Handle with care.
    pub fn secret_key_bytes(&self) -> [u8; SCALAR_LENGTH] {
        self.secret_key.secret_bytes()
    }

    /// Hex of the compressed public key. Safe to log.
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public_key_bytes())
    }
}

impl fmt::Debug for Btc1Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Btc1Keypair(pub={})", self.public_key_hex())
    }
}

/// Decompresses a public point into its affine coordinates.
pub fn affine_coordinates(public_key: &PublicKey) -> ([u8; SCALAR_LENGTH], [u8; SCALAR_LENGTH]) {
    // 0x04 || x || y
    let uncompressed = public_key.serialize_uncompressed();
    let mut x = [0u8; SCALAR_LENGTH];
    let mut y = [0u8; SCALAR_LENGTH];
    x.copy_from_slice(&uncompressed[1..1 + SCALAR_LENGTH]);
    y.copy_from_slice(&uncompressed[1 + SCALAR_LENGTH..]);
    (x, y)
}

/// Parses a 33-byte compressed public key.
pub fn public_key_from_bytes(bytes: &[u8]) -> Result<PublicKey, KeyError> {
    if bytes.len() != COMPRESSED_PUBLIC_KEY_LENGTH {
        return Err(KeyError::InvalidPublicKey);
    }
    PublicKey::from_slice(bytes).map_err(|_| KeyError::InvalidPublicKey)
}

#[cfg(test)]
mod tests {
    use super::*;

    // BIP-39 test vector mnemonic ("abandon" x11 + "about").
    const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon \
                                 abandon abandon abandon abandon abandon about";

    #[test]
    fn test_generated_mnemonic_has_twelve_words() {
        let mnemonic = generate_mnemonic().unwrap();
        assert_eq!(mnemonic.word_count(), 12);
        assert_eq!(mnemonic.to_string().split_whitespace().count(), 12);
    }

    #[test]
    fn test_generated_mnemonics_differ() {
        let a = generate_mnemonic().unwrap();
        let b = generate_mnemonic().unwrap();
        assert_ne!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_parse_rejects_bad_checksum() {
        let bad = "abandon abandon abandon abandon abandon abandon \
                   abandon abandon abandon abandon abandon abandon";
        assert!(matches!(parse_mnemonic(bad), Err(KeyError::InvalidMnemonic(_))));
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let mnemonic = parse_mnemonic(TEST_MNEMONIC).unwrap();
        let a = Btc1Keypair::from_mnemonic(&mnemonic, Network::Mainnet).unwrap();
        let b = Btc1Keypair::from_mnemonic(&mnemonic, Network::Mainnet).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_bip44_mainnet_vector() {
        // Well-known BIP-44 vector for the all-"abandon" mnemonic at m/44'/0'/0'/0/0.
        let mnemonic = parse_mnemonic(TEST_MNEMONIC).unwrap();
        let kp = Btc1Keypair::from_mnemonic(&mnemonic, Network::Mainnet).unwrap();
        assert_eq!(
            kp.public_key_hex(),
            "03aaeb52dd7494c361049de67cc680e83ebcbbbdbeb13637d92cd845f70308af5e"
        );
    }

    #[test]
    fn test_coin_type_changes_key() {
        let mnemonic = parse_mnemonic(TEST_MNEMONIC).unwrap();
        let main = Btc1Keypair::from_mnemonic(&mnemonic, Network::Mainnet).unwrap();
        let test = Btc1Keypair::from_mnemonic(&mnemonic, Network::Testnet).unwrap();
        let reg = Btc1Keypair::from_mnemonic(&mnemonic, Network::Regtest).unwrap();
        assert_ne!(main.public_key_bytes(), test.public_key_bytes());
        // Same coin type, same key.
        assert_eq!(test.public_key_bytes(), reg.public_key_bytes());
    }

    #[test]
    fn test_public_key_is_compressed() {
        let kp = Btc1Keypair::from_mnemonic(&generate_mnemonic().unwrap(), Network::Signet).unwrap();
        let bytes = kp.public_key_bytes();
        assert_eq!(bytes.len(), 33);
        assert!(bytes[0] == 0x02 || bytes[0] == 0x03);
    }

    #[test]
    fn test_affine_coordinates_match_compressed_form() {
        let mnemonic = parse_mnemonic(TEST_MNEMONIC).unwrap();
        let kp = Btc1Keypair::from_mnemonic(&mnemonic, Network::Mainnet).unwrap();
        let (x, y) = affine_coordinates(kp.public_key());
        let compressed = kp.public_key_bytes();
        assert_eq!(&compressed[1..], &x);
        // Prefix encodes the parity of y.
        let expected_prefix = if y[31] & 1 == 0 { 0x02 } else { 0x03 };
        assert_eq!(compressed[0], expected_prefix);
    }

    #[test]
    fn test_public_key_from_bytes_checks_length() {
        let kp = Btc1Keypair::from_mnemonic(&generate_mnemonic().unwrap(), Network::Mainnet).unwrap();
        assert_eq!(
            public_key_from_bytes(&kp.public_key_bytes()).unwrap(),
            *kp.public_key()
        );
        assert!(public_key_from_bytes(&[0x02; 32]).is_err());
    }

    #[test]
    fn test_debug_hides_secret() {
        let kp = Btc1Keypair::from_mnemonic(&generate_mnemonic().unwrap(), Network::Mainnet).unwrap();
        let debug = format!("{:?}", kp);
        assert!(debug.contains(&kp.public_key_hex()));
        assert!(!debug.contains(&hex::encode(kp.secret_key_bytes())));
    }
}
