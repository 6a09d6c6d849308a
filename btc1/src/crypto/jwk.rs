//! JSON Web Key representation of secp256k1 keys (RFC 7517 / RFC 8812).
//!
//! Coordinates and the private scalar are unpadded base64url of their fixed
//! 32-byte big-endian form. Leading zero bytes are kept so every member
//! decodes to exactly 32 bytes.

use base64::prelude::{Engine, BASE64_URL_SAFE_NO_PAD};
use bitcoin::secp256k1::PublicKey;
use serde::{Deserialize, Serialize};

use crate::config::{JWK_KEY_TYPE, SCALAR_LENGTH, SUPPORTED_ALGORITHM};
use crate::crypto::keys::{affine_coordinates, Btc1Keypair, KeyError};

/// An elliptic-curve JWK on secp256k1.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonWebKey {
    /// Key type, always `EC`.
    pub kty: String,

    /// Curve name, always `secp256k1`.
    pub crv: String,

    /// Affine x coordinate.
    pub x: String,

    /// Affine y coordinate.
    pub y: String,

    /// Private scalar, when the key holder chose to embed it.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub d: Option<String>,
}

impl JsonWebKey {
    /// Builds the public JWK of a secp256k1 point.
    pub fn from_public_key(public_key: &PublicKey) -> Self {
        let (x, y) = affine_coordinates(public_key);
        Self {
            kty: JWK_KEY_TYPE.to_string(),
            crv: SUPPORTED_ALGORITHM.to_string(),
            x: BASE64_URL_SAFE_NO_PAD.encode(x),
            y: BASE64_URL_SAFE_NO_PAD.encode(y),
            d: None,
        }
    }

    /// Builds the JWK of a keypair including the private scalar `d`.
    pub fn from_keypair(keypair: &Btc1Keypair) -> Self {
        Self {
            d: Some(BASE64_URL_SAFE_NO_PAD.encode(keypair.secret_key_bytes())),
            ..Self::from_public_key(keypair.public_key())
        }
    }

    /// Copy of this key with `d` removed.
    pub fn public_only(&self) -> Self {
        Self {
            d: None,
            ..self.clone()
        }
    }

    /// Whether the private scalar is embedded.
    pub fn has_private_key(&self) -> bool {
        self.d.is_some()
    }

    /// Recovers the public point from `x`/`y`, checking curve membership.
    pub fn to_public_key(&self) -> Result<PublicKey, KeyError> {
        if self.kty != JWK_KEY_TYPE || self.crv != SUPPORTED_ALGORITHM {
            return Err(KeyError::InvalidPublicKey);
        }

        let x = decode_coordinate(&self.x)?;
        let y = decode_coordinate(&self.y)?;

        let mut uncompressed = [0u8; 1 + 2 * SCALAR_LENGTH];
        uncompressed[0] = 0x04;
        uncompressed[1..1 + SCALAR_LENGTH].copy_from_slice(&x);
        uncompressed[1 + SCALAR_LENGTH..].copy_from_slice(&y);

        PublicKey::from_slice(&uncompressed).map_err(|_| KeyError::InvalidPublicKey)
    }
}

fn decode_coordinate(value: &str) -> Result<[u8; SCALAR_LENGTH], KeyError> {
    BASE64_URL_SAFE_NO_PAD
        .decode(value)
        .ok()
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or(KeyError::InvalidPublicKey)
}
