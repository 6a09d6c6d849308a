//! # Content Identifiers
//!
//! Minimal CIDv1 construction for sidecar identifiers. Only one shape is
//! ever produced:
//!
//! ```text
//! varint(1)          CID version
//! varint(0x0200)     multicodec: json
//! varint(0x12)       multihash:  sha2-256
//! varint(32)         digest length
//! <32 bytes>         SHA-256(canonical JSON)
//! ```
//!
//! which always serializes to 37 bytes: `01 80 04 12 20 <digest>`.

use std::fmt;

use serde::Serialize;

use crate::config::{CID_VERSION, MULTICODEC_JSON, MULTIHASH_SHA2_256, SHA256_DIGEST_LENGTH};
use crate::crypto::hash::canonical_digest;
use crate::error::{Btc1Error, Result};

/// Appends the unsigned LEB128 varint encoding of `value` to `out`.
pub(crate) fn encode_varint(mut value: u64, out: &mut Vec<u8>) {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

/// Reads one unsigned varint from the front of `bytes`, returning the value
/// and the number of bytes consumed.
pub(crate) fn decode_varint(bytes: &[u8]) -> Option<(u64, usize)> {
    let mut value = 0u64;
    for (i, byte) in bytes.iter().enumerate().take(9) {
        value |= u64::from(byte & 0x7f) << (7 * i);
        if byte & 0x80 == 0 {
            return Some((value, i + 1));
        }
    }
    None
}

/// A CIDv1 addressing JSON content by its SHA-256 digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cid {
    digest: [u8; SHA256_DIGEST_LENGTH],
}

impl Cid {
    /// Wraps an existing SHA-256 digest.
    pub fn from_digest(digest: [u8; SHA256_DIGEST_LENGTH]) -> Self {
        Self { digest }
    }

    /// Addresses the canonical JSON encoding of `value`.
    pub fn for_json<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(Self::from_digest(canonical_digest(value)?))
    }

    /// The raw SHA-256 digest.
    pub fn digest(&self) -> &[u8; SHA256_DIGEST_LENGTH] {
        &self.digest
    }

    /// Binary CID: version, codec and multihash, back to back.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(5 + SHA256_DIGEST_LENGTH);
        encode_varint(CID_VERSION, &mut out);
        encode_varint(MULTICODEC_JSON, &mut out);
        encode_varint(MULTIHASH_SHA2_256, &mut out);
        encode_varint(SHA256_DIGEST_LENGTH as u64, &mut out);
        out.extend_from_slice(&self.digest);
        out
    }

    /// Parses the binary form produced by [`to_bytes`](Self::to_bytes).
    ///
    /// Any other version, codec or hash function is rejected; this is not a
    /// general-purpose CID parser.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut rest = bytes;
        for (expected, what) in [
            (CID_VERSION, "version"),
            (MULTICODEC_JSON, "codec"),
            (MULTIHASH_SHA2_256, "hash function"),
            (SHA256_DIGEST_LENGTH as u64, "digest length"),
        ] {
            let (value, used) = decode_varint(rest)
                .ok_or_else(|| Btc1Error::InvalidDid(format!("truncated CID {what}")))?;
            if value != expected {
                return Err(Btc1Error::InvalidDid(format!(
                    "unexpected CID {what}: 0x{value:x}"
                )));
            }
            rest = &rest[used..];
        }

        let digest: [u8; SHA256_DIGEST_LENGTH] = rest.try_into().map_err(|_| {
            Btc1Error::InvalidDid(format!(
                "CID digest must be {SHA256_DIGEST_LENGTH} bytes, got {}",
                rest.len()
            ))
        })?;
        Ok(Self::from_digest(digest))
    }
}

impl fmt::Debug for Cid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cid({})", hex::encode(self.to_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::hash::sha256;
    use serde_json::json;

    #[test]
    fn test_varint_encoding() {
        let cases: [(u64, &[u8]); 5] = [
            (0x00, &[0x00]),
            (0x01, &[0x01]),
            (0x7f, &[0x7f]),
            (0x80, &[0x80, 0x01]),
            (0x0200, &[0x80, 0x04]),
        ];
        for (value, expected) in cases {
            let mut out = Vec::new();
            encode_varint(value, &mut out);
            assert_eq!(out, expected, "value 0x{value:x}");
            assert_eq!(decode_varint(&out), Some((value, out.len())));
        }
    }

    #[test]
    fn test_truncated_varint() {
        assert_eq!(decode_varint(&[0x80]), None);
        assert_eq!(decode_varint(&[]), None);
    }

    #[test]
    fn test_cid_layout() {
        let cid = Cid::from_digest(sha256(b"{}"));
        let bytes = cid.to_bytes();
        assert_eq!(bytes.len(), 37);
        assert_eq!(&bytes[..5], &[0x01, 0x80, 0x04, 0x12, 0x20]);
        assert_eq!(&bytes[5..], cid.digest());
    }

    #[test]
    fn test_cid_for_json_hashes_canonical_form() {
        let cid = Cid::for_json(&json!({ "b": 2, "a": 1 })).unwrap();
        assert_eq!(*cid.digest(), sha256(br#"{"a":1,"b":2}"#));
    }

    #[test]
    fn test_cid_parse() {
        let cid = Cid::for_json(&json!({ "hello": "world" })).unwrap();
        assert_eq!(Cid::from_bytes(&cid.to_bytes()).unwrap(), cid);
    }

    #[test]
    fn test_cid_parse_rejects_other_codecs() {
        let mut bytes = Cid::from_digest([7u8; 32]).to_bytes();
        // dag-json is 0x0129 -> varint a9 02; swap the codec.
        bytes.splice(1..3, [0xa9, 0x02]);
        assert!(matches!(Cid::from_bytes(&bytes), Err(Btc1Error::InvalidDid(_))));

        let short = &Cid::from_digest([7u8; 32]).to_bytes()[..20];
        assert!(Cid::from_bytes(short).is_err());
    }
}
