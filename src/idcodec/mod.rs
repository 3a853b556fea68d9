//! # Identifier Codec
//!
//! Reversible obfuscation of internal integer primary keys for external
//! exposure. Every identifier that crosses the wire is the output of
//! [`IdCodec::encode`]; inbound references are run through
//! [`IdCodec::decode`], which fails loudly on anything not produced by
//! the matching encoder.
//!
//! Token layout (before base64): 4-byte tag || 8-byte masked id. The
//! mask is derived from SHA-256 of the configured secret, the tag from
//! SHA-256 over (secret || plain id bytes). A wrong secret, a truncated
//! token, or a flipped bit all surface as [`DecodeError`] — the caller
//! treats that as an integrity failure, not a client mistake.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use thiserror::Error;

/// Length of the raw token: 4-byte tag + 8-byte masked id.
const TOKEN_LEN: usize = 12;
const TAG_LEN: usize = 4;

/// Errors produced when decoding an opaque identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Input was not valid url-safe base64
    #[error("opaque id is not valid base64")]
    InvalidEncoding,

    /// Decoded token has the wrong length
    #[error("opaque id has invalid length")]
    InvalidLength,

    /// Integrity tag did not match; the token was not produced by this
    /// encoder or was tampered with
    #[error("opaque id failed integrity check")]
    TagMismatch,
}

/// Reversible codec for numeric primary keys.
#[derive(Debug, Clone)]
pub struct IdCodec {
    mask: [u8; 8],
    secret: Vec<u8>,
}

impl IdCodec {
    pub fn new(secret: &str) -> Self {
        let digest = Sha256::digest(secret.as_bytes());
        let mut mask = [0u8; 8];
        mask.copy_from_slice(&digest[..8]);
        Self {
            mask,
            secret: secret.as_bytes().to_vec(),
        }
    }

    /// Encode an internal id into its opaque external form.
    pub fn encode(&self, id: i64) -> String {
        let plain = id.to_be_bytes();
        let tag = self.tag(&plain);

        let mut token = [0u8; TOKEN_LEN];
        token[..TAG_LEN].copy_from_slice(&tag);
        for (i, byte) in plain.iter().enumerate() {
            token[TAG_LEN + i] = byte ^ self.mask[i];
        }

        URL_SAFE_NO_PAD.encode(token)
    }

    /// Decode an opaque external identifier back into the internal id.
    pub fn decode(&self, opaque: &str) -> Result<i64, DecodeError> {
        let token = URL_SAFE_NO_PAD
            .decode(opaque)
            .map_err(|_| DecodeError::InvalidEncoding)?;

        if token.len() != TOKEN_LEN {
            return Err(DecodeError::InvalidLength);
        }

        let mut plain = [0u8; 8];
        for i in 0..8 {
            plain[i] = token[TAG_LEN + i] ^ self.mask[i];
        }

        let expected = self.tag(&plain);
        if expected[..].ct_eq(&token[..TAG_LEN]).unwrap_u8() != 1 {
            return Err(DecodeError::TagMismatch);
        }

        Ok(i64::from_be_bytes(plain))
    }

    /// Integrity tag over (secret || plain id bytes).
    fn tag(&self, plain: &[u8; 8]) -> [u8; TAG_LEN] {
        let mut hasher = Sha256::new();
        hasher.update(&self.secret);
        hasher.update(plain);
        let digest = hasher.finalize();
        let mut tag = [0u8; TAG_LEN];
        tag.copy_from_slice(&digest[..TAG_LEN]);
        tag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let codec = IdCodec::new("test-secret");
        for id in [0i64, 1, 42, 9_999_999, i64::MAX, -1] {
            let opaque = codec.encode(id);
            assert_eq!(codec.decode(&opaque).unwrap(), id);
        }
    }

    #[test]
    fn test_encoding_is_opaque() {
        let codec = IdCodec::new("test-secret");
        let opaque = codec.encode(12345);
        assert!(!opaque.contains("12345"));
    }

    #[test]
    fn test_rejects_garbage() {
        let codec = IdCodec::new("test-secret");
        assert_eq!(codec.decode("!!!not base64!!!"), Err(DecodeError::InvalidEncoding));
        assert_eq!(codec.decode("c2hvcnQ"), Err(DecodeError::InvalidLength));
    }

    #[test]
    fn test_rejects_tampering() {
        let codec = IdCodec::new("test-secret");
        let opaque = codec.encode(77);
        let mut bytes = URL_SAFE_NO_PAD.decode(&opaque).unwrap();
        bytes[TOKEN_LEN - 1] ^= 0x01;
        let tampered = URL_SAFE_NO_PAD.encode(&bytes);
        assert_eq!(codec.decode(&tampered), Err(DecodeError::TagMismatch));
    }

    #[test]
    fn test_rejects_foreign_encoder() {
        let ours = IdCodec::new("secret-a");
        let theirs = IdCodec::new("secret-b");
        let opaque = theirs.encode(55);
        assert_eq!(ours.decode(&opaque), Err(DecodeError::TagMismatch));
    }
}
