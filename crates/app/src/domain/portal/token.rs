//! Portal access token generation, encoding, and parsing.

use std::fmt;

use rand::{RngCore, rngs::OsRng};
use thiserror::Error;
use zeroize::Zeroize;

/// Number of random bytes in an access token (256 bits).
pub const ACCESS_TOKEN_BYTES: usize = 32;

/// Length of the hex-encoded token carried in access links.
pub const ACCESS_TOKEN_HEX_CHARS: usize = ACCESS_TOKEN_BYTES * 2;

#[derive(Clone)]
pub struct AccessToken {
    bytes: [u8; ACCESS_TOKEN_BYTES],
}

impl AccessToken {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; ACCESS_TOKEN_BYTES]) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; ACCESS_TOKEN_BYTES] {
        &self.bytes
    }

    /// Lowercase hex form, as stored and as embedded in links.
    #[must_use]
    pub fn to_hex(&self) -> String {
        const HEX: &[u8; 16] = b"0123456789abcdef";

        let mut encoded = String::with_capacity(ACCESS_TOKEN_HEX_CHARS);

        for byte in &self.bytes {
            encoded.push(HEX[(byte >> 4) as usize] as char);
            encoded.push(HEX[(byte & 0x0f) as usize] as char);
        }

        encoded
    }
}

impl PartialEq for AccessToken {
    fn eq(&self, other: &Self) -> bool {
        self.bytes
            .iter()
            .zip(other.bytes.iter())
            .fold(0_u8, |diff, (a, b)| diff | (a ^ b))
            == 0
    }
}

impl Eq for AccessToken {}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(**redacted**)")
    }
}

impl Drop for AccessToken {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessTokenError {
    #[error("access token has the wrong length")]
    InvalidLength,

    #[error("access token is not valid hex")]
    InvalidEncoding,
}

/// Generate a fresh token from the operating system CSPRNG.
#[must_use]
pub fn generate_access_token() -> AccessToken {
    let mut bytes = [0_u8; ACCESS_TOKEN_BYTES];

    OsRng.fill_bytes(&mut bytes);

    AccessToken::from_bytes(bytes)
}

/// Parse the hex token from an access link. Uppercase hex is accepted.
pub fn parse_access_token(token: &str) -> Result<AccessToken, AccessTokenError> {
    let token = token.trim();

    if token.len() != ACCESS_TOKEN_HEX_CHARS {
        return Err(AccessTokenError::InvalidLength);
    }

    let mut bytes = [0_u8; ACCESS_TOKEN_BYTES];

    for (byte, pair) in bytes.iter_mut().zip(token.as_bytes().chunks_exact(2)) {
        let [hi, lo] = pair else {
            return Err(AccessTokenError::InvalidLength);
        };

        let hi = decode_hex_nibble(*hi).ok_or(AccessTokenError::InvalidEncoding)?;
        let lo = decode_hex_nibble(*lo).ok_or(AccessTokenError::InvalidEncoding)?;

        *byte = (hi << 4) | lo;
    }

    Ok(AccessToken::from_bytes(bytes))
}

fn decode_hex_nibble(value: u8) -> Option<u8> {
    match value {
        b'0'..=b'9' => Some(value - b'0'),
        b'a'..=b'f' => Some(value - b'a' + 10),
        b'A'..=b'F' => Some(value - b'A' + 10),
        _ => None,
    }
}
