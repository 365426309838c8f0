//! Public key <-> address codec.
//!
//! An address is the Base58 (Bitcoin alphabet) encoding of a fixed 50-byte
//! payload:
//!
//! ```text
//! [0x00] [public key bytes ...] [checksum padding ...] [padding length]
//! ```
//!
//! The padding is taken from the SHA-256 digest of the public key, starting
//! at digest byte 0, and fills the payload up to 49 bytes. Keys shorter than
//! 16 bytes need more padding than a digest provides; the remainder is zero.
//! The trailing byte records how many padding bytes were written, which is
//! what lets [`decode`] find the end of the key.
//!
//! Public keys are handled byte-per-character: text keys map each code point
//! to one byte (Latin-1), never to UTF-8. The digest is taken over those same
//! bytes, so for keys containing U+0080..U+00FF the padding differs from
//! addresses produced by clients that hash the UTF-8 form of the key; such
//! addresses still [`decode`], but fail [`decode_verified`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::CoreError;

/// Leading byte of every address payload.
pub const ADDRESS_PREFIX: u8 = 0x00;

/// Decoded length of every address payload.
pub const ADDRESS_LEN: usize = 50;

/// Length of prefix + key + padding, i.e. everything but the trailing
/// padding-length byte.
const PADDED_LEN: usize = ADDRESS_LEN - 1;

/// Longest public key that still fits in an address (zero padding bytes).
pub const MAX_PUBLIC_KEY_LEN: usize = PADDED_LEN - 1;

// ==============================================================================
// Public Key
// ==============================================================================

/// Raw public key material, one byte per character.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PublicKey(Vec<u8>);

impl PublicKey {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Map each character of `text` to the byte with the same code point.
    ///
    /// Fails for characters above U+00FF, which have no single-byte form.
    pub fn from_latin1(text: &str) -> Result<Self, CoreError> {
        text.chars()
            .enumerate()
            .map(|(index, ch)| {
                u8::try_from(ch).map_err(|_| CoreError::InvalidPublicKeyChar { ch, index })
            })
            .collect::<Result<Vec<u8>, _>>()
            .map(Self)
    }

    /// Render the key back to text, one character per byte.
    pub fn to_latin1(&self) -> String {
        self.0.iter().copied().map(char::from).collect()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for PublicKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_latin1(s)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_latin1())
    }
}

// ==============================================================================
// Address
// ==============================================================================

/// A Base58 address whose payload has passed the length and prefix checks.
///
/// Parsing does not verify the checksum padding; see [`decode_verified`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn public_key(&self) -> Result<PublicKey, CoreError> {
        decode(&self.0)
    }
}

impl FromStr for Address {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_payload(s)?;
        Ok(Self(s.to_owned()))
    }
}

impl TryFrom<String> for Address {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        decode_payload(&value)?;
        Ok(Self(value))
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ==============================================================================
// Codec
// ==============================================================================

/// Encode a public key of at most [`MAX_PUBLIC_KEY_LEN`] bytes as an address.
pub fn encode(public_key: &PublicKey) -> Result<Address, CoreError> {
    let key = public_key.as_bytes();
    if key.len() > MAX_PUBLIC_KEY_LEN {
        return Err(CoreError::InvalidPublicKeyLength {
            len: key.len(),
            max: MAX_PUBLIC_KEY_LEN,
        });
    }

    let checksum_len = MAX_PUBLIC_KEY_LEN - key.len();
    let mut payload = Vec::with_capacity(ADDRESS_LEN);
    payload.push(ADDRESS_PREFIX);
    payload.extend_from_slice(key);
    payload.extend(checksum_padding(key));
    // checksum_len <= MAX_PUBLIC_KEY_LEN, so it always fits in a byte.
    payload.push(checksum_len as u8);
    debug_assert_eq!(payload.len(), ADDRESS_LEN);

    Ok(Address(
        bs58::encode(payload)
            .with_alphabet(bs58::Alphabet::BITCOIN)
            .into_string(),
    ))
}

/// Recover the public key from an address.
///
/// Only the payload length and prefix byte are validated. The checksum
/// padding is not compared against the key's digest, so addresses with
/// corrupted padding still decode.
pub fn decode(address: &str) -> Result<PublicKey, CoreError> {
    let payload = decode_payload(address)?;
    let (key, _) = split_payload(&payload);
    Ok(PublicKey(key.to_vec()))
}

/// Like [`decode`], but also requires the checksum padding to match the
/// SHA-256 digest of the recovered key.
pub fn decode_verified(address: &str) -> Result<PublicKey, CoreError> {
    let payload = decode_payload(address)?;
    let (key, padding) = split_payload(&payload);
    let checksum_len = usize::from(payload[PADDED_LEN]);

    let matches =
        checksum_len == padding.len() && padding.iter().copied().eq(checksum_padding(key));
    if !matches {
        return Err(CoreError::ChecksumMismatch {
            expected_len: checksum_len,
        });
    }
    Ok(PublicKey(key.to_vec()))
}

/// Text-level form of [`encode`]: `publickey` is read byte-per-character.
pub fn publickey_to_address(publickey: &str) -> Result<Address, CoreError> {
    encode(&PublicKey::from_latin1(publickey)?)
}

/// Text-level form of [`decode`]: the key is rendered byte-per-character.
pub fn address_to_publickey(address: &str) -> Result<String, CoreError> {
    decode(address).map(|key| key.to_latin1())
}

fn decode_payload(address: &str) -> Result<Vec<u8>, CoreError> {
    let bytes = bs58::decode(address)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_vec()?;
    if bytes.len() != ADDRESS_LEN || bytes.first() != Some(&ADDRESS_PREFIX) {
        return Err(CoreError::InvalidAddress {
            prefix: bytes.first().copied(),
            len: bytes.len(),
        });
    }
    Ok(bytes)
}

/// Split a validated payload into `(key, padding)` using its trailing
/// padding-length byte. A length byte of 48 or more yields an empty key.
fn split_payload(payload: &[u8]) -> (&[u8], &[u8]) {
    let checksum_len = usize::from(payload[PADDED_LEN]);
    let key_end = PADDED_LEN.saturating_sub(checksum_len).max(1);
    (&payload[1..key_end], &payload[key_end..PADDED_LEN])
}

fn checksum_padding(key: &[u8]) -> impl Iterator<Item = u8> {
    let digest = Sha256::digest(key);
    digest
        .into_iter()
        .chain(std::iter::repeat(0))
        .take(MAX_PUBLIC_KEY_LEN - key.len())
}
