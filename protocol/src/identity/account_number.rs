//! # Account Numbers
//!
//! The public face of an identity: the auth public key, tagged with its key
//! type and network, checksummed and Base58-encoded.
//!
//! ```text
//! key_variant = (key_type << 4) | public_key_marker | (network << 1)
//!             = 0x11 (main) or 0x13 (test) for Ed25519
//!
//! prefix  = varint(key_variant)
//! packed  = prefix ∥ public_key[32]
//! account = Base58(packed ∥ SHA3-256(packed)[0..4])
//! ```
//!
//! Unlike seeds there is no magic and the prefix is variable-length, so the
//! parser reads the varint first and derives the expected length from it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::trace;

use crate::codec::reader::ByteReader;
use crate::codec::varint;
use crate::codec::CodecError;
use crate::config::{
    Network, CHECKSUM_LENGTH, KEY_TYPE_ED25519, KEY_TYPE_SHIFT, NETWORK_SHIFT, PUBLIC_KEY_LENGTH,
    PUBLIC_KEY_MARKER,
};
use crate::crypto::hash::checksum;
use crate::crypto::keys::PublicKey;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from parsing an account number.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("invalid base58 text: {0}")]
    InvalidBase58(String),

    /// The leading key-variant varint could not be read.
    #[error("invalid key variant")]
    InvalidKeyVariant(#[source] CodecError),

    /// Total length disagrees with what the key variant implies.
    #[error("invalid account number length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// `varint_len + 32 + 4`.
        expected: usize,
        /// Decoded length.
        actual: usize,
    },

    /// Stored checksum does not match the recomputed one. Hex-encoded.
    #[error("invalid account number checksum: expected {expected}, got {actual}")]
    InvalidChecksum {
        /// Recomputed checksum.
        expected: String,
        /// Checksum found in the text.
        actual: String,
    },

    /// The key variant does not mark a public key.
    #[error("key variant {0:#x} does not describe a public key")]
    NotAPublicKey(u64),

    /// The network bits name no known network.
    #[error("invalid network value {0}")]
    InvalidNetwork(u64),

    /// Valid account number, wrong network for the caller.
    #[error("account number is for the {actual} network, expected {expected}")]
    NetworkMismatch {
        /// Network the caller is configured for.
        expected: Network,
        /// Network in the account number.
        actual: Network,
    },
}

// ---------------------------------------------------------------------------
// AccountNumber
// ---------------------------------------------------------------------------

/// A parsed account number: an Ed25519 public key on a network.
///
/// # Examples
///
/// ```
/// use keyseed_protocol::config::Network;
/// use keyseed_protocol::crypto::PublicKey;
/// use keyseed_protocol::identity::AccountNumber;
///
/// let account = AccountNumber::new(PublicKey::from_bytes([9u8; 32]), Network::Test);
/// let text = account.encode();
/// assert_eq!(AccountNumber::parse(&text).unwrap(), account);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountNumber {
    public_key: PublicKey,
    network: Network,
}

impl AccountNumber {
    pub fn new(public_key: PublicKey, network: Network) -> Self {
        Self {
            public_key,
            network,
        }
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn network(&self) -> Network {
        self.network
    }

    /// `(key_type << 4) | public_key_marker | (network << 1)`.
    pub fn key_variant(&self) -> u64 {
        (KEY_TYPE_ED25519 << KEY_TYPE_SHIFT)
            | PUBLIC_KEY_MARKER
            | (u64::from(self.network.value()) << NETWORK_SHIFT)
    }

    /// The varint-encoded key variant.
    pub fn prefix(&self) -> Vec<u8> {
        varint::encode(self.key_variant())
    }

    /// `prefix ∥ public_key`, the form embedded in signed records.
    pub fn pack(&self) -> Vec<u8> {
        let mut packed = self.prefix();
        packed.extend_from_slice(self.public_key.as_bytes());
        packed
    }

    pub fn encode(&self) -> String {
        let mut raw = self.pack();
        let sum = checksum(&raw);
        raw.extend_from_slice(&sum);
        bs58::encode(raw).into_string()
    }

    /// Parses and validates an account number.
    ///
    /// Checks run in order: Base58, key-variant varint, total length,
    /// checksum, public-key marker, network.
    pub fn parse(text: &str) -> Result<Self, AddressError> {
        let raw = bs58::decode(text.trim())
            .into_vec()
            .map_err(|e| AddressError::InvalidBase58(e.to_string()))?;

        let (variant, variant_len) = varint::decode(&raw).map_err(AddressError::InvalidKeyVariant)?;
        let expected = variant_len + PUBLIC_KEY_LENGTH + CHECKSUM_LENGTH;
        if raw.len() != expected {
            return Err(AddressError::InvalidLength {
                expected,
                actual: raw.len(),
            });
        }

        let (body, stored) = raw.split_at(expected - CHECKSUM_LENGTH);
        let computed = checksum(body);
        if computed.as_slice() != stored {
            return Err(AddressError::InvalidChecksum {
                expected: hex::encode(computed),
                actual: hex::encode(stored),
            });
        }

        if variant & 0x01 != PUBLIC_KEY_MARKER {
            return Err(AddressError::NotAPublicKey(variant));
        }

        let network_value = (variant >> NETWORK_SHIFT) & 0x01;
        let network =
            Network::from_value(network_value).ok_or(AddressError::InvalidNetwork(network_value))?;

        let mut reader = ByteReader::new(body);
        reader
            .take(variant_len)
            .map_err(AddressError::InvalidKeyVariant)?;
        let key_bytes = reader
            .take_array::<PUBLIC_KEY_LENGTH>()
            .map_err(AddressError::InvalidKeyVariant)?;

        trace!(%network, variant, "parsed account number");
        Ok(Self {
            public_key: PublicKey::from_bytes(key_bytes),
            network,
        })
    }

    /// Like [`parse`](Self::parse), but also requires `network`.
    pub fn parse_for(text: &str, network: Network) -> Result<Self, AddressError> {
        let account = Self::parse(text)?;
        if account.network != network {
            return Err(AddressError::NetworkMismatch {
                expected: network,
                actual: account.network,
            });
        }
        Ok(account)
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}

impl fmt::Debug for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountNumber({})", self.encode())
    }
}

impl FromStr for AccountNumber {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for AccountNumber {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for AccountNumber {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
