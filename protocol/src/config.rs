//! # Protocol Configuration & Constants
//!
//! Every wire constant in keyseed lives here. If you're hardcoding a magic
//! byte somewhere else, you're doing it wrong.
//!
//! These values are frozen by the seeds, phrases and account numbers already
//! out in the wild. Changing any of them doesn't "upgrade" the format, it
//! silently orphans every wallet created before the change.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Shared framing
// ---------------------------------------------------------------------------

/// Length of the truncated SHA3-256 checksum appended to every encoded
/// seed and account number.
pub const CHECKSUM_LENGTH: usize = 4;

/// Magic bytes that open every encoded seed, both generations.
pub const SEED_MAGIC: [u8; 2] = [0x5A, 0xFE];

// ---------------------------------------------------------------------------
// 12-word (V1) seeds
// ---------------------------------------------------------------------------

/// Version tag of the 12-word generation. Together with [`SEED_MAGIC`] this
/// forms the `5A FE 02` header.
pub const SEED_V1_VERSION: u64 = 0x02;

/// Core length of a V1 seed: 128 random bits, 4 more bits of random
/// padding, and the high nibble of byte 15 overwritten by the network flag.
pub const SEED_V1_CORE_LENGTH: usize = 17;

/// Raw (pre-Base58) length of an encoded V1 seed.
pub const SEED_V1_ENCODED_LENGTH: usize = 24;

/// Number of random bytes drawn before the 17th byte is appended.
pub const SEED_V1_RANDOM_LENGTH: usize = 16;

/// Number of times the V1 core is absorbed into SHAKE256 before squeezing.
pub const SEED_V1_SHAKE_ROUNDS: usize = 4;

// ---------------------------------------------------------------------------
// 24-word (V2) seeds
// ---------------------------------------------------------------------------

/// Version tag of the 24-word generation.
pub const SEED_V2_VERSION: u64 = 0x01;

/// Core length of a V2 seed. Pure randomness, no hidden flags.
pub const SEED_V2_CORE_LENGTH: usize = 32;

/// Raw (pre-Base58) length of an encoded V2 seed.
pub const SEED_V2_ENCODED_LENGTH: usize = 40;

/// Width of the network field appended after the V2 version tag.
pub const SEED_V2_NETWORK_LENGTH: usize = 1;

/// Secretbox nonce length. The derivation always uses the all-zero nonce.
pub const SECRETBOX_NONCE_LENGTH: usize = 24;

/// Domain constant for the authentication (Ed25519) key. Big-endian 999.
pub const AUTH_KEY_INDEX: [u8; 16] = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0xE7,
];

/// Domain constant for the encryption (X25519) key. Big-endian 1000.
pub const ENC_KEY_INDEX: [u8; 16] = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0xE8,
];

// ---------------------------------------------------------------------------
// Keys & account numbers
// ---------------------------------------------------------------------------

/// Ed25519 secret seed / X25519 private key length.
pub const PRIVATE_KEY_LENGTH: usize = 32;

/// Public key length for both key roles.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Ed25519 signature length.
pub const SIGNATURE_LENGTH: usize = 64;

/// Key type tag for Ed25519, stored in bits 4.. of the key variant.
pub const KEY_TYPE_ED25519: u64 = 0x01;

/// Bit 0 of the key variant: set for public keys. Account numbers always
/// carry public keys.
pub const PUBLIC_KEY_MARKER: u64 = 0x01;

/// Shift applied to the key type tag inside the key variant.
pub const KEY_TYPE_SHIFT: u32 = 4;

/// Shift applied to the network bit inside the key variant.
pub const NETWORK_SHIFT: u32 = 1;

// ---------------------------------------------------------------------------
// Recovery phrases
// ---------------------------------------------------------------------------

/// Size of every supported word list.
pub const WORD_LIST_SIZE: usize = 2048;

/// Bits encoded by a single word.
pub const BITS_PER_WORD: usize = 11;

// ---------------------------------------------------------------------------
// Network
// ---------------------------------------------------------------------------

/// Errors from parsing configuration values out of text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown network '{0}': expected 'main' or 'test'")]
    UnknownNetwork(String),

    #[error("unknown seed version '{0}': expected 'v1' or 'v2'")]
    UnknownSeedVersion(String),
}

/// Which ledger an identity belongs to.
///
/// The wire value is what ends up in V2 seeds, V2 phrases and the network
/// bit of account numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// The live ledger.
    #[default]
    Main,
    /// The test ledger.
    Test,
}

impl Network {
    /// Wire value: `0x00` for main, `0x01` for test.
    pub fn value(self) -> u8 {
        match self {
            Network::Main => 0x00,
            Network::Test => 0x01,
        }
    }

    /// Inverse of [`value`](Self::value). Anything else is not a network.
    pub fn from_value(value: u64) -> Option<Self> {
        match value {
            0x00 => Some(Network::Main),
            0x01 => Some(Network::Test),
            _ => None,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Main => write!(f, "main"),
            Network::Test => write!(f, "test"),
        }
    }
}

impl FromStr for Network {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "main" | "mainnet" | "live" | "livenet" => Ok(Network::Main),
            "test" | "testnet" => Ok(Network::Test),
            other => Err(ConfigError::UnknownNetwork(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Seed version
// ---------------------------------------------------------------------------

/// The two seed generations. They share nothing but the magic bytes: core
/// length, header, key derivation and phrase length all differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SeedVersion {
    /// 17-byte core, 12-word phrase, SHAKE256 derivation.
    V1,
    /// 32-byte core, 24-word phrase, secretbox derivation. Current default.
    #[default]
    V2,
}

impl SeedVersion {
    /// Length of the seed's core bytes.
    pub fn core_length(self) -> usize {
        match self {
            SeedVersion::V1 => SEED_V1_CORE_LENGTH,
            SeedVersion::V2 => SEED_V2_CORE_LENGTH,
        }
    }

    /// Number of words in the recovery phrase.
    pub fn word_count(self) -> usize {
        match self {
            SeedVersion::V1 => 12,
            SeedVersion::V2 => 24,
        }
    }

    /// Number of entropy bytes behind the recovery phrase. V2 prepends the
    /// network byte to the core.
    pub fn entropy_length(self) -> usize {
        match self {
            SeedVersion::V1 => SEED_V1_CORE_LENGTH,
            SeedVersion::V2 => SEED_V2_CORE_LENGTH + SEED_V2_NETWORK_LENGTH,
        }
    }

    pub fn from_word_count(count: usize) -> Option<Self> {
        match count {
            12 => Some(SeedVersion::V1),
            24 => Some(SeedVersion::V2),
            _ => None,
        }
    }

    pub fn from_entropy_length(len: usize) -> Option<Self> {
        match len {
            SEED_V1_CORE_LENGTH => Some(SeedVersion::V1),
            33 => Some(SeedVersion::V2),
            _ => None,
        }
    }

    pub fn from_encoded_length(len: usize) -> Option<Self> {
        match len {
            SEED_V1_ENCODED_LENGTH => Some(SeedVersion::V1),
            SEED_V2_ENCODED_LENGTH => Some(SeedVersion::V2),
            _ => None,
        }
    }
}

impl fmt::Display for SeedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedVersion::V1 => write!(f, "v1"),
            SeedVersion::V2 => write!(f, "v2"),
        }
    }
}

impl FromStr for SeedVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "v1" | "1" | "12" => Ok(SeedVersion::V1),
            "v2" | "2" | "24" => Ok(SeedVersion::V2),
            other => Err(ConfigError::UnknownSeedVersion(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Runtime configuration
// ---------------------------------------------------------------------------

/// Caller-selected defaults for identity creation and account-number
/// validation.
///
/// There is no global instance. Whoever needs an "active network" passes
/// one of these around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Network new identities are created on, and the one account numbers
    /// are checked against by [`parse_account_number_for`].
    ///
    /// [`parse_account_number_for`]: crate::identity::AccountIdentity::parse_account_number_for
    pub network: Network,
    /// Seed generation used for new identities.
    pub seed_version: SeedVersion,
}

impl IdentityConfig {
    pub fn new(network: Network, seed_version: SeedVersion) -> Self {
        Self {
            network,
            seed_version,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_constants_are_distinct() {
        assert_ne!(AUTH_KEY_INDEX, ENC_KEY_INDEX);
        assert_eq!(u16::from_be_bytes([AUTH_KEY_INDEX[14], AUTH_KEY_INDEX[15]]), 999);
        assert_eq!(u16::from_be_bytes([ENC_KEY_INDEX[14], ENC_KEY_INDEX[15]]), 1000);
    }

    #[test]
    fn test_encoded_lengths_add_up() {
        // magic + version + core + checksum
        assert_eq!(
            SEED_MAGIC.len() + 1 + SEED_V1_CORE_LENGTH + CHECKSUM_LENGTH,
            SEED_V1_ENCODED_LENGTH
        );
        // magic + version + network + core + checksum
        assert_eq!(
            SEED_MAGIC.len() + 1 + SEED_V2_NETWORK_LENGTH + SEED_V2_CORE_LENGTH + CHECKSUM_LENGTH,
            SEED_V2_ENCODED_LENGTH
        );
    }

    #[test]
    fn test_phrase_lengths_fit_entropy() {
        // 12 words carry 132 of the 136 V1 bits; 24 words carry all 264 V2 bits.
        assert_eq!(SeedVersion::V1.entropy_length() * 8 / BITS_PER_WORD, 12);
        assert_eq!(SeedVersion::V2.entropy_length() * 8, 24 * BITS_PER_WORD);
    }

    #[test]
    fn test_network_wire_values() {
        assert_eq!(Network::Main.value(), 0);
        assert_eq!(Network::Test.value(), 1);
        assert_eq!(Network::from_value(0), Some(Network::Main));
        assert_eq!(Network::from_value(1), Some(Network::Test));
        assert_eq!(Network::from_value(2), None);
    }

    #[test]
    fn test_network_from_str() {
        assert_eq!("main".parse::<Network>().unwrap(), Network::Main);
        assert_eq!("TESTNET".parse::<Network>().unwrap(), Network::Test);
        assert!(matches!(
            "devnet".parse::<Network>(),
            Err(ConfigError::UnknownNetwork(_))
        ));
    }

    #[test]
    fn test_seed_version_lookups() {
        assert_eq!(SeedVersion::from_word_count(12), Some(SeedVersion::V1));
        assert_eq!(SeedVersion::from_word_count(24), Some(SeedVersion::V2));
        assert_eq!(SeedVersion::from_word_count(13), None);
        assert_eq!(SeedVersion::from_entropy_length(33), Some(SeedVersion::V2));
        assert_eq!(SeedVersion::from_encoded_length(24), Some(SeedVersion::V1));
        assert_eq!("24".parse::<SeedVersion>().unwrap(), SeedVersion::V2);
    }

    #[test]
    fn test_default_config_is_mainnet_v2() {
        let config = IdentityConfig::default();
        assert_eq!(config.network, Network::Main);
        assert_eq!(config.seed_version, SeedVersion::V2);
    }
}
