//! # Seeds
//!
//! A seed is the single secret behind an identity. Two generations exist
//! and both stay readable forever:
//!
//! - **V1** ([`SeedV1`]): 17-byte core, 12-word phrase, network flag hidden
//!   inside the core bits, SHAKE256 derivation.
//! - **V2** ([`SeedV2`]): 32-byte core, 24-word phrase, explicit network
//!   byte, secretbox derivation. New identities are V2 unless asked
//!   otherwise.
//!
//! [`Seed`] is the closed sum over both. Everything above this module talks
//! to `Seed` and never matches on the generation itself.

pub mod kdf;
pub mod v1;
pub mod v2;

pub use v1::SeedV1;
pub use v2::SeedV2;

use thiserror::Error;
use tracing::debug;
use zeroize::Zeroizing;

use crate::codec::checksummed::decode_base58;
use crate::codec::CodecError;
use crate::config::{Network, SeedVersion, SEED_V1_CORE_LENGTH, SEED_V2_CORE_LENGTH};
use crate::crypto::keys::{EncryptionKeypair, SigningKeypair};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from building, decoding or interpreting a seed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeedError {
    /// The Base58 checksummed container was malformed.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Core bytes of the wrong size for the requested generation.
    #[error("invalid {version} seed core: expected {expected} bytes, got {actual}")]
    InvalidCoreLength {
        /// Generation being built.
        version: SeedVersion,
        /// Required core size.
        expected: usize,
        /// Size that was supplied.
        actual: usize,
    },

    /// Core bytes whose size matches no generation.
    #[error("unsupported seed core length {0}: expected 17 or 32 bytes")]
    UnsupportedCoreLength(usize),

    /// The network flag inside a V1 core matches neither network.
    #[error("cannot recover network from seed core")]
    UnrecoverableNetwork,

    /// The last V1 core byte has bits set that a 12-word phrase cannot
    /// carry.
    #[error("invalid seed padding: last core byte {0:#04x} must end in a zero nibble")]
    NonZeroPadding(u8),

    /// The seed belongs to a different network than the caller expected.
    #[error("network mismatch: expected {expected}, got {actual}")]
    NetworkMismatch {
        /// Network the caller asked for.
        expected: Network,
        /// Network recorded in the seed.
        actual: Network,
    },

    /// The V2 network field holds a value no network uses.
    #[error("invalid network value {0}")]
    InvalidNetwork(u64),

    /// Decoded seed text whose raw size matches no generation.
    #[error("unsupported encoded seed length {0}: expected 24 or 40 bytes")]
    UnsupportedEncodedLength(usize),

    /// Phrase entropy whose size matches no generation.
    #[error("unsupported seed entropy length {0}: expected 17 or 33 bytes")]
    UnsupportedEntropyLength(usize),
}

// ---------------------------------------------------------------------------
// Seed
// ---------------------------------------------------------------------------

/// A seed of either generation.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Seed {
    V1(SeedV1),
    V2(SeedV2),
}

impl Seed {
    /// Fresh random seed of the given generation.
    pub fn generate(version: SeedVersion, network: Network) -> Self {
        match version {
            SeedVersion::V1 => Seed::V1(SeedV1::generate(network)),
            SeedVersion::V2 => Seed::V2(SeedV2::generate(network)),
        }
    }

    /// Rebuilds a seed from raw core bytes, picking the generation by size.
    ///
    /// For V1 the network is read out of the core, and must agree with
    /// `network`. For V2 the core carries no network, so `network` is taken
    /// as given.
    pub fn from_core(core: &[u8], network: Network) -> Result<Self, SeedError> {
        match core.len() {
            SEED_V1_CORE_LENGTH => Ok(Seed::V1(SeedV1::from_core_with_network(core, network)?)),
            SEED_V2_CORE_LENGTH => Ok(Seed::V2(SeedV2::from_core(core, network)?)),
            other => Err(SeedError::UnsupportedCoreLength(other)),
        }
    }

    /// Decodes seed text of either generation.
    ///
    /// The generation is chosen by the size of the Base58-decoded buffer
    /// (24 bytes for V1, 40 for V2); the chosen decoder then checks the
    /// checksum, magic and version.
    pub fn from_encoded(text: &str) -> Result<Self, SeedError> {
        let raw = Zeroizing::new(decode_base58(text)?);
        let version = SeedVersion::from_encoded_length(raw.len())
            .ok_or(SeedError::UnsupportedEncodedLength(raw.len()))?;
        let seed = match version {
            SeedVersion::V1 => Seed::V1(SeedV1::decode_raw(&raw)?),
            SeedVersion::V2 => Seed::V2(SeedV2::decode_raw(&raw)?),
        };
        debug!(version = %seed.version(), network = %seed.network(), "decoded seed");
        Ok(seed)
    }

    /// Rebuilds a seed from recovery-phrase entropy.
    ///
    /// 17 bytes are a bare V1 core. 33 bytes are a V2 network byte followed
    /// by the 32-byte core.
    pub fn from_entropy(entropy: &[u8]) -> Result<Self, SeedError> {
        match entropy.len() {
            SEED_V1_CORE_LENGTH => Ok(Seed::V1(SeedV1::from_core(entropy)?)),
            len if len == SEED_V2_CORE_LENGTH + 1 => {
                let value = u64::from(entropy[0]);
                let network = Network::from_value(value).ok_or(SeedError::InvalidNetwork(value))?;
                Ok(Seed::V2(SeedV2::from_core(&entropy[1..], network)?))
            }
            other => Err(SeedError::UnsupportedEntropyLength(other)),
        }
    }

    /// Passes the seed through only if it belongs to `network`.
    pub fn require_network(self, network: Network) -> Result<Self, SeedError> {
        let actual = self.network();
        if actual != network {
            return Err(SeedError::NetworkMismatch {
                expected: network,
                actual,
            });
        }
        Ok(self)
    }

    pub fn encode(&self) -> String {
        match self {
            Seed::V1(seed) => seed.encode(),
            Seed::V2(seed) => seed.encode(),
        }
    }

    pub fn version(&self) -> SeedVersion {
        match self {
            Seed::V1(_) => SeedVersion::V1,
            Seed::V2(_) => SeedVersion::V2,
        }
    }

    pub fn network(&self) -> Network {
        match self {
            Seed::V1(seed) => seed.network(),
            Seed::V2(seed) => seed.network(),
        }
    }

    pub fn core_bytes(&self) -> &[u8] {
        match self {
            Seed::V1(seed) => seed.core_bytes(),
            Seed::V2(seed) => seed.core_bytes(),
        }
    }

    /// The bytes a recovery phrase encodes: the V1 core, or the V2 network
    /// byte followed by the V2 core.
    pub fn entropy(&self) -> Zeroizing<Vec<u8>> {
        let mut out = Zeroizing::new(Vec::with_capacity(self.version().entropy_length()));
        match self {
            Seed::V1(seed) => out.extend_from_slice(seed.core_bytes()),
            Seed::V2(seed) => {
                out.push(seed.network().value());
                out.extend_from_slice(seed.core_bytes());
            }
        }
        out
    }

    pub fn auth_keypair(&self) -> SigningKeypair {
        match self {
            Seed::V1(seed) => seed.auth_keypair(),
            Seed::V2(seed) => seed.auth_keypair(),
        }
    }

    pub fn enc_keypair(&self) -> EncryptionKeypair {
        match self {
            Seed::V1(seed) => seed.enc_keypair(),
            Seed::V2(seed) => seed.enc_keypair(),
        }
    }
}

impl From<SeedV1> for Seed {
    fn from(seed: SeedV1) -> Self {
        Seed::V1(seed)
    }
}

impl From<SeedV2> for Seed {
    fn from(seed: SeedV2) -> Self {
        Seed::V2(seed)
    }
}
