//! 12-word (V1) seeds.
//!
//! 17 core bytes with the network hidden inside them:
//!
//! ```text
//! byte:  0        1        2        3        4 … 14   15       16
//!        76543210 76543210 76543210 76543210 …        ffff3210 7654xxxx
//!        ^        ^        ^        ^                 ^^^^
//!        tap 0x80 tap 0x40 tap 0x20 tap 0x10          network flag
//!
//! ffff = (b0 & 0x80 | b1 & 0x40 | b2 & 0x20 | b3 & 0x10) ^ (test ? 0xF0 : 0x00)
//! xxxx = zero
//! ```
//!
//! The flag is not a separate field, so the network can only be *derived*.
//! A core whose high nibble of byte 15 matches neither pattern is corrupt or
//! forged, and is refused at construction. So is a core with any `xxxx` bit
//! set: a 12-word phrase does not carry those bits, and restoring from the
//! phrase would silently produce a different seed.

use rand::rngs::OsRng;
use rand::RngCore;
use std::fmt;
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{kdf, SeedError};
use crate::codec::checksummed::{self, Decoded, FrameSpec};
use crate::config::{
    Network, SeedVersion, SEED_MAGIC, SEED_V1_CORE_LENGTH, SEED_V1_RANDOM_LENGTH, SEED_V1_VERSION,
};
use crate::crypto::keys::{EncryptionKeypair, SigningKeypair};

const FRAME: FrameSpec<'static> = FrameSpec {
    magic: &SEED_MAGIC,
    version: SEED_V1_VERSION,
    extra_lengths: &[],
    payload_length: SEED_V1_CORE_LENGTH,
};

/// Index of the byte whose high nibble carries the network flag.
const FLAG_BYTE: usize = 15;

/// Index of the last core byte, whose low nibble must be zero.
const PAD_BYTE: usize = SEED_V1_CORE_LENGTH - 1;

/// The network-flag taps: one bit from each of bytes 0..4.
fn mode(core: &[u8]) -> u8 {
    (core[0] & 0x80) | (core[1] & 0x40) | (core[2] & 0x20) | (core[3] & 0x10)
}

/// Recovers the network hidden in a V1 core.
///
/// Pure function of the bytes; this is the only way a V1 seed "knows" its
/// network.
pub fn network_from_core(core: &[u8]) -> Result<Network, SeedError> {
    if core.len() != SEED_V1_CORE_LENGTH {
        return Err(SeedError::InvalidCoreLength {
            version: SeedVersion::V1,
            expected: SEED_V1_CORE_LENGTH,
            actual: core.len(),
        });
    }
    let mode = mode(core);
    let flag = core[FLAG_BYTE] & 0xF0;
    if mode == flag {
        Ok(Network::Main)
    } else if mode == flag ^ 0xF0 {
        Ok(Network::Test)
    } else {
        Err(SeedError::UnrecoverableNetwork)
    }
}

/// Builds a V1 core from 16 random bytes, stamping the network flag in.
pub fn core_from_random(
    random: &[u8; SEED_V1_RANDOM_LENGTH],
    network: Network,
) -> [u8; SEED_V1_CORE_LENGTH] {
    let mut core = [0u8; SEED_V1_CORE_LENGTH];
    core[..SEED_V1_RANDOM_LENGTH].copy_from_slice(random);
    core[SEED_V1_RANDOM_LENGTH] = random[FLAG_BYTE] & 0xF0;

    let mut mode = mode(&core);
    if network == Network::Test {
        mode ^= 0xF0;
    }
    core[FLAG_BYTE] = mode | (core[FLAG_BYTE] & 0x0F);
    core
}

/// A 12-word generation seed.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SeedV1 {
    core: [u8; SEED_V1_CORE_LENGTH],
}

impl SeedV1 {
    /// Fresh seed from the OS RNG.
    pub fn generate(network: Network) -> Self {
        let mut random = [0u8; SEED_V1_RANDOM_LENGTH];
        OsRng.fill_bytes(&mut random);
        let seed = Self {
            core: core_from_random(&random, network),
        };
        random.zeroize();
        seed
    }

    /// Wraps existing core bytes, refusing any whose network flag is
    /// unreadable or whose padding bits are set.
    pub fn from_core(core: &[u8]) -> Result<Self, SeedError> {
        network_from_core(core)?;
        let pad = core[PAD_BYTE];
        if pad & 0x0F != 0 {
            return Err(SeedError::NonZeroPadding(pad));
        }
        let mut bytes = [0u8; SEED_V1_CORE_LENGTH];
        bytes.copy_from_slice(core);
        Ok(Self { core: bytes })
    }

    /// Like [`from_core`](Self::from_core), but also checks the flag
    /// against the network the caller believes it holds.
    pub fn from_core_with_network(core: &[u8], network: Network) -> Result<Self, SeedError> {
        let seed = Self::from_core(core)?;
        let actual = seed.network();
        if actual != network {
            return Err(SeedError::NetworkMismatch {
                expected: network,
                actual,
            });
        }
        Ok(seed)
    }

    /// Decodes `5A FE 02 ∥ core ∥ checksum` from Base58.
    pub fn decode(text: &str) -> Result<Self, SeedError> {
        let decoded = checksummed::decode(text, &FRAME)?;
        Self::from_decoded(&decoded)
    }

    /// Same as [`decode`](Self::decode) for an already Base58-decoded
    /// buffer.
    pub fn decode_raw(raw: &[u8]) -> Result<Self, SeedError> {
        let decoded = checksummed::decode_raw(raw, &FRAME)?;
        Self::from_decoded(&decoded)
    }

    fn from_decoded(decoded: &Decoded) -> Result<Self, SeedError> {
        let seed = Self::from_core(decoded.payload())?;
        debug!(network = %seed.network(), "decoded v1 seed");
        Ok(seed)
    }

    pub fn encode(&self) -> String {
        checksummed::encode(&SEED_MAGIC, SEED_V1_VERSION, &[], &self.core)
    }

    pub fn network(&self) -> Network {
        network_from_core(&self.core).expect("network flag validated at construction")
    }

    pub fn core_bytes(&self) -> &[u8; SEED_V1_CORE_LENGTH] {
        &self.core
    }

    pub fn auth_keypair(&self) -> SigningKeypair {
        kdf::v1_auth_keypair(&self.core)
    }

    pub fn enc_keypair(&self) -> EncryptionKeypair {
        kdf::v1_enc_keypair(&self.core)
    }
}

impl fmt::Debug for SeedV1 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SeedV1(network={})", self.network())
    }
}
