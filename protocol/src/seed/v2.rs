//! 24-word (V2) seeds.
//!
//! 32 bytes of pure randomness. The network travels next to the core
//! rather than inside it:
//!
//! ```text
//! encoded = Base58(5A FE ∥ 01 ∥ network ∥ core[32] ∥ checksum[4])
//! phrase  = words(network ∥ core[32])
//! ```

use rand::rngs::OsRng;
use rand::RngCore;
use std::fmt;
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{kdf, SeedError};
use crate::codec::checksummed::{self, Decoded, FrameSpec};
use crate::codec::reader::ByteReader;
use crate::codec::varint;
use crate::config::{
    Network, SeedVersion, SEED_MAGIC, SEED_V2_CORE_LENGTH, SEED_V2_NETWORK_LENGTH, SEED_V2_VERSION,
};
use crate::crypto::keys::{EncryptionKeypair, SigningKeypair};

const FRAME: FrameSpec<'static> = FrameSpec {
    magic: &SEED_MAGIC,
    version: SEED_V2_VERSION,
    extra_lengths: &[SEED_V2_NETWORK_LENGTH],
    payload_length: SEED_V2_CORE_LENGTH,
};

/// A 24-word generation seed. The current default for new identities.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SeedV2 {
    core: [u8; SEED_V2_CORE_LENGTH],
    #[zeroize(skip)]
    network: Network,
}

impl SeedV2 {
    /// Fresh seed from the OS RNG.
    pub fn generate(network: Network) -> Self {
        let mut core = [0u8; SEED_V2_CORE_LENGTH];
        OsRng.fill_bytes(&mut core);
        Self { core, network }
    }

    pub fn from_core(core: &[u8], network: Network) -> Result<Self, SeedError> {
        let bytes: [u8; SEED_V2_CORE_LENGTH] =
            core.try_into().map_err(|_| SeedError::InvalidCoreLength {
                version: SeedVersion::V2,
                expected: SEED_V2_CORE_LENGTH,
                actual: core.len(),
            })?;
        Ok(Self {
            core: bytes,
            network,
        })
    }

    /// Decodes `5A FE 01 ∥ network ∥ core ∥ checksum` from Base58.
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
        let mut field = ByteReader::new(decoded.extra(0).unwrap_or_default());
        let value = field.read_varint()?;
        let network = Network::from_value(value).ok_or(SeedError::InvalidNetwork(value))?;
        let seed = Self::from_core(decoded.payload(), network)?;
        debug!(network = %network, "decoded v2 seed");
        Ok(seed)
    }

    pub fn encode(&self) -> String {
        let network = varint::encode(u64::from(self.network.value()));
        checksummed::encode(&SEED_MAGIC, SEED_V2_VERSION, &[&network], &self.core)
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn core_bytes(&self) -> &[u8; SEED_V2_CORE_LENGTH] {
        &self.core
    }

    pub fn auth_keypair(&self) -> SigningKeypair {
        kdf::v2_auth_keypair(&self.core)
    }

    pub fn enc_keypair(&self) -> EncryptionKeypair {
        kdf::v2_enc_keypair(&self.core)
    }
}

impl fmt::Debug for SeedV2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SeedV2(network={})", self.network)
    }
}
