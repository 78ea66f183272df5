//! # Hashing Utilities
//!
//! keyseed needs exactly two members of the SHA-3 family:
//!
//! - **SHA3-256** for the 4-byte checksums on encoded seeds and account
//!   numbers. The checksum catches typos; it is not a MAC and nobody should
//!   treat it as one.
//! - **SHAKE256** as the extendable-output function behind 12-word seed key
//!   derivation.
//!
//! Both come from the `sha3` crate. Note that SHA3-256 is *not* Keccak-256;
//! the padding differs and so does every output. Anyone "optimizing" this
//! by swapping in an Ethereum Keccak helper will break every account number
//! ever issued.

use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Digest, Sha3_256, Shake256};

use crate::config::CHECKSUM_LENGTH;

/// SHA3-256 digest of `data`.
///
/// # Example
///
/// ```
/// use keyseed_protocol::crypto::sha3_256;
///
/// let digest = sha3_256(b"keyseed");
/// assert_eq!(digest.len(), 32);
/// ```
pub fn sha3_256(data: &[u8]) -> [u8; 32] {
    Sha3_256::digest(data).into()
}

/// First [`CHECKSUM_LENGTH`] bytes of `sha3_256(data)`.
pub fn checksum(data: &[u8]) -> [u8; CHECKSUM_LENGTH] {
    let digest = sha3_256(data);
    let mut out = [0u8; CHECKSUM_LENGTH];
    out.copy_from_slice(&digest[..CHECKSUM_LENGTH]);
    out
}

/// SHAKE256 over `input` absorbed `rounds` times in a row, squeezed to
/// `out_len` bytes.
///
/// Absorbing the same input repeatedly is equivalent to hashing the
/// concatenation `input ∥ input ∥ …`. The 12-word derivation uses four
/// rounds; the number is part of the format.
pub fn shake256(input: &[u8], rounds: usize, out_len: usize) -> Vec<u8> {
    let mut hasher = Shake256::default();
    for _ in 0..rounds {
        hasher.update(input);
    }
    let mut reader = hasher.finalize_xof();
    let mut out = vec![0u8; out_len];
    reader.read(&mut out);
    out
}
