//! # Key Derivation
//!
//! Turns seed core bytes into the auth (Ed25519) and enc (X25519) keypairs.
//! The two seed generations use unrelated primitives, and each must be
//! reproduced bit for bit: a wallet created under one derivation cannot be
//! opened with the other.
//!
//! ```text
//! V1 (17-byte core):
//!     okm  = SHAKE256(core ∥ core ∥ core ∥ core)[0..64]
//!     auth = Ed25519 seed  okm[0..32]
//!     enc  = X25519 secret okm[32..64]
//!
//! V2 (32-byte core):
//!     expand(D) = tag ∥ ct  where (tag, ct) = XSalsa20Poly1305(key=core, nonce=0²⁴).seal(D)
//!     auth = Ed25519 seed  expand(00…03E7)
//!     enc  = X25519 secret expand(00…03E8)
//! ```
//!
//! The V2 construction is NaCl's `crypto_secretbox` used as a keyed PRF over
//! a 16-byte domain constant: 16 bytes of Poly1305 tag followed by 16 bytes
//! of XSalsa20 ciphertext give exactly one 32-byte key.

use xsalsa20poly1305::aead::{AeadInPlace, KeyInit};
use xsalsa20poly1305::{Key, Nonce, XSalsa20Poly1305};
use zeroize::Zeroizing;

use crate::config::{
    AUTH_KEY_INDEX, ENC_KEY_INDEX, PRIVATE_KEY_LENGTH, SECRETBOX_NONCE_LENGTH, SEED_V1_CORE_LENGTH,
    SEED_V1_SHAKE_ROUNDS, SEED_V2_CORE_LENGTH,
};
use crate::crypto::hash::shake256;
use crate::crypto::keys::{EncryptionKeypair, SigningKeypair};

/// Index of the auth key in the V1 SHAKE output, in 32-byte blocks.
const V1_AUTH_BLOCK: usize = 0;

/// Index of the enc key in the V1 SHAKE output.
const V1_ENC_BLOCK: usize = 1;

/// Squeezes `count` consecutive 32-byte keys out of a V1 core.
pub fn v1_expand(core: &[u8; SEED_V1_CORE_LENGTH], count: usize) -> Zeroizing<Vec<u8>> {
    Zeroizing::new(shake256(
        core,
        SEED_V1_SHAKE_ROUNDS,
        PRIVATE_KEY_LENGTH * count,
    ))
}

fn v1_key(core: &[u8; SEED_V1_CORE_LENGTH], block: usize) -> Zeroizing<[u8; PRIVATE_KEY_LENGTH]> {
    let okm = v1_expand(core, block + 1);
    let mut key = Zeroizing::new([0u8; PRIVATE_KEY_LENGTH]);
    key.copy_from_slice(&okm[block * PRIVATE_KEY_LENGTH..(block + 1) * PRIVATE_KEY_LENGTH]);
    key
}

pub fn v1_auth_keypair(core: &[u8; SEED_V1_CORE_LENGTH]) -> SigningKeypair {
    SigningKeypair::from_seed(&v1_key(core, V1_AUTH_BLOCK))
}

pub fn v1_enc_keypair(core: &[u8; SEED_V1_CORE_LENGTH]) -> EncryptionKeypair {
    EncryptionKeypair::from_private_key(&v1_key(core, V1_ENC_BLOCK))
}

/// `secretbox(domain, zero nonce, key = core)` reduced to `tag ∥ ciphertext`.
pub fn keyed_expand(
    core: &[u8; SEED_V2_CORE_LENGTH],
    domain: &[u8; 16],
) -> Zeroizing<[u8; PRIVATE_KEY_LENGTH]> {
    let cipher = XSalsa20Poly1305::new(Key::from_slice(core));
    let nonce = Nonce::from([0u8; SECRETBOX_NONCE_LENGTH]);
    let mut ciphertext = Zeroizing::new(*domain);
    let tag = cipher
        .encrypt_in_place_detached(&nonce, b"", ciphertext.as_mut_slice())
        .expect("sealing a 16-byte message cannot exceed the XSalsa20 length limit");

    let mut out = Zeroizing::new([0u8; PRIVATE_KEY_LENGTH]);
    out[..16].copy_from_slice(&tag);
    out[16..].copy_from_slice(ciphertext.as_slice());
    out
}

pub fn v2_auth_keypair(core: &[u8; SEED_V2_CORE_LENGTH]) -> SigningKeypair {
    SigningKeypair::from_seed(&keyed_expand(core, &AUTH_KEY_INDEX))
}

pub fn v2_enc_keypair(core: &[u8; SEED_V2_CORE_LENGTH]) -> EncryptionKeypair {
    EncryptionKeypair::from_private_key(&keyed_expand(core, &ENC_KEY_INDEX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_v1_blocks_are_slices_of_one_stream() {
        let core = [0x42u8; SEED_V1_CORE_LENGTH];
        let stream = v1_expand(&core, 2);
        assert_eq!(&v1_key(&core, 0)[..], &stream[..32]);
        assert_eq!(&v1_key(&core, 1)[..], &stream[32..]);
    }

    #[test]
    fn test_v1_auth_and_enc_differ() {
        let core = [0x17u8; SEED_V1_CORE_LENGTH];
        assert_ne!(*v1_key(&core, 0), *v1_key(&core, 1));
    }

    #[test]
    fn test_v1_derivation_is_deterministic() {
        let core = [0x99u8; SEED_V1_CORE_LENGTH];
        assert_eq!(v1_auth_keypair(&core), v1_auth_keypair(&core));
        assert_eq!(v1_enc_keypair(&core), v1_enc_keypair(&core));
    }

    #[test]
    fn test_keyed_expand_domain_separation() {
        let core = [0x01u8; SEED_V2_CORE_LENGTH];
        let auth = keyed_expand(&core, &AUTH_KEY_INDEX);
        let enc = keyed_expand(&core, &ENC_KEY_INDEX);
        assert_ne!(*auth, *enc);
        // Only the last ciphertext byte of the domain differs (E7 vs E8), so
        // the ciphertext halves differ in exactly that byte: same keystream.
        assert_eq!(auth[16..31], enc[16..31]);
        assert_eq!(auth[31] ^ enc[31], 0xE7 ^ 0xE8);
    }

    #[test]
    fn test_keyed_expand_depends_on_key() {
        let a = keyed_expand(&[0x01u8; 32], &AUTH_KEY_INDEX);
        let b = keyed_expand(&[0x02u8; 32], &AUTH_KEY_INDEX);
        assert_ne!(*a, *b);
    }

    #[test]
    fn test_v2_derivation_is_deterministic() {
        let core = [0x5Au8; SEED_V2_CORE_LENGTH];
        assert_eq!(v2_auth_keypair(&core), v2_auth_keypair(&core));
        assert_eq!(v2_enc_keypair(&core), v2_enc_keypair(&core));
        assert_ne!(
            v2_auth_keypair(&core).public_key().as_bytes(),
            &v2_enc_keypair(&core).public_key_bytes()
        );
    }
}
