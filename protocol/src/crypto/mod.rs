//! # Cryptographic Primitives
//!
//! Thin, typed wrappers over audited crates. Nothing in here is novel and
//! nothing should be:
//!
//! - **Ed25519** (`ed25519-dalek`) for the auth keypair and signatures.
//! - **X25519** (`x25519-dalek`) for the enc keypair.
//! - **SHA3-256 / SHAKE256** (`sha3`) for checksums and 12-word key
//!   derivation.
//! - **XSalsa20-Poly1305** (`xsalsa20poly1305`) as the keyed expansion
//!   behind 24-word key derivation. See [`crate::seed::kdf`].
//!
//! Every derivation and checksum here is frozen by existing wallets. If a
//! change to this module alters a single output byte, it is a bug.

pub mod hash;
pub mod keys;
pub mod signatures;

pub use hash::{checksum, sha3_256, shake256};
pub use keys::{EncryptionKeypair, KeyError, PublicKey, Signature, SigningKeypair};
pub use signatures::{sign, verify};
