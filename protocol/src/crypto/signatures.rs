//! # Digital Signatures
//!
//! Free-function sign/verify over the typed keys.

use super::keys::{PublicKey, Signature, SigningKeypair};

/// Signs `message` with the auth keypair.
///
/// # Example
///
/// ```
/// use keyseed_protocol::crypto::{sign, verify, SigningKeypair};
///
/// let keypair = SigningKeypair::from_seed(&[1u8; 32]);
/// let signature = sign(&keypair, b"transfer bitmark");
/// assert!(verify(&keypair.public_key(), b"transfer bitmark", &signature));
/// ```
pub fn sign(keypair: &SigningKeypair, message: &[u8]) -> Signature {
    keypair.sign(message)
}

/// `true` iff `signature` is a valid Ed25519 signature of `message` under
/// `public_key`.
pub fn verify(public_key: &PublicKey, message: &[u8], signature: &Signature) -> bool {
    public_key.verify(message, signature)
}
