// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # keyseed: Deterministic Account Identity
//!
//! One compact seed, everything else derived. From a seed keyseed produces
//! an Ed25519 signing keypair, an X25519 encryption keypair and a public
//! account number, and it can write the seed out as a Base58 string or as
//! a 12/24-word recovery phrase.
//!
//! ## Modules
//!
//! - **config**: Wire constants, networks, seed generations.
//! - **codec**: Varints and the checksummed Base58 frame.
//! - **crypto**: Hashes and typed key wrappers over audited crates.
//! - **seed**: The two seed generations and their key derivations.
//! - **mnemonic**: Entropy ⇄ words, English and Traditional Chinese.
//! - **identity**: `AccountIdentity` and account numbers.
//!
//! ## Compatibility
//!
//! Every byte layout here is already in users' hands as backups and
//! addresses. Derivations, checksums and bit positions are frozen; changing
//! any of them strands existing wallets.
//!
//! ```
//! use keyseed_protocol::config::Network;
//! use keyseed_protocol::identity::AccountIdentity;
//! use keyseed_protocol::mnemonic::Locale;
//!
//! let identity = AccountIdentity::create(Network::Main);
//! let phrase = identity.recovery_phrase(Locale::English);
//! let restored = AccountIdentity::from_recovery_phrase(phrase.words()).unwrap();
//! assert_eq!(restored.account_number(), identity.account_number());
//! ```

pub mod codec;
pub mod config;
pub mod crypto;
pub mod identity;
pub mod mnemonic;
pub mod seed;

pub use config::{IdentityConfig, Network, SeedVersion};
pub use identity::{AccountIdentity, AccountNumber, AddressError, IdentityError};
pub use mnemonic::{Locale, MnemonicError, RecoveryPhrase};
pub use seed::{Seed, SeedError};
