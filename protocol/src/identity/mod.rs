//! # Identity
//!
//! The top of the stack. An [`AccountIdentity`] owns a seed and exposes what
//! users actually handle:
//!
//! 1. **Encoded seed**: the Base58 backup string.
//! 2. **Recovery phrase**: the same secret as 12 or 24 words.
//! 3. **Account number**: the shareable, checksummed public address.
//!
//! Account numbers can be parsed and checked without any identity at all;
//! see [`AccountNumber`].

pub mod account;
pub mod account_number;

pub use account::{AccountIdentity, IdentityError};
pub use account_number::{AccountNumber, AddressError};
