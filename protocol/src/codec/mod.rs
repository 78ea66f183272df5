//! # Byte Codecs
//!
//! The small, boring layer every encoded string in keyseed passes through:
//!
//! - **varint**: unsigned LEB128 integers for version tags, network fields
//!   and key variants.
//! - **reader**: a cursor over a length-checked buffer so decoders take
//!   fixed-width fields instead of guessing from `len()`.
//! - **checksummed**: `magic ∥ version ∥ extras ∥ payload ∥ checksum`
//!   framed as Base58. Seeds of both generations use it.
//!
//! Account numbers reuse `varint` and the checksum helper but not the full
//! frame: their prefix is variable-length and carries no magic.

pub mod checksummed;
pub mod reader;
pub mod varint;

use thiserror::Error;

pub use checksummed::{decode, encode, Decoded, FrameSpec};
pub use reader::ByteReader;

/// Errors raised while decoding framed data.
///
/// Checksums are rendered as hex so a log line tells you exactly which
/// bytes disagreed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("invalid base58 text: {0}")]
    InvalidBase58(String),

    #[error("invalid length: expected {expected} bytes, got {actual}")]
    Length { expected: usize, actual: usize },

    #[error("checksum mismatch: expected {expected}, got {actual}")]
    Checksum { expected: String, actual: String },

    #[error("magic number mismatch: expected {expected}, got {actual}")]
    MagicMismatch { expected: String, actual: String },

    #[error("version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: u64, actual: u64 },

    #[error("malformed varint: {0}")]
    Varint(&'static str),

    #[error("unexpected end of input: wanted {wanted} bytes, {remaining} remaining")]
    UnexpectedEnd { wanted: usize, remaining: usize },
}
