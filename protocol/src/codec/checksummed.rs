//! Checksummed Base58 framing.
//!
//! ```text
//! magic ∥ varint(version) ∥ extra[0] ∥ … ∥ extra[n] ∥ payload ∥ sha3_256(…)[0..4]
//! ```
//!
//! Base58 preserves magnitude, not width: a buffer that starts with zero
//! bytes decodes back to the right number of them only because the
//! alphabet spends a `1` on each. Decoding therefore always checks against
//! the exact width the caller declared in a [`FrameSpec`] and never infers
//! field boundaries from the decoded length.

use tracing::trace;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{varint, ByteReader, CodecError};
use crate::config::CHECKSUM_LENGTH;
use crate::crypto::hash::checksum;

/// Expected layout of a framed buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSpec<'a> {
    pub magic: &'a [u8],
    pub version: u64,
    /// Widths of the fields between the version tag and the payload.
    pub extra_lengths: &'a [usize],
    pub payload_length: usize,
}

impl FrameSpec<'_> {
    /// Total raw width, checksum included.
    pub fn raw_length(&self) -> usize {
        self.magic.len()
            + varint::encoded_len(self.version)
            + self.extra_lengths.iter().sum::<usize>()
            + self.payload_length
            + CHECKSUM_LENGTH
    }
}

/// Fields pulled out of a successfully decoded frame.
///
/// Payloads are usually seed cores, so the buffers are wiped on drop.
#[derive(Debug, Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Decoded {
    extras: Vec<Vec<u8>>,
    payload: Vec<u8>,
}

impl Decoded {
    /// The extra fields in declaration order.
    pub fn extras(&self) -> &[Vec<u8>] {
        &self.extras
    }

    /// Extra field `index`, if it was declared.
    pub fn extra(&self, index: usize) -> Option<&[u8]> {
        self.extras.get(index).map(Vec::as_slice)
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}

/// Frames `payload` and returns the Base58 text.
pub fn encode(magic: &[u8], version: u64, extras: &[&[u8]], payload: &[u8]) -> String {
    let mut buffer = to_raw(magic, version, extras, payload);
    let text = bs58::encode(&buffer).into_string();
    buffer.zeroize();
    text
}

/// Builds the raw framed buffer (checksum included) without Base58.
pub fn to_raw(magic: &[u8], version: u64, extras: &[&[u8]], payload: &[u8]) -> Vec<u8> {
    let version_bytes = varint::encode(version);
    let extras_len: usize = extras.iter().map(|e| e.len()).sum();
    let mut buffer = Vec::with_capacity(
        magic.len() + version_bytes.len() + extras_len + payload.len() + CHECKSUM_LENGTH,
    );
    buffer.extend_from_slice(magic);
    buffer.extend_from_slice(&version_bytes);
    for extra in extras {
        buffer.extend_from_slice(extra);
    }
    buffer.extend_from_slice(payload);
    let sum = checksum(&buffer);
    buffer.extend_from_slice(&sum);
    buffer
}

/// Base58-decodes `text` with no further validation.
pub fn decode_base58(text: &str) -> Result<Vec<u8>, CodecError> {
    bs58::decode(text.trim())
        .into_vec()
        .map_err(|e| CodecError::InvalidBase58(e.to_string()))
}

/// Decodes and validates a framed string against `spec`.
///
/// Checks run in a fixed order: length, checksum, magic, version. A typo
/// therefore almost always reports as a checksum failure.
pub fn decode(text: &str, spec: &FrameSpec<'_>) -> Result<Decoded, CodecError> {
    let mut raw = decode_base58(text)?;
    let result = decode_raw(&raw, spec);
    raw.zeroize();
    result
}

/// Same as [`decode`] for an already Base58-decoded buffer.
pub fn decode_raw(raw: &[u8], spec: &FrameSpec<'_>) -> Result<Decoded, CodecError> {
    let expected_len = spec.raw_length();
    if raw.len() != expected_len {
        return Err(CodecError::Length {
            expected: expected_len,
            actual: raw.len(),
        });
    }

    let (body, stored) = raw.split_at(raw.len() - CHECKSUM_LENGTH);
    let computed = checksum(body);
    if computed.as_slice() != stored {
        return Err(CodecError::Checksum {
            expected: hex::encode(computed),
            actual: hex::encode(stored),
        });
    }

    let mut reader = ByteReader::new(body);
    let magic = reader.take(spec.magic.len())?;
    if magic != spec.magic {
        return Err(CodecError::MagicMismatch {
            expected: hex::encode(spec.magic),
            actual: hex::encode(magic),
        });
    }

    // Compare the raw version bytes rather than the decoded integer, so a
    // non-canonical encoding of the right value is still rejected.
    let version_bytes = varint::encode(spec.version);
    let found = reader.take(version_bytes.len())?;
    if found != version_bytes.as_slice() {
        let actual = varint::decode(found).map(|(v, _)| v).unwrap_or(u64::from(found[0]));
        return Err(CodecError::VersionMismatch {
            expected: spec.version,
            actual,
        });
    }

    let mut extras = Vec::with_capacity(spec.extra_lengths.len());
    for &len in spec.extra_lengths {
        extras.push(reader.take(len)?.to_vec());
    }
    let payload = reader.take(spec.payload_length)?.to_vec();

    trace!(
        version = spec.version,
        extras = extras.len(),
        payload_len = payload.len(),
        "decoded checksummed frame"
    );

    Ok(Decoded { extras, payload })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAGIC: [u8; 2] = [0xAB, 0xCD];

    fn spec<'a>(extra_lengths: &'a [usize], payload_length: usize) -> FrameSpec<'a> {
        FrameSpec {
            magic: &MAGIC,
            version: 3,
            extra_lengths,
            payload_length,
        }
    }

    #[test]
    fn test_encode_decode_with_extras() {
        let text = encode(&MAGIC, 3, &[&[0x01], &[0x02, 0x03]], b"payload");
        let decoded = decode(&text, &spec(&[1, 2], 7)).unwrap();
        assert_eq!(decoded.extras(), &[vec![0x01], vec![0x02, 0x03]]);
        assert_eq!(decoded.extra(1), Some(&[0x02, 0x03][..]));
        assert_eq!(decoded.payload(), b"payload");
    }

    #[test]
    fn test_zero_length_payload_is_legal() {
        let text = encode(&MAGIC, 3, &[], &[]);
        let decoded = decode(&text, &spec(&[], 0)).unwrap();
        assert!(decoded.payload().is_empty());
    }

    #[test]
    fn test_leading_zero_bytes_survive() {
        let magic = [0x00, 0x00];
        let frame = FrameSpec {
            magic: &magic,
            version: 0,
            extra_lengths: &[],
            payload_length: 4,
        };
        let text = encode(&magic, 0, &[], &[0, 0, 0, 1]);
        assert!(text.starts_with("111"));
        let decoded = decode(&text, &frame).unwrap();
        assert_eq!(decoded.payload(), &[0, 0, 0, 1]);
    }

    #[test]
    fn test_length_checked_first() {
        let text = encode(&MAGIC, 3, &[], b"abc");
        let err = decode(&text, &spec(&[], 4)).unwrap_err();
        assert_eq!(
            err,
            CodecError::Length {
                expected: 11,
                actual: 10
            }
        );
    }

    #[test]
    fn test_checksum_mismatch_reports_both_sums() {
        let mut raw = to_raw(&MAGIC, 3, &[], b"abcd");
        raw[4] ^= 0x01;
        let err = decode_raw(&raw, &spec(&[], 4)).unwrap_err();
        match err {
            CodecError::Checksum { expected, actual } => {
                assert_eq!(actual, hex::encode(&raw[7..]));
                assert_ne!(expected, actual);
            }
            other => panic!("expected checksum error, got {other:?}"),
        }
    }

    #[test]
    fn test_magic_mismatch() {
        let text = encode(&[0xAB, 0xCE], 3, &[], b"abcd");
        let err = decode(&text, &spec(&[], 4)).unwrap_err();
        assert_eq!(
            err,
            CodecError::MagicMismatch {
                expected: "abcd".into(),
                actual: "abce".into()
            }
        );
    }

    #[test]
    fn test_version_mismatch() {
        let text = encode(&MAGIC, 4, &[], b"abcd");
        let err = decode(&text, &spec(&[], 4)).unwrap_err();
        assert_eq!(
            err,
            CodecError::VersionMismatch {
                expected: 3,
                actual: 4
            }
        );
    }

    #[test]
    fn test_invalid_base58_alphabet() {
        // '0', 'O', 'I' and 'l' are not in the Bitcoin alphabet.
        assert!(matches!(
            decode("0OIl", &spec(&[], 0)),
            Err(CodecError::InvalidBase58(_))
        ));
    }

    #[test]
    fn test_every_single_bit_flip_is_caught() {
        let raw = to_raw(&MAGIC, 3, &[&[0x01]], b"some payload bytes");
        let frame = spec(&[1], 18);
        for byte in 0..raw.len() {
            for bit in 0..8 {
                let mut corrupted = raw.clone();
                corrupted[byte] ^= 1 << bit;
                assert!(
                    matches!(decode_raw(&corrupted, &frame), Err(CodecError::Checksum { .. })),
                    "flip of byte {byte} bit {bit} not caught"
                );
            }
        }
    }
}
