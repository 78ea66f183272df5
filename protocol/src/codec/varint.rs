//! Unsigned LEB128 varints: seven bits per byte, least significant group
//! first, high bit set on every byte except the last.
//!
//! Every value keyseed writes fits in one byte (`0x01`, `0x02`, `0x11`,
//! `0x13`), but parsers still have to cope with whatever a user pastes in.

use super::CodecError;

/// Longest encoding accepted for a `u64`.
pub const MAX_VARINT_LENGTH: usize = 10;

/// Encodes `value` as an unsigned varint.
pub fn encode(mut value: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(2);
    while value >= 0x80 {
        out.push((value as u8 & 0x7F) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
    out
}

/// Decodes a varint from the front of `bytes`.
///
/// Returns the value and how many bytes it occupied.
pub fn decode(bytes: &[u8]) -> Result<(u64, usize), CodecError> {
    let mut value: u64 = 0;
    for (i, byte) in bytes.iter().enumerate().take(MAX_VARINT_LENGTH) {
        let group = u64::from(byte & 0x7F);
        let shift = 7 * i as u32;
        if shift == 63 && group > 1 {
            return Err(CodecError::Varint("value overflows u64"));
        }
        value |= group << shift;
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }
    if bytes.len() >= MAX_VARINT_LENGTH {
        Err(CodecError::Varint("value overflows u64"))
    } else {
        Err(CodecError::Varint("truncated varint"))
    }
}

/// Number of bytes [`encode`] produces for `value`.
pub fn encoded_len(value: u64) -> usize {
    let bits = 64 - value.leading_zeros() as usize;
    bits.max(1).div_ceil(7)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_byte_values() {
        assert_eq!(encode(0), vec![0x00]);
        assert_eq!(encode(0x02), vec![0x02]);
        assert_eq!(encode(0x13), vec![0x13]);
        assert_eq!(encode(0x7F), vec![0x7F]);
    }

    #[test]
    fn test_multi_byte_values() {
        assert_eq!(encode(0x80), vec![0x80, 0x01]);
        assert_eq!(encode(300), vec![0xAC, 0x02]);
        assert_eq!(decode(&[0xAC, 0x02]).unwrap(), (300, 2));
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        assert_eq!(decode(&[0x11, 0xFF, 0xFF]).unwrap(), (0x11, 1));
    }

    #[test]
    fn test_decode_max_value() {
        let bytes = encode(u64::MAX);
        assert_eq!(bytes.len(), MAX_VARINT_LENGTH);
        assert_eq!(decode(&bytes).unwrap(), (u64::MAX, MAX_VARINT_LENGTH));
    }

    #[test]
    fn test_decode_rejects_truncated() {
        assert_eq!(decode(&[]), Err(CodecError::Varint("truncated varint")));
        assert_eq!(decode(&[0x80]), Err(CodecError::Varint("truncated varint")));
    }

    #[test]
    fn test_decode_rejects_overflow() {
        assert!(decode(&[0xFF; 11]).is_err());
        let mut too_big = vec![0xFF; 9];
        too_big.push(0x02);
        assert!(decode(&too_big).is_err());
    }

    #[test]
    fn test_encoded_len_matches_encode() {
        for value in [0, 1, 0x7F, 0x80, 0x3FFF, 0x4000, u64::MAX] {
            assert_eq!(encoded_len(value), encode(value).len(), "value {value}");
        }
    }
}
