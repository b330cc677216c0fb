// Varbyte length prefix for framed buffers.
//
// Base-128, little-endian: least-significant group first.
// Each byte has bit 7 set except the final byte.
// The decoder never looks past the first `DECODE_SCAN_LIMIT` bytes.

use std::io::{self, Write};

/// Maximum encoded length for a 64-bit value (ceil(64/7) = 10).
pub const MAX_VARBYTE_LEN: usize = 10;

/// Number of leading bytes the decoder inspects before giving up.
///
/// Five groups carry 35 payload bits, which covers every size the raw codec
/// accepts while bounding reads on corrupted input.
pub const DECODE_SCAN_LIMIT: usize = 5;

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Encode `num` into the front of `buf`.
/// Returns the number of bytes written (1..=10).
#[inline]
pub fn encode_into(mut num: u64, buf: &mut [u8; MAX_VARBYTE_LEN]) -> usize {
    let mut i = 0;
    loop {
        let group = (num & 0x7F) as u8;
        num >>= 7;
        if num == 0 {
            buf[i] = group;
            return i + 1;
        }
        buf[i] = group | 0x80;
        i += 1;
    }
}

/// Encode `num` as a freshly allocated varbyte.
pub fn encode(num: u64) -> Vec<u8> {
    let mut buf = [0u8; MAX_VARBYTE_LEN];
    let len = encode_into(num, &mut buf);
    buf[..len].to_vec()
}

/// Encode `num` and write it to a `Write` sink.
pub fn write<W: Write>(w: &mut W, num: u64) -> io::Result<()> {
    let mut buf = [0u8; MAX_VARBYTE_LEN];
    let len = encode_into(num, &mut buf);
    w.write_all(&buf[..len])
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decode a varbyte from the start of `data`.
///
/// Returns `(value, bytes_consumed)`. Only the first [`DECODE_SCAN_LIMIT`]
/// bytes are examined; if none of them terminates the integer the header is
/// treated as corrupt.
pub fn decode(data: &[u8]) -> Result<(u64, usize), VarbyteError> {
    let scan = &data[..data.len().min(DECODE_SCAN_LIMIT)];
    let mut val: u64 = 0;
    for (i, &byte) in scan.iter().enumerate() {
        val |= u64::from(byte & 0x7F) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok((val, i + 1));
        }
    }
    Err(VarbyteError::Unterminated {
        scanned: scan.len(),
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Return the encoded byte-length of `num`.
#[inline]
pub fn encoded_len(num: u64) -> usize {
    let bits = 64 - num.leading_zeros();
    (bits.max(1).div_ceil(7) as usize).min(MAX_VARBYTE_LEN)
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum VarbyteError {
    /// No byte within the scan window had its continuation bit clear.
    #[error("varbyte header not terminated within {scanned} bytes")]
    Unterminated { scanned: usize },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_within_scan_limit() {
        let cases: &[u64] = &[
            0,
            1,
            127,
            128,
            255,
            256,
            16383,
            16384,
            i32::MAX as u64,
            u32::MAX as u64,
            (1 << 35) - 1,
        ];
        for &val in cases {
            let bytes = encode(val);
            let (decoded, consumed) = decode(&bytes).unwrap();
            assert_eq!(decoded, val, "roundtrip failed for {val}");
            assert_eq!(consumed, bytes.len(), "length mismatch for {val}");
            assert_eq!(encoded_len(val), bytes.len(), "encoded_len mismatch for {val}");
        }
    }

    #[test]
    fn zero_is_single_null_byte() {
        assert_eq!(encode(0), vec![0x00]);
    }

    #[test]
    fn encoding_is_little_endian() {
        // 300 = 0b10_0101100 -> low group first: 0xAC 0x02
        assert_eq!(encode(300), vec![0xAC, 0x02]);
    }

    #[test]
    fn single_byte_values() {
        for val in 0..=127u64 {
            assert_eq!(encode(val), vec![val as u8]);
        }
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let mut data = encode(70_000);
        let header_len = data.len();
        data.extend_from_slice(&[0xFF, 0xFF, 0x01]);
        assert_eq!(decode(&data), Ok((70_000, header_len)));
    }

    #[test]
    fn unterminated_within_scan_limit() {
        let data = [0x80, 0x80, 0x80, 0x80, 0x80, 0x00];
        assert_eq!(
            decode(&data),
            Err(VarbyteError::Unterminated { scanned: 5 })
        );
    }

    #[test]
    fn truncated_and_empty_input() {
        assert_eq!(
            decode(&[0x80, 0x80]),
            Err(VarbyteError::Unterminated { scanned: 2 })
        );
        assert_eq!(decode(&[]), Err(VarbyteError::Unterminated { scanned: 0 }));
    }

    #[test]
    fn large_values_exceed_scan_limit() {
        let bytes = encode(1 << 35);
        assert_eq!(bytes.len(), 6);
        assert!(decode(&bytes).is_err());
        assert_eq!(encoded_len(u64::MAX), MAX_VARBYTE_LEN);
    }

    #[test]
    fn write_matches_encode() {
        let mut out = Vec::new();
        write(&mut out, 999_999).unwrap();
        assert_eq!(out, encode(999_999));
        assert_eq!(decode(&out), Ok((999_999, out.len())));
    }
}
