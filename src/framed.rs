// One-shot framed compression.
//
// Frame layout, byte-exact:
//
//   [varbyte original size][raw LZ4 block]
//
// No streaming state is involved; every function here is pure over its
// inputs and safe to call from many threads at once.

use crate::error::{CorruptionError, Result};
use crate::raw::{Lz4Block, RawCodec};
use crate::varbyte::{self, MAX_VARBYTE_LEN};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Compress `input` into a self-describing frame.
///
/// # Example
/// ```
/// let frame = lz4stream::framed::compress(b"hello hello hello hello", false).unwrap();
/// let plain = lz4stream::framed::uncompress(&frame).unwrap();
/// assert_eq!(plain, b"hello hello hello hello");
/// ```
pub fn compress(input: &[u8], use_high_compression: bool) -> Result<Vec<u8>> {
    compress_with(&Lz4Block, input, use_high_compression)
}

/// High-compression shorthand for [`compress`].
///
/// The built-in LZ4 codec has a single level, so this returns exactly what
/// `compress(input, false)` does.
pub fn compress_hc(input: &[u8]) -> Result<Vec<u8>> {
    compress(input, true)
}

/// Expand a frame produced by [`compress`].
pub fn uncompress(input: &[u8]) -> Result<Vec<u8>> {
    uncompress_with(&Lz4Block, input)
}

/// Compress with a caller-provided raw codec.
pub fn compress_with<C: RawCodec + ?Sized>(
    codec: &C,
    input: &[u8],
    use_high_compression: bool,
) -> Result<Vec<u8>> {
    let mut header = [0u8; MAX_VARBYTE_LEN];
    let header_len = varbyte::encode_into(input.len() as u64, &mut header);
    let payload = codec.compress(input, use_high_compression, &[])?;

    let mut out = Vec::with_capacity(header_len + payload.len());
    out.extend_from_slice(&header[..header_len]);
    out.extend_from_slice(&payload);
    Ok(out)
}

/// Expand a frame with a caller-provided raw codec.
///
/// Fails with a corruption error if the header is malformed, the declared
/// size is out of range or unreachable from the payload length, the payload
/// is invalid, or the payload expands to a different length than the header
/// declares.
pub fn uncompress_with<C: RawCodec + ?Sized>(codec: &C, input: &[u8]) -> Result<Vec<u8>> {
    let (original_size, header_len) = read_header(input)?;
    let payload = &input[header_len..];
    if original_size > codec.max_uncompressed_len(payload.len()) {
        return Err(CorruptionError::SizeOutOfRange(original_size as u64).into());
    }
    let out = codec.uncompress(payload, original_size, &[])?;
    if out.len() != original_size {
        return Err(CorruptionError::LengthMismatch {
            expected: original_size,
            actual: out.len(),
        }
        .into());
    }
    Ok(out)
}

/// Original size recorded in a frame header, without decompressing.
pub fn uncompressed_len(input: &[u8]) -> Result<usize> {
    read_header(input).map(|(size, _)| size)
}

fn read_header(input: &[u8]) -> Result<(usize, usize)> {
    let (size, header_len) = varbyte::decode(input)?;
    if size > i32::MAX as u64 {
        return Err(CorruptionError::SizeOutOfRange(size).into());
    }
    Ok((size as usize, header_len))
}

/// Compress many independent buffers on the rayon pool.
///
/// Output order matches input order. Each frame is identical to what
/// [`compress`] returns for the same buffer.
#[cfg(feature = "parallel")]
pub fn compress_batch<T>(inputs: &[T], use_high_compression: bool) -> Result<Vec<Vec<u8>>>
where
    T: AsRef<[u8]> + Sync,
{
    inputs
        .par_iter()
        .map(|input| compress(input.as_ref(), use_high_compression))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn roundtrip() {
        let data: Vec<u8> = b"ABCDEFGHIJ".iter().copied().cycle().take(4096).collect();
        let frame = compress(&data, false).unwrap();
        assert!(frame.len() < data.len());
        assert_eq!(uncompress(&frame).unwrap(), data);
    }

    #[test]
    fn header_is_varbyte_length() {
        let data = vec![7u8; 300];
        let frame = compress(&data, false).unwrap();
        assert_eq!(&frame[..2], &[0xAC, 0x02]);
        assert_eq!(uncompressed_len(&frame).unwrap(), 300);
    }

    #[test]
    fn empty_input() {
        let frame = compress(b"", false).unwrap();
        assert_eq!(frame[0], 0x00);
        assert!(uncompress(&frame).unwrap().is_empty());
    }

    #[test]
    fn high_compression_roundtrip() {
        let data: Vec<u8> = (0..=255).cycle().take(10_000).collect();
        let frame = compress_hc(&data).unwrap();
        assert_eq!(uncompress(&frame).unwrap(), data);
        assert_eq!(frame, compress(&data, false).unwrap());
    }

    #[test]
    fn unterminated_header_is_corruption() {
        let err = uncompress(&[0x80, 0x80, 0x80, 0x80, 0x80, 0x00]).unwrap_err();
        assert!(matches!(err, Error::Corruption(CorruptionError::Header(_))));
        assert!(uncompress(&[]).unwrap_err().is_corruption());
    }

    #[test]
    fn oversized_declared_length_is_corruption() {
        // 2^31 in five groups.
        let frame = [0x80, 0x80, 0x80, 0x80, 0x08, 0x00];
        let err = uncompress(&frame).unwrap_err();
        assert!(matches!(
            err,
            Error::Corruption(CorruptionError::SizeOutOfRange(0x8000_0000))
        ));
    }

    #[test]
    fn unreachable_declared_length_is_rejected_before_decoding() {
        let mut frame = varbyte::encode(1 << 30);
        frame.extend_from_slice(&[0x10, 0x61]);
        assert!(matches!(
            uncompress(&frame).unwrap_err(),
            Error::Corruption(CorruptionError::SizeOutOfRange(0x4000_0000))
        ));

        // Right at the bound the payload is decoded and judged on its own.
        let mut frame = varbyte::encode(2 * 255 + 16);
        frame.extend_from_slice(&[0x10, 0x61]);
        assert!(matches!(
            uncompress(&frame).unwrap_err(),
            Error::Corruption(CorruptionError::LengthMismatch { actual: 1, .. })
        ));
    }

    #[test]
    fn understated_length_is_rejected() {
        let data = vec![1u8; 1000];
        let mut frame = compress(&data, false).unwrap();
        let header_len = varbyte::encoded_len(1000);
        let mut lied = varbyte::encode(10);
        lied.extend_from_slice(&frame.split_off(header_len));
        assert!(uncompress(&lied).unwrap_err().is_corruption());
    }

    #[test]
    fn overstated_length_is_rejected() {
        let data = vec![1u8; 1000];
        let mut frame = compress(&data, false).unwrap();
        let header_len = varbyte::encoded_len(1000);
        let mut lied = varbyte::encode(2000);
        lied.extend_from_slice(&frame.split_off(header_len));
        assert!(matches!(
            uncompress(&lied).unwrap_err(),
            Error::Corruption(CorruptionError::LengthMismatch {
                expected: 2000,
                actual: 1000
            })
        ));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn batch_matches_sequential() {
        let inputs: Vec<Vec<u8>> = (0..16u8)
            .map(|i| std::iter::repeat_n(i, 1024 * (i as usize + 1)).collect())
            .collect();
        let frames = compress_batch(&inputs, false).unwrap();
        for (input, frame) in inputs.iter().zip(&frames) {
            assert_eq!(frame, &compress(input, false).unwrap());
            assert_eq!(&uncompress(frame).unwrap(), input);
        }
    }
}
