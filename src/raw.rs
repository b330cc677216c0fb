// Raw, single-block codec collaborator.
//
// Provides the `RawCodec` trait consumed by the framed codec and the stream
// sessions, with one built-in implementation:
//   - Lz4Block (LZ4 block format via lz4_flex)
//
// A raw block carries no header and no memory of earlier calls. Any history
// it may refer to is handed in explicitly as a `context` slice that logically
// precedes the block's own bytes.

use std::sync::Arc;

use lz4_flex::block;

use crate::error::{CorruptionError, Error, Result};

/// Maximum back-reference distance of the LZ4 block format.
pub const WINDOW_SIZE: usize = 64 * 1024;

/// Largest input the LZ4 block format can describe (`LZ4_MAX_INPUT_SIZE`).
pub const MAX_INPUT_SIZE: usize = 0x7E00_0000;

/// Output ceiling used by stateless decompression when the caller has no
/// better bound.
pub const DEFAULT_UNCOMPRESS_LIMIT: usize = 1 << 24;

/// Worst-case compressed size for an input of `len` bytes.
#[inline]
pub fn compress_bound(len: usize) -> usize {
    len + len / 255 + 16
}

/// Largest plaintext an LZ4 block of `len` bytes can expand to.
///
/// Every match-length extension byte adds at most 255 bytes of output.
#[inline]
pub fn expansion_bound(len: usize) -> usize {
    len.saturating_mul(255).saturating_add(16)
}

// ---------------------------------------------------------------------------
// RawCodec trait
// ---------------------------------------------------------------------------

/// A stateless single-block compressor.
///
/// # Implementing a custom codec
///
/// ```no_run
/// use lz4stream::raw::RawCodec;
/// use lz4stream::Result;
///
/// struct Identity;
///
/// impl RawCodec for Identity {
///     fn compress(&self, input: &[u8], _high: bool, _context: &[u8]) -> Result<Vec<u8>> {
///         Ok(input.to_vec())
///     }
///     fn uncompress(&self, input: &[u8], _max: usize, _context: &[u8]) -> Result<Vec<u8>> {
///         Ok(input.to_vec())
///     }
/// }
/// ```
pub trait RawCodec: Send + Sync {
    /// How far back a block may reference into its context.
    ///
    /// Sessions never retain more history than this.
    fn window_size(&self) -> usize {
        WINDOW_SIZE
    }

    /// Upper bound on the plaintext a block of `compressed_len` bytes can
    /// expand to. Callers reject larger declared sizes without decoding.
    fn max_uncompressed_len(&self, compressed_len: usize) -> usize {
        let _ = compressed_len;
        usize::MAX
    }

    /// Compress `input` as one block, optionally referencing `context`.
    fn compress(&self, input: &[u8], high_compression: bool, context: &[u8]) -> Result<Vec<u8>>;

    /// Expand one block produced by `compress` with the same trailing context.
    ///
    /// Must fail with a corruption error if the block is malformed, refers
    /// past the start of `context`, or expands beyond `max_output_size`.
    fn uncompress(&self, input: &[u8], max_output_size: usize, context: &[u8]) -> Result<Vec<u8>>;
}

impl<C: RawCodec + ?Sized> RawCodec for Arc<C> {
    fn window_size(&self) -> usize {
        (**self).window_size()
    }
    fn max_uncompressed_len(&self, compressed_len: usize) -> usize {
        (**self).max_uncompressed_len(compressed_len)
    }
    fn compress(&self, input: &[u8], high_compression: bool, context: &[u8]) -> Result<Vec<u8>> {
        (**self).compress(input, high_compression, context)
    }
    fn uncompress(&self, input: &[u8], max_output_size: usize, context: &[u8]) -> Result<Vec<u8>> {
        (**self).uncompress(input, max_output_size, context)
    }
}

// ---------------------------------------------------------------------------
// LZ4 block backend
// ---------------------------------------------------------------------------

/// LZ4 block codec backed by `lz4_flex`.
///
/// `lz4_flex` ships a single compression level. The high-compression flag
/// is accepted but has no effect: both settings produce byte-identical
/// blocks. Blocks remain interchangeable with those of any LZ4 block decoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lz4Block;

impl RawCodec for Lz4Block {
    fn max_uncompressed_len(&self, compressed_len: usize) -> usize {
        expansion_bound(compressed_len)
    }

    fn compress(&self, input: &[u8], _high_compression: bool, context: &[u8]) -> Result<Vec<u8>> {
        if input.len() > MAX_INPUT_SIZE {
            return Err(Error::size_limit("raw input", input.len(), MAX_INPUT_SIZE));
        }
        let context = tail(context, WINDOW_SIZE);
        if context.is_empty() {
            Ok(block::compress(input))
        } else {
            Ok(block::compress_with_dict(input, context))
        }
    }

    fn uncompress(&self, input: &[u8], max_output_size: usize, context: &[u8]) -> Result<Vec<u8>> {
        let context = tail(context, WINDOW_SIZE);
        // lz4_flex zero-fills the whole output bound up front.
        let limit = max_output_size.min(expansion_bound(input.len()));
        let mut out = block::decompress_with_dict(input, limit, context).map_err(|e| {
            Error::from(CorruptionError::Codec(format!("LZ4 block decode failed: {e}")))
        })?;
        out.shrink_to_fit();
        Ok(out)
    }
}

/// The last `n` bytes of `data` (all of it if shorter).
#[inline]
pub(crate) fn tail(data: &[u8], n: usize) -> &[u8] {
    &data[data.len().saturating_sub(n)..]
}

// ---------------------------------------------------------------------------
// Stateless helpers
// ---------------------------------------------------------------------------

/// Compress one self-contained LZ4 block.
pub fn raw_compress(input: &[u8], high_compression: bool) -> Result<Vec<u8>> {
    Lz4Block.compress(input, high_compression, &[])
}

/// Compress one self-contained LZ4 block, failing if the result would be
/// larger than `max_output_size`.
pub fn raw_compress_bounded(
    input: &[u8],
    high_compression: bool,
    max_output_size: usize,
) -> Result<Vec<u8>> {
    let out = raw_compress(input, high_compression)?;
    if out.len() > max_output_size {
        return Err(Error::size_limit("compressed block", out.len(), max_output_size));
    }
    Ok(out)
}

/// Expand one self-contained LZ4 block of at most `max_output_size` bytes.
pub fn raw_uncompress(input: &[u8], max_output_size: usize) -> Result<Vec<u8>> {
    Lz4Block.uncompress(input, max_output_size, &[])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
