// Stateful stream encoder.
//
// StreamEncoder compresses successive chunks against a rolling window of
// the plaintext it has already seen:
//   - Each update is bounded by the configured block size
//   - The window holds one block of history, capped at the codec's reach
//   - Output blocks are raw and headerless; only the first block of a
//     session with no preset dictionary is decodable on its own

use log::{debug, trace};

use crate::error::{self, Error, Result};
use crate::raw::{Lz4Block, RawCodec};

use super::window::StreamWindow;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Configuration for a new stream encoder.
#[derive(Debug, Clone)]
pub struct EncoderConfig {
    /// Largest chunk accepted by a single `update` (0..=i32::MAX).
    pub block_size: i64,
    /// Ask the codec for its high-compression mode.
    ///
    /// [`Lz4Block`] accepts the flag but ignores it, so blocks and ratios
    /// are identical either way. Custom codecs may honour it.
    pub high_compression: bool,
    /// Bytes seeding the window before the first block.
    pub preset_dictionary: Option<Vec<u8>>,
}

impl EncoderConfig {
    /// Configuration with the given block size and defaults elsewhere.
    pub fn new(block_size: i64) -> Self {
        Self {
            block_size,
            ..Default::default()
        }
    }
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            block_size: 1 << 20, // 1 MiB
            high_compression: false,
            preset_dictionary: None,
        }
    }
}

/// Parameters for [`StreamEncoder::reset`]. Fields left as `None` keep
/// their current value, except the dictionary: without one the window is
/// simply emptied.
#[derive(Debug, Clone, Default)]
pub struct ResetOptions {
    pub block_size: Option<i64>,
    pub high_compression: Option<bool>,
    pub preset_dictionary: Option<Vec<u8>>,
}

// ---------------------------------------------------------------------------
// StreamEncoder
// ---------------------------------------------------------------------------

/// Streaming block encoder.
///
/// # Example
/// ```
/// use lz4stream::stream::{EncoderConfig, StreamDecoder, StreamEncoder, DecoderConfig};
///
/// let mut enc = StreamEncoder::new(EncoderConfig::new(4096)).unwrap();
/// let mut dec = StreamDecoder::new(DecoderConfig::default()).unwrap();
/// for chunk in [&b"first chunk"[..], &b"second chunk"[..], &b"first chunk again"[..]] {
///     let block = enc.update(chunk).unwrap();
///     assert_eq!(dec.update(&block).unwrap(), chunk);
/// }
/// ```
#[derive(Debug)]
pub struct StreamEncoder<C: RawCodec = Lz4Block> {
    codec: C,
    block_size: u32,
    high_compression: bool,
    window: StreamWindow,
    bytes_in: u64,
    bytes_out: u64,
    blocks_encoded: u64,
}

impl StreamEncoder<Lz4Block> {
    /// Create an encoder using the LZ4 block codec.
    pub fn new(config: EncoderConfig) -> Result<Self> {
        Self::with_codec(config, Lz4Block)
    }
}

impl<C: RawCodec> StreamEncoder<C> {
    /// Create an encoder over a caller-provided codec.
    pub fn with_codec(config: EncoderConfig, codec: C) -> Result<Self> {
        let block_size = error::check_block_size("block size", config.block_size)?;
        let capacity = window_capacity(&codec, block_size);
        let window = match config.preset_dictionary.as_deref() {
            Some(dict) => StreamWindow::seeded(capacity, dict),
            None => StreamWindow::new(capacity),
        };
        debug!(
            "stream encoder: block_size={block_size} high_compression={} window={}/{capacity}",
            config.high_compression,
            window.len()
        );

        Ok(Self {
            codec,
            block_size,
            high_compression: config.high_compression,
            window,
            bytes_in: 0,
            bytes_out: 0,
            blocks_encoded: 0,
        })
    }

    /// Compress one chunk against the current window.
    ///
    /// Fails without touching the window if `chunk` is larger than the block
    /// size or the codec rejects it.
    pub fn update(&mut self, chunk: &[u8]) -> Result<Vec<u8>> {
        if chunk.len() > self.block_size as usize {
            return Err(Error::size_limit("chunk", chunk.len(), self.block_size as usize));
        }

        let block = self
            .codec
            .compress(chunk, self.high_compression, self.window.as_slice())?;
        self.window.append(chunk);

        self.bytes_in += chunk.len() as u64;
        self.bytes_out += block.len() as u64;
        self.blocks_encoded += 1;
        trace!(
            "encoded block #{}: {} -> {} bytes",
            self.blocks_encoded,
            chunk.len(),
            block.len()
        );
        Ok(block)
    }

    /// Like [`update`](Self::update), appending the block to `dest`.
    /// Returns the number of bytes appended.
    pub fn update_into(&mut self, chunk: &[u8], dest: &mut Vec<u8>) -> Result<usize> {
        let block = self.update(chunk)?;
        dest.extend_from_slice(&block);
        Ok(block.len())
    }

    /// Clear (or reseed) the window and optionally change parameters.
    ///
    /// Arguments are validated before anything changes. Counters restart
    /// from zero.
    pub fn reset(&mut self, opts: ResetOptions) -> Result<&mut Self> {
        let block_size = match opts.block_size {
            Some(size) => error::check_block_size("block size", size)?,
            None => self.block_size,
        };

        self.block_size = block_size;
        if let Some(high) = opts.high_compression {
            self.high_compression = high;
        }
        let capacity = window_capacity(&self.codec, block_size);
        self.window
            .reseed(capacity, opts.preset_dictionary.as_deref());
        self.bytes_in = 0;
        self.bytes_out = 0;
        self.blocks_encoded = 0;

        debug!(
            "stream encoder reset: block_size={block_size} high_compression={} window={}/{capacity}",
            self.high_compression,
            self.window.len()
        );
        Ok(self)
    }

    pub fn block_size(&self) -> u32 {
        self.block_size
    }

    pub fn high_compression(&self) -> bool {
        self.high_compression
    }

    /// History the next block will be compressed against.
    pub fn window(&self) -> &StreamWindow {
        &self.window
    }

    /// Plaintext bytes accepted since construction or the last reset.
    pub fn bytes_in(&self) -> u64 {
        self.bytes_in
    }

    /// Compressed bytes produced since construction or the last reset.
    pub fn bytes_out(&self) -> u64 {
        self.bytes_out
    }

    pub fn blocks_encoded(&self) -> u64 {
        self.blocks_encoded
    }
}

fn window_capacity<C: RawCodec>(codec: &C, block_size: u32) -> usize {
    (block_size as usize).min(codec.window_size())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
