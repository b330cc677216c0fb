// Stateful stream decoder.
//
// StreamDecoder mirrors StreamEncoder's window so back-references in later
// blocks resolve against the plaintext already produced:
//   - The window holds the codec's full reach, a superset of any encoder's
//   - Each block's expansion is capped by `max_block_size`
//   - Blocks must arrive in encoder order, exactly once

use log::{debug, trace, warn};

use crate::error::{self, Result};
use crate::raw::{DEFAULT_UNCOMPRESS_LIMIT, Lz4Block, RawCodec};

use super::window::StreamWindow;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Configuration for a new stream decoder.
#[derive(Debug, Clone)]
pub struct DecoderConfig {
    /// Bytes seeding the window; must match the paired encoder's dictionary.
    pub preset_dictionary: Option<Vec<u8>>,
    /// Largest plaintext a single block may expand to (0..=i32::MAX).
    ///
    /// A ceiling only; decoded blocks are sized to their actual length.
    pub max_block_size: i64,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            preset_dictionary: None,
            max_block_size: DEFAULT_UNCOMPRESS_LIMIT as i64, // 16 MiB
        }
    }
}

// ---------------------------------------------------------------------------
// StreamDecoder
// ---------------------------------------------------------------------------

/// Streaming block decoder.
#[derive(Debug)]
pub struct StreamDecoder<C: RawCodec = Lz4Block> {
    codec: C,
    max_block_size: u32,
    window: StreamWindow,
    bytes_in: u64,
    bytes_out: u64,
    blocks_decoded: u64,
}

impl StreamDecoder<Lz4Block> {
    /// Create a decoder using the LZ4 block codec.
    pub fn new(config: DecoderConfig) -> Result<Self> {
        Self::with_codec(config, Lz4Block)
    }
}

impl<C: RawCodec> StreamDecoder<C> {
    /// Create a decoder over a caller-provided codec.
    pub fn with_codec(config: DecoderConfig, codec: C) -> Result<Self> {
        let max_block_size = error::check_block_size("max block size", config.max_block_size)?;
        let capacity = codec.window_size();
        let window = match config.preset_dictionary.as_deref() {
            Some(dict) => StreamWindow::seeded(capacity, dict),
            None => StreamWindow::new(capacity),
        };
        debug!(
            "stream decoder: max_block_size={max_block_size} window={}/{capacity}",
            window.len()
        );

        Ok(Self {
            codec,
            max_block_size,
            window,
            bytes_in: 0,
            bytes_out: 0,
            blocks_decoded: 0,
        })
    }

    /// Expand one block against the current window.
    ///
    /// On failure the window is left exactly as it was, so a caller may
    /// retry with the correct block.
    pub fn update(&mut self, block: &[u8]) -> Result<Vec<u8>> {
        let plain = self
            .codec
            .uncompress(block, self.max_block_size as usize, self.window.as_slice())
            .inspect_err(|e| {
                warn!(
                    "rejecting block #{} ({} bytes): {e}",
                    self.blocks_decoded + 1,
                    block.len()
                );
            })?;
        self.window.append(&plain);

        self.bytes_in += block.len() as u64;
        self.bytes_out += plain.len() as u64;
        self.blocks_decoded += 1;
        trace!(
            "decoded block #{}: {} -> {} bytes",
            self.blocks_decoded,
            block.len(),
            plain.len()
        );
        Ok(plain)
    }

    /// Like [`update`](Self::update), appending the plaintext to `dest`.
    /// Returns the number of bytes appended.
    pub fn update_into(&mut self, block: &[u8], dest: &mut Vec<u8>) -> Result<usize> {
        let plain = self.update(block)?;
        dest.extend_from_slice(&plain);
        Ok(plain.len())
    }

    /// Clear the window, or reseed it with `preset_dictionary`.
    pub fn reset(&mut self, preset_dictionary: Option<Vec<u8>>) -> &mut Self {
        let capacity = self.codec.window_size();
        self.window.reseed(capacity, preset_dictionary.as_deref());
        self.bytes_in = 0;
        self.bytes_out = 0;
        self.blocks_decoded = 0;
        debug!("stream decoder reset: window={}/{capacity}", self.window.len());
        self
    }

    pub fn max_block_size(&self) -> u32 {
        self.max_block_size
    }

    /// History the next block will be expanded against.
    pub fn window(&self) -> &StreamWindow {
        &self.window
    }

    /// Compressed bytes consumed since construction or the last reset.
    pub fn bytes_in(&self) -> u64 {
        self.bytes_in
    }

    /// Plaintext bytes produced since construction or the last reset.
    pub fn bytes_out(&self) -> u64 {
        self.bytes_out
    }

    pub fn blocks_decoded(&self) -> u64 {
        self.blocks_decoded
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
