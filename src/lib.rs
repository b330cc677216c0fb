//! lz4stream: LZ4 framing and stateful streaming sessions in Rust.
//!
//! The crate provides:
//! - Varbyte length prefixes (`varbyte`)
//! - The raw single-block codec seam and its LZ4 backend (`raw`)
//! - One-shot self-describing frames (`framed`)
//! - Encoder/decoder sessions sharing a sliding history window (`stream`)
//!
//! # Quick Start
//!
//! ```
//! use lz4stream::stream::{DecoderConfig, EncoderConfig, StreamDecoder, StreamEncoder};
//!
//! let frame = lz4stream::framed::compress(b"one shot, one shot, one shot", false).unwrap();
//! assert_eq!(lz4stream::framed::uncompress(&frame).unwrap(), b"one shot, one shot, one shot");
//!
//! let mut enc = StreamEncoder::new(EncoderConfig::new(64 * 1024)).unwrap();
//! let mut dec = StreamDecoder::new(DecoderConfig::default()).unwrap();
//! for chunk in [&b"log line: service started"[..], &b"log line: service stopped"[..]] {
//!     let block = enc.update(chunk).unwrap();
//!     assert_eq!(dec.update(&block).unwrap(), chunk);
//! }
//! ```

pub mod error;
pub mod framed;
pub mod raw;
pub mod stream;
pub mod varbyte;

pub use error::{CorruptionError, Error, Result, ValidationError};
pub use raw::{Lz4Block, RawCodec};
pub use stream::{DecoderConfig, EncoderConfig, ResetOptions, StreamDecoder, StreamEncoder};
