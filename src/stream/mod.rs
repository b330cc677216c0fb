// Stateful streaming sessions.
//
// - `window`  -- StreamWindow: bounded rolling plaintext history
// - `encoder` -- StreamEncoder: compresses chunks against its window
// - `decoder` -- StreamDecoder: expands blocks against its mirrored window

pub mod decoder;
pub mod encoder;
pub mod window;

pub use decoder::{DecoderConfig, StreamDecoder};
pub use encoder::{EncoderConfig, ResetOptions, StreamEncoder};
pub use window::StreamWindow;
