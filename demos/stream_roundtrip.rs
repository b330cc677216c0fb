// Stream a text through an encoder/decoder pair and compare per-block
// sizes with stateless framed compression of the same chunks.
//
//   cargo run --example stream_roundtrip

use lz4stream::framed;
use lz4stream::stream::{DecoderConfig, EncoderConfig, StreamDecoder, StreamEncoder};

fn main() -> lz4stream::Result<()> {
    let lines: Vec<String> = (0..2000)
        .map(|i| format!("{i:05} GET /api/v1/items/{} 200 OK user-agent=demo\n", i % 37))
        .collect();
    let text = lines.concat();
    let block_size = 4096;

    let mut enc = StreamEncoder::new(EncoderConfig::new(block_size))?;
    let mut dec = StreamDecoder::new(DecoderConfig::default())?;
    let mut framed_total = 0usize;
    let mut restored = Vec::with_capacity(text.len());

    for chunk in text.as_bytes().chunks(block_size as usize) {
        let block = enc.update(chunk)?;
        dec.update_into(&block, &mut restored)?;
        framed_total += framed::compress(chunk, false)?.len();
    }
    assert_eq!(restored, text.as_bytes());

    println!("input:            {} bytes", text.len());
    println!("stream blocks:    {} bytes in {} blocks", enc.bytes_out(), enc.blocks_encoded());
    println!("stateless frames: {framed_total} bytes");
    Ok(())
}
