#![no_main]
use libfuzzer_sys::fuzz_target;
use lz4stream::stream::{DecoderConfig, StreamDecoder};

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // First byte picks how many blocks the rest is split into.
    let parts = usize::from(data[0] % 4) + 1;
    let payload = &data[1..];
    let mut dec = StreamDecoder::new(DecoderConfig {
        max_block_size: 1 << 16,
        ..Default::default()
    })
    .unwrap();

    for block in payload.chunks(payload.len().div_ceil(parts).max(1)) {
        let before = dec.window().clone();
        if dec.update(block).is_err() {
            assert_eq!(dec.window(), &before);
        }
    }
});
