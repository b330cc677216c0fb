#![no_main]
use libfuzzer_sys::fuzz_target;
use lz4stream::stream::{DecoderConfig, EncoderConfig, StreamDecoder, StreamEncoder};

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    // First byte: block size and dictionary flag.
    let flags = data[0];
    let block_size = 64usize << (flags & 0x07);
    let payload = &data[1..];
    let use_dict = flags & 0x08 != 0;

    let split = if use_dict { payload.len() / 3 } else { 0 };
    let (dict, target) = payload.split_at(split);
    let dict = use_dict.then(|| dict.to_vec());

    let mut enc = StreamEncoder::new(EncoderConfig {
        block_size: block_size as i64,
        high_compression: flags & 0x10 != 0,
        preset_dictionary: dict.clone(),
    })
    .unwrap();
    let mut dec = StreamDecoder::new(DecoderConfig {
        preset_dictionary: dict,
        ..Default::default()
    })
    .unwrap();

    for chunk in target.chunks(block_size) {
        let block = enc.update(chunk).unwrap();
        assert_eq!(dec.update(&block).unwrap(), chunk);
    }
});
