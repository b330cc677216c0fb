#![no_main]
use libfuzzer_sys::fuzz_target;
use lz4stream::framed;

fuzz_target!(|data: &[u8]| {
    // Must return an error, never panic. Declared sizes beyond what the
    // payload can expand to are rejected before any allocation.
    let _ = framed::uncompress(data);
});
