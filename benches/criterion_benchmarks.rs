use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use lz4stream::framed;
use lz4stream::stream::{DecoderConfig, EncoderConfig, StreamDecoder, StreamEncoder};

fn gen_data(size: usize, seed: u64) -> Vec<u8> {
    let mut s = seed;
    let mut out = Vec::with_capacity(size);
    for _ in 0..size {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        // Narrow alphabet so the codec finds matches.
        out.push(b'a' + ((s >> 33) % 16) as u8);
    }
    out
}

fn bench_framed(c: &mut Criterion) {
    let mut g = c.benchmark_group("framed_mb_s");
    for size in [64 * 1024, 1024 * 1024] {
        let data = gen_data(size, 7);
        let frame = framed::compress(&data, false).unwrap();
        g.throughput(Throughput::Bytes(size as u64));
        g.bench_with_input(BenchmarkId::new("compress", size), &data, |b, d| {
            b.iter(|| framed::compress(black_box(d), false).unwrap())
        });
        g.bench_with_input(BenchmarkId::new("uncompress", size), &frame, |b, f| {
            b.iter(|| framed::uncompress(black_box(f)).unwrap())
        });
    }
    g.finish();
}

fn bench_stream(c: &mut Criterion) {
    let mut g = c.benchmark_group("stream_mb_s");
    let data = gen_data(4 * 1024 * 1024, 11);
    g.throughput(Throughput::Bytes(data.len() as u64));

    for block_size in [16 * 1024, 64 * 1024, 256 * 1024] {
        g.bench_with_input(BenchmarkId::new("encode", block_size), &data, |b, d| {
            b.iter(|| {
                let mut enc = StreamEncoder::new(EncoderConfig::new(block_size as i64)).unwrap();
                for chunk in d.chunks(block_size) {
                    black_box(enc.update(chunk).unwrap());
                }
            })
        });

        let mut enc = StreamEncoder::new(EncoderConfig::new(block_size as i64)).unwrap();
        let blocks: Vec<Vec<u8>> = data.chunks(block_size).map(|c| enc.update(c).unwrap()).collect();
        g.bench_with_input(BenchmarkId::new("decode", block_size), &blocks, |b, blocks| {
            b.iter(|| {
                let mut dec = StreamDecoder::new(DecoderConfig {
                    max_block_size: block_size as i64,
                    ..Default::default()
                })
                .unwrap();
                for block in blocks {
                    black_box(dec.update(block).unwrap());
                }
            })
        });
    }
    g.finish();
}

criterion_group!(benches, bench_framed, bench_stream);
criterion_main!(benches);
