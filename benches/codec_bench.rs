use criterion::{black_box, criterion_group, criterion_main, Criterion};

use basepack::{Alphabet, RadixCodec};

const URL_SAFE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

fn bench_codec(c: &mut Criterion) {
    let codec = RadixCodec::new(Alphabet::new(URL_SAFE).unwrap());
    let payload: Vec<u8> = (0..4096u32).map(|i| (i.wrapping_mul(31) % 256) as u8).collect();
    let encoded = codec.encode(&payload);

    c.bench_function("encode_4k_urlsafe", |b| {
        b.iter(|| codec.encode(black_box(&payload)))
    });
    c.bench_function("decode_4k_urlsafe", |b| {
        b.iter(|| codec.decode(black_box(&encoded)).unwrap())
    });
}

criterion_group!(benches, bench_codec);
criterion_main!(benches);
