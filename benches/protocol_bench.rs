//! Benchmarks for wirekv protocol operations

use std::hint::black_box;
use std::io::Cursor;

use criterion::{criterion_group, criterion_main, Criterion};
use wirekv::protocol::{checksum, read_request, write_request, Request};

fn protocol_benchmarks(c: &mut Criterion) {
    let request = Request::Put {
        key: "key1".to_string(),
        value: 42,
    };

    c.bench_function("checksum_request_line", |b| {
        b.iter(|| checksum(black_box("PUT key1 42")))
    });

    c.bench_function("request_encode_parse_roundtrip", |b| {
        b.iter(|| {
            let text = black_box(&request).encode();
            Request::parse(&text).unwrap()
        })
    });

    c.bench_function("stream_frame_roundtrip", |b| {
        b.iter(|| {
            let mut buffer = Vec::with_capacity(32);
            write_request(&mut buffer, black_box(&request)).unwrap();
            read_request(&mut Cursor::new(buffer)).unwrap()
        })
    });
}

criterion_group!(benches, protocol_benchmarks);
criterion_main!(benches);
