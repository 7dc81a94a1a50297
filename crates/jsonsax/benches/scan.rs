//! Benchmark – `jsonsax::Parser`
#![allow(missing_docs)]

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use jsonsax::{
    Control, Handler, Ignore, Literal, Parser, Reserializer, StringLiteral,
    stack::{BitStack, RunLengthStack, WordStack},
};

/// A deterministic array of small records, at least `target_len` bytes long.
fn make_records(target_len: usize) -> String {
    let mut s = String::with_capacity(target_len + 128);
    s.push('[');
    let mut i = 0u64;
    while s.len() < target_len {
        if i > 0 {
            s.push(',');
        }
        s.push_str(&format!(
            r#"{{"id":{i},"name":"item \"{i}\"","score":{}.5,"tags":["a","b"],"ok":{}}}"#,
            i % 97,
            i % 2 == 0
        ));
        i += 1;
    }
    s.push(']');
    s
}

/// One long string member, exercising the delimiter search.
fn make_long_string(target_len: usize) -> String {
    let mut s = String::with_capacity(target_len + 16);
    s.push_str(r#"{"data":""#);
    while s.len() < target_len {
        s.push_str(r#"abcdefgh\\ijk\"lm "#);
    }
    s.push_str(r#""}"#);
    s
}

#[derive(Default)]
struct Count(usize);

impl<'src> Handler<'src> for Count {
    fn on_key(&mut self, _: StringLiteral<'src>, _: &mut Control) {
        self.0 += 1;
    }
    fn on_value(&mut self, _: Literal<'src>, _: &mut Control) {
        self.0 += 1;
    }
    fn on_array(&mut self, _: Literal<'src>, _: &mut Control) {
        self.0 += 1;
    }
}

#[derive(Default)]
struct CountChecked(usize);

impl<'src> Handler<'src> for CountChecked {
    const VALIDATE: bool = true;

    fn on_value(&mut self, _: Literal<'src>, _: &mut Control) {
        self.0 += 1;
    }
    fn on_array(&mut self, _: Literal<'src>, _: &mut Control) {
        self.0 += 1;
    }
}

fn bench_handlers(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_handlers");
    for (name, payload) in [
        ("records", make_records(100_000)),
        ("long_string", make_long_string(100_000)),
    ] {
        group.throughput(Throughput::Bytes(payload.len() as u64));
        group.bench_with_input(BenchmarkId::new("ignore", name), &payload, |b, p| {
            let mut parser = Parser::<16>::new();
            b.iter(|| parser.parse(black_box(p.as_bytes()), &mut Ignore));
        });
        group.bench_with_input(BenchmarkId::new("count", name), &payload, |b, p| {
            let mut parser = Parser::<16>::new();
            b.iter(|| {
                let mut count = Count::default();
                parser.parse(black_box(p.as_bytes()), &mut count);
                black_box(count.0)
            });
        });
        group.bench_with_input(BenchmarkId::new("count_checked", name), &payload, |b, p| {
            let mut parser = Parser::<16>::new();
            b.iter(|| {
                let mut count = CountChecked::default();
                parser.parse(black_box(p.as_bytes()), &mut count);
                black_box(count.0)
            });
        });
    }
    group.finish();
}

fn bench_nesting_encodings(c: &mut Criterion) {
    let payload = make_records(100_000);
    let mut group = c.benchmark_group("reserialize_encodings");
    group.throughput(Throughput::Bytes(payload.len() as u64));

    macro_rules! encoding {
        ($name:literal, $stack:ty) => {
            group.bench_function($name, |b| {
                let mut parser = Parser::<16>::new();
                b.iter(|| {
                    let mut out = Reserializer::<$stack>::new();
                    parser.parse(black_box(payload.as_bytes()), &mut out);
                    black_box(out.finish().map(|s| s.len()))
                });
            });
        };
    }

    encoding!("byte", jsonsax::stack::ByteStack<64>);
    encoding!("bit", BitStack<1>);
    encoding!("word", WordStack);
    encoding!("run_length", RunLengthStack<16>);
    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1));
    targets = bench_handlers, bench_nesting_encodings
}
criterion_main!(benches);
