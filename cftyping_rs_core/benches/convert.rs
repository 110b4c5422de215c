use cftyping_core::df::NativeHost;
use cftyping_core::scalar::{Timedelta, Timestamp};
use cftyping_core::typing::{Dtype, TimestampConvertible};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

macro_rules! bench_parse {
    ($c:expr, $ty:ty, $input:expr) => {{
        let name = format!("parse {} ({:?})", stringify!($ty), $input);
        $c.bench_function(&name, |b| b.iter(|| black_box($input).parse::<$ty>()));
    }};
}

pub fn bench_scalars(c: &mut Criterion) {
    bench_parse!(c, Timestamp, "2021-01-02");
    bench_parse!(c, Timestamp, "2021-01-02 03:04:05.123456789");
    bench_parse!(c, Timestamp, "2021-01-02T03:04:05+08:00");
    bench_parse!(c, Timedelta, "1 days 02:03:04.5");
    bench_parse!(c, Timedelta, "1h 30min 15s");
    c.bench_function("to_timestamp (int)", |b| {
        let input = TimestampConvertible::Int(1_609_545_600_000_000_000);
        b.iter(|| black_box(&input).to_timestamp(None))
    });
}

pub fn bench_dtypes(c: &mut Criterion) {
    for name in ["float64", "<M8[ns]", "category"] {
        let dtype: Dtype<NativeHost> = name.into();
        c.bench_function(&format!("resolve dtype ({name})"), |b| {
            b.iter(|| black_box(&dtype).resolve())
        });
    }
}

criterion_group!(benches, bench_scalars, bench_dtypes);
criterion_main!(benches);
