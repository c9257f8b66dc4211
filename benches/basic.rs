use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use rayon::prelude::*;

// Same dataset recipe as the main binary: 0-4 random bytes per element,
// decoded leniently as UTF-8.
fn make_dataset(n: usize) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    let mut bytes = [0u8; 4];
    (0..n)
        .map(|_| {
            let len = rng.gen_range(0..5);
            rng.fill_bytes(&mut bytes[0..len]);
            String::from_utf8_lossy(&bytes[0..len]).into_owned()
        })
        .collect()
}

fn bench_counting(c: &mut Criterion) {
    let data = make_dataset(100_000);
    let mut group = c.benchmark_group("empty_count_1e5");
    group.throughput(Throughput::Elements(data.len() as u64));

    group.bench_function("loop", |b| {
        b.iter(|| {
            let mut empties = 0u64;
            for s in black_box(&data) {
                if s.is_empty() {
                    empties += 1;
                }
            }
            black_box(empties)
        })
    });
    group.bench_function("filter", |b| {
        b.iter(|| black_box(&data).iter().filter(|s| s.is_empty()).count())
    });
    group.bench_function("par_filter", |b| {
        b.iter(|| black_box(&data).par_iter().filter(|s| s.is_empty()).count())
    });

    group.finish();
}

criterion_group!(benches, bench_counting);
criterion_main!(benches);
