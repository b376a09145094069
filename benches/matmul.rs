use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;

use rowmul::{multiply, Matrix};

/// Worker-thread counts to compare against the uncontended single-pass
/// baseline (0). Powers of two up to a typical desktop core count.
const THREAD_COUNTS: &[usize] = &[0, 1, 2, 4, 8];

/// Square problem sizes. 64 fits in cache and is dominated by spawn/join
/// overhead; 512 is large enough for the row distribution to matter.
const SIZES: &[usize] = &[64, 256, 512];

/// Generates a pseudo-random multiply input pair. A fixed seed keeps the
/// data identical across runs so results stay comparable over time.
fn generate_inputs(size: usize) -> (Matrix, Matrix) {
    let mut rng = StdRng::seed_from_u64(42);
    let a = Matrix::random(size, size, &mut rng);
    let b = Matrix::random(size, size, &mut rng);
    (a, b)
}

fn bench_multiply(c: &mut Criterion) {
    for &size in SIZES {
        let (a, b) = generate_inputs(size);
        let mut group = c.benchmark_group(format!("multiply/{size}x{size}"));
        // One multiply-add per inner-loop step.
        group.throughput(Throughput::Elements((size * size * size) as u64));

        for &threads in THREAD_COUNTS {
            group.bench_with_input(
                BenchmarkId::new("threads", threads),
                &threads,
                |bencher, &threads| {
                    bencher.iter(|| {
                        let (product, stats) =
                            multiply(black_box(&a), black_box(&b), threads).unwrap();
                        black_box((product, stats))
                    })
                },
            );
        }
        group.finish();
    }
}

criterion_group!(benches, bench_multiply);
criterion_main!(benches);
