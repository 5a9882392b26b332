use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use labyrinth_core::*;

fn gen_tiers(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    group.sample_size(10);
    for difficulty in Difficulty::ALL {
        group.bench_with_input(
            BenchmarkId::from_parameter(difficulty.name()),
            &difficulty.profile(),
            |b, &profile| {
                let mut seed = 0;
                b.iter(|| {
                    seed += 1;
                    generate(black_box(profile), seed)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, gen_tiers);
criterion_main!(benches);
