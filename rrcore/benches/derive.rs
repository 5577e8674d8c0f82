use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rrcore::prelude::*;

fn random_quartets(count: usize, max_am: u32) -> Vec<([CartesianFunction; 4], u32)> {
    let mut rng = ChaCha20Rng::seed_from_u64(0x42);
    let random_function = |rng: &mut ChaCha20Rng| {
        let nx = rng.random_range(0..=max_am);
        let ny = rng.random_range(0..=max_am - nx);
        let nz = rng.random_range(0..=max_am - nx - ny);
        CartesianFunction::new(nx, ny, nz)
    };
    (0..count)
        .map(|_| {
            let functions = std::array::from_fn(|_| random_function(&mut rng));
            (functions, rng.random_range(0..=1))
        })
        .collect()
}

fn derive_function_relations(c: &mut Criterion) {
    let quartets = random_quartets(256, 4);

    c.bench_function("derive 256 composite relations", |b| {
        b.iter(|| {
            let ctx = DerivationContext::new();
            for ([a, bb, cc, d], particle) in &quartets {
                let target = ctx
                    .integral(IntegralKind::KineticG12, *a, *bb, *cc, *d, *particle)
                    .expect("valid target");
                black_box(KineticG12Relation::instance(&ctx, target).expect("derivable"));
            }
        })
    });
}

fn build_shell_graph(c: &mut Criterion) {
    c.bench_function("derivation graph over shells up to g", |b| {
        b.iter(|| {
            let ctx = DerivationContext::new();
            let strategy = KineticG12Strategy::<CartesianShell>::new();
            let mut graph = DerivationGraph::new();
            for am in 0..=4 {
                let (a, s) = (CartesianShell::new(am), CartesianShell::new(0));
                for particle in 0..=1 {
                    let target = ctx
                        .integral(IntegralKind::KineticG12, a, a, s, s, particle)
                        .expect("valid target");
                    graph
                        .append_target(&ctx, &strategy, target)
                        .expect("derivable");
                }
            }
            black_box(graph.total_flops())
        })
    });
}

criterion_group!(benches, derive_function_relations, build_shell_graph);
criterion_main!(benches);
