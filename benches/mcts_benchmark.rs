use criterion::{criterion_group, criterion_main, Criterion};
use hive::evaluate::{HeuristicOracle, UniformOracle};
use hive::game_state::GameState;
use hive::mcts::{Mcts, MctsConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("MCTS");
    group.sample_size(10);

    group.bench_function("200 simulations from the opening, uniform oracle", |b| {
        let mut rng = StdRng::seed_from_u64(0);
        b.iter(|| {
            let mut state = GameState::new();
            let mut mcts = Mcts::new(MctsConfig::for_evaluation().with_simulations(200));
            mcts.search(&mut state, &UniformOracle::new(), false, &mut rng)
                .unwrap()
        })
    });

    group.bench_function("200 simulations from the opening, heuristic oracle", |b| {
        let mut rng = StdRng::seed_from_u64(0);
        b.iter(|| {
            let mut state = GameState::new();
            let mut mcts = Mcts::new(MctsConfig::for_evaluation().with_simulations(200));
            mcts.search(&mut state, &HeuristicOracle::default(), false, &mut rng)
                .unwrap()
        })
    });

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
