use criterion::{criterion_group, criterion_main, Criterion};
use sim_core::{Decision, PricingStrategy, SimulationState};
use sim_engine::{EngineConfig, SimulationEngine};
use sim_market::Market;

fn decision(round: u32) -> Decision {
    Decision {
        round_number: round,
        technology_investment: 10.0,
        marketing_budget: 5.0,
        r_d_budget: 3.0,
        pricing_strategy: PricingStrategy::Competitive,
        production_capacity: 100,
    }
}

fn bench_full_run(c: &mut Criterion) {
    let engine = SimulationEngine::new(Market::default(), EngineConfig { rng_seed: 42 });
    c.bench_function("five_round_run", |b| {
        b.iter(|| {
            let mut state = SimulationState::new("BenchCo");
            for round in 1..=5 {
                state = engine.advance(&state, decision(round)).unwrap();
            }
            state
        })
    });
}

criterion_group!(benches, bench_full_run);
criterion_main!(benches);
