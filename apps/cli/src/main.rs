#![deny(warnings)]

//! Headless playthrough of the Clean Start energy simulation.
//!
//! Stands in for the interactive presentation layer: it supplies a scripted
//! decision per round, enforces the affordability check the engine leaves to
//! its caller, and renders the result history as a table.

use anyhow::{bail, Result};
use sim_core::{Decision, PricingStrategy, SimulationState};
use sim_engine::{EngineConfig, SimulationEngine};
use sim_market::Market;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

struct Args {
    company: String,
    seed: u64,
    json: bool,
}

fn parse_args() -> Args {
    let mut args = Args {
        company: "GreenPower Inc.".to_string(),
        seed: 42,
        json: false,
    };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--company" => {
                if let Some(name) = it.next() {
                    args.company = name;
                }
            }
            "--seed" => {
                if let Some(seed) = it.next().and_then(|s| s.parse().ok()) {
                    args.seed = seed;
                }
            }
            "--json" => args.json = true,
            _ => {}
        }
    }
    args
}

// Decision ranges mirror the interactive sliders: investment [0,50],
// marketing [0,30], R&D [0,20], capacity [10,500] MW.
fn scripted_decision(round: u32) -> Decision {
    let pricing_strategy = match round {
        1 | 2 => PricingStrategy::Competitive,
        3 => PricingStrategy::Budget,
        _ => PricingStrategy::Premium,
    };
    Decision {
        round_number: round,
        technology_investment: 10.0 + f64::from(round) * 2.0,
        marketing_budget: 5.0 + f64::from(round),
        r_d_budget: 3.0,
        pricing_strategy,
        production_capacity: (100 + round * 50).min(500),
    }
}

fn play(engine: &SimulationEngine, mut state: SimulationState) -> Result<SimulationState> {
    while !state.is_complete() {
        let round = state.current_round + 1;
        let decision = scripted_decision(round);
        let total_cost = decision.total_cost();
        if total_cost > state.cash_balance {
            bail!(
                "insufficient funds in round {}: cost ${:.1}M, available ${:.1}M",
                round,
                total_cost,
                state.cash_balance
            );
        }
        state = engine.advance(&state, decision)?;
        let result = state.results.last().expect("round just resolved");
        info!(
            round,
            profit = result.profit,
            cash = state.cash_balance,
            "round complete"
        );
    }
    Ok(state)
}

fn print_summary(state: &SimulationState) {
    println!(
        "{} | rounds: {}/{} | cash: ${:.1}M",
        state.company_name, state.current_round, state.total_rounds, state.cash_balance
    );
    println!("round | strategy    | revenue | costs | profit | share | satisfaction | tech");
    for (decision, result) in state.decisions.iter().zip(&state.results) {
        println!(
            "{:>5} | {:<11} | {:>7.1} | {:>5.1} | {:>6.1} | {:>4.1}% | {:>12.2} | {:.2}",
            result.round_number,
            decision.pricing_strategy.to_string(),
            result.revenue,
            result.costs,
            result.profit,
            result.market_share * 100.0,
            result.customer_satisfaction,
            result.technology_level
        );
    }
    if let Some(last) = state.results.last() {
        let verdict = if last.cumulative_profit > 200.0 {
            "outstanding performance"
        } else if last.cumulative_profit > 50.0 {
            "profitable and growing"
        } else {
            "needs stronger strategy"
        };
        println!(
            "cumulative profit: ${:.1}M ({})",
            last.cumulative_profit, verdict
        );
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::INFO)
        .init();

    let args = parse_args();
    info!(company = %args.company, seed = args.seed, "starting simulation");

    let engine = SimulationEngine::new(Market::default(), EngineConfig { rng_seed: args.seed });
    let state = SimulationState::new(args.company);
    let final_state = play(&engine, state)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&final_state)?);
    } else {
        print_summary(&final_state);
    }
    Ok(())
}
