#![deny(warnings)]

//! Round resolution for the Clean Start energy simulation.
//!
//! The engine is the sole place where a `Decision` becomes a `RoundResult`
//! and a `SimulationState` advances. It holds only read-only configuration
//! (the market and an RNG seed), so each call is a pure function of its
//! inputs: identical `(state, decision)` pairs resolve bit-identically.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sim_core::{
    validate_decision, validate_state, Company, Decision, PricingStrategy, RoundResult,
    SimulationState, ValidationError,
};
use sim_market::Market;
use tracing::debug;

/// Engine configuration.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Seed for the per-round demand noise draw.
    pub rng_seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { rng_seed: 42 }
    }
}

/// Stateless round resolver. Holds no per-run state between calls; every
/// run's history lives in its own `SimulationState` value.
#[derive(Clone, Debug)]
pub struct SimulationEngine {
    market: Market,
    seed: u64,
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::new(Market::default(), EngineConfig::default())
    }
}

impl SimulationEngine {
    pub fn new(market: Market, config: EngineConfig) -> Self {
        Self {
            market,
            seed: config.rng_seed,
        }
    }

    /// The market this engine resolves rounds against.
    pub fn market(&self) -> &Market {
        &self.market
    }

    /// Resolve one round: rebuild the company from the full decision
    /// history, apply market dynamics, and compute the financials.
    ///
    /// The company snapshot is replayed from scratch on every call rather
    /// than persisted; the update rules are strictly additive/overwrite,
    /// so replay and incremental update are equivalent and replay keeps
    /// `SimulationState` free of derived data.
    pub fn compute_round_result(
        &self,
        state: &SimulationState,
        decision: &Decision,
    ) -> Result<RoundResult, ValidationError> {
        validate_decision(decision)?;

        let mut company = Company::new(&state.company_name);
        for prev in &state.decisions {
            company.apply_decision(prev);
        }
        company.apply_decision(decision);

        let demand_multiplier = self.market.demand_multiplier(decision.round_number, self.seed);
        let price_premium = self.market.price_premium(company.technology_level);
        let price_multiplier = match decision.pricing_strategy {
            PricingStrategy::Premium => price_premium,
            PricingStrategy::Competitive => 1.0,
            PricingStrategy::Budget => 0.8,
        };
        let price_per_mw = self.market.base_price_per_mw * price_multiplier * demand_multiplier;

        let market_share = self.market.market_share(
            company.technology_level,
            company.brand_strength,
            f64::from(company.production_capacity),
        );

        let revenue = market_share * self.market.total_market_size * price_per_mw;
        let costs = decision.total_cost();
        let profit = revenue - costs;

        let customer_satisfaction = company.technology_level * 0.4
            + company.brand_strength * 0.3
            + (1.0 - (price_multiplier - 1.0).abs()) * 0.3;

        // Cumulative profit is re-summed from history rather than carried
        // forward, so a result never depends on a previously stored total.
        let cumulative_profit =
            state.results.iter().map(|r| r.profit).sum::<f64>() + profit;

        debug!(
            round = decision.round_number,
            company = %company.name,
            revenue,
            profit,
            market_share,
            "round resolved"
        );

        Ok(RoundResult {
            round_number: decision.round_number,
            revenue,
            costs,
            profit,
            market_share,
            customer_satisfaction,
            technology_level: company.technology_level,
            cash_flow: profit,
            cumulative_profit,
        })
    }

    /// Advance a run by exactly one round, returning a fresh state with
    /// the decision and result appended. The input state is not mutated.
    ///
    /// Affordability (`total_cost <= cash_balance`) and the terminal-round
    /// guard are the caller's responsibility: the engine will resolve an
    /// unaffordable decision without complaint.
    pub fn advance(
        &self,
        state: &SimulationState,
        decision: Decision,
    ) -> Result<SimulationState, ValidationError> {
        validate_state(state)?;
        let result = self.compute_round_result(state, &decision)?;

        let mut next = state.clone();
        next.cash_balance += result.profit;
        next.current_round = decision.round_number;
        next.decisions.push(decision);
        next.results.push(result);
        next.updated_at = Utc::now();
        Ok(next)
    }
}
