#![deny(warnings)]

//! Core domain models and invariants for the Clean Start energy simulation.
//!
//! This crate defines the serializable types exchanged between the engine
//! and its presentation collaborator, with validation helpers to guarantee
//! basic invariants before a decision enters round resolution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of decision rounds in one simulation run.
pub const TOTAL_ROUNDS: u32 = 5;

/// Starting cash balance in $M.
pub const STARTING_CASH: f64 = 100.0;

/// How a company prices its output relative to the market baseline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingStrategy {
    /// Charge a technology-driven premium over the base price.
    Premium,
    /// Match the market baseline.
    Competitive,
    /// Undercut the baseline by 20%.
    Budget,
}

impl FromStr for PricingStrategy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "premium" => Ok(Self::Premium),
            "competitive" => Ok(Self::Competitive),
            "budget" => Ok(Self::Budget),
            other => Err(ValidationError::UnknownPricingStrategy(other.to_string())),
        }
    }
}

impl fmt::Display for PricingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Premium => "premium",
            Self::Competitive => "competitive",
            Self::Budget => "budget",
        };
        f.write_str(s)
    }
}

/// One round's worth of player choices. Immutable once submitted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// 1-based round this decision applies to.
    pub round_number: u32,
    /// Technology/infrastructure investment in $M (>= 0).
    pub technology_investment: f64,
    /// Marketing budget in $M (>= 0).
    pub marketing_budget: f64,
    /// R&D budget in $M (>= 0).
    pub r_d_budget: f64,
    /// Pricing posture for the round.
    pub pricing_strategy: PricingStrategy,
    /// Production capacity to operate this round, in MW (> 0).
    pub production_capacity: u32,
}

impl Decision {
    /// Total round cost in $M: all three budgets plus capacity operating
    /// cost at 0.1 $M/MW. This is the figure the caller compares against
    /// the cash balance before advancing.
    pub fn total_cost(&self) -> f64 {
        self.technology_investment
            + self.marketing_budget
            + self.r_d_budget
            + f64::from(self.production_capacity) * 0.1
    }
}

/// Computed outcome for one round. Appended to history, never mutated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Round the result belongs to.
    pub round_number: u32,
    /// Revenue in $M.
    pub revenue: f64,
    /// Total costs in $M.
    pub costs: f64,
    /// Revenue minus costs, in $M.
    pub profit: f64,
    /// Fraction of total market demand captured, capped at 0.8. There is
    /// no lower cap: a sufficiently weak round may compute negative.
    pub market_share: f64,
    /// Nominal [0,1] satisfaction score; not clamped.
    pub customer_satisfaction: f64,
    /// Company technology level after this round's R&D, in [0,1].
    pub technology_level: f64,
    /// Cash flow for the round; always equals `profit`.
    pub cash_flow: f64,
    /// Sum of profit over all rounds up to and including this one.
    pub cumulative_profit: f64,
}

/// Full history and current status of one simulation run.
///
/// Advancing a round produces a fresh value; holders of the previous state
/// never observe a change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Player-chosen company name.
    pub company_name: String,
    /// Rounds completed so far (0 before the first decision).
    pub current_round: u32,
    /// Fixed length of the run.
    pub total_rounds: u32,
    /// Decisions for completed rounds, in order.
    pub decisions: Vec<Decision>,
    /// Results for completed rounds, parallel to `decisions`.
    pub results: Vec<RoundResult>,
    /// Cash on hand in $M.
    pub cash_balance: f64,
    /// When the run was created.
    pub created_at: DateTime<Utc>,
    /// When the run last advanced.
    pub updated_at: DateTime<Utc>,
}

impl SimulationState {
    /// Fresh run for the named company: round 0, empty history, starting cash.
    pub fn new(company_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            company_name: company_name.into(),
            current_round: 0,
            total_rounds: TOTAL_ROUNDS,
            decisions: Vec::new(),
            results: Vec::new(),
            cash_balance: STARTING_CASH,
            created_at: now,
            updated_at: now,
        }
    }

    /// True once every round has been played.
    pub fn is_complete(&self) -> bool {
        self.current_round >= self.total_rounds
    }
}

/// A company's point-in-time capability snapshot, accumulated from a
/// sequence of decisions. Ephemeral: the engine rebuilds it from history
/// each round rather than persisting it in `SimulationState`.
#[derive(Clone, Debug, PartialEq)]
pub struct Company {
    /// Company name.
    pub name: String,
    /// Technology capability in [0,1]; saturates at 1.0.
    pub technology_level: f64,
    /// Brand recognition in [0,1]; saturates at 1.0.
    pub brand_strength: f64,
    /// Operating capacity in MW; overwritten by each decision.
    pub production_capacity: u32,
    /// Running total of technology investment in $M.
    pub cumulative_investment: f64,
}

impl Company {
    /// Baseline company: mid-tier technology, weak brand, 50 MW pilot plant.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            technology_level: 0.5,
            brand_strength: 0.3,
            production_capacity: 50,
            cumulative_investment: 0.0,
        }
    }

    /// Fold one decision into the snapshot. Technology and brand gains
    /// saturate at 1.0 and never decay; capacity is replaced outright.
    pub fn apply_decision(&mut self, decision: &Decision) {
        self.technology_level = (self.technology_level + decision.r_d_budget * 0.1).min(1.0);
        self.brand_strength = (self.brand_strength + decision.marketing_budget * 0.05).min(1.0);
        self.production_capacity = decision.production_capacity;
        self.cumulative_investment += decision.technology_investment;
    }
}

/// Validation errors for decisions and run state.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Pricing strategy string is not premium/competitive/budget.
    #[error("unknown pricing strategy: {0}")]
    UnknownPricingStrategy(String),
    /// A budget or investment field is negative.
    #[error("{0} must be non-negative")]
    NegativeBudget(&'static str),
    /// A numeric field is NaN or infinite.
    #[error("non-finite numeric value encountered")]
    NonFinite,
    /// Rounds are numbered from 1; round 0 is the not-started state.
    #[error("round number must be >= 1")]
    ZeroRound,
    /// Production capacity of zero cannot serve any demand.
    #[error("production capacity must be > 0 MW")]
    ZeroCapacity,
    /// Decision/result history length disagrees with the round counter.
    #[error("history length {history} does not match round counter {round}")]
    InconsistentHistory {
        /// Shorter of the two history lengths.
        history: usize,
        /// `current_round` of the offending state.
        round: u32,
    },
}

/// Validate a decision's numeric fields before round resolution.
pub fn validate_decision(decision: &Decision) -> Result<(), ValidationError> {
    if decision.round_number == 0 {
        return Err(ValidationError::ZeroRound);
    }
    let budgets = [
        ("technology_investment", decision.technology_investment),
        ("marketing_budget", decision.marketing_budget),
        ("r_d_budget", decision.r_d_budget),
    ];
    for (name, value) in budgets {
        if !value.is_finite() {
            return Err(ValidationError::NonFinite);
        }
        if value < 0.0 {
            return Err(ValidationError::NegativeBudget(name));
        }
    }
    if decision.production_capacity == 0 {
        return Err(ValidationError::ZeroCapacity);
    }
    Ok(())
}

/// Validate the run invariant `decisions.len() == results.len() == current_round`.
pub fn validate_state(state: &SimulationState) -> Result<(), ValidationError> {
    let round = state.current_round as usize;
    if state.decisions.len() != round || state.results.len() != round {
        return Err(ValidationError::InconsistentHistory {
            history: state.decisions.len().min(state.results.len()),
            round: state.current_round,
        });
    }
    Ok(())
}
