//! Entry decisions.
//!
//! One state machine per instrument run: {Flat, LongOpen, ShortOpen}. Only
//! Flat accepts entries; from an open state every new signal is ignored
//! until the position closes (no pyramiding, no hedging). When both
//! directions pass on the same bar the higher filter score wins, and an
//! exact tie goes long. That tie-break is a fixed rule, not an artifact of
//! evaluation order.

use serde::{Deserialize, Serialize};

use crate::config::DecisionConfig;
use crate::filters::FilterResult;
use crate::risk::RiskPlan;

/// Current position state, as seen by the decision maker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionState {
    Flat,
    LongOpen,
    ShortOpen,
}

/// The action for this bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    EnterLong,
    EnterShort,
    Hold,
}

/// Combines filter verdicts, risk plans, and the configured confidence
/// score into a single action.
pub struct DecisionMaker {
    config: DecisionConfig,
}

impl DecisionMaker {
    pub fn new(config: DecisionConfig) -> Self {
        Self { config }
    }

    pub fn decide(
        &self,
        state: PositionState,
        long: &FilterResult,
        long_plan: &RiskPlan,
        short: &FilterResult,
        short_plan: &RiskPlan,
    ) -> Action {
        if state != PositionState::Flat {
            return Action::Hold;
        }
        if self.config.confidence < self.config.min_confidence {
            return Action::Hold;
        }

        let long_ok = long.passed() && long_plan.acceptable;
        let short_ok = short.passed() && short_plan.acceptable;

        match (long_ok, short_ok) {
            (true, false) => Action::EnterLong,
            (false, true) => Action::EnterShort,
            (true, true) => {
                if short.score > long.score {
                    Action::EnterShort
                } else {
                    Action::EnterLong
                }
            }
            (false, false) => Action::Hold,
        }
    }
}
