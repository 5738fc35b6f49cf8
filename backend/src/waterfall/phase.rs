//! Phase classifier
//!
//! Inspects the revolving debts of a portfolio and places it on the
//! improvement ladder. The ladder is a strict, severity-first decision list:
//!
//! ```text
//! no cards?                         → No Credit Cards
//! any card > rung 1 (89%)?          → Phase 1: Emergency Recovery
//! any card > rung 2 (49%)?          → Phase 2: Critical Threshold
//! any card > rung 3 (29%)?          → Phase 3: Good Standing
//! overall utilization > 10%?        → Phase 4: Premium Qualification
//! more than one card with balance?  → Phase 5: AZEO Optimization
//! otherwise                         → Complete
//! ```
//!
//! The first matching entry wins; lower entries are never evaluated. The
//! result is recomputed from balances on every call and never stored.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::config::WaterfallConfig;
use crate::models::{Debt, RevolvingTotals};

pub const PREMIUM_QUALIFICATION: &str = "Premium Qualification";
pub const AZEO_OPTIMIZATION: &str = "AZEO Optimization";
pub const NO_CREDIT_CARDS: &str = "No Credit Cards";
pub const COMPLETE: &str = "Complete";

/// Position of a portfolio on the improvement ladder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Phase {
    /// No debt has a positive credit limit
    NoCreditCards,

    /// At least one card is over a per-card rung
    Threshold {
        /// 1-based ladder position
        step: usize,
        name: String,
        threshold_pct: u32,
        /// Cards currently over `threshold_pct`
        cards_over: usize,
        /// Share of cards already at or under the rung (0-100)
        progress: f64,
    },

    /// Every card is under the ladder but aggregate utilization is too high
    PremiumQualification {
        step: usize,
        threshold_pct: u32,
        /// Aggregate utilization across all cards
        current_utilization: f64,
        progress: f64,
    },

    /// Utilization is low but more than one card still reports a balance
    AzeoOptimization {
        step: usize,
        /// Cards to zero out so that only one reports a balance
        cards_to_pay_off: usize,
        progress: f64,
    },

    /// Nothing left to optimize
    Complete,
}

/// Allocation strategy selected by a phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Strategy {
    /// Pay off every card but the smallest balance
    Azeo,
    /// Largest revolving balances first
    Overall,
    /// Bring cards under the threshold, then avalanche
    Threshold { threshold_pct: u32 },
    /// Highest interest rate first
    Avalanche,
}

impl Phase {
    /// Short phase name, e.g. "Emergency Recovery"
    pub fn name(&self) -> &str {
        match self {
            Phase::NoCreditCards => NO_CREDIT_CARDS,
            Phase::Threshold { name, .. } => name,
            Phase::PremiumQualification { .. } => PREMIUM_QUALIFICATION,
            Phase::AzeoOptimization { .. } => AZEO_OPTIMIZATION,
            Phase::Complete => COMPLETE,
        }
    }

    /// Ladder position for the numbered phases
    pub fn step(&self) -> Option<usize> {
        match self {
            Phase::Threshold { step, .. }
            | Phase::PremiumQualification { step, .. }
            | Phase::AzeoOptimization { step, .. } => Some(*step),
            Phase::NoCreditCards | Phase::Complete => None,
        }
    }

    /// Display label, e.g. "Phase 1: Emergency Recovery"
    pub fn label(&self) -> String {
        match self.step() {
            Some(step) => format!("Phase {}: {}", step, self.name()),
            None => self.name().to_string(),
        }
    }

    /// Utilization percent being targeted
    ///
    /// `Some(0)` for `NoCreditCards`, `None` for AZEO and `Complete`.
    pub fn threshold_percent(&self) -> Option<u32> {
        match self {
            Phase::NoCreditCards => Some(0),
            Phase::Threshold { threshold_pct, .. }
            | Phase::PremiumQualification { threshold_pct, .. } => Some(*threshold_pct),
            Phase::AzeoOptimization { .. } | Phase::Complete => None,
        }
    }

    /// True only for premium qualification (aggregate, not per-card, target)
    pub fn is_overall_mode(&self) -> bool {
        matches!(self, Phase::PremiumQualification { .. })
    }

    /// True only for the "all zero except one" phase
    pub fn is_azeo_mode(&self) -> bool {
        matches!(self, Phase::AzeoOptimization { .. })
    }

    /// Progress through the current phase (0-100); `None` without cards
    pub fn progress(&self) -> Option<f64> {
        match self {
            Phase::NoCreditCards => None,
            Phase::Threshold { progress, .. }
            | Phase::PremiumQualification { progress, .. }
            | Phase::AzeoOptimization { progress, .. } => Some(*progress),
            Phase::Complete => Some(100.0),
        }
    }

    /// Allocation strategy for this phase
    pub fn strategy(&self) -> Strategy {
        match self {
            Phase::AzeoOptimization { .. } => Strategy::Azeo,
            Phase::PremiumQualification { .. } => Strategy::Overall,
            Phase::Threshold { threshold_pct, .. } => Strategy::Threshold {
                threshold_pct: *threshold_pct,
            },
            Phase::NoCreditCards | Phase::Complete => Strategy::Avalanche,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Classify a portfolio against the standard ladder
///
/// # Example
/// ```
/// use debt_waterfall_core_rs::{classify_phase, Debt};
///
/// let debts = vec![
///     Debt::new("Card A".to_string(), 95_000, 18.0).unwrap().with_credit_limit(100_000),
///     Debt::new("Card B".to_string(), 45_000, 20.0).unwrap().with_credit_limit(50_000),
/// ];
/// let phase = classify_phase(&debts);
/// assert_eq!(phase.label(), "Phase 1: Emergency Recovery");
/// assert_eq!(phase.threshold_percent(), Some(89));
/// ```
pub fn classify_phase(debts: &[Debt]) -> Phase {
    classify_phase_with(debts, &WaterfallConfig::default())
}

/// Classify a portfolio against a custom ladder
pub fn classify_phase_with(debts: &[Debt], config: &WaterfallConfig) -> Phase {
    let phase = detect(debts, config);
    log::debug!("classified {} debt(s) as {}", debts.len(), phase);
    phase
}

fn detect(debts: &[Debt], config: &WaterfallConfig) -> Phase {
    let cards: Vec<&Debt> = debts.iter().filter(|d| d.is_revolving()).collect();
    if cards.is_empty() {
        return Phase::NoCreditCards;
    }
    let card_count = cards.len();

    // Per-card rungs, most severe first
    for (index, rung) in config.ladder().iter().enumerate() {
        let cards_over = cards
            .iter()
            .filter(|d| d.is_over_threshold(rung.threshold_pct))
            .count();
        if cards_over > 0 {
            return Phase::Threshold {
                step: index + 1,
                name: rung.name.clone(),
                threshold_pct: rung.threshold_pct,
                cards_over,
                progress: (card_count - cards_over) as f64 / card_count as f64 * 100.0,
            };
        }
    }

    let totals = RevolvingTotals::from_debts(debts);
    let overall_step = config.ladder().len() + 1;
    let overall_threshold = config.overall_threshold_pct();

    if totals.is_over_threshold(overall_threshold) {
        let current_utilization = totals.utilization();
        return Phase::PremiumQualification {
            step: overall_step,
            threshold_pct: overall_threshold,
            current_utilization,
            progress: (100.0 - (current_utilization - f64::from(overall_threshold)) * 10.0).max(0.0),
        };
    }

    if totals.cards_with_balance > 1 {
        return Phase::AzeoOptimization {
            step: overall_step + 1,
            cards_to_pay_off: totals.cards_with_balance - 1,
            progress: (card_count - totals.cards_with_balance) as f64 / (card_count - 1) as f64
                * 100.0,
        };
    }

    Phase::Complete
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waterfall::config::LadderRung;

    fn card(name: &str, balance: i64, limit: i64) -> Debt {
        Debt::new(name.to_string(), balance, 18.0)
            .unwrap()
            .with_credit_limit(limit)
    }

    #[test]
    fn test_threshold_progress_counts_cards_under() {
        let debts = vec![
            card("A", 95_000, 100_000),
            card("B", 10_000, 100_000),
            card("C", 10_000, 100_000),
            card("D", 10_000, 100_000),
        ];
        match classify_phase(&debts) {
            Phase::Threshold {
                cards_over,
                progress,
                ..
            } => {
                assert_eq!(cards_over, 1);
                assert_eq!(progress, 75.0);
            }
            other => panic!("expected threshold phase, got {:?}", other),
        }
    }

    #[test]
    fn test_premium_progress_clamps_at_zero() {
        // 25% aggregate but every card at or under 29%
        let debts = vec![card("A", 25_000, 100_000), card("B", 25_000, 100_000)];
        let phase = classify_phase(&debts);
        assert!(phase.is_overall_mode());
        assert_eq!(phase.progress(), Some(0.0));
        assert_eq!(phase.label(), "Phase 4: Premium Qualification");
    }

    #[test]
    fn test_azeo_progress() {
        let debts = vec![
            card("A", 1_000, 100_000),
            card("B", 1_000, 100_000),
            card("C", 0, 100_000),
        ];
        let phase = classify_phase(&debts);
        assert_eq!(
            phase,
            Phase::AzeoOptimization {
                step: 5,
                cards_to_pay_off: 1,
                progress: 50.0,
            }
        );
    }

    #[test]
    fn test_strategy_mapping() {
        assert_eq!(Phase::Complete.strategy(), Strategy::Avalanche);
        assert_eq!(Phase::NoCreditCards.strategy(), Strategy::Avalanche);
        assert_eq!(Phase::NoCreditCards.threshold_percent(), Some(0));
        assert_eq!(Phase::Complete.threshold_percent(), None);
        assert_eq!(Phase::Complete.to_string(), "Complete");
    }

    #[test]
    fn test_custom_ladder_steps() {
        let config = WaterfallConfig::new(
            vec![LadderRung::new("Over Half", 50)],
            5,
        )
        .unwrap();
        let debts = vec![card("A", 12_000, 100_000), card("B", 0, 100_000)];
        let phase = classify_phase_with(&debts, &config);
        assert_eq!(phase.step(), Some(2));
        assert_eq!(phase.threshold_percent(), Some(5));
    }
}
