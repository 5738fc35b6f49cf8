//! Allocation Invariant Tests (property-based)
//!
//! For arbitrary portfolios and budgets:
//! - total allocated never exceeds the budget
//! - the budget is fully used unless every eligible balance is paid off
//! - no debt receives more than its balance
//! - repeated calls agree
//! - the reported phase is the most severe one whose condition holds

use debt_waterfall_core_rs::{allocate_payment, classify_phase, Debt, Phase, RevolvingTotals};
use proptest::prelude::*;

const LADDER: [u32; 3] = [89, 49, 29];

/// Arbitrary debt: roughly half cards, half loans; cards may be over limit
fn arb_debt(index: usize) -> impl Strategy<Value = Debt> {
    (
        0i64..2_000_000,
        0u32..3_000,
        prop_oneof![Just(None::<i64>), (1i64..2_000_000).prop_map(Some), Just(Some(0))],
    )
        .prop_map(move |(balance, rate_bps, limit)| {
            let debt = Debt::new(format!("Debt {}", index), balance, f64::from(rate_bps) / 100.0)
                .expect("generated debt is valid");
            match limit {
                Some(limit) => debt.with_credit_limit(limit),
                None => debt,
            }
        })
}

fn arb_portfolio() -> impl Strategy<Value = Vec<Debt>> {
    (0usize..8).prop_flat_map(|len| {
        (0..len).map(arb_debt).collect::<Vec<_>>()
    })
}

/// What the budget could pay at most in the selected phase
fn payable_ceiling(debts: &[Debt], phase: &Phase) -> i64 {
    if phase.is_azeo_mode() {
        let mut balances: Vec<i64> = debts
            .iter()
            .filter(|d| d.is_revolving() && d.balance() > 0)
            .map(|d| d.balance())
            .collect();
        balances.sort();
        balances.iter().skip(1).sum()
    } else if phase.is_overall_mode() {
        RevolvingTotals::from_debts(debts).total_balance
    } else {
        debts.iter().map(|d| d.balance()).sum()
    }
}

proptest! {
    #[test]
    fn prop_total_never_exceeds_budget(debts in arb_portfolio(), extra in -10_000i64..5_000_000) {
        let result = allocate_payment(&debts, extra);

        prop_assert!(result.total_allocated() <= extra.max(0));
        prop_assert_eq!(result.total_allocated() + result.unallocated(), extra.max(0));
    }

    #[test]
    fn prop_budget_fully_used_unless_everything_paid(debts in arb_portfolio(), extra in 0i64..5_000_000) {
        let result = allocate_payment(&debts, extra);
        let ceiling = payable_ceiling(&debts, result.phase());

        if extra <= ceiling {
            prop_assert_eq!(result.unallocated(), 0);
        } else {
            prop_assert_eq!(result.total_allocated(), ceiling);
        }
    }

    #[test]
    fn prop_no_debt_overpaid(debts in arb_portfolio(), extra in 0i64..5_000_000) {
        let result = allocate_payment(&debts, extra);

        for debt in &debts {
            let amount = result.amount_for(debt.name());
            prop_assert!(amount >= 0);
            prop_assert!(amount <= debt.balance(), "{} got {} of {}", debt.name(), amount, debt.balance());
        }
    }

    #[test]
    fn prop_allocation_is_idempotent(debts in arb_portfolio(), extra in 0i64..5_000_000) {
        prop_assert_eq!(allocate_payment(&debts, extra), allocate_payment(&debts, extra));
    }

    #[test]
    fn prop_phase_is_most_severe_match(debts in arb_portfolio()) {
        let phase = classify_phase(&debts);
        let cards: Vec<&Debt> = debts.iter().filter(|d| d.is_revolving()).collect();

        if cards.is_empty() {
            prop_assert_eq!(phase, Phase::NoCreditCards);
            return Ok(());
        }

        let first_rung = LADDER
            .iter()
            .position(|&t| cards.iter().any(|d| d.is_over_threshold(t)));

        match first_rung {
            Some(index) => {
                prop_assert_eq!(phase.threshold_percent(), Some(LADDER[index]));
                prop_assert_eq!(phase.step(), Some(index + 1));
            }
            None => {
                let totals = RevolvingTotals::from_debts(&debts);
                if totals.is_over_threshold(10) {
                    prop_assert!(phase.is_overall_mode());
                } else if totals.cards_with_balance > 1 {
                    prop_assert!(phase.is_azeo_mode());
                } else {
                    prop_assert_eq!(phase, Phase::Complete);
                }
            }
        }
    }
}
