//! Waterfall allocator
//!
//! Distributes a fixed extra-payment budget across a portfolio according to
//! the strategy selected by the detected phase.
//!
//! # Passes
//!
//! Each strategy is built from independent passes. A pass takes the debts,
//! the running allocation vector (indexed like `debts`) and the remaining
//! budget, and returns the budget left after it ran:
//!
//! - [`azeo_pass`]: pay off every card with a balance except the smallest
//! - [`overall_pass`]: largest revolving balances first
//! - [`threshold_pass`]: bring each card over the threshold down to it
//! - [`avalanche_pass`]: highest interest rate first, on unpaid remainders
//!
//! All passes share [`pay_in_order`], which pays each debt the lesser of
//! what it is owed and the remaining budget. Sorting is stable everywhere, so
//! ties keep input order.
//!
//! # Invariants
//!
//! - No debt is allocated more than its balance
//! - `total_allocated + unallocated == max(available_extra, 0)`
//! - Identical inputs give identical results

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::config::WaterfallConfig;
use super::phase::{classify_phase_with, Phase, Strategy};
use crate::models::Debt;

/// Extra payment assigned to one debt (cents)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub name: String,
    pub amount: i64,
}

/// Outcome of one allocation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationResult {
    /// Phase the allocation was computed for
    phase: Phase,

    /// One entry per input debt, in input order
    allocations: Vec<Allocation>,

    /// Budget left over once every eligible debt was paid in full
    unallocated: i64,
}

impl AllocationResult {
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Amount allocated to `name`, or `None` if no such debt was supplied
    pub fn get(&self, name: &str) -> Option<i64> {
        self.allocations
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.amount)
    }

    /// Amount allocated to `name`, 0 if unknown
    pub fn amount_for(&self, name: &str) -> i64 {
        self.get(name).unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Allocation> {
        self.allocations.iter()
    }

    pub fn allocations(&self) -> &[Allocation] {
        &self.allocations
    }

    pub fn total_allocated(&self) -> i64 {
        self.allocations.iter().map(|a| a.amount).sum()
    }

    pub fn unallocated(&self) -> i64 {
        self.unallocated
    }

    /// Allocations keyed by debt name
    pub fn to_map(&self) -> BTreeMap<String, i64> {
        self.allocations
            .iter()
            .map(|a| (a.name.clone(), a.amount))
            .collect()
    }
}

/// Classify the portfolio against the standard ladder, then allocate
///
/// # Example
/// ```
/// use debt_waterfall_core_rs::{allocate_payment, Debt};
///
/// let debts = vec![
///     Debt::new("Card A".to_string(), 95_000, 18.0).unwrap().with_credit_limit(100_000),
///     Debt::new("Card B".to_string(), 90_000, 20.0).unwrap().with_credit_limit(100_000),
///     Debt::new("Card C".to_string(), 40_000, 15.0).unwrap().with_credit_limit(50_000),
/// ];
///
/// let result = allocate_payment(&debts, 10_000);
/// assert_eq!(result.amount_for("Card A"), 6_000);
/// assert_eq!(result.amount_for("Card B"), 4_000);
/// assert_eq!(result.amount_for("Card C"), 0);
/// ```
pub fn allocate_payment(debts: &[Debt], available_extra: i64) -> AllocationResult {
    allocate_payment_with(debts, available_extra, &WaterfallConfig::default())
}

/// Classify the portfolio against a custom ladder, then allocate
pub fn allocate_payment_with(
    debts: &[Debt],
    available_extra: i64,
    config: &WaterfallConfig,
) -> AllocationResult {
    let phase = classify_phase_with(debts, config);
    allocate(debts, available_extra, &phase)
}

/// Allocate `available_extra` (cents) for an already-classified phase
///
/// A non-positive budget yields an all-zero result.
pub fn allocate(debts: &[Debt], available_extra: i64, phase: &Phase) -> AllocationResult {
    let mut amounts = vec![0i64; debts.len()];
    let budget = available_extra.max(0);

    let unallocated = if budget == 0 {
        0
    } else {
        match phase.strategy() {
            Strategy::Azeo => azeo_pass(debts, &mut amounts, budget),
            Strategy::Overall => overall_pass(debts, &mut amounts, budget),
            Strategy::Threshold { threshold_pct } => {
                let remaining = threshold_pass(debts, threshold_pct, &mut amounts, budget);
                avalanche_pass(debts, &mut amounts, remaining)
            }
            Strategy::Avalanche => avalanche_pass(debts, &mut amounts, budget),
        }
    };

    log::debug!(
        "{}: allocated {} of {} cents across {} debt(s), {} unallocated",
        phase,
        budget - unallocated,
        budget,
        debts.len(),
        unallocated
    );

    AllocationResult {
        phase: phase.clone(),
        allocations: debts
            .iter()
            .zip(amounts)
            .map(|(debt, amount)| Allocation {
                name: debt.name().to_string(),
                amount,
            })
            .collect(),
        unallocated,
    }
}

// ============================================================================
// Passes
// ============================================================================

/// Pay every card with a balance except the smallest one
///
/// Cards are taken in ascending balance order and the first (smallest) is
/// skipped, so exactly one card keeps reporting a balance.
pub fn azeo_pass(debts: &[Debt], amounts: &mut [i64], remaining: i64) -> i64 {
    let mut order = carded_with_balance(debts);
    order.sort_by_key(|&i| debts[i].balance());
    let payable: Vec<usize> = order.into_iter().skip(1).collect();

    pay_in_order(debts, &payable, amounts, remaining, |debt, _| debt.balance())
}

/// Pay the largest revolving balances first
pub fn overall_pass(debts: &[Debt], amounts: &mut [i64], remaining: i64) -> i64 {
    let mut order = carded_with_balance(debts);
    order.sort_by_key(|&i| std::cmp::Reverse(debts[i].balance()));

    pay_in_order(debts, &order, amounts, remaining, |debt, _| debt.balance())
}

/// Bring every card over `threshold_pct` down to the threshold
///
/// Cards are visited from highest to lowest utilization; cards already at or
/// under the threshold are skipped.
pub fn threshold_pass(debts: &[Debt], threshold_pct: u32, amounts: &mut [i64], remaining: i64) -> i64 {
    let mut order: Vec<usize> = (0..debts.len())
        .filter(|&i| debts[i].is_revolving())
        .collect();
    order.sort_by(|&a, &b| compare_utilization(&debts[b], &debts[a]));
    order.retain(|&i| debts[i].is_over_threshold(threshold_pct));

    pay_in_order(debts, &order, amounts, remaining, |debt, _| {
        debt.threshold_balance(threshold_pct)
            .map_or(0, |target| debt.balance() - target)
    })
}

/// Pay unpaid remainders, highest interest rate first
///
/// Covers every debt, revolving or not, and adds to whatever earlier passes
/// already allocated.
pub fn avalanche_pass(debts: &[Debt], amounts: &mut [i64], remaining: i64) -> i64 {
    if remaining <= 0 {
        return remaining;
    }

    let mut order: Vec<usize> = (0..debts.len())
        .filter(|&i| debts[i].balance() > amounts[i])
        .collect();
    order.sort_by(|&a, &b| debts[b].interest_rate().total_cmp(&debts[a].interest_rate()));

    pay_in_order(debts, &order, amounts, remaining, |debt, allocated| {
        debt.balance() - allocated
    })
}

/// Walk `order`, paying each debt `min(owed, remaining)` until the budget runs out
///
/// `owed` receives the debt and what it has been allocated so far. Returns the
/// budget left afterwards.
pub fn pay_in_order<F>(
    debts: &[Debt],
    order: &[usize],
    amounts: &mut [i64],
    mut remaining: i64,
    owed: F,
) -> i64
where
    F: Fn(&Debt, i64) -> i64,
{
    for &index in order {
        if remaining <= 0 {
            break;
        }
        let debt = &debts[index];
        let payment = owed(debt, amounts[index]).min(remaining);
        if payment <= 0 {
            continue;
        }
        amounts[index] += payment;
        remaining -= payment;
        log::trace!("pay {} cents to {}", payment, debt.name());
    }
    remaining
}

fn carded_with_balance(debts: &[Debt]) -> Vec<usize> {
    (0..debts.len())
        .filter(|&i| debts[i].is_revolving() && debts[i].balance() > 0)
        .collect()
}

/// Exact utilization ordering: `a.balance / a.limit` vs `b.balance / b.limit`
fn compare_utilization(a: &Debt, b: &Debt) -> Ordering {
    match (a.revolving_limit(), b.revolving_limit()) {
        (Some(limit_a), Some(limit_b)) => (i128::from(a.balance()) * i128::from(limit_b))
            .cmp(&(i128::from(b.balance()) * i128::from(limit_a))),
        _ => a.utilization().total_cmp(&b.utilization()),
    }
}
