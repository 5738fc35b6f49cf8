//! Debt model
//!
//! Represents a single obligation in a household's debt portfolio.
//! Each debt has:
//! - Outstanding balance (i64 cents)
//! - Annual interest rate (percent, e.g. 18.0 for 18% APR)
//! - Optional credit limit (i64 cents). A positive limit marks revolving
//!   credit (a credit card); absent, zero or negative means an installment loan
//! - Optional minimum monthly payment (i64 cents), used for cash flow index
//!
//! A `Debt` is immutable for the duration of one allocation call. Validation
//! happens once, at construction or deserialization; the waterfall engine
//! never re-validates.
//!
//! CRITICAL: All money values are i64 (cents)

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::interest;

/// Errors raised when a debt (or a set of debts) violates the input contract
#[derive(Debug, Error, PartialEq)]
pub enum DebtError {
    #[error("Debt name must not be empty")]
    EmptyName,

    #[error("Debt '{name}' has negative balance {balance}")]
    NegativeBalance { name: String, balance: i64 },

    #[error("Debt '{name}' has invalid interest rate {rate} (must be finite and >= 0)")]
    InvalidInterestRate { name: String, rate: f64 },

    #[error("Duplicate debt name: {0}")]
    DuplicateName(String),
}

/// A credit card or loan
///
/// # Example
/// ```
/// use debt_waterfall_core_rs::Debt;
///
/// let card = Debt::new("Card A".to_string(), 95_000, 18.0)
///     .unwrap()
///     .with_credit_limit(100_000);
///
/// assert!(card.is_revolving());
/// assert_eq!(card.utilization(), 95.0);
/// assert!(card.is_over_threshold(89));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DebtRecord")]
pub struct Debt {
    /// Unique identifier within a portfolio (e.g., "Visa Platinum")
    name: String,

    /// Outstanding balance (i64 cents, never negative)
    balance: i64,

    /// Annual percentage rate, e.g. 18.0 for 18% APR
    interest_rate: f64,

    /// Credit limit (i64 cents)
    ///
    /// Only a positive limit makes the debt revolving. Zero or negative
    /// limits are kept as supplied but treated exactly like `None`.
    credit_limit: Option<i64>,

    /// Minimum monthly payment (i64 cents)
    minimum_payment: Option<i64>,
}

/// Unvalidated wire form of a [`Debt`]
#[derive(Debug, Deserialize)]
struct DebtRecord {
    name: String,
    balance: i64,
    interest_rate: f64,
    #[serde(default)]
    credit_limit: Option<i64>,
    #[serde(default)]
    minimum_payment: Option<i64>,
}

impl TryFrom<DebtRecord> for Debt {
    type Error = DebtError;

    fn try_from(record: DebtRecord) -> Result<Self, Self::Error> {
        let mut debt = Debt::new(record.name, record.balance, record.interest_rate)?;
        debt.credit_limit = record.credit_limit;
        debt.minimum_payment = record.minimum_payment;
        Ok(debt)
    }
}

impl Debt {
    /// Create a new debt without a credit limit (installment loan)
    ///
    /// # Arguments
    /// * `name` - Unique identifier
    /// * `balance` - Outstanding balance in cents (must be >= 0)
    /// * `interest_rate` - Annual percentage rate (must be finite and >= 0)
    ///
    /// # Errors
    /// Returns `DebtError` if any field is out of range.
    pub fn new(name: String, balance: i64, interest_rate: f64) -> Result<Self, DebtError> {
        if name.trim().is_empty() {
            return Err(DebtError::EmptyName);
        }
        if balance < 0 {
            return Err(DebtError::NegativeBalance { name, balance });
        }
        if !interest_rate.is_finite() || interest_rate < 0.0 {
            return Err(DebtError::InvalidInterestRate {
                name,
                rate: interest_rate,
            });
        }

        Ok(Self {
            name,
            balance,
            interest_rate,
            credit_limit: None,
            minimum_payment: None,
        })
    }

    /// Attach a credit limit (cents), turning the debt into revolving credit
    /// when the limit is positive
    pub fn with_credit_limit(mut self, credit_limit: i64) -> Self {
        self.credit_limit = Some(credit_limit);
        self
    }

    /// Attach a minimum monthly payment (cents)
    pub fn with_minimum_payment(mut self, minimum_payment: i64) -> Self {
        self.minimum_payment = Some(minimum_payment);
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    pub fn interest_rate(&self) -> f64 {
        self.interest_rate
    }

    /// Credit limit exactly as supplied (may be zero or negative)
    pub fn credit_limit(&self) -> Option<i64> {
        self.credit_limit
    }

    pub fn minimum_payment(&self) -> Option<i64> {
        self.minimum_payment
    }

    /// Positive credit limit, if this debt is revolving credit
    pub fn revolving_limit(&self) -> Option<i64> {
        self.credit_limit.filter(|limit| *limit > 0)
    }

    /// True for credit cards (positive credit limit)
    pub fn is_revolving(&self) -> bool {
        self.revolving_limit().is_some()
    }

    /// Utilization percentage (0.0 for non-revolving debts)
    pub fn utilization(&self) -> f64 {
        utilization(self.balance, self.credit_limit.unwrap_or(0))
    }

    /// Whether utilization is strictly above `threshold_pct`
    ///
    /// Compared in integer arithmetic, so a card sitting exactly on the
    /// threshold is not over it. Always false for non-revolving debts.
    pub fn is_over_threshold(&self, threshold_pct: u32) -> bool {
        match self.revolving_limit() {
            Some(limit) => {
                i128::from(self.balance) * 100 > i128::from(threshold_pct) * i128::from(limit)
            }
            None => false,
        }
    }

    /// Highest balance (cents) that keeps utilization at or below `threshold_pct`
    ///
    /// Rounded down so that paying down to it always clears the threshold.
    /// Returns `None` for non-revolving debts.
    pub fn threshold_balance(&self, threshold_pct: u32) -> Option<i64> {
        self.revolving_limit().map(|limit| {
            let target = i128::from(limit) * i128::from(threshold_pct) / 100;
            i64::try_from(target).unwrap_or(i64::MAX)
        })
    }

    /// Interest accrued over one month at the current balance (cents)
    pub fn monthly_interest(&self) -> i64 {
        interest::monthly_interest(self.balance, self.interest_rate)
    }

    /// Cash flow index: balance divided by the principal part of the
    /// minimum payment. `None` when there is no minimum payment or it does
    /// not cover the monthly interest.
    pub fn cash_flow_index(&self) -> Option<f64> {
        interest::cash_flow_index(
            self.balance,
            self.minimum_payment.unwrap_or(0),
            self.interest_rate,
        )
    }
}

/// Utilization percentage: `balance / credit_limit * 100`
///
/// Defined as 0.0 when `credit_limit <= 0` instead of producing a
/// non-finite value.
pub fn utilization(balance: i64, credit_limit: i64) -> f64 {
    if credit_limit <= 0 {
        return 0.0;
    }
    balance as f64 * 100.0 / credit_limit as f64
}

/// Aggregate figures over the revolving debts of a portfolio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RevolvingTotals {
    /// Number of revolving debts
    pub cards: usize,

    /// Revolving debts carrying a positive balance
    pub cards_with_balance: usize,

    /// Sum of revolving balances (cents)
    pub total_balance: i64,

    /// Sum of revolving credit limits (cents)
    pub total_limit: i64,
}

impl RevolvingTotals {
    pub fn from_debts(debts: &[Debt]) -> Self {
        debts
            .iter()
            .filter_map(|debt| debt.revolving_limit().map(|limit| (debt, limit)))
            .fold(Self::default(), |mut totals, (debt, limit)| {
                totals.cards += 1;
                if debt.balance() > 0 {
                    totals.cards_with_balance += 1;
                }
                totals.total_balance = totals.total_balance.saturating_add(debt.balance());
                totals.total_limit = totals.total_limit.saturating_add(limit);
                totals
            })
    }

    /// Overall utilization across all cards (0.0 when there are none)
    pub fn utilization(&self) -> f64 {
        utilization(self.total_balance, self.total_limit)
    }

    /// Whether aggregate utilization is strictly above `threshold_pct`
    pub fn is_over_threshold(&self, threshold_pct: u32) -> bool {
        self.total_limit > 0
            && i128::from(self.total_balance) * 100
                > i128::from(threshold_pct) * i128::from(self.total_limit)
    }
}

/// Reject portfolios that reuse a debt name
///
/// Allocation results are keyed by name, so names must be unique.
pub fn validate_portfolio(debts: &[Debt]) -> Result<(), DebtError> {
    let mut names = HashSet::new();
    for debt in debts {
        if !names.insert(debt.name()) {
            return Err(DebtError::DuplicateName(debt.name().to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(name: &str, balance: i64, limit: i64) -> Debt {
        Debt::new(name.to_string(), balance, 18.0)
            .unwrap()
            .with_credit_limit(limit)
    }

    #[test]
    fn test_zero_limit_is_not_revolving() {
        let loan = card("Loan", 500_000, 0);
        assert!(!loan.is_revolving());
        assert_eq!(loan.utilization(), 0.0);
        assert!(!loan.is_over_threshold(0));
        assert_eq!(loan.threshold_balance(29), None);
    }

    #[test]
    fn test_negative_limit_is_not_revolving() {
        let loan = card("Loan", 500_000, -100);
        assert!(!loan.is_revolving());
        assert_eq!(loan.credit_limit(), Some(-100));
    }

    #[test]
    fn test_threshold_is_strict() {
        let at = card("At", 89_000, 100_000);
        let above = card("Above", 89_001, 100_000);
        assert!(!at.is_over_threshold(89));
        assert!(above.is_over_threshold(89));
    }

    #[test]
    fn test_threshold_balance_rounds_down() {
        // 89% of $3.33 is 296.37 cents
        let small = card("Small", 333, 333);
        assert_eq!(small.threshold_balance(89), Some(296));
        assert!(!card("Paid", 296, 333).is_over_threshold(89));
    }

    #[test]
    fn test_revolving_totals_skip_loans() {
        let debts = vec![
            card("A", 10_000, 100_000),
            card("B", 0, 50_000),
            Debt::new("Loan".to_string(), 900_000, 6.5).unwrap(),
        ];
        let totals = RevolvingTotals::from_debts(&debts);
        assert_eq!(totals.cards, 2);
        assert_eq!(totals.cards_with_balance, 1);
        assert_eq!(totals.total_balance, 10_000);
        assert_eq!(totals.total_limit, 150_000);
        assert!(!totals.is_over_threshold(10));
    }

    #[test]
    fn test_empty_totals_have_zero_utilization() {
        let totals = RevolvingTotals::from_debts(&[]);
        assert_eq!(totals.utilization(), 0.0);
        assert!(!totals.is_over_threshold(0));
    }
}
