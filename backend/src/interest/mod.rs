//! Interest and amortization helpers
//!
//! Month-granular calculations supporting the waterfall engine:
//! - Monthly interest accrual at an annual percentage rate
//! - Applying one monthly payment (interest first, then principal)
//! - Multi-month amortization schedules
//! - Cash flow index (CFI) for ranking payoff candidates
//!
//! Interest is rounded to the nearest cent once per month, so schedules stay
//! in exact integer money.
//!
//! CRITICAL: All money values are i64 (cents)

use serde::{Deserialize, Serialize};

/// Interest accrued in one month: `balance * rate / 100 / 12`, rounded to the cent
///
/// # Example
/// ```
/// use debt_waterfall_core_rs::interest::monthly_interest;
///
/// // $5,000 at 18% APR accrues $75.00
/// assert_eq!(monthly_interest(500_000, 18.0), 7_500);
/// ```
pub fn monthly_interest(balance: i64, annual_rate_pct: f64) -> i64 {
    (balance as f64 * (annual_rate_pct / 100.0 / 12.0)).round() as i64
}

/// Result of applying a single monthly payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentBreakdown {
    /// Interest accrued this month
    pub interest: i64,

    /// Portion of the payment that reduced the balance
    ///
    /// Negative when the payment does not cover interest (negative amortization).
    pub principal: i64,

    /// Balance after the payment, never below zero
    pub new_balance: i64,

    /// `interest + principal`; less than the offered payment on the final month
    pub actual_payment: i64,
}

/// Apply one month of interest and a payment to a balance
///
/// Interest is charged first; the rest of the payment goes to principal,
/// capped at the outstanding balance.
pub fn apply_monthly_payment(balance: i64, annual_rate_pct: f64, payment: i64) -> PaymentBreakdown {
    let interest = monthly_interest(balance, annual_rate_pct);
    let principal = (payment - interest).min(balance);
    let new_balance = (balance - principal).max(0);

    PaymentBreakdown {
        interest,
        principal,
        new_balance,
        actual_payment: interest + principal,
    }
}

/// Cash flow index: `balance / (minimum_payment - monthly_interest)`
///
/// Returns `None` (an infinite index) when the minimum payment is zero or
/// negative, or when it does not cover the monthly interest.
pub fn cash_flow_index(balance: i64, minimum_payment: i64, annual_rate_pct: f64) -> Option<f64> {
    if minimum_payment <= 0 {
        return None;
    }
    let principal = minimum_payment as f64 - balance as f64 * (annual_rate_pct / 100.0 / 12.0);
    if principal <= 0.0 {
        return None;
    }
    Some(balance as f64 / principal)
}

/// One month of an amortization schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// 1-based month number
    pub month: u32,
    pub starting_balance: i64,
    pub interest: i64,
    pub principal: i64,
    pub ending_balance: i64,
}

/// Month-by-month payoff of a single balance at a fixed payment
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub rows: Vec<ScheduleRow>,
    pub total_interest: i64,
    pub total_principal: i64,
    pub final_balance: i64,
    /// True when the balance reached zero within the simulated months
    pub paid_off: bool,
}

impl AmortizationSchedule {
    /// Number of months simulated
    pub fn months(&self) -> usize {
        self.rows.len()
    }
}

/// Simulate paying `payment` every month for at most `max_months`
///
/// Stops early once the balance reaches zero.
///
/// # Example
/// ```
/// use debt_waterfall_core_rs::interest::amortize;
///
/// // $2,000 at 12% APR, paying $100/month for three months
/// let schedule = amortize(200_000, 12.0, 10_000, 3);
/// assert_eq!(schedule.total_interest, 5_759);
/// assert_eq!(schedule.final_balance, 175_759);
/// ```
pub fn amortize(balance: i64, annual_rate_pct: f64, payment: i64, max_months: u32) -> AmortizationSchedule {
    let mut schedule = AmortizationSchedule {
        final_balance: balance,
        paid_off: balance <= 0,
        ..Default::default()
    };

    let mut current = balance;
    for month in 1..=max_months {
        if current <= 0 {
            break;
        }
        let step = apply_monthly_payment(current, annual_rate_pct, payment);
        schedule.rows.push(ScheduleRow {
            month,
            starting_balance: current,
            interest: step.interest,
            principal: step.principal,
            ending_balance: step.new_balance,
        });
        schedule.total_interest += step.interest;
        schedule.total_principal += step.principal;
        current = step.new_balance;
    }

    schedule.final_balance = current;
    schedule.paid_off = current <= 0;
    schedule
}
