//! Domain models for the debt waterfall engine

pub mod debt;

// Re-exports
pub use debt::{utilization, validate_portfolio, Debt, DebtError, RevolvingTotals};
