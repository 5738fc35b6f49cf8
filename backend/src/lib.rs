//! Debt Waterfall Core - Rust Engine
//!
//! Extra-payment allocation across credit cards and loans using a
//! multi-phase waterfall: utilization-threshold targeting blended with
//! avalanche (highest interest rate first) payoff.
//!
//! # Architecture
//!
//! - **models**: Domain types (Debt, RevolvingTotals)
//! - **waterfall**: Phase classifier, allocator and ladder configuration
//! - **interest**: Monthly interest, amortization and cash flow index
//!
//! # Critical Invariants
//!
//! 1. All money values are i64 (cents)
//! 2. Every computation is pure (no shared state between calls)
//! 3. FFI boundary is minimal and safe

// Module declarations
pub mod interest;
pub mod models;
pub mod waterfall;

// Re-exports for convenience
pub use models::{utilization, validate_portfolio, Debt, DebtError, RevolvingTotals};
pub use waterfall::{
    allocate, allocate_payment, allocate_payment_with, classify_phase, classify_phase_with,
    Allocation, AllocationResult, ConfigError, LadderRung, Phase, Strategy, WaterfallConfig,
};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn debt_waterfall_core_rs(_py: Python<'_>, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(ffi::classify_phase, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::allocate_payment, m)?)?;
    Ok(())
}
