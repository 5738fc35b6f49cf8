//! Waterfall Payment Module
//!
//! Phase detection and extra-payment allocation.
//!
//! # Overview
//!
//! A portfolio of credit cards and loans is first placed on a five-phase
//! improvement ladder by the [`phase`] classifier, based purely on
//! utilization. The [`allocator`] then distributes a fixed extra-payment
//! budget with the strategy that phase selects, falling back to avalanche
//! (highest interest rate first) for whatever is left.
//!
//! | Phase                          | Strategy                          |
//! |--------------------------------|-----------------------------------|
//! | 1-3: per-card rungs (89/49/29) | threshold targeting, then avalanche |
//! | 4: Premium Qualification (10)  | largest revolving balance first   |
//! | 5: AZEO Optimization           | zero every card but the smallest  |
//! | Complete / No Credit Cards     | avalanche                         |
//!
//! Both steps are pure functions: nothing is cached between calls, and the
//! same inputs always produce the same allocation.
//!
//! # Example Usage
//!
//! ```rust
//! use debt_waterfall_core_rs::waterfall::{allocate, classify_phase};
//! use debt_waterfall_core_rs::Debt;
//!
//! let debts = vec![
//!     Debt::new("Card A".to_string(), 10_000, 18.0).unwrap().with_credit_limit(500_000),
//!     Debt::new("Card B".to_string(), 5_000, 20.0).unwrap().with_credit_limit(300_000),
//!     Debt::new("Card C".to_string(), 2_500, 15.0).unwrap().with_credit_limit(200_000),
//! ];
//!
//! let phase = classify_phase(&debts);
//! assert!(phase.is_azeo_mode());
//!
//! let result = allocate(&debts, 20_000, &phase);
//! assert_eq!(result.amount_for("Card C"), 0);
//! assert_eq!(result.unallocated(), 5_000);
//! ```

pub mod allocator;
pub mod config;
pub mod phase;

pub use allocator::{
    allocate, allocate_payment, allocate_payment_with, Allocation, AllocationResult,
};
pub use config::{ConfigError, LadderRung, WaterfallConfig, DEFAULT_LADDER, DEFAULT_OVERALL_THRESHOLD_PCT};
pub use phase::{classify_phase, classify_phase_with, Phase, Strategy};
