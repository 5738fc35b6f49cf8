//! Python bindings
//!
//! Exposes the two engine entry points to Python. Money crosses the
//! boundary as integer cents.

pub mod types;

use pyo3::prelude::*;
use pyo3::types::PyDict;
use std::collections::HashMap;

use types::parse_debts;

/// Detect the waterfall phase and return its label
#[pyfunction]
pub fn classify_phase(debts: Vec<&PyDict>) -> PyResult<String> {
    let debts = parse_debts(debts)?;
    Ok(crate::classify_phase(&debts).label())
}

/// Allocate `available_extra` cents and return `{debt name: cents}`
#[pyfunction]
pub fn allocate_payment(debts: Vec<&PyDict>, available_extra: i64) -> PyResult<HashMap<String, i64>> {
    let debts = parse_debts(debts)?;
    let result = crate::allocate_payment(&debts, available_extra);
    Ok(result
        .iter()
        .map(|a| (a.name.clone(), a.amount))
        .collect())
}
