//! Type conversion utilities for FFI boundary
//!
//! Converts Python dicts into validated [`Debt`] values.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::models::Debt;

// ========================================================================
// PyDict Extraction Helpers
// ========================================================================

/// Extract a required field from a Python dict with clear error messages.
///
/// # Errors
/// Returns PyValueError if the field is missing or has the wrong type
fn extract_required<'py, T>(dict: &'py PyDict, key: &str) -> PyResult<T>
where
    T: FromPyObject<'py>,
{
    dict.get_item(key)?
        .ok_or_else(|| PyValueError::new_err(format!("Missing required field '{}'", key)))?
        .extract()
}

/// Extract an optional field from a Python dict.
///
/// Missing keys and explicit `None` both yield `Ok(None)`.
fn extract_optional<'py, T>(dict: &'py PyDict, key: &str) -> PyResult<Option<T>>
where
    T: FromPyObject<'py>,
{
    match dict.get_item(key)? {
        Some(value) if !value.is_none() => Ok(Some(value.extract()?)),
        _ => Ok(None),
    }
}

// ========================================================================
// Debt Parsing
// ========================================================================

/// Convert a Python dict to a [`Debt`]
///
/// Expected keys: `name`, `balance` (cents), `interest_rate` (percent),
/// and optionally `credit_limit` / `minimum_payment` (cents).
pub fn parse_debt(py_debt: &PyDict) -> PyResult<Debt> {
    let name: String = extract_required(py_debt, "name")?;
    let balance: i64 = extract_required(py_debt, "balance")?;
    let interest_rate: f64 = extract_required(py_debt, "interest_rate")?;

    let mut debt = Debt::new(name, balance, interest_rate)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    if let Some(limit) = extract_optional::<i64>(py_debt, "credit_limit")? {
        debt = debt.with_credit_limit(limit);
    }
    if let Some(minimum) = extract_optional::<i64>(py_debt, "minimum_payment")? {
        debt = debt.with_minimum_payment(minimum);
    }

    Ok(debt)
}

/// Convert a list of Python dicts to debts, rejecting duplicate names
pub fn parse_debts(py_debts: Vec<&PyDict>) -> PyResult<Vec<Debt>> {
    let debts = py_debts
        .into_iter()
        .map(parse_debt)
        .collect::<PyResult<Vec<Debt>>>()?;

    crate::models::validate_portfolio(&debts).map_err(|e| PyValueError::new_err(e.to_string()))?;
    Ok(debts)
}
