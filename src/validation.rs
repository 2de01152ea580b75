// Validator - admits raw prompt input as expense records
// Checks the date shape and amount sign before anything touches the store

use crate::error::{ExpenseError, Result};
use crate::record::{Expense, DATE_FORMAT};
use chrono::NaiveDate;

// ============================================================================
// FIELD CHECKS
// ============================================================================

/// Parse a `YYYY-MM-DD` date: four-digit year, two-digit month and day,
/// naming a real calendar day.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let bytes = text.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }

    let digits_only = bytes
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != 4 && *i != 7)
        .all(|(_, b)| b.is_ascii_digit());
    if !digits_only {
        return None;
    }

    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
}

pub fn validate_date(text: &str) -> Result<NaiveDate> {
    parse_date(text).ok_or_else(|| ExpenseError::InvalidDate(text.to_string()))
}

/// Parse an amount, accepting `,` as the decimal separator.
/// The result is always finite and strictly positive.
pub fn parse_amount(text: &str) -> Result<f64> {
    let normalized = text.replace(',', ".");

    match normalized.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
        _ => Err(ExpenseError::InvalidAmount(text.to_string())),
    }
}

// ============================================================================
// RECORD CHECKS
// ============================================================================

/// Build a record from raw prompt answers.
///
/// Category and description are free text; trimming is the caller's job.
/// On failure no record exists at all.
pub fn validate_expense(
    date: &str,
    category: &str,
    amount: &str,
    description: &str,
) -> Result<Expense> {
    let date = validate_date(date)?;
    let amount = parse_amount(amount)?;

    Ok(Expense::new(date, category, amount, description))
}

/// Check a record decoded from disk. The date was already checked while
/// decoding, so only the amount can still be out of range.
pub fn validate_record(expense: &Expense) -> std::result::Result<(), String> {
    let amount = expense.amount();
    if !amount.is_finite() || amount <= 0.0 {
        return Err(format!("amount {} must be greater than 0", amount));
    }
    Ok(())
}
