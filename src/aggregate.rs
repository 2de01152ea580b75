// Aggregator - totals and per-category sums
// Pure functions over a record snapshot; an empty snapshot is an error, never zero

use crate::error::{ExpenseError, Result};
use crate::record::Expense;
use std::collections::BTreeMap;

/// Sum of every amount.
pub fn total(records: &[Expense]) -> Result<f64> {
    if records.is_empty() {
        return Err(ExpenseError::EmptyDataset);
    }

    Ok(records.iter().map(Expense::amount).sum())
}

/// Sum of amounts per category label. Only categories present in
/// `records` appear; keys come back sorted by label.
pub fn by_category(records: &[Expense]) -> Result<BTreeMap<String, f64>> {
    if records.is_empty() {
        return Err(ExpenseError::EmptyDataset);
    }

    let mut sums: BTreeMap<String, f64> = BTreeMap::new();
    for expense in records {
        *sums.entry(expense.category().to_string()).or_insert(0.0) += expense.amount();
    }

    Ok(sums)
}

// ============================================================================
// SUMMARY (input to every presentation)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total: f64,
    pub categories: Vec<CategoryTotal>,
}

impl Summary {
    pub fn from_records(records: &[Expense]) -> Result<Self> {
        let total = total(records)?;
        let categories = by_category(records)?
            .into_iter()
            .map(|(category, amount)| CategoryTotal { category, amount })
            .collect();

        Ok(Summary { total, categories })
    }

    /// Fraction of the total spent in `entry`'s category, in `0.0..=1.0`.
    pub fn share(&self, entry: &CategoryTotal) -> f64 {
        if self.total > 0.0 {
            entry.amount / self.total
        } else {
            0.0
        }
    }

    pub fn largest(&self) -> Option<&CategoryTotal> {
        self.categories
            .iter()
            .max_by(|a, b| a.amount.total_cmp(&b.amount))
    }
}
