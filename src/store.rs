use crate::error::Result;
use crate::record::Expense;
use crate::validation::validate_expense;

/// Insertion-ordered expenses for one session.
///
/// Owned by the shell; there is exactly one per session and nothing else
/// holds a reference to it between operations. Duplicates are allowed.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExpenseStore {
    records: Vec<Expense>,
}

impl ExpenseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, expense: Expense) {
        self.records.push(expense);
    }

    /// Validate raw prompt answers and append the resulting record.
    /// Nothing is stored when validation fails.
    pub fn add(
        &mut self,
        date: &str,
        category: &str,
        amount: &str,
        description: &str,
    ) -> Result<&Expense> {
        let expense = validate_expense(date, category, amount, description)?;
        tracing::debug!(
            date = %expense.date(),
            category = expense.category(),
            amount = expense.amount(),
            "expense admitted"
        );
        self.append(expense);
        Ok(&self.records[self.records.len() - 1])
    }

    /// Discard the current contents and take `records` instead.
    pub fn replace_all(&mut self, records: Vec<Expense>) {
        self.records = records;
    }

    pub fn snapshot(&self) -> &[Expense] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
