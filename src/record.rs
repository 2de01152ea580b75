use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Calendar format for expense dates, both at the prompt and on disk.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single admitted expense.
///
/// Records are only built by the validator (or decoded from a file and then
/// checked by it), so `amount > 0` and a real calendar `date` always hold.
/// There are no setters: a record never changes once it is in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Expense {
    #[serde(with = "calendar_date")]
    date: NaiveDate,
    category: String,
    amount: f64,
    description: String,
}

impl Expense {
    pub(crate) fn new(
        date: NaiveDate,
        category: impl Into<String>,
        amount: f64,
        description: impl Into<String>,
    ) -> Self {
        Expense {
            date,
            category: category.into(),
            amount,
            description: description.into(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

// Dates travel as "YYYY-MM-DD" strings; anything else is rejected while decoding.
mod calendar_date {
    use super::DATE_FORMAT;
    use crate::validation::parse_date;
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(DATE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_date(&text).ok_or_else(|| {
            de::Error::custom(format!("invalid date '{}', expected YYYY-MM-DD", text))
        })
    }
}
