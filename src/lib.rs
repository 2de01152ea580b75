// Home Expense Tracker - Core Library
// Exposes the store, validation, persistence and summaries for the CLI and tests

pub mod error;
pub mod record;
pub mod validation;
pub mod store;
pub mod persistence;
pub mod aggregate;
pub mod report;
pub mod charts;
pub mod config;
pub mod shell;

// Terminal chart front end (ratatui + crossterm)
#[cfg(feature = "tui")]
pub mod ui;

// Re-export commonly used types
pub use error::{ExpenseError, Result};
pub use record::{Expense, DATE_FORMAT};
pub use validation::{parse_amount, parse_date, validate_date, validate_expense};
pub use store::ExpenseStore;
pub use persistence::{load, load_into, save};
pub use aggregate::{by_category, total, CategoryTotal, Summary};
pub use charts::{ChartKind, ChartSurface, UnavailableCharts};
pub use crate::config::AppConfig;
pub use shell::{MenuChoice, Shell, INTERRUPTED_FAREWELL};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
