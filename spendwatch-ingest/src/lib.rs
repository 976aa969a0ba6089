//! spendwatch-ingest: the expense store and import parsers that feed the detector.

pub mod parsers;
pub mod store;
pub mod types;

pub use parsers::{parse_expense_csv, parse_expense_csv_str};
pub use store::ExpenseStore;
pub use types::NewExpense;
