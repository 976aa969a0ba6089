//! Import parsers for expense exports.

pub mod expense_csv;

pub use expense_csv::{parse_expense_csv, parse_expense_csv_str};
