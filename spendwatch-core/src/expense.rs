//! Expense record types shared by the store, importer and detector

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::time::parse_expense_date;

/// Group label used when an expense carries no category
pub const UNCATEGORIZED: &str = "Uncategorized";

/// A single recorded expense
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    /// Opaque identifier, stable for the record's lifetime
    pub id: String,
    /// Amount in currency units (expected positive)
    pub amount: f64,
    /// Free-form category label
    #[serde(default)]
    pub category: String,
    /// Optional note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Date the expense is attributed to, as supplied by the store
    pub date: String,
    /// When the record was created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,
}

impl Expense {
    /// Create a new Expense
    pub fn new(
        id: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            amount,
            category: category.into(),
            description: None,
            date: date.into(),
            recorded_at: None,
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Category used for grouping; blank labels collapse to [`UNCATEGORIZED`]
    pub fn category_key(&self) -> &str {
        let trimmed = self.category.trim();
        if trimmed.is_empty() {
            UNCATEGORIZED
        } else {
            trimmed
        }
    }

    /// Description text or an empty string
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Parsed calendar date, if the stored value is readable
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_expense_date(&self.date)
    }

    /// Returns true if the amount can take part in statistical comparison
    pub fn has_valid_amount(&self) -> bool {
        self.amount.is_finite() && self.amount > 0.0
    }
}
