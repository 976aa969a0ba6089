use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use spendwatch_core::parse_expense_date;

pub const MAX_CATEGORY_LEN: usize = 120;
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// An expense as entered by the user, before the store assigns an id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    pub amount: f64,
    pub category: String,
    pub description: Option<String>,
    /// Calendar date, any form `parse_expense_date` accepts
    pub date: String,
}

impl NewExpense {
    /// Reject entries the store should never persist
    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            bail!("amount must be a positive number, got {}", self.amount);
        }

        let category = self.category.trim();
        if category.is_empty() {
            bail!("category is required");
        }
        if category.chars().count() > MAX_CATEGORY_LEN {
            bail!("category is longer than {MAX_CATEGORY_LEN} characters");
        }

        if let Some(desc) = &self.description {
            if desc.chars().count() > MAX_DESCRIPTION_LEN {
                bail!("description is longer than {MAX_DESCRIPTION_LEN} characters");
            }
        }

        if parse_expense_date(&self.date).is_none() {
            bail!("invalid date: '{}'", self.date);
        }

        Ok(())
    }
}
