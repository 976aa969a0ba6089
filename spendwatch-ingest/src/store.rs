//! Flat-file expense store: a JSON array of expenses, newest first.

use anyhow::{Context, Result};
use chrono::Utc;
use spendwatch_core::Expense;
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::NewExpense;

#[derive(Debug)]
pub struct ExpenseStore {
    path: PathBuf,
    expenses: Vec<Expense>,
}

impl ExpenseStore {
    /// Load the store at `path`; a missing file is an empty store
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let expenses = if path.exists() {
            let s = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
            if s.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))?
            }
        } else {
            Vec::new()
        };
        tracing::debug!(path = %path.display(), count = expenses.len(), "opened expense store");
        Ok(Self { path, expenses })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshot in store order (newest first)
    pub fn list(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Validate, assign an id, prepend and persist
    pub fn add(&mut self, entry: NewExpense) -> Result<Expense> {
        entry.validate()?;

        let now = Utc::now();
        let id = self.unique_id(now.timestamp_millis());
        let description = entry
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        let expense = Expense {
            id,
            amount: entry.amount,
            category: entry.category.trim().to_string(),
            description,
            date: entry.date.trim().to_string(),
            recorded_at: Some(now),
        };

        self.expenses.insert(0, expense.clone());
        self.save()?;
        Ok(expense)
    }

    /// Remove by id; returns false when nothing matched
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let before = self.expenses.len();
        self.expenses.retain(|e| e.id != id);
        let removed = self.expenses.len() != before;
        if removed {
            self.save()?;
        }
        Ok(removed)
    }

    /// Drop every expense
    pub fn clear(&mut self) -> Result<()> {
        self.expenses.clear();
        if self.path.exists() {
            fs::remove_file(&self.path).with_context(|| format!("remove {}", self.path.display()))?;
        }
        Ok(())
    }

    /// Merge imported records ahead of the existing ones, skipping ids
    /// already present. Returns how many were added.
    pub fn import(&mut self, incoming: Vec<Expense>) -> Result<usize> {
        let mut fresh: Vec<Expense> = Vec::new();
        for e in incoming {
            if self.expenses.iter().chain(fresh.iter()).any(|x| x.id == e.id) {
                tracing::warn!(id = %e.id, "skipping duplicate expense id on import");
                continue;
            }
            fresh.push(e);
        }

        let added = fresh.len();
        if added > 0 {
            fresh.append(&mut self.expenses);
            self.expenses = fresh;
            self.save()?;
        }
        Ok(added)
    }

    fn unique_id(&self, millis: i64) -> String {
        let mut n = millis;
        loop {
            let id = format!("exp-{n}");
            if !self.expenses.iter().any(|e| e.id == id) {
                return id;
            }
            n += 1;
        }
    }

    fn save(&self) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(&self.expenses).context("serialize expenses")?;
        fs::write(&self.path, json).with_context(|| format!("write {}", self.path.display()))?;
        Ok(())
    }
}
