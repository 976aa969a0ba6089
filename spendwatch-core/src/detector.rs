//! Outlier detector: flags expenses that are unusually large compared to
//! recent entries in the same category.
//!
//! Each windowed expense is scored against its window-mates with a robust
//! z-score (median / MAD). When the history is flat and the MAD collapses
//! to zero, a plain amount-to-median ratio is used instead.

use chrono::{Days, NaiveDate};
use chrono_tz::Tz;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::config::DetectionConfig;
use crate::expense::Expense;
use crate::stats::{median, robust_sigma, round2};
use crate::suggestions::suggest;
use crate::time::today_in;

/// Most results returned from one pass
pub const MAX_RESULTS: usize = 8;

/// On the z-score path the amount must also clear `median * MIN_MEDIAN_MULTIPLE`
pub const MIN_MEDIAN_MULTIPLE: f64 = 1.25;

/// Ratio that flags an expense when the history has no spread
pub const FLAT_HISTORY_RATIO: f64 = 2.75;

/// A flagged expense with the numbers that explain it
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnomalyResult<'a> {
    pub expense: &'a Expense,
    pub category_median: f64,
    pub category_count: usize,
    pub z_score: Option<f64>,
    pub ratio: Option<f64>,
    pub suggestions: Vec<&'static str>,
}

impl AnomalyResult<'_> {
    /// Short "z=…" / "×…" tag for inline display
    pub fn score_label(&self) -> String {
        match (self.z_score, self.ratio) {
            (Some(z), _) => format!("z={z}"),
            (None, Some(r)) => format!("×{r}"),
            (None, None) => "Unusual".to_string(),
        }
    }
}

/// Run the detector with "today" taken from the clock in `tz`
pub fn detect<'a>(expenses: &'a [Expense], config: &DetectionConfig, tz: Tz) -> Vec<AnomalyResult<'a>> {
    detect_at(expenses, config, today_in(tz))
}

/// Run the detector against a fixed calendar date
pub fn detect_at<'a>(
    expenses: &'a [Expense],
    config: &DetectionConfig,
    today: NaiveDate,
) -> Vec<AnomalyResult<'a>> {
    if expenses.is_empty() {
        return Vec::new();
    }

    let cutoff = today
        .checked_sub_days(Days::new(u64::from(config.window_days)))
        .unwrap_or(NaiveDate::MIN);
    let window: Vec<&Expense> = expenses
        .iter()
        .filter(|e| matches!(e.parsed_date(), Some(d) if d >= cutoff))
        .collect();

    tracing::debug!(
        total = expenses.len(),
        windowed = window.len(),
        %cutoff,
        "anomaly window"
    );

    // category -> positions in `window`
    let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (pos, e) in window.iter().enumerate() {
        groups.entry(e.category_key()).or_default().push(pos);
    }

    let mut results = Vec::new();

    for (pos, &expense) in window.iter().enumerate() {
        let members = &groups[expense.category_key()];
        let history_len = members.len() - 1;
        if history_len < config.min_history {
            continue;
        }

        let amounts: Vec<f64> = members
            .iter()
            .filter(|&&other| other != pos)
            .map(|&other| window[other].amount)
            .filter(|a| a.is_finite() && *a > 0.0)
            .collect();
        if amounts.len() < config.min_history {
            continue;
        }

        if !expense.has_valid_amount() {
            tracing::debug!(id = %expense.id, amount = expense.amount, "skipping invalid amount");
            continue;
        }

        if let Some(result) = score(expense, &amounts, config) {
            results.push(result);
        }
    }

    results.sort_by(|a, b| {
        let az = a.z_score.unwrap_or(0.0);
        let bz = b.z_score.unwrap_or(0.0);
        bz.total_cmp(&az)
            .then_with(|| b.expense.amount.total_cmp(&a.expense.amount))
    });
    results.truncate(MAX_RESULTS);
    results
}

fn score<'a>(expense: &'a Expense, amounts: &[f64], config: &DetectionConfig) -> Option<AnomalyResult<'a>> {
    let amount = expense.amount;
    let med = median(amounts);
    let sigma = robust_sigma(amounts, med);

    let z_score = (sigma > 0.0).then(|| (amount - med) / sigma);
    let ratio = (med > 0.0).then(|| amount / med);

    let flagged = match (z_score, ratio) {
        (Some(z), _) => z >= config.sensitivity && amount >= med * MIN_MEDIAN_MULTIPLE,
        (None, Some(r)) => r >= FLAT_HISTORY_RATIO,
        (None, None) => false,
    };
    if !flagged {
        return None;
    }

    Some(AnomalyResult {
        expense,
        category_median: med,
        category_count: amounts.len(),
        z_score: z_score.map(round2),
        ratio: ratio.map(round2),
        suggestions: suggest(expense, med, z_score.unwrap_or(0.0)),
    })
}

/// Lookup from expense id to its result, for inline flagging
pub fn index_by_expense_id<'r, 'a>(results: &'r [AnomalyResult<'a>]) -> HashMap<&'a str, &'r AnomalyResult<'a>> {
    results
        .iter()
        .map(|r| {
            let expense: &'a Expense = r.expense;
            (expense.id.as_str(), r)
        })
        .collect()
}
