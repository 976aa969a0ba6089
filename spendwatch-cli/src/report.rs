//! Plain-text rendering for the list, summary and anomaly views.

use std::collections::HashMap;
use std::fmt::Write;

use chrono::NaiveDate;
use spendwatch_core::{category_totals, format_inr, month_total, total, AnomalyResult, Expense, DetectionConfig};

fn display_date(e: &Expense) -> String {
    e.parsed_date()
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| e.date.clone())
}

fn title(e: &Expense) -> &str {
    match e.description_text() {
        "" => "No description",
        d => d,
    }
}

pub fn render_list(expenses: &[&Expense], flagged: &HashMap<&str, &AnomalyResult<'_>>) -> String {
    if expenses.is_empty() {
        return "No expenses yet! Add one with `spendwatch add`.\n".to_string();
    }

    let mut out = String::new();
    for e in expenses {
        let marker = if flagged.contains_key(e.id.as_str()) { "!" } else { " " };
        let _ = writeln!(
            out,
            "{marker} {:<16} {:<10} {:<24} {:>12}  {}",
            e.id,
            display_date(e),
            e.category_key(),
            format_inr(e.amount),
            title(e)
        );
        if let Some(a) = flagged.get(e.id.as_str()) {
            let _ = writeln!(
                out,
                "    Typical {} • {}",
                format_inr(a.category_median),
                a.score_label()
            );
        }
    }
    out
}

pub fn render_summary(expenses: &[Expense], today: NaiveDate) -> String {
    use chrono::Datelike;

    let mut out = String::new();
    let _ = writeln!(out, "Total expenses: {}", format_inr(total(expenses)));
    let _ = writeln!(
        out,
        "This month:     {}",
        format_inr(month_total(expenses, today.year(), today.month()))
    );

    let totals = category_totals(expenses);
    if !totals.is_empty() {
        let _ = writeln!(out, "\nCategory breakdown");
        for (cat, sum) in totals {
            let _ = writeln!(out, "  {:<28} {:>14}", cat, format_inr(sum));
        }
    }
    out
}

pub fn render_anomalies(results: &[AnomalyResult<'_>], cfg: &DetectionConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Anomaly insights (window {} days, sensitivity {:.1}, min history {})\n",
        cfg.window_days, cfg.sensitivity, cfg.min_history
    );

    if results.is_empty() {
        let _ = writeln!(out, "No anomalies detected.");
        let _ = writeln!(out, "Add more data or lower sensitivity to see alerts.");
        return out;
    }

    for (i, r) in results.iter().enumerate() {
        let e = r.expense;
        let _ = writeln!(out, "{}. {}  {}", i + 1, title(e), format_inr(e.amount));
        let _ = writeln!(out, "   {} • {}", e.category_key(), display_date(e));
        let _ = writeln!(
            out,
            "   Typical: {} (n={}) • This: {} • {}",
            format_inr(r.category_median),
            r.category_count,
            format_inr(e.amount),
            r.score_label()
        );
        for s in &r.suggestions {
            let _ = writeln!(out, "   - {s}");
        }
        let _ = writeln!(out);
    }
    out
}
