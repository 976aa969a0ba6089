//! Aggregate views over an expense list: totals, monthly spend and the
//! per-category breakdown.

use chrono::Datelike;

use crate::expense::Expense;

/// Stock categories offered when recording an expense
pub const DEFAULT_CATEGORIES: [&str; 10] = [
    "Groceries & Provisions",
    "Rent/Housing",
    "Food & Tiffin",
    "Electricity & Water",
    "Mobile & Internet",
    "Education & Tuition",
    "Healthcare & Medicine",
    "Transport & Petrol",
    "Entertainment & Movies",
    "Festivals & Functions",
];

/// True if `name` is one of [`DEFAULT_CATEGORIES`]
pub fn is_default_category(name: &str) -> bool {
    DEFAULT_CATEGORIES.contains(&name.trim())
}

/// Sum of all finite amounts
pub fn total(expenses: &[Expense]) -> f64 {
    expenses
        .iter()
        .map(|e| e.amount)
        .filter(|a| a.is_finite())
        .sum()
}

/// Spend whose date falls in the given calendar month
pub fn month_total(expenses: &[Expense], year: i32, month: u32) -> f64 {
    expenses
        .iter()
        .filter(|e| {
            e.parsed_date()
                .is_some_and(|d| d.year() == year && d.month() == month)
        })
        .map(|e| e.amount)
        .filter(|a| a.is_finite())
        .sum()
}

/// Spend per category, largest first (ties by name)
pub fn category_totals(expenses: &[Expense]) -> Vec<(String, f64)> {
    let mut totals: Vec<(String, f64)> = Vec::new();
    for e in expenses.iter().filter(|e| e.amount.is_finite()) {
        let key = e.category_key();
        match totals.iter_mut().find(|(name, _)| name == key) {
            Some((_, sum)) => *sum += e.amount,
            None => totals.push((key.to_string(), e.amount)),
        }
    }
    totals.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    totals
}

/// Expenses in `category`, or all of them when `None`
pub fn filter_by_category<'a>(expenses: &'a [Expense], category: Option<&str>) -> Vec<&'a Expense> {
    match category {
        None => expenses.iter().collect(),
        Some(c) => {
            let c = c.trim();
            expenses.iter().filter(|e| e.category_key() == c).collect()
        }
    }
}

/// Render an amount as rupees with en-IN digit grouping, e.g. `₹1,23,456.5`
pub fn format_inr(amount: f64) -> String {
    if !amount.is_finite() {
        return "₹0".to_string();
    }

    let rounded = (amount.abs() * 100.0).round() / 100.0;
    let whole = rounded.trunc() as u64;
    let frac = ((rounded - rounded.trunc()) * 100.0).round() as u64;

    let digits = whole.to_string();
    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut parts: Vec<&str> = Vec::new();
        let mut rest = head;
        while rest.len() > 2 {
            let (left, right) = rest.split_at(rest.len() - 2);
            parts.push(right);
            rest = left;
        }
        parts.push(rest);
        parts.reverse();
        format!("{},{}", parts.join(","), tail)
    };

    let sign = if amount < 0.0 && rounded > 0.0 { "-" } else { "" };
    match frac {
        0 => format!("{sign}₹{grouped}"),
        f if f % 10 == 0 => format!("{sign}₹{grouped}.{}", f / 10),
        f => format!("{sign}₹{grouped}.{f:02}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Expense> {
        vec![
            Expense::new("1", 1200.0, "Rent/Housing", "2026-02-01"),
            Expense::new("2", 250.0, "Food & Tiffin", "2026-02-14"),
            Expense::new("3", 150.0, "Food & Tiffin", "2026-01-30"),
            Expense::new("4", 80.0, "", "2026-02-03"),
            Expense::new("5", 40.0, "Food & Tiffin", "garbled"),
        ]
    }

    #[test]
    fn test_totals() {
        let e = sample();
        assert_eq!(total(&e), 1720.0);
        assert_eq!(month_total(&e, 2026, 2), 1530.0);
        assert_eq!(month_total(&e, 2026, 1), 150.0);
        assert_eq!(month_total(&e, 2025, 12), 0.0);
    }

    #[test]
    fn test_category_totals_sorted() {
        let totals = category_totals(&sample());
        assert_eq!(
            totals,
            vec![
                ("Rent/Housing".to_string(), 1200.0),
                ("Food & Tiffin".to_string(), 440.0),
                ("Uncategorized".to_string(), 80.0),
            ]
        );
    }

    #[test]
    fn test_filter_by_category() {
        let e = sample();
        assert_eq!(filter_by_category(&e, None).len(), 5);
        assert_eq!(filter_by_category(&e, Some("Food & Tiffin")).len(), 3);
        assert_eq!(filter_by_category(&e, Some("Uncategorized")).len(), 1);
    }

    #[test]
    fn test_default_categories() {
        assert!(is_default_category("Food & Tiffin"));
        assert!(!is_default_category("Crypto"));
    }

    #[test]
    fn test_format_inr() {
        assert_eq!(format_inr(0.0), "₹0");
        assert_eq!(format_inr(999.0), "₹999");
        assert_eq!(format_inr(1000.0), "₹1,000");
        assert_eq!(format_inr(123456.5), "₹1,23,456.5");
        assert_eq!(format_inr(12345678.25), "₹1,23,45,678.25");
        assert_eq!(format_inr(202.5), "₹202.5");
        assert_eq!(format_inr(-1500.0), "-₹1,500");
    }
}
