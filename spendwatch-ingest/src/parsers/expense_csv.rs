//! Parse expense exports (CSV) into store records.
//!
//! Expected header (any order, case-insensitive):
//! Date,Amount,Category,Description[,Id]
//!
//! Amount cells may carry a currency marker (`₹`, `Rs.`, `INR`) and
//! thousands separators in either Indian or western grouping.

use anyhow::{bail, Context, Result};
use regex::Regex;
use spendwatch_core::Expense;
use std::path::Path;

struct Columns {
    date: usize,
    amount: usize,
    category: Option<usize>,
    description: Option<usize>,
    id: Option<usize>,
}

impl Columns {
    fn from_header(header: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| {
            header
                .iter()
                .position(|h| h.trim().trim_start_matches('\u{feff}').eq_ignore_ascii_case(name))
        };
        let Some(date) = find("date") else {
            bail!("missing 'Date' column");
        };
        let Some(amount) = find("amount") else {
            bail!("missing 'Amount' column");
        };
        Ok(Self {
            date,
            amount,
            category: find("category"),
            description: find("description"),
            id: find("id"),
        })
    }
}

fn cell(record: &csv::StringRecord, idx: Option<usize>) -> &str {
    idx.and_then(|i| record.get(i)).unwrap_or("").trim()
}

/// Read an amount like "₹1,20,000.50", "Rs. 450" or "450"
pub fn parse_amount(raw: &str, currency_re: &Regex) -> Option<f64> {
    let cleaned = currency_re.replace_all(raw.trim(), "");
    let cleaned: String = cleaned.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

fn currency_regex() -> Result<Regex> {
    Ok(Regex::new(r"(?i)^(₹|rs\.?|inr)\s*")?)
}

/// Parse an expense CSV file.
///
/// Rows whose amount cannot be read are skipped. Rows with unreadable
/// dates are kept as-is; the detector leaves them out of its window.
pub fn parse_expense_csv(path: impl AsRef<Path>) -> Result<Vec<Expense>> {
    let rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_path(path.as_ref())
        .with_context(|| format!("opening {}", path.as_ref().display()))?;
    parse_expense_records(rdr).with_context(|| format!("parsing {}", path.as_ref().display()))
}

/// Parse expense CSV text already in memory
pub fn parse_expense_csv_str(text: &str) -> Result<Vec<Expense>> {
    let rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(text.as_bytes());
    parse_expense_records(rdr)
}

fn parse_expense_records<R: std::io::Read>(mut rdr: csv::Reader<R>) -> Result<Vec<Expense>> {
    let cols = Columns::from_header(rdr.headers()?)?;
    let currency_re = currency_regex()?;

    let mut out = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let record = result?;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }

        let raw_amount = cell(&record, Some(cols.amount));
        let amount = match parse_amount(raw_amount, &currency_re) {
            Some(a) => a,
            None => {
                tracing::warn!(row = row + 1, amount = raw_amount, "skipping row with unreadable amount");
                continue;
            }
        };

        let id = match cell(&record, cols.id) {
            "" => format!("csv-{}", row + 1),
            id => id.to_string(),
        };
        let description = Some(cell(&record, cols.description))
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        out.push(Expense {
            id,
            amount,
            category: cell(&record, cols.category).to_string(),
            description,
            date: cell(&record, Some(cols.date)).to_string(),
            recorded_at: None,
        });
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_forms() {
        let re = currency_regex().unwrap();
        assert_eq!(parse_amount("450", &re), Some(450.0));
        assert_eq!(parse_amount("₹1,20,000.50", &re), Some(120000.5));
        assert_eq!(parse_amount("Rs. 1,250", &re), Some(1250.0));
        assert_eq!(parse_amount("INR 99.9", &re), Some(99.9));
        assert_eq!(parse_amount("", &re), None);
        assert_eq!(parse_amount("twelve", &re), None);
    }

    #[test]
    fn test_parse_basic_rows() {
        let text = "\
Date,Amount,Category,Description
2026-02-14,250,Food & Tiffin,Swiggy dinner
2026-02-15,\"₹1,200\",Rent/Housing,
not-a-date,90,Transport & Petrol,Ola auto
2026-02-16,??,Food & Tiffin,broken
,,,
";
        let rows = parse_expense_csv_str(text).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].id, "csv-1");
        assert_eq!(rows[0].description.as_deref(), Some("Swiggy dinner"));
        assert_eq!(rows[1].amount, 1200.0);
        assert_eq!(rows[1].description, None);
        assert_eq!(rows[2].date, "not-a-date");
        assert_eq!(rows[2].parsed_date(), None);
    }

    #[test]
    fn test_header_order_and_ids() {
        let text = "id,CATEGORY,amount,date\nx-9,Misc,12.5,2026-01-02\n";
        let rows = parse_expense_csv_str(text).unwrap();
        assert_eq!(rows[0].id, "x-9");
        assert_eq!(rows[0].category, "Misc");
        assert_eq!(rows[0].description, None);
    }

    #[test]
    fn test_missing_amount_column() {
        let err = parse_expense_csv_str("Date,Category\n2026-01-01,Misc\n").unwrap_err();
        assert!(err.to_string().contains("Amount"));
    }
}
