//! Time utilities: expense date parsing and timezone-aware "today".

use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Parse an expense date. Accepts `YYYY-MM-DD`, RFC 3339, an offset-less
/// ISO date-time and the en-IN `DD/MM/YYYY` form.
pub fn parse_expense_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ndt.date());
        }
    }
    NaiveDate::parse_from_str(s, "%d/%m/%Y").ok()
}

/// Parse an IANA timezone name like "Asia/Kolkata".
pub fn parse_timezone(tz: &str) -> Result<Tz> {
    tz.parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))
}

/// Current calendar date in the given timezone.
pub fn today_in(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        let d = NaiveDate::from_ymd_opt(2026, 2, 20).unwrap();
        assert_eq!(parse_expense_date("2026-02-20"), Some(d));
        assert_eq!(parse_expense_date(" 2026-02-20 "), Some(d));
        assert_eq!(parse_expense_date("2026-02-20T18:30:00+05:30"), Some(d));
        assert_eq!(parse_expense_date("2026-02-20T10:15:00.000Z"), Some(d));
        assert_eq!(parse_expense_date("2026-02-20T10:15"), Some(d));
        assert_eq!(parse_expense_date("20/02/2026"), Some(d));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_expense_date(""), None);
        assert_eq!(parse_expense_date("not a date"), None);
        assert_eq!(parse_expense_date("2026-02-30"), None);
    }

    #[test]
    fn test_parse_timezone() {
        assert!(parse_timezone("Asia/Kolkata").is_ok());
        assert!(parse_timezone("Mars/Olympus").is_err());
    }
}
