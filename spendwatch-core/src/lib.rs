//! spendwatch-core: expense types, summaries and the outlier detector

pub mod config;
pub mod detector;
pub mod expense;
pub mod stats;
pub mod suggestions;
pub mod summary;
pub mod time;

pub use config::DetectionConfig;
pub use detector::{detect, detect_at, index_by_expense_id, AnomalyResult};
pub use expense::{Expense, UNCATEGORIZED};
pub use suggestions::suggest;
pub use summary::{
    category_totals, filter_by_category, format_inr, is_default_category, month_total, total,
    DEFAULT_CATEGORIES,
};
pub use time::{parse_expense_date, parse_timezone, today_in};
