//! Remediation hints attached to flagged expenses.
//!
//! Rules are a fixed table evaluated in order. Keyword rules match
//! case-insensitively against the expense's category and description.

use crate::expense::Expense;

/// Most hints returned for one expense
pub const MAX_SUGGESTIONS: usize = 4;

/// z-score at which a spike looks more like a typo than real spend
pub const DATA_ENTRY_Z: f64 = 6.0;

pub const VERIFY_ENTRY: &str =
    "Double-check the amount (extra zero / decimal) and confirm the date.";
pub const SOFT_LIMIT: &str =
    "If this is correct, consider setting a soft limit for this category.";
pub const SPLIT_ENTRY: &str =
    "If this includes multiple items, split it into separate entries for better tracking.";
pub const FOOD_TIP: &str =
    "Try a weekly food cap or batch-cooking on weekdays to reduce spikes.";
pub const TRANSPORT_TIP: &str =
    "Compare routes/vendors and track \"commute vs. non-commute\" rides separately.";
pub const MOBILE_TIP: &str = "Review your plan/add-ons; one-time packs can inflate the month.";
pub const UTILITY_TIP: &str =
    "If this is a bill jump, check meter/bill period and note it in the description.";
pub const EVENTS_TIP: &str =
    "Consider a separate \"events\" sinking fund so these don't surprise you.";
pub const SHOPPING_TIP: &str =
    "Add a quick tag like \"need/want\" to spot impulse vs. essentials later.";

/// What a rule gets to look at
struct RuleInput<'a> {
    amount: f64,
    category_median: f64,
    z_score: f64,
    category: &'a str,
    description: &'a str,
}

enum Predicate {
    Stats(fn(&RuleInput) -> bool),
    Keywords {
        category: &'static [&'static str],
        description: &'static [&'static str],
    },
}

struct Rule {
    when: Predicate,
    text: &'static str,
}

impl Rule {
    fn applies(&self, input: &RuleInput) -> bool {
        match &self.when {
            Predicate::Stats(f) => f(input),
            Predicate::Keywords {
                category,
                description,
            } => {
                category.iter().any(|k| input.category.contains(k))
                    || description.iter().any(|k| input.description.contains(k))
            }
        }
    }
}

const RULES: &[Rule] = &[
    Rule {
        when: Predicate::Stats(|i| i.z_score >= DATA_ENTRY_Z),
        text: VERIFY_ENTRY,
    },
    Rule {
        when: Predicate::Stats(|i| i.z_score < DATA_ENTRY_Z),
        text: SOFT_LIMIT,
    },
    Rule {
        when: Predicate::Stats(|i| {
            i.category_median > 0.0 && i.amount >= i.category_median * 2.0
        }),
        text: SPLIT_ENTRY,
    },
    Rule {
        when: Predicate::Keywords {
            category: &["food", "tiffin"],
            description: &["swiggy", "zomato"],
        },
        text: FOOD_TIP,
    },
    Rule {
        when: Predicate::Keywords {
            category: &["transport"],
            description: &["uber", "ola", "petrol"],
        },
        text: TRANSPORT_TIP,
    },
    Rule {
        when: Predicate::Keywords {
            category: &["mobile", "internet"],
            description: &["recharge"],
        },
        text: MOBILE_TIP,
    },
    Rule {
        when: Predicate::Keywords {
            category: &["electricity", "water"],
            description: &["eb", "tneb"],
        },
        text: UTILITY_TIP,
    },
    Rule {
        when: Predicate::Keywords {
            category: &["festivals", "functions"],
            description: &["wedding", "function"],
        },
        text: EVENTS_TIP,
    },
    Rule {
        when: Predicate::Keywords {
            category: &[],
            description: &["amazon", "flipkart", "myntra"],
        },
        text: SHOPPING_TIP,
    },
];

/// Build up to [`MAX_SUGGESTIONS`] distinct hints, in rule order.
///
/// `z_score` is the unrounded robust score; pass 0.0 when it is undefined.
pub fn suggest(expense: &Expense, category_median: f64, z_score: f64) -> Vec<&'static str> {
    let category = expense.category.to_lowercase();
    let description = expense.description_text().to_lowercase();
    let input = RuleInput {
        amount: expense.amount,
        category_median,
        z_score,
        category: &category,
        description: &description,
    };

    let mut out: Vec<&'static str> = Vec::with_capacity(MAX_SUGGESTIONS);
    for rule in RULES {
        if out.len() == MAX_SUGGESTIONS {
            break;
        }
        if rule.applies(&input) && !out.contains(&rule.text) {
            out.push(rule.text);
        }
    }
    out
}
