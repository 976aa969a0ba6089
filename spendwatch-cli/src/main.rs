use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use spendwatch_core::{
    detect, filter_by_category, index_by_expense_id, is_default_category, today_in, DEFAULT_CATEGORIES,
};
use spendwatch_ingest::{parse_expense_csv, ExpenseStore, NewExpense};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;
mod report;
mod state;

#[derive(Parser, Debug)]
#[command(
    name = "spendwatch",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SPENDWATCH_BUILD_SHA"), ")"),
    about = "Track expenses and flag unusual spend"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record a new expense
    Add {
        #[arg(long)]
        amount: f64,

        #[arg(long)]
        category: String,

        #[arg(long)]
        description: Option<String>,

        /// Date the expense belongs to (default: today)
        #[arg(long)]
        date: Option<String>,
    },

    /// List recorded expenses, newest first, with unusual ones marked
    List {
        /// Only show this category
        #[arg(long)]
        category: Option<String>,

        #[arg(long, default_value_t = 50)]
        limit: usize,
    },

    /// Delete an expense by id
    Delete { id: String },

    /// Delete every expense
    Clear {
        /// Confirm the wipe
        #[arg(long, default_value_t = false)]
        yes: bool,
    },

    /// Import expenses from a CSV export (Date,Amount,Category,Description)
    Import {
        #[arg(long)]
        csv: PathBuf,
    },

    /// Totals, this month's spend and the category breakdown
    Summary,

    /// Flag unusually large expenses against recent category history
    Anomalies {
        /// Trailing window in days (14-120)
        #[arg(long)]
        window_days: Option<u32>,

        /// Robust z-score threshold (2.5-6.0); higher = fewer alerts
        #[arg(long)]
        sensitivity: Option<f64>,

        /// Entries needed per category before scoring (3-12)
        #[arg(long)]
        min_history: Option<usize>,

        /// Pull out-of-range overrides into range instead of failing
        #[arg(long, default_value_t = false)]
        clamp: bool,

        /// Analyse a CSV export instead of the store
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Emit JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// List the stock categories
    Categories,

    /// Manage ~/.spendwatch/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let cfg = config::load_config()?;

    match cli.command {
        Command::Add {
            amount,
            category,
            description,
            date,
        } => {
            let date = match date {
                Some(d) => d,
                None => today_in(cfg.timezone()?).format("%Y-%m-%d").to_string(),
            };
            if !is_default_category(&category) {
                tracing::warn!(%category, "category is not one of the stock categories");
            }

            let mut store = open_store()?;
            let expense = store.add(NewExpense {
                amount,
                category,
                description,
                date,
            })?;
            println!("Added {} ({} on {})", expense.id, expense.category, expense.date);
        }

        Command::List { category, limit } => {
            let store = open_store()?;
            let detection = cfg.detection_with(None, None, None, false)?;
            let results = detect(store.list(), &detection, cfg.timezone()?);
            let index = index_by_expense_id(&results);

            let rows: Vec<_> = filter_by_category(store.list(), category.as_deref())
                .into_iter()
                .take(limit)
                .collect();
            print!("{}", report::render_list(&rows, &index));
        }

        Command::Delete { id } => {
            let mut store = open_store()?;
            if !store.delete(&id)? {
                bail!("no expense with id {id}");
            }
            println!("Deleted {id}");
        }

        Command::Clear { yes } => {
            if !yes {
                bail!("refusing to delete all expenses without --yes");
            }
            let mut store = open_store()?;
            let n = store.len();
            store.clear()?;
            println!("Deleted {n} expenses");
        }

        Command::Import { csv } => {
            if !csv.exists() {
                bail!("CSV not found: {}", csv.display());
            }
            let incoming = parse_expense_csv(&csv)?;
            let parsed = incoming.len();
            let mut store = open_store()?;
            let added = store.import(incoming)?;
            println!("Parsed {parsed} rows from {}, added {added}", csv.display());
        }

        Command::Summary => {
            let store = open_store()?;
            let today = today_in(cfg.timezone()?);
            print!("{}", report::render_summary(store.list(), today));
        }

        Command::Anomalies {
            window_days,
            sensitivity,
            min_history,
            clamp,
            csv,
            json,
        } => {
            let detection = cfg.detection_with(window_days, sensitivity, min_history, clamp)?;
            let expenses = match csv {
                Some(path) => parse_expense_csv(&path)?,
                None => open_store()?.list().to_vec(),
            };

            let results = detect(&expenses, &detection, cfg.timezone()?);
            tracing::info!(expenses = expenses.len(), flagged = results.len(), "anomaly pass done");

            if json {
                println!("{}", serde_json::to_string_pretty(&results).context("serialize results")?);
            } else {
                print!("{}", report::render_anomalies(&results, &detection));
            }
        }

        Command::Categories => {
            for name in DEFAULT_CATEGORIES {
                println!("{name}");
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn open_store() -> Result<ExpenseStore> {
    ExpenseStore::open(state::expenses_path()?)
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
