use std::fs::File;
use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use finance_tracker::derive::{
    expense_breakdown, filter_transactions, monthly_totals, recent_months, sort_transactions,
    summarize, CategoryShare, Dashboard, FilterCriteria, MonthlyTotals, SortDirection, SortField,
    SortState, Summary, DEFAULT_CHART_MONTHS,
};
use finance_tracker::models::{is_known_category, Transaction, TransactionId, TransactionType};
use finance_tracker::persistence::JsonFilePersistence;
use finance_tracker::store::TransactionStore;
use finance_tracker::validation::TransactionForm;
use finance_tracker::{export_transactions, import_transactions};

/// Track income and expenses from the command line.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory holding `transactions.json`.
    #[arg(long, env = "FINANCE_TRACKER_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record a new transaction.
    Add(AddArgs),
    /// Change fields of an existing transaction.
    Edit(EditArgs),
    /// Delete a transaction.
    Delete {
        id: String,
        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },
    /// List transactions.
    List {
        #[command(flatten)]
        filter: FilterArgs,
        /// Also show transactions dated after today when `--to` is not given.
        #[arg(long)]
        include_future: bool,
        #[arg(long, default_value_t = SortField::Date)]
        sort: SortField,
        #[arg(long, default_value_t = SortDirection::Desc)]
        direction: SortDirection,
    },
    /// Show totals, averages and the savings rate.
    Summary {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Show income and expenses per month across all transactions.
    Monthly {
        /// How many of the most recent months to show.
        #[arg(long, default_value_t = DEFAULT_CHART_MONTHS)]
        months: usize,
    },
    /// Show expenses per category.
    Categories {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Show the summary, expense breakdown and recent months together.
    Dashboard {
        #[command(flatten)]
        filter: FilterArgs,
        /// How many of the most recent months to show.
        #[arg(long, default_value_t = DEFAULT_CHART_MONTHS)]
        months: usize,
    },
    /// Add transactions from a CSV file with a `title,amount,category,date,type` header.
    Import { file: PathBuf },
    /// Write all transactions as CSV.
    Export {
        /// Output file. Defaults to stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct AddArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    amount: String,
    #[arg(long)]
    category: String,
    /// `YYYY-MM-DD`. Defaults to today.
    #[arg(long)]
    date: Option<String>,
    /// `income` or `expense`.
    #[arg(long = "type", default_value = "expense", value_parser = parse_tx_type)]
    tx_type: TransactionType,
}

#[derive(Args, Debug)]
struct EditArgs {
    id: String,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    amount: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    date: Option<String>,
    #[arg(long = "type", value_parser = parse_tx_type)]
    tx_type: Option<TransactionType>,
}

#[derive(Args, Debug)]
struct FilterArgs {
    /// Text to look for in titles and categories.
    #[arg(long, default_value = "")]
    search: String,
    /// Exact category.
    #[arg(long, default_value = "")]
    category: String,
    /// Earliest date, inclusive.
    #[arg(long)]
    from: Option<NaiveDate>,
    /// Latest date, inclusive.
    #[arg(long)]
    to: Option<NaiveDate>,
}

impl From<FilterArgs> for FilterCriteria {
    fn from(args: FilterArgs) -> Self {
        Self {
            search_term: args.search,
            category: args.category,
            start_date: args.from,
            end_date: args.to,
        }
    }
}

fn parse_tx_type(s: &str) -> std::result::Result<TransactionType, String> {
    match s.to_ascii_lowercase().as_str() {
        "income" => Ok(TransactionType::Income),
        "expense" => Ok(TransactionType::Expense),
        other => Err(format!("unknown type '{}', expected income or expense", other)),
    }
}

fn setup_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> Result<()> {
    setup_logging();

    let cli = Cli::parse();

    let persistence = JsonFilePersistence::in_dir(&cli.data_dir);
    info!("Using data file {}", persistence.path().display());
    let mut store = TransactionStore::open(persistence);

    match cli.command {
        Command::Add(args) => {
            let form = TransactionForm {
                title: args.title,
                amount: args.amount,
                category: args.category,
                date: args
                    .date
                    .unwrap_or_else(|| TransactionForm::new(today()).date),
                tx_type: args.tx_type,
            };
            check_category(&form.category)?;
            let form_data = form.validate()?;

            let id = store.add(form_data);
            println!("Added {}", id);
        }
        Command::Edit(args) => {
            let id = TransactionId::from(args.id);
            let existing = match store.get(&id) {
                Some(tx) => tx,
                None => bail!("Transaction {} not found", id),
            };

            let mut form = TransactionForm::from_transaction(existing);
            if let Some(title) = args.title {
                form.title = title;
            }
            if let Some(amount) = args.amount {
                form.amount = amount;
            }
            if let Some(category) = args.category {
                check_category(&category)?;
                form.category = category;
            }
            if let Some(date) = args.date {
                form.date = date;
            }
            if let Some(tx_type) = args.tx_type {
                form.tx_type = tx_type;
            }

            store.edit(form.validate_edit(id.clone())?);
            println!("Updated {}", id);
        }
        Command::Delete { id, yes } => {
            let id = TransactionId::from(id);
            let tx = match store.get(&id) {
                Some(tx) => tx,
                None => bail!("Transaction {} not found", id),
            };

            if !yes {
                print_transaction(tx);
                bail!("Pass --yes to delete this transaction");
            }

            store.delete(&id);
            println!("Deleted {}", id);
        }
        Command::List {
            filter,
            include_future,
            sort,
            direction,
        } => {
            let mut criteria = FilterCriteria::from(filter);
            if criteria.end_date.is_none() && !include_future {
                criteria.end_date = FilterCriteria::until(today()).end_date;
            }

            let filtered = filter_transactions(store.transactions(), &criteria);
            let sorted = sort_transactions(&filtered, sort, direction);

            for tx in &sorted {
                print_transaction(tx);
            }
            println!("Showing {} transactions", sorted.len());
        }
        Command::Summary { filter } => {
            let filtered = filter_transactions(store.transactions(), &filter.into());
            print_summary(&summarize(&filtered));
        }
        Command::Monthly { months } => {
            let totals = monthly_totals(store.transactions());
            print_monthly(recent_months(&totals, months));
        }
        Command::Categories { filter } => {
            let filtered = filter_transactions(store.transactions(), &filter.into());
            print_breakdown(&expense_breakdown(&filtered));
        }
        Command::Dashboard { filter, months } => {
            let dashboard = Dashboard::build(
                store.transactions(),
                &filter.into(),
                SortState::default(),
                months,
            );

            print_summary(&dashboard.summary);
            println!();
            print_breakdown(&dashboard.expense_breakdown);
            println!();
            print_monthly(&dashboard.monthly);
        }
        Command::Import { file } => {
            let input = File::open(&file)
                .with_context(|| format!("Failed to open input file '{}'", file.display()))?;
            let imported = import_transactions(input, &mut store)
                .context("Failed to import transactions")?;
            println!("Imported {} transactions", imported);
        }
        Command::Export { output } => match output {
            Some(path) => {
                let file = File::create(&path)
                    .with_context(|| format!("Failed to create '{}'", path.display()))?;
                export_transactions(store.transactions(), file)
                    .context("Failed to export transactions")?;
            }
            None => export_transactions(store.transactions(), io::stdout())
                .context("Failed to export transactions")?,
        },
    }

    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// The form only offers the predefined categories
fn check_category(category: &str) -> Result<()> {
    if !category.is_empty() && !is_known_category(category) {
        bail!(
            "Unknown category '{}', expected one of: {}",
            category,
            finance_tracker::models::CATEGORIES.join(", ")
        );
    }
    Ok(())
}

fn print_summary(summary: &Summary) {
    println!("Total income:     {:>12.2}", summary.total_income);
    println!("Total expenses:   {:>12.2}", summary.total_expenses);
    println!("Balance:          {:>12.2}", summary.balance);
    println!("Average income:   {:>12.2}", summary.avg_income);
    println!("Average expense:  {:>12.2}", summary.avg_expense);
    println!("Highest income:   {:>12.2}", summary.highest_income);
    println!("Highest expense:  {:>12.2}", summary.highest_expense);
    println!("Transactions:     {:>12}", summary.transaction_count);
    println!("Savings rate:     {:>11.1}%", summary.savings_rate);
}

fn print_breakdown(breakdown: &[CategoryShare]) {
    if breakdown.is_empty() {
        println!("No expense data to display");
    }
    for share in breakdown {
        println!(
            "{:<16} {:>12.2}  {:>3.0}%",
            share.category, share.total, share.percent
        );
    }
}

fn print_monthly(months: &[MonthlyTotals]) {
    if months.is_empty() {
        println!("No transaction data to display");
    }
    for month in months {
        println!(
            "{:<9} income {:>12.2}  expense {:>12.2}  balance {:>12.2}",
            month.label, month.income, month.expense, month.balance
        );
    }
}

fn print_transaction(tx: &Transaction) {
    println!(
        "{}  {}  {:<7}  {:<14}  {:>12.2}  {}",
        tx.id, tx.date, tx.tx_type, tx.category, tx.amount, tx.title
    );
}
