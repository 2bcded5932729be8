//! Demo banking app entry point
//!
//! Loads the mock account data, pulls the recent transactions for a card,
//! applies any filters given on the command line, and prints the derived
//! view. The same engine backs the voice-driven UI; this binary is the
//! quickest way to poke at it.

use anyhow::Context;
use bankdemo_config::Config;
use bankdemo_core::{
    Renderer, SortColumn, SortDirection, Transaction, TransactionList,
};
use bankdemo_data::{AccountStore, JsonDataProvider};
use bankdemo_grammar::{
    prompt_file, DispatchOutcome, RecentTransactionsDispatcher, RecognitionHit,
};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "bankdemo")]
#[command(version = "0.1.0")]
#[command(about = "Voice-driven demo banking app core", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Card number to list transactions for (default: the account's first card)
    #[arg(long)]
    card: Option<String>,

    /// Filter by merchant name
    #[arg(long)]
    merchant: Option<String>,

    /// Filter by amount, e.g. --amount 10.00 --comparison over
    #[arg(long)]
    amount: Option<String>,

    /// Amount comparison: over, under, about, exactly
    #[arg(long, default_value = "")]
    comparison: String,

    /// Filter by date, e.g. --date "Apr 18 2010" --direction since
    #[arg(long)]
    date: Option<String>,

    /// Date comparison: since, before, on
    #[arg(long, default_value = "")]
    direction: String,

    /// Sort column: amount, date, merchant
    #[arg(long)]
    sort: Option<SortColumn>,

    /// Sort order: asc or desc
    #[arg(long, default_value = "asc")]
    order: String,

    /// Recognition result JSON to run through the grammar dispatcher,
    /// e.g. --say '[{"interpretation": {"action": "filter",
    /// "field": "merchant", "value": "starbucks"}}]' (repeatable)
    #[arg(long)]
    say: Vec<String>,
}

struct StdoutRenderer;

impl Renderer for StdoutRenderer {
    fn display_transactions(&self, transactions: &[Transaction]) {
        for (idx, tx) in transactions.iter().enumerate() {
            println!(
                "{:>3}  {:<28}  {:>10}  {}",
                idx,
                tx.full_date(),
                tx.amount,
                tx.name
            );
        }
        println!("  ({} transactions)", transactions.len());
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = Config::load_or_default(args.config.clone())
        .with_context(|| format!("loading config {}", args.config.display()))?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&config.logging.level),
    )
    .init();

    let rt = Runtime::new()?;
    rt.block_on(run(args, config))
}

async fn run(args: Args, config: Config) -> anyhow::Result<()> {
    let provider = Arc::new(JsonDataProvider::new(config.data.path.clone()));

    let store = AccountStore::new(provider.clone(), config.client.clone());
    store.init(&config.data.account_number);
    let account = store
        .load()
        .await
        .with_context(|| format!("loading account {}", config.data.account_number))?;

    let card = match args.card {
        Some(card) => card,
        None => store.active_card_number()?,
    };

    let list = TransactionList::new(provider);
    list.init(&card).await?;

    if let Some(value) = args.date.as_deref() {
        list.filter_by_date(value, &args.direction);
    }
    if let Some(value) = args.merchant.as_deref() {
        list.filter_by_merchant(value);
    }
    if let Some(value) = args.amount.as_deref() {
        list.filter_by_amount(value, &args.comparison);
    }
    if let Some(column) = args.sort {
        list.sort(column, SortDirection::from_phrase(&args.order));
    }

    let mut dispatcher = RecentTransactionsDispatcher::new();
    for spoken in &args.say {
        let result: Vec<RecognitionHit> = serde_json::from_str(spoken)
            .with_context(|| format!("parsing recognition result {:?}", spoken))?;
        match dispatcher.handle(&list, &result) {
            DispatchOutcome::Filtered { label, active, .. } => {
                println!("applied \"{}\" ({} active filters)", label, active);
            }
            DispatchOutcome::Detail { index, transaction } => match transaction {
                Some(tx) => println!(
                    "detail [{}]: {} {} {}",
                    index,
                    tx.full_date(),
                    tx.amount,
                    tx.name
                ),
                None => println!("detail [{}]: nothing there", index),
            },
            DispatchOutcome::Navigate(page) => {
                println!("navigate: {:?}", page);
            }
            DispatchOutcome::RecognitionError { errors, prompt } => {
                println!(
                    "no reco result ({} errors), prompt: {}",
                    errors,
                    prompt_file(prompt).unwrap_or(prompt)
                );
            }
        }
    }

    let dest = store.dest_account()?;
    println!("{} - {} ({})", account.fullname, dest.name, dest.card_display);
    if let Some(balance) = store.current_balance()? {
        println!("Balance: ${}", balance);
    }
    println!();

    StdoutRenderer.display_transactions(&list.get_data());
    Ok(())
}
