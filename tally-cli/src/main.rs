use anyhow::{bail, Context, Result};
use chrono::Datelike;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use tally_core::{Admission, JsonFilePort, LedgerCache, DEFAULT_RECENT_LIMIT};
use tally_ingest::{parse_ledger_csv, parse_text_statement, ParsedStatement};

#[derive(Parser, Debug)]
#[command(name = "tally", version, about = "Local financial ledger cache")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ImportFormat {
    Csv,
    Text,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Import a statement export (CSV or extracted text)
    Import {
        file: PathBuf,

        /// Parser to use; inferred from the file extension when omitted
        #[arg(long, value_enum)]
        format: Option<ImportFormat>,

        /// Statement year for text exports whose rows carry MM/DD only
        #[arg(long)]
        year: Option<i32>,
    },

    /// List uploaded statements, most recent first
    Statements,

    /// Totals, net balance, and date range
    Summary,

    /// Most recent transactions
    Recent {
        #[arg(long, default_value_t = DEFAULT_RECENT_LIMIT)]
        limit: usize,
    },

    /// Per-category totals and counts
    Categories,

    /// Remove a statement from the upload history
    Remove { statement_id: String },

    /// Empty the transaction store
    Clear,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Import { file, format, year } => import(&file, format, year)?,
        Command::Statements => statements()?,
        Command::Summary => summary()?,
        Command::Recent { limit } => recent(limit)?,
        Command::Categories => categories()?,
        Command::Remove { statement_id } => remove(&statement_id)?,
        Command::Clear => clear()?,
    }

    Ok(())
}

fn open_cache() -> Result<LedgerCache> {
    LedgerCache::open(JsonFilePort::default_location()?)
}

fn import(file: &Path, format: Option<ImportFormat>, year: Option<i32>) -> Result<()> {
    if !file.exists() {
        bail!("file not found: {}", file.display());
    }

    let format = format.unwrap_or_else(|| infer_format(file));
    let parsed: ParsedStatement = match format {
        ImportFormat::Csv => {
            parse_ledger_csv(file).with_context(|| format!("parsing {}", file.display()))?
        }
        ImportFormat::Text => {
            let text = std::fs::read_to_string(file)
                .with_context(|| format!("reading {}", file.display()))?;
            let name = file
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| file.display().to_string());
            let year = year.unwrap_or_else(|| chrono::Utc::now().year());
            parse_text_statement(&text, &name, year)
                .with_context(|| format!("parsing {}", file.display()))?
        }
    };

    let mut cache = open_cache()?;

    match cache.add_statement(parsed.statement.clone()) {
        Admission::Admitted => {}
        Admission::DuplicateId | Admission::DuplicateName => {
            println!(
                "{} was already uploaded; nothing imported.",
                parsed.statement.name
            );
            return Ok(());
        }
    }

    let offered = parsed.transactions.len();
    let admitted = cache.complete_statement(&parsed.statement.id, parsed.transactions);
    cache.save()?;

    println!(
        "Imported {} ({} transactions, {} new)",
        parsed.statement.name, offered, admitted
    );
    Ok(())
}

fn infer_format(file: &Path) -> ImportFormat {
    match file.extension().and_then(|e| e.to_str()) {
        Some("csv") => ImportFormat::Csv,
        _ => ImportFormat::Text,
    }
}

fn statements() -> Result<()> {
    let cache = open_cache()?;
    if cache.statements().is_empty() {
        println!("No statements uploaded yet. Import one: tally import <file>");
        return Ok(());
    }

    for s in cache.statements() {
        let txn_count = s
            .summary
            .as_ref()
            .map(|sum| sum.transaction_count.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "[{:?}] {:>3}% | {} | txns={} | {}",
            s.status, s.progress, s.name, txn_count, s.id
        );
    }
    Ok(())
}

fn summary() -> Result<()> {
    let cache = open_cache()?;

    println!("Statements:   {}", cache.statements().len());
    println!("Transactions: {}", cache.transactions().len());
    println!("Income:       ${:.2}", cache.total_income());
    println!("Expenses:     ${:.2}", cache.total_expenses());
    println!("Net:          ${:.2}", cache.net_balance());

    if let Some((first, last)) = cache.date_range() {
        println!("Range:        {first} to {last}");
    }
    Ok(())
}

fn recent(limit: usize) -> Result<()> {
    let cache = open_cache()?;
    for t in cache.recent_transactions(limit) {
        println!(
            "{} | {:>10.2} | {:<14} | {}",
            t.date, t.amount, t.category, t.description
        );
    }
    Ok(())
}

fn categories() -> Result<()> {
    let cache = open_cache()?;
    let buckets = cache.transactions_by_category();
    let totals = cache.category_totals();

    // Largest magnitude first for display.
    let mut rows: Vec<_> = totals.into_iter().collect();
    rows.sort_by(|a, b| b.1.abs().partial_cmp(&a.1.abs()).unwrap_or(std::cmp::Ordering::Equal));

    for (category, total) in rows {
        let count = buckets.get(&category).map(|v| v.len()).unwrap_or(0);
        println!("{category:<16} | {count:>4} txns | ${total:.2}");
    }
    Ok(())
}

fn remove(statement_id: &str) -> Result<()> {
    let mut cache = open_cache()?;
    if cache.remove_statement(statement_id) {
        cache.save()?;
        println!("Removed {statement_id}");
    } else {
        println!("No statement with id {statement_id}");
    }
    Ok(())
}

fn clear() -> Result<()> {
    let mut cache = open_cache()?;
    cache.clear_transactions();
    cache.save()?;
    println!("Transaction store cleared.");
    Ok(())
}
