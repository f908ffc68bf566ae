use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::{money, print_transactions};
use crate::categorize::{Breakdown, Bucket, Categorizer};
use crate::config::Config;
use crate::import::{import_directory, ErrorPolicy, ImportReport};
use crate::ledger::Ledger;

pub(crate) fn as_cli(args: &[String]) -> Result<()> {
    let Some(command) = args.get(1) else {
        print_usage();
        return Ok(());
    };
    let opts = Options::parse(&args[2..])?;

    match command.as_str() {
        "ledger" | "l" => cli_ledger(&opts),
        "summary" | "s" => cli_summary(&opts),
        "show" => cli_show(&opts),
        "search" => cli_search(&opts),
        "sum" => cli_sum(&opts),
        "sets" => cli_sets(&opts),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("spendtrail {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("spendtrail — merge bank and card statements into one ledger");
    println!();
    println!("Usage: spendtrail <command> [options]");
    println!();
    println!("Commands:");
    println!("  ledger <dir>                  Print every transaction, oldest first");
    println!("  summary <dir>                 Totals for transfers, government, income, expenses");
    println!("  show <dir> <bucket>           Print one bucket (transfers|government|income|expenses)");
    println!("  search <dir> <keyword>...     Expenses whose description contains a keyword");
    println!("  sum <dir> <keyword>...        Total of the expenses matched by search");
    println!("    --set <name>                Use a named keyword set instead of keywords");
    println!("  sets                          List keyword sets");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Options:");
    println!("  --config <path>               Config file (default: per-user config.json)");
    println!("  --year <yyyy>                 Year for statement dates");
    println!("  --skip-errors                 Skip statements that fail to parse");
    println!();
    println!("Files: *.csv are chequing exports, PDFs named with a leading digit are");
    println!("OCR'd card statements, other PDFs are card statements.");
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    config: Option<PathBuf>,
    year: Option<i32>,
    skip_errors: bool,
    set: Option<String>,
    positional: Vec<String>,
}

impl Options {
    fn parse(args: &[String]) -> Result<Self> {
        let mut opts = Self::default();
        let mut it = args.iter();
        while let Some(arg) = it.next() {
            match arg.as_str() {
                "--config" => {
                    let path = it.next().context("--config needs a path")?;
                    opts.config = Some(PathBuf::from(path));
                }
                "--year" => {
                    let year = it.next().context("--year needs a value")?;
                    opts.year = Some(
                        year.parse()
                            .with_context(|| format!("Invalid year: {year}"))?,
                    );
                }
                "--set" => {
                    opts.set = Some(it.next().context("--set needs a name")?.clone());
                }
                "--skip-errors" => opts.skip_errors = true,
                flag if flag.starts_with("--") => anyhow::bail!("Unknown option: {flag}"),
                _ => opts.positional.push(arg.clone()),
            }
        }
        Ok(opts)
    }

    fn config(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;
        if let Some(year) = self.year {
            config.year = year;
        }
        if self.skip_errors {
            config.on_error = ErrorPolicy::SkipFile;
        }
        Ok(config)
    }

    fn dir(&self) -> Result<&Path> {
        self.positional
            .first()
            .map(Path::new)
            .ok_or_else(|| anyhow::anyhow!("Missing statement directory"))
    }

    /// Keywords from `--set`, or the positionals after the directory.
    fn keywords<'a>(&'a self, config: &'a Config) -> Result<&'a [String]> {
        let keywords = match &self.set {
            Some(name) => config.keyword_set(name)?,
            None => &self.positional[self.positional.len().min(1)..],
        };
        if keywords.is_empty() {
            anyhow::bail!("No keywords given. Pass keywords or --set <name>");
        }
        Ok(keywords)
    }
}

fn load_ledger(opts: &Options, config: &Config) -> Result<Ledger> {
    let dir = opts.dir()?;
    if !dir.is_dir() {
        anyhow::bail!("Not a directory: {}", dir.display());
    }

    let report = import_directory(dir, config.year, config.on_error)
        .with_context(|| format!("Failed to import statements from {}", dir.display()))?;
    report_problems(&report);
    log::debug!(
        "imported {} transactions from {} statements",
        report.transaction_count(),
        report.batches.len()
    );

    let ledger = Ledger::from_statements(report.batches);
    log::info!(
        "ledger holds {} transactions totalling {}",
        ledger.len(),
        money(ledger.total())
    );
    Ok(ledger)
}

fn report_problems(report: &ImportReport) {
    for batch in report.empty_statements() {
        eprintln!(
            "Warning: {} produced no transactions ({} parser)",
            batch.path.display(),
            batch.format
        );
    }
    for skipped in &report.skipped {
        eprintln!(
            "Skipped {} ({}): {}",
            skipped.path.display(),
            skipped.error.kind(),
            skipped.error
        );
    }
}

fn split<'a>(ledger: &'a Ledger, config: &Config) -> Breakdown<'a> {
    Categorizer::new(config.rules.clone()).split(ledger)
}

fn cli_ledger(opts: &Options) -> Result<()> {
    let config = opts.config()?;
    let ledger = load_ledger(opts, &config)?;
    if ledger.is_empty() {
        println!("No transactions");
        return Ok(());
    }
    print_transactions(ledger.entries());
    println!();
    println!("{} transactions, net {}", ledger.len(), money(ledger.total()));
    Ok(())
}

fn cli_summary(opts: &Options) -> Result<()> {
    let config = opts.config()?;
    let ledger = load_ledger(opts, &config)?;
    let breakdown = split(&ledger, &config);

    println!("spendtrail — {}", config.year);
    println!("{}", "─".repeat(40));
    for bucket in Bucket::ALL {
        println!(
            "  {:<12} {:>5} txns  {:>14}",
            bucket.name(),
            breakdown.bucket(bucket).len(),
            money(breakdown.total(bucket))
        );
    }
    for marker in &config.rules.income_markers {
        let matched = breakdown.income_matching(marker);
        let total: rust_decimal::Decimal = matched.iter().map(|t| t.amount).sum();
        println!("    {:<22} {:>14}", format!("{marker:?}"), money(total));
    }
    println!("{}", "─".repeat(40));
    println!(
        "  {:<12} {:>5} txns  {:>14}",
        "ledger",
        ledger.len(),
        money(ledger.total())
    );

    if breakdown.len() != ledger.len() || breakdown.grand_total() != ledger.total() {
        anyhow::bail!("Buckets do not add up to the ledger");
    }
    Ok(())
}

fn cli_show(opts: &Options) -> Result<()> {
    let bucket: Bucket = opts
        .positional
        .get(1)
        .ok_or_else(|| anyhow::anyhow!("Usage: spendtrail show <dir> <bucket>"))?
        .parse()?;
    let config = opts.config()?;
    let ledger = load_ledger(opts, &config)?;
    let breakdown = split(&ledger, &config);

    let rows = breakdown.bucket(bucket);
    print_transactions(ledger.entries_of(rows));
    println!();
    println!("{} {bucket}, total {}", rows.len(), money(breakdown.total(bucket)));
    Ok(())
}

fn cli_search(opts: &Options) -> Result<()> {
    let config = opts.config()?;
    let keywords = opts.keywords(&config)?;
    let ledger = load_ledger(opts, &config)?;
    let breakdown = split(&ledger, &config);

    let found = breakdown.search(keywords);
    if found.is_empty() {
        println!("No expenses match {}", keywords.join(", "));
        return Ok(());
    }
    print_transactions(ledger.entries_of(&found));
    println!();
    println!("{} matching expenses", found.len());
    Ok(())
}

fn cli_sum(opts: &Options) -> Result<()> {
    let config = opts.config()?;
    let keywords = opts.keywords(&config)?;
    let ledger = load_ledger(opts, &config)?;
    let breakdown = split(&ledger, &config);

    println!("{}", money(breakdown.sum(keywords)));
    Ok(())
}

fn cli_sets(opts: &Options) -> Result<()> {
    let config = opts.config()?;
    if config.keyword_sets.is_empty() {
        println!("No keyword sets");
        return Ok(());
    }
    for (name, keywords) in &config.keyword_sets {
        println!("  {name:<12} {}", keywords.join(", "));
    }
    Ok(())
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
