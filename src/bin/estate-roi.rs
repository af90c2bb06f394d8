//! estate-roi CLI - investment projections in the visitor's currency
//!
//! ## Example Usage
//!
//! ```bash
//! # Project 10,000 at 10% for 5 years
//! estate-roi calc --principal 10000 --rate 10 --years 5
//!
//! # Same projection shown in euros
//! estate-roi calc -p 10000 -r 10 -y 5 --currency EUR
//!
//! # Remember a display currency for later runs
//! estate-roi select GBP
//!
//! # Year-by-year table written to CSV
//! estate-roi schedule -p 250000 -r 6.5 -y 10 -o growth.csv
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use estate_roi::calculator::Outcome;
use estate_roi::config::Config;
use estate_roi::currency::{Currency, CurrencyTable};
use estate_roi::format::{format_money, format_percent, RoiDisplay};
use estate_roi::fx::{CsvRateSource, RateSource};
use estate_roi::roi::{project, schedule, InvestmentParams, RoiResult};
use estate_roi::selector::CurrencySelector;
use estate_roi::session::Session;
use estate_roi::store::{FileStore, KeyValueStore};
use serde::Serialize;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

/// estate-roi: investment projections for international property buyers
#[derive(Parser)]
#[command(name = "estate-roi")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Compound-growth ROI projections with display currency conversion", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// CSV file of display rates (code,symbol,rate), overrides the config
    #[arg(long, global = true)]
    rates: Option<PathBuf>,

    /// Directory holding the persisted currency selection
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project future value, profit and ROI
    Calc {
        #[command(flatten)]
        inputs: InputArgs,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Year-by-year growth table
    Schedule {
        #[command(flatten)]
        inputs: InputArgs,

        /// Print the table as JSON
        #[arg(long)]
        json: bool,

        /// Write the table to a file (CSV/JSON by extension)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// List the display currencies
    Currencies {
        /// Print the table as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remember a display currency for later runs
    Select {
        /// Currency code, e.g. EUR
        #[arg(value_name = "CODE")]
        code: String,
    },

    /// Read commands from stdin and reprint the figures after each one
    Interactive,
}

#[derive(clap::Args)]
struct InputArgs {
    /// Amount invested, in the base currency
    #[arg(short = 'p', long, allow_hyphen_values = true)]
    principal: Option<String>,

    /// Annual growth rate in percent
    #[arg(short = 'r', long, allow_hyphen_values = true)]
    rate: Option<String>,

    /// Holding period in years
    #[arg(short = 'y', long, allow_hyphen_values = true)]
    years: Option<String>,

    /// Display currency for this run only
    #[arg(long)]
    currency: Option<String>,
}

/// Everything a command needs, resolved from flags and config
struct AppContext {
    config: Config,
    table: CurrencyTable,
    store: Arc<dyn KeyValueStore>,
    verbose: bool,
}

impl AppContext {
    fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let config = Config::load(cli.config.as_deref());

        let table = match &cli.rates {
            Some(path) => CsvRateSource::new(path, &config.base_currency).table(),
            None => config.currency_table(),
        }
        .context("failed to load currency table")?;

        let storage_dir = cli
            .storage_dir
            .clone()
            .unwrap_or_else(|| config.storage_dir.clone());

        Ok(Self {
            config,
            table,
            store: Arc::new(FileStore::new(storage_dir)),
            verbose: cli.verbose,
        })
    }

    fn params(&self, inputs: &InputArgs) -> anyhow::Result<InvestmentParams> {
        let defaults = &self.config.defaults;
        let principal = inputs
            .principal
            .clone()
            .unwrap_or_else(|| defaults.principal.to_string());
        let rate = inputs
            .rate
            .clone()
            .unwrap_or_else(|| defaults.rate.to_string());
        let years = inputs
            .years
            .clone()
            .unwrap_or_else(|| defaults.years.to_string());

        Ok(InvestmentParams::parse(&principal, &rate, &years)?)
    }

    /// Per-run currency if given and listed, otherwise the saved selection
    fn display_currency(&self, requested: Option<&str>) -> Currency {
        let selector = CurrencySelector::new(self.table.clone(), self.store.clone());
        match requested {
            Some(code) => match self.table.get(code) {
                Some(currency) => currency.clone(),
                None => {
                    eprintln!(
                        "{} Currency '{}' is not offered, showing {}",
                        "Warning:".yellow(),
                        code,
                        selector.active().code
                    );
                    selector.active().clone()
                }
            },
            None => selector.active().clone(),
        }
    }
}

#[derive(Serialize)]
struct CalcReport<'a> {
    inputs: &'a InvestmentParams,
    base_currency: &'a str,
    result: &'a RoiResult,
    display: &'a RoiDisplay,
}

#[derive(Serialize)]
struct ScheduleRow {
    year: f64,
    currency: String,
    value: f64,
    profit: f64,
    roi_percent: f64,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = AppContext::from_cli(&cli).and_then(|ctx| {
        if ctx.verbose {
            println!(
                "{} v{}",
                "estate-roi".cyan().bold(),
                env!("CARGO_PKG_VERSION")
            );
            println!(
                "Rates: {} ({} currencies)",
                ctx.table.source.dimmed(),
                ctx.table.len()
            );
        }

        match cli.command {
            Commands::Calc { inputs, json } => run_calc(&ctx, &inputs, json),
            Commands::Schedule {
                inputs,
                json,
                output,
            } => run_schedule(&ctx, &inputs, json, output),
            Commands::Currencies { json } => list_currencies(&ctx, json),
            Commands::Select { code } => select_currency(&ctx, &code),
            Commands::Interactive => run_interactive(&ctx),
        }
    });

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn run_calc(ctx: &AppContext, inputs: &InputArgs, json: bool) -> anyhow::Result<()> {
    let params = ctx.params(inputs)?;
    let currency = ctx.display_currency(inputs.currency.as_deref());
    let result = project(&params);
    let display = RoiDisplay::new(&result, &currency);

    if json {
        let report = CalcReport {
            inputs: &params,
            base_currency: &ctx.table.base().code,
            result: &result,
            display: &display,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", "Investment Projection".green().bold());
    println!("{}", "=====================".green());
    println!(
        "  Principal:        {}",
        format_money(params.principal, &currency)
    );
    println!(
        "  Annual rate:      {}",
        format_percent(params.annual_rate_percent)
    );
    println!("  Years:            {}", params.years);
    println!();
    print_display(&display);

    Ok(())
}

fn print_display(display: &RoiDisplay) {
    println!(
        "  Future value:     {}",
        display.future_value.bright_green().bold()
    );
    println!("  Profit:           {}", display.profit.cyan());
    println!("  ROI:              {}", display.roi_percent.bold());
}

fn run_schedule(
    ctx: &AppContext,
    inputs: &InputArgs,
    json: bool,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let params = ctx.params(inputs)?;
    let currency = ctx.display_currency(inputs.currency.as_deref());

    let points = schedule(&params);
    let rows: Vec<ScheduleRow> = points
        .iter()
        .map(|point| ScheduleRow {
            year: point.year,
            currency: currency.code.clone(),
            value: currency.from_base(point.value),
            profit: currency.from_base(point.profit),
            roi_percent: point.roi_percent,
        })
        .collect();

    if let Some(output_path) = output {
        let extension = output_path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("json");

        match extension {
            "csv" => {
                let mut wtr = csv::Writer::from_path(&output_path)?;
                for row in &rows {
                    wtr.serialize(row)?;
                }
                wtr.flush()?;
            }
            "json" => {
                fs::write(&output_path, serde_json::to_string_pretty(&rows)?)?;
            }
            other => {
                println!(
                    "{} Unknown output format '{}'. Using JSON.",
                    "Warning:".yellow(),
                    other
                );
                fs::write(&output_path, serde_json::to_string_pretty(&rows)?)?;
            }
        }
        println!(
            "{} Schedule saved to: {}",
            "✓".green().bold(),
            output_path.display()
        );
        return Ok(());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("{}", format!("Growth schedule ({})", currency.code).green().bold());
    println!("  {:>6}  {:>18}  {:>18}  {:>10}", "Year", "Value", "Profit", "ROI");
    for point in &points {
        println!(
            "  {:>6}  {:>18}  {:>18}  {:>10}",
            point.year,
            format_money(point.value, &currency),
            format_money(point.profit, &currency),
            format_percent(point.roi_percent)
        );
    }

    Ok(())
}

fn list_currencies(ctx: &AppContext, json: bool) -> anyhow::Result<()> {
    let selector = CurrencySelector::new(ctx.table.clone(), ctx.store.clone());

    if json {
        println!("{}", serde_json::to_string_pretty(&ctx.table)?);
        return Ok(());
    }

    println!("{}", "Display Currencies".cyan().bold());
    println!("{}", "==================".cyan());
    for currency in ctx.table.iter() {
        let marker = if currency.code == selector.active().code {
            "*".green().bold().to_string()
        } else {
            " ".to_string()
        };
        println!(
            "  {} {}  {:<4} {}",
            marker,
            currency.code.bright_green(),
            currency.symbol,
            format!("{}", currency.rate).dimmed()
        );
    }
    if let Some(as_of) = ctx.table.as_of {
        println!("{}", format!("  Rates as of {}", as_of.to_rfc3339()).dimmed());
    }
    println!(
        "{}",
        "  Rates are illustrative and not tied to a market feed.".dimmed()
    );

    Ok(())
}

fn select_currency(ctx: &AppContext, code: &str) -> anyhow::Result<()> {
    let mut selector = CurrencySelector::new(ctx.table.clone(), ctx.store.clone());

    if selector.select(code) {
        let vars = selector.display_vars();
        println!(
            "{} Display currency set to {} ({})",
            "✓".green().bold(),
            vars.code.bright_green(),
            vars.symbol
        );
    } else {
        println!(
            "{} Currency '{}' is not offered, keeping {}",
            "Warning:".yellow(),
            code,
            selector.active().code
        );
    }

    Ok(())
}

fn run_interactive(ctx: &AppContext) -> anyhow::Result<()> {
    let defaults = &ctx.config.defaults;
    let mut session = Session::with_inputs(
        ctx.table.clone(),
        ctx.store.clone(),
        &defaults.principal.to_string(),
        &defaults.rate.to_string(),
        &defaults.years.to_string(),
    );

    if ctx.verbose {
        println!(
            "{}",
            "Commands: principal <x>, rate <x>, years <x>, currency <CODE>, show".dimmed()
        );
    }
    print_outcome(&session.outcome());

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if matches!(line.trim(), "quit" | "exit") {
            break;
        }

        match session.apply(&line) {
            Ok(outcome) => print_outcome(&outcome),
            Err(e) => eprintln!("{} {}", "Warning:".yellow(), e),
        }
        io::stdout().flush()?;
    }

    Ok(())
}

fn print_outcome(outcome: &Outcome) {
    match outcome {
        Ok(display) => {
            println!("{}", format!("[{}]", display.currency).dimmed());
            print_display(display);
        }
        Err(e) => println!("{} {}", "Invalid:".red(), e),
    }
}
