use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use simple_logger::SimpleLogger;

use installment_estimator::{
    ChartOptions, Estimate, Estimator, FileStore, TermConfig, format_currency, load_terms,
    reference_terms, render_chart, render_summary, sanitize_digits,
};

const EXIT_INVALID_AMOUNT: i32 = 2;

/// Flat-rate installment plans for a borrowed amount
#[derive(Parser)]
#[command(name = "installments", version, about = "Flat-rate installment plans for a borrowed amount")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with the repayment plans (defaults to the built-in 6/12/18 month plans)
    #[arg(long, global = true)]
    terms: Option<PathBuf>,

    /// File holding the last entered amount
    #[arg(long, global = true, default_value = ".last_amount.json")]
    store: PathBuf,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate every plan for an amount
    Calc(CalcArgs),
    /// Estimate again from the last remembered amount
    Last(RenderArgs),
    /// Forget the remembered amount
    Clear,
    /// List the configured plans
    Terms,
}

#[derive(Args)]
struct CalcArgs {
    /// Amount to borrow
    amount: String,

    /// Strip everything except digits before validating (e.g. "10,000")
    #[arg(long)]
    digits_only: bool,

    #[command(flatten)]
    render: RenderArgs,
}

#[derive(Args)]
struct RenderArgs {
    /// Output format
    #[arg(long, default_value = "text")]
    format: OutputFormat,

    /// Append a bar chart comparing the plans
    #[arg(long)]
    chart: bool,

    /// Width of the longest chart bar
    #[arg(long, default_value_t = 40)]
    width: usize,
}

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(1);
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    if let Err(e) = SimpleLogger::new().with_level(level).init() {
        eprintln!("warning: logger not installed: {e}");
    }
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    let terms = match &cli.terms {
        Some(path) => load_terms(path).with_context(|| format!("invalid term configuration in '{}'", path.display()))?,
        None => reference_terms(),
    };
    let mut estimator = Estimator::new(terms, FileStore::new(&cli.store));

    match cli.command {
        Commands::Calc(args) => {
            let raw = if args.digits_only {
                sanitize_digits(&args.amount)
            } else {
                args.amount
            };
            let estimate = estimator.on_amount_changed(&raw);
            print_estimate(&estimate, &args.render)
        }
        Commands::Last(args) => match estimator.restore() {
            Some(estimate) => print_estimate(&estimate, &args),
            None => {
                eprintln!("no saved amount");
                Ok(1)
            }
        },
        Commands::Clear => {
            estimator.clear()?;
            Ok(0)
        }
        Commands::Terms => {
            print_terms(estimator.terms());
            Ok(0)
        }
    }
}

fn print_estimate(estimate: &Estimate, args: &RenderArgs) -> anyhow::Result<i32> {
    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(estimate)?);
        }
        OutputFormat::Text => {
            if let Err(reason) = &estimate.validation {
                eprintln!("{reason}");
            } else {
                print!("{}", render_summary(&estimate.breakdowns));
                if args.chart {
                    let options = ChartOptions {
                        width: args.width,
                        ..ChartOptions::default()
                    };
                    println!();
                    print!("{}", render_chart(&estimate.breakdowns, &options));
                }
            }
        }
    }

    Ok(if estimate.is_valid() { 0 } else { EXIT_INVALID_AMOUNT })
}

fn print_terms(terms: &[TermConfig]) {
    for term in terms {
        println!(
            "{}: {} months, {}% flat, fees {}",
            term.label(),
            term.months(),
            term.annual_rate(),
            format_currency(term.fees())
        );
    }
}
