mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::amortize::AmortizeArgs;
use commands::schedule::{DecodeArgs, EncodeArgs, InspectArgs};

/// Loan schedules packed into URL fragments, and their amortization ledgers
#[derive(Parser)]
#[command(
    name = "loansched",
    version,
    about = "Encode loan schedules into URL fragments and render amortization ledgers",
    long_about = "Packs a loan schedule (principal, annual rate in basis points, dated \
                  payments to several recipients) into a compact base64url fragment, \
                  and expands such a fragment into a day-by-day amortization ledger \
                  with compound interest across gaps between payments."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Currency code shown beside amounts in table output (e.g. USD)
    #[arg(long, global = true)]
    currency: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a JSON schedule into a base64url fragment
    Encode(EncodeArgs),
    /// Decode a fragment or viewer URL back into a JSON schedule
    Decode(DecodeArgs),
    /// Summarise the header of an encoded schedule
    Inspect(InspectArgs),
    /// Build the amortization ledger for a schedule
    Amortize(AmortizeArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Encode(args) => commands::schedule::run_encode(args),
        Commands::Decode(args) => commands::schedule::run_decode(args),
        Commands::Inspect(args) => commands::schedule::run_inspect(args),
        Commands::Amortize(args) => commands::amortize::run_amortize(args),
        Commands::Version => {
            println!("loansched {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            let currency = cli.currency.as_deref().map(str::to_uppercase);
            output::format_output(&cli.output, &value, currency.as_deref());
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
