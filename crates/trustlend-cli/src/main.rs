mod commands;
mod input;
mod output;
mod store;
mod telemetry;

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::process;

use commands::assess::AssessArgs;
use commands::lenders::LendersArgs;
use commands::loans::{ApplyArgs, DashboardArgs, EmiArgs, QuoteArgs};
use output::OutputFormat;

/// Alternative-data credit assessment for microfinance
#[derive(Parser)]
#[command(
    name = "trustlend",
    version,
    about = "Alternative-data credit assessment for microfinance",
    long_about = "Scores applicants from utility bills, prepaid recharge patterns, \
                  payment delay and location stability, matches them to eligible \
                  microfinance lenders, quotes EMIs and records loan applications."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log filter for stderr (RUST_LOG takes precedence)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Score an applicant and list eligible lenders
    Assess(AssessArgs),
    /// List lenders, optionally filtered by score and risk level
    Lenders(LendersArgs),
    /// Equated monthly installment for a principal and rate
    Emi(EmiArgs),
    /// Fee, EMI and total repayment for a loan from one lender
    Quote(QuoteArgs),
    /// Submit a loan application against the user's latest assessment
    Apply(ApplyArgs),
    /// Latest assessment and loan book for a user
    Dashboard(DashboardArgs),
    /// Print version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = telemetry::init(&cli.log_level) {
        eprintln!("{}: {}", "warning".yellow().bold(), e);
    }

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Assess(args) => commands::assess::run_assess(args),
        Commands::Lenders(args) => commands::lenders::run_lenders(args),
        Commands::Emi(args) => commands::loans::run_emi(args),
        Commands::Quote(args) => commands::loans::run_quote(args),
        Commands::Apply(args) => commands::loans::run_apply(args),
        Commands::Dashboard(args) => commands::loans::run_dashboard(args),
        Commands::Version => {
            println!("trustlend {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
