mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::benchmarking::IntensityArgs;
use commands::investment::InvestmentArgs;
use commands::sbti::SbtiArgs;
use commands::simulator::{ProcurementArgs, SimulateArgs};

/// Carbon-management analytics
#[derive(Parser)]
#[command(
    name = "carbo",
    version,
    about = "Carbon-management analytics: ETS cost simulation and SBTi trajectory analysis",
    long_about = "A CLI for carbon-management analytics. Simulates ETS compliance \
                  cost under price and allocation scenarios, compares procurement \
                  strategies, fits historical emission trends, and estimates \
                  science-based target achievement probability."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the ETS compliance-cost simulation
    Simulate(SimulateArgs),
    /// Compute the allowance procurement mix and effective price
    Procurement(ProcurementArgs),
    /// Run the SBTi trajectory analysis
    Sbti(SbtiArgs),
    /// Rank a peer group by carbon intensity
    Intensity(IntensityArgs),
    /// Appraise a green capex investment
    Investment(InvestmentArgs),
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
        Commands::Simulate(args) => commands::simulator::run_simulate(args),
        Commands::Procurement(args) => commands::simulator::run_procurement(args),
        Commands::Sbti(args) => commands::sbti::run_sbti(args),
        Commands::Intensity(args) => commands::benchmarking::run_intensity(args),
        Commands::Investment(args) => commands::investment::run_investment(args),
        Commands::Version => {
            println!("carbo {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
