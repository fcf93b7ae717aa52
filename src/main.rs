use clap::{Parser, Subcommand};
use fieldbudget::cli;
use fieldbudget::error::BudgetResult;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fieldbudget")]
#[command(about = "Generate a field-trip cost template workbook (.xlsx)")]
#[command(long_about = "Fieldbudget - Field-trip cost template generator

Builds a six-sheet Excel workbook for budgeting a single research field trip:

  Inputs & Rates        Central rate parameters, bound to defined names
  Staff & Participants  Per-diems, overnights and hour-based Hiwi wages
  Hours Log             Logged hours, aggregated by exact name match
  Travel & Vehicles     Tickets and day-rates (shuttle cost is central)
  Material Expenses     Consumables, equipment, shipping, permits
  Summary               Category subtotals and the grand total

All arithmetic lives in the generated formulas. Fill in 'Inputs & Rates'
first; every other sheet recalculates from it.

EXAMPLES:
  fieldbudget generate                          # default output path
  fieldbudget generate -o plan/alpine-2026.xlsx
  fieldbudget generate --rates overrides.yaml   # replace default rates
  fieldbudget rates                             # list overridable rates")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Generate the budget workbook.

Writes the template to the output path, creating parent directories as
needed and overwriting any existing file.

RATE OVERRIDES:
  Pass a YAML file mapping rate names to values to replace the built-in
  planning defaults:

    PER_DIEM: 28
    OVERNIGHT_DEFAULT: 110

  Unknown names are rejected. Run 'fieldbudget rates' for the known names.")]
    /// Generate the budget workbook
    Generate {
        /// Output .xlsx path
        #[arg(short, long, default_value = "output/fieldtrip-cost-template.xlsx")]
        output: PathBuf,

        /// YAML file overriding default rate values (NAME: value)
        #[arg(short, long)]
        rates: Option<PathBuf>,

        /// Show the resolved rates before building
        #[arg(short, long)]
        verbose: bool,
    },

    /// List the rate parameters and their default values
    Rates {
        /// Emit a ready-to-edit override file (YAML) on stdout
        #[arg(long)]
        yaml: bool,
    },
}

fn main() -> BudgetResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            output,
            rates,
            verbose,
        } => cli::generate(output, rates, verbose),

        Commands::Rates { yaml } => cli::rates(yaml),
    }
}
