use clap::{Parser, Subcommand};
use ucalc::cmd::{
    calculate::CalculateCommand, rates::RatesCommand, schema::SchemaCommand,
    validate::ValidateCommand,
};

#[derive(Parser, Debug)]
#[command(name = "ucalc", version, about = "UK Universal Credit entitlement calculator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate the monthly entitlement for a household
    Calculate(CalculateCommand),
    /// Check a profile for input errors
    Validate(ValidateCommand),
    /// Look up regional housing rates
    Rates(RatesCommand),
    /// Print input formats
    Schema(SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Calculate(cmd) => cmd.exec(),
        Command::Validate(cmd) => cmd.exec(),
        Command::Rates(cmd) => cmd.exec(),
        Command::Schema(cmd) => cmd.exec(),
    }
}
