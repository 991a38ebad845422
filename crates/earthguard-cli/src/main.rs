mod centers;
mod chat;
mod pickups;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::centers::CentersArgs;
use crate::pickups::PickupCommands;

#[derive(Debug, Parser)]
#[command(name = "earthguard")]
#[command(about = "EarthGuard waste management command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Ask the eco assistant; starts an interactive session without a question
    Ask {
        /// Question to answer once
        question: Option<String>,
        /// Print the starter questions and exit
        #[arg(long)]
        suggestions: bool,
    },
    /// Find recycling centers
    Centers(CentersArgs),
    /// Schedule, list and cancel waste pickups
    Pickups {
        #[command(subcommand)]
        command: PickupCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = earthguard_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Ask {
            question,
            suggestions,
        }) => chat::run_ask(&config, question.as_deref(), suggestions).await,
        Some(Commands::Centers(args)) => centers::run_centers(&config, &args),
        Some(Commands::Pickups { command }) => pickups::run_pickups(&config, command).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests;
