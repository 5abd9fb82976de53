//! BDI agent entry point.

use clap::Parser;

use bdi_agent::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { no_dashboard } => {
            bdi_agent::cli::commands::run::execute(cli.config, no_dashboard).await
        }
        Commands::Cycle => bdi_agent::cli::commands::cycle::execute(cli.config, cli.json).await,
        Commands::Config(command) => {
            bdi_agent::cli::commands::config::execute(command, cli.config, cli.json)
        }
    };

    if let Err(err) = result {
        bdi_agent::cli::handle_error(err, cli.json);
    }
}
