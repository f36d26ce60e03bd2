//! CLI entry point.
//!
//! Parses the command line and dispatches to the bootstrap composition
//! root. A startup or task failure propagates through `anyhow` and exits
//! non-zero; stop failures never reach here.

use clap::Parser;

use frontstage_cli::{bootstrap, Cli, Commands};
use frontstage_core::RunnerKind;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        // No command provided - show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Grunt(args) => bootstrap::run(RunnerKind::Grunt, &args).await,
        Commands::Gulp(args) => bootstrap::run(RunnerKind::Gulp, &args).await,
    }
}
