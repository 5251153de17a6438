//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod integrate;
pub mod serve;
pub mod status;

use clap::{Parser, Subcommand};

/// Numerical integration of single-variable functions
#[derive(Parser)]
#[command(name = "numint")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Integrate a function locally
    Integrate(integrate::IntegrateArgs),

    /// Start web server (foreground)
    Serve(serve::ServeArgs),

    /// Manage configuration
    Config(config::ConfigArgs),

    /// Show methods and server status
    Status(status::StatusArgs),
}

/// Run the CLI
pub async fn run() -> crate::error::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Integrate(args) => integrate::run(args).await,
        Commands::Serve(args) => serve::run(args).await,
        Commands::Config(args) => config::run(args),
        Commands::Status(args) => status::run(args).await,
    }
}
