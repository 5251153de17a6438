//! Status command handler
//!
//! Shows version, available methods and, optionally, server health.

use crate::config::Config;
use crate::error::Result;
use crate::quadrature::available_methods;
use crate::rng::available_sources;
use crate::server::routes::HealthResponse;
use clap::Args;

/// Status command arguments
#[derive(Args)]
pub struct StatusArgs {
    /// Check if server is running (queries /health)
    #[arg(long)]
    pub server: bool,
}

/// Run the status command
pub async fn run(args: StatusArgs) -> Result<()> {
    let config = Config::load()?;

    if args.server {
        check_server_status(&config).await;
    }

    println!("numint v{}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("Methods:");
    for method in available_methods() {
        println!(
            "  {:12} - {} (error estimate from n >= {})",
            method.to_string(),
            method.description(),
            method.min_points_for_error()
        );
    }
    println!();

    println!("Random sources (current: {}):", config.defaults.rng);
    for source in available_sources() {
        println!("  {:12} - {}", source.name, source.description);
    }

    Ok(())
}

/// Check if the server is running
async fn check_server_status(config: &Config) {
    let url = format!("http://{}/health", config.server_addr());

    match reqwest::get(&url).await {
        Ok(response) if response.status().is_success() => {
            println!("Server: RUNNING on {}", config.server_addr());
            if let Ok(health) = response.json::<HealthResponse>().await {
                println!("  Version: {}", health.version);
                println!("  Uptime: {}s", health.uptime_secs);
                println!("  Connections: {}", health.connections);
            }
        }
        Ok(response) => {
            println!("Server: ERROR (status {})", response.status());
        }
        Err(_) => {
            println!("Server: NOT RUNNING on {}", config.server_addr());
        }
    }
    println!();
}
