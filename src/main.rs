//! numint CLI entry point
//!
//! Numerical integration - CLI + web service

use numint::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
