//! Integrate command handler
//!
//! Computes an integral locally and prints or writes the result.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter};
use crate::quadrature::{available_methods, Method};
use crate::rng::get_source;
use crate::service::{compute, IntegrationRequest};
use clap::Args;
use std::str::FromStr;

/// Integrate command arguments
#[derive(Args)]
pub struct IntegrateArgs {
    /// Function of x, e.g. "sin(x) * exp(-x)"
    #[arg(required_unless_present_any = ["list_methods", "list_formats"])]
    pub function: Option<String>,

    /// Lower bound
    #[arg(long, short = 'a', allow_hyphen_values = true)]
    pub lower: Option<f64>,

    /// Upper bound
    #[arg(long, short = 'b', allow_hyphen_values = true)]
    pub upper: Option<f64>,

    /// Number of sample points
    #[arg(long, short = 'n')]
    pub points: Option<usize>,

    /// Integration method
    #[arg(long, short = 'm')]
    pub method: Option<String>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Seed for Monte Carlo (uses the seeded source)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// List available methods
    #[arg(short = 'M', long = "list-methods")]
    pub list_methods: bool,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

/// Run the integrate command
pub async fn run(args: IntegrateArgs) -> Result<()> {
    if args.list_methods {
        list_methods();
        return Ok(());
    }

    if args.list_formats {
        list_formats();
        return Ok(());
    }

    let config = Config::load()?;
    let request = build_request(&args, &config)?;
    request.validate()?;

    let format = args.format.clone().unwrap_or(config.defaults.format.clone());
    let formatter = get_formatter(&format)
        .ok_or_else(|| Error::InvalidRequest(format!("Unknown format: {}", format)))?;

    let rng = match args.seed {
        Some(seed) => get_source("seeded", seed)?,
        None => get_source(&config.defaults.rng, config.defaults.seed)?,
    };

    let result = compute(&request, rng.as_ref())?;
    let output = formatter.format(&request, &result)?;

    if let Some(path) = args.output {
        std::fs::write(&path, &output)?;
        eprintln!("Output written to {}", path);
    } else {
        print!("{}", output);
        if !output.ends_with('\n') {
            println!();
        }
    }

    Ok(())
}

/// Build a request from arguments, falling back to config defaults
fn build_request(args: &IntegrateArgs, config: &Config) -> Result<IntegrationRequest> {
    let function = args
        .function
        .clone()
        .ok_or_else(|| Error::InvalidRequest("No function given".to_string()))?;
    let (lower, upper) = match (args.lower, args.upper) {
        (Some(lower), Some(upper)) => (lower, upper),
        _ => {
            return Err(Error::InvalidRequest(
                "Both --lower and --upper are required".to_string(),
            ))
        }
    };

    let method = match &args.method {
        Some(name) => Method::from_str(name).map_err(Error::InvalidRequest)?,
        None => config.default_method()?,
    };
    let points = args.points.unwrap_or(config.defaults.num_points);

    Ok(IntegrationRequest::new(function, lower, upper, points, method))
}

/// Print available integration methods
fn list_methods() {
    println!("Available integration methods:");
    for method in available_methods() {
        println!("  {:12} - {}", method.to_string(), method.description());
    }
}

/// Print available output formats
fn list_formats() {
    println!("Available output formats:");
    for format in available_formats() {
        println!("  {:5} - {}", format.name, format.description);
    }
}
