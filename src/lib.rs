//! numint: Numerical Integration Service
//!
//! A library, CLI and HTTP/WebSocket service for integrating user-supplied
//! single-variable functions over a bounded interval.
//!
//! ## Features
//!
//! - Safe expression compilation over a fixed vocabulary (no general eval)
//! - Trapezoidal, Simpson, midpoint and Monte Carlo rules
//! - Plot-ready samples and an error estimate with every result
//! - Injectable, seedable random source for Monte Carlo
//! - REST + WebSocket API with result broadcasting, and a CLI
//!
//! ## Quick Start
//!
//! ```rust
//! use numint::quadrature::Method;
//! use numint::rng::pseudo::SeededSource;
//! use numint::service::{compute, IntegrationRequest};
//!
//! let request = IntegrationRequest::new("x**3", 0.0, 2.0, 101, Method::Simpson);
//! let result = compute(&request, &SeededSource::new(42)).unwrap();
//!
//! assert!((result.value - 4.0).abs() < 1e-3);
//! assert_eq!(result.x_values.len(), 101);
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod expr;
pub mod format;
pub mod quadrature;
pub mod rng;
pub mod server;
pub mod service;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use expr::{compile, Function};
pub use quadrature::{Method, Quadrature};
pub use service::{compute, IntegrationRequest, IntegrationResult};
