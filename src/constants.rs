//! Centralized constants for the numint crate
//!
//! Limits shared by the request validation, the CLI and the server.

/// Request limits
pub mod limits {
    /// Smallest accepted `num_points`
    pub const MIN_POINTS: usize = 10;

    /// Largest accepted `num_points`
    pub const MAX_POINTS: usize = 10_000;

    /// Default `num_points` when a request omits it
    pub const DEFAULT_POINTS: usize = 100;
}

/// Expression limits
pub mod expr {
    /// Longest accepted expression, in characters
    pub const MAX_LENGTH: usize = 1000;

    /// Deepest accepted nesting of parentheses, calls and unary operators
    pub const MAX_DEPTH: usize = 64;

    /// Point used for the compile-time smoke evaluation
    pub const SMOKE_POINT: f64 = 0.0;
}

/// WebSocket limits
pub mod ws {
    /// Frames queued per client before it is treated as gone
    pub const OUTBOX_CAPACITY: usize = 32;
}

/// Service identity reported by the health endpoint
pub const SERVICE_NAME: &str = "numerical-integration";
