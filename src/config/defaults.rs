//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default integration method
pub const DEFAULT_METHOD: &str = "trapezoidal";

/// Default number of sample points
pub const DEFAULT_NUM_POINTS: usize = 100;

/// Default output format
pub const DEFAULT_FORMAT: &str = "json";

/// Default random source for Monte Carlo
pub const DEFAULT_RNG: &str = "pseudo";

/// Default seed for the seeded random source
pub const DEFAULT_SEED: u64 = 42;

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 8000;

/// Default browser origin allowed by CORS (Angular dev server)
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:4200";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "numint";
