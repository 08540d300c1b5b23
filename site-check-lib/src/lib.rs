//! # Site Check Library
//!
//! A fast, robust library for checking website reachability with bounded
//! concurrency.
//!
//! The core operation fans a batch of URLs out to concurrent probes and fans
//! the results back into a single aggregated view, so a whole batch costs
//! roughly one slowest probe of wall-clock time. Probes are injectable: the
//! built-in one speaks HTTP, and tests or callers with bespoke health
//! semantics can supply their own.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use site_check_lib::{SiteChecker, CheckConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let checker = SiteChecker::new();
//!     let result = checker.check_url("https://example.com").await?;
//!
//!     println!("URL: {} - Up: {:?}", result.url, result.up);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Bounded concurrency**: at most N probes in flight, never one task per URL
//! - **Deadlines**: a batch can be given a wall-clock budget; unfinished URLs
//!   come back undetermined instead of hanging the caller
//! - **Injectable probes**: swap the HTTP probe for any `(url) -> outcome`
//!   capability, including deterministic fakes in tests
//! - **Tri-state outcomes**: up, down, and "the probe itself failed"

// Re-export main public API types and functions
// This makes them available as site_check_lib::TypeName
pub use checker::SiteChecker;
pub use concurrent::{check_statuses, run_batch};
pub use config::{
    load_env_config, parse_timeout_string, ConfigManager, DefaultsConfig, EnvConfig, FileConfig,
    OutputConfig,
};
pub use error::SiteCheckError;
pub use http::HttpProbe;
pub use probe::{BoolProbe, Probe, ProbeFn};
pub use types::{CheckConfig, OutputMode, ProbeMethod, ProbeOutcome, ProbeStatus, UrlResult};
pub use utils::{expand_url_inputs, normalize_url, read_urls_from_file, validate_url, MAX_FILE_URLS};

// Internal modules - these are not part of the public API
mod checker;
mod concurrent;
mod config;
mod error;
mod http;
mod probe;
mod types;
mod utils;

// Type alias for convenience
pub type Result<T> = std::result::Result<T, SiteCheckError>;

// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
