//! user-scout: username and email availability scanning
//!
//! The crate splits into a pure pattern-expansion engine and a network
//! scanner built on top of it:
//!
//! - [`pattern`]: compiles expansion patterns like `john[0-9]{1-2}` into
//!   candidate identifier streams
//! - [`probe`]: the declarative catalog of site endpoints
//! - [`scanner`]: concurrent availability checks with optional proxy
//!   rotation
//! - [`output`]: console, CSV, and JSON rendering
//!
//! # Example
//!
//! ```no_run
//! use user_scout::{Scanner, TargetKind};
//!
//! #[tokio::main]
//! async fn main() {
//!     let scanner = Scanner::new();
//!     for result in scanner.check_all(TargetKind::Username, "john").await {
//!         println!("{}: {}", result.site, result.status_label());
//!     }
//! }
//! ```

pub mod error;
pub mod output;
pub mod pattern;
pub mod probe;
pub mod scanner;
pub mod types;

pub use error::{Result, UserScoutError};
pub use output::{OutputFormat, Printer};
pub use pattern::{expand, expand_random, Block, Pattern};
pub use probe::{categories, find_site, sites, sites_for, sites_in_category};
pub use probe::{Category, ProbeRule, Site};
pub use scanner::{ProxyPool, Scanner};
pub use types::{
    MetricsSnapshot, ScanConfig, ScanMetrics, ScanResult, Status, TargetKind,
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Load environment overrides from a `.env` file when one is present.
pub fn init() -> Result<()> {
    dotenv::dotenv().ok();
    Ok(())
}
