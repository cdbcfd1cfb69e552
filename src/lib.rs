//! This file is the root of the `basepack` Rust crate.
//!
//! Its responsibilities are strictly limited to:
//! 1.  Declaring all the top-level modules of our library (`codec`, `search`,
//!     etc.) so the Rust compiler knows they exist.
//! 2.  Re-exporting the small public surface the host application consumes.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//==================================================================================
// 1. Module Declarations
//==================================================================================
pub mod codec;
pub mod config;
pub mod formats;
pub mod oracle;
pub mod search;

mod error;

//==================================================================================
// 2. Public Surface
//==================================================================================
pub use codec::{Alphabet, RadixCodec};
pub use config::BasepackConfig;
pub use error::BasepackError;
pub use oracle::{ImageSource, RenderOracle, RenderRequest};
pub use search::{detect_optimal_format, plan_fit, FitOutcome, RenderParams};

/// Routes the library's `log` output to stderr, at `info` level unless the
/// `RUST_LOG` environment variable says otherwise. Safe to call repeatedly;
/// only the first call installs a logger.
pub fn enable_verbose_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
