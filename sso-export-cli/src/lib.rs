//! Library target for the `sso-export` package.
//!
//! The primary deliverable is the `sso-export` binary (`src/main.rs`), which
//! prints cached AWS SSO credentials as `export` lines for `eval`. The pieces
//! live here so they can be tested without spawning the binary.

pub mod config;
pub mod credentials;
pub mod error;
pub mod export;
pub mod locator;
pub mod output;
pub mod refresh;
pub mod walk;

pub use config::AppConfig;
pub use credentials::{CacheEntry, CredentialRecord};
pub use error::{Error, Result};
pub use export::{MAX_ATTEMPTS, Outcome, export_credentials};
pub use locator::{locate, locate_at};
pub use refresh::{Refresh, RefreshCommand};
