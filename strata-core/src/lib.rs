//! Strata core - shared foundations for the Strata client SDK
//!
//! Provides the unified error type, logging bootstrap, and configuration
//! shared by the client, session, and CLI crates.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{ApiConfig, StorageConfig, StrataConfig};
pub use error::{ErrorContext, StrataError, StrataResult};
pub use logging::{init_logging, LogFormat, LoggingConfig};
