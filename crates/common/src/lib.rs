//! Common utilities and shared types for socialgram.
//!
//! This crate provides the foundational pieces used by the other crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **Logging**: `tracing` subscriber setup via [`logging::init`]
//!
//! # Example
//!
//! ```no_run
//! use socialgram_common::{AppResult, Config};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     socialgram_common::logging::init(&config.logging);
//!     println!("Database: {}", config.database.url);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;

pub use config::Config;
pub use error::{AppError, AppResult};
