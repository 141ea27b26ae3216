//! gatop
//!
//! Fetches the five most viewed pages of a Google Analytics view over the
//! last seven days and prints them as a ranked list.
//!
//! ## Architecture Overview
//!
//! - [`commands`] - The `configure` and `fetch` operations
//! - [`store`] - Key-value settings holding the credential path
//! - [`reporting`] - Reporting service seam and the Google API client
//! - [`auth`] - Service-account JWT bearer authentication
//! - [`models`] - Report request and response wire types
//! - [`output`] - Operator-facing log, success and error sinks
//! - [`config`] - Configuration with file and environment variable support
//! - [`logging`] - Structured logging with JSON and pretty-print formats
//! - [`error`] - Errors reported at the command boundary
//!
//! ## Example
//!
//! ```rust,no_run
//! use gatop::commands::CommandHandler;
//! use gatop::config::Config;
//! use gatop::output::ConsoleOutput;
//! use gatop::reporting::GoogleConnector;
//! use gatop::store::FileSettingsStore;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::load()?;
//! let store = FileSettingsStore::new(&config.paths.settings_file);
//! let connector = GoogleConnector::new(&config.reporting);
//! let handler = CommandHandler::new(&store, &connector, &ConsoleOutput, config.paths.base_path.clone());
//!
//! handler.fetch(Some("123456")).await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod reporting;
pub mod store;

pub use commands::CommandHandler;
pub use error::CommandError;
pub use models::ReportRow;
