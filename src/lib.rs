//! Playground dataset pulls
//!
//! Two independent pulls that end up as files in a local datasets folder:
//!
//! - **Listings**: OAuth client-credentials login against the listings API,
//!   one search, results written to CSV and JSON.
//! - **Player stats**: player id lookup in the person register, Statcast
//!   events for a date range, filtered to one home team, written to CSV
//!   along with an SVG spray chart.
//!
//! # Examples
//!
//! ```rust,no_run
//! use playground_datasets::commands::run_player_stats;
//! use playground_datasets::config::Config;
//! use playground_datasets::data_fetcher::create_http_client_with_timeout;
//! use playground_datasets::error::AppError;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load().await?;
//!     let client = create_http_client_with_timeout(config.http_timeout_seconds)?;
//!
//!     let outcome = run_player_stats(&client, &config).await?;
//!     println!("{} events saved to {}", outcome.kept_events, outcome.csv_path.display());
//!     Ok(())
//! }
//! ```

pub mod chart;
pub mod commands;
pub mod config;
pub mod constants;
pub mod data_fetcher;
pub mod error;
pub mod export;
pub mod table;

// Re-export commonly used types for convenience
pub use commands::{ListingsOutcome, PlayerStatsOutcome, run_listings, run_player_stats};
pub use config::Config;
pub use error::AppError;
pub use table::Table;
