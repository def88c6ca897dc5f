//! Spotgrid Feed Client
//!
//! HTTP client for the three remote feeds behind the spotgrid archive:
//! per-vendor association dumps (which instance types exist in which
//! regions/zones), the historical range-query API, and the latest-snapshot
//! files.
//!
//! # Quick Start
//!
//! ```no_run
//! use spotfeed_rs::SpotFeedClient;
//! use spotfeed_rs::query::models::HistoryQuery;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = SpotFeedClient::new();
//!
//! // Association dump: instance -> {Region, AZ} membership for AWS.
//! let association = client.get_aws_association().await?;
//! println!("{} instance types", association.first().map_or(0, |m| m.len()));
//!
//! // Historical range query.
//! let history = client.get_history(&HistoryQuery {
//!     table_name: "aws".to_string(),
//!     instance_type: "m5.large".to_string(),
//!     region: "*".to_string(),
//!     az: Some("*".to_string()),
//!     start: "2024-01-01".to_string(),
//!     end: "2024-01-03".to_string(),
//!     ..Default::default()
//! }).await?;
//! println!("{} rows", history.data.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Main Components
//!
//! - [`SpotFeedClient`] - client with all feed endpoint methods
//!
//! # Feed Modules
//!
//! - [`association`] - per-vendor instance/region/zone association dumps
//! - [`query`] - historical range queries against the archive
//! - [`latest`] - latest-snapshot arrays for direct table display


// Core modules
pub mod client;         // Main HTTP client
pub mod errors;         // Error types
pub(crate) mod helpers; // Internal HTTP helpers


// Feed endpoint modules
pub mod association;    // Instance/region/zone association dumps
pub mod latest;         // Latest snapshot files
pub mod query;          // Historical range queries


// Re-exports for convenient access
pub use client::SpotFeedClient;
pub use helpers::parse_feed_time;
