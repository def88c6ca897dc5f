//! Latest module models.
//!
//! The latest-snapshot files are plain JSON arrays of current rows, one file
//! per vendor table. Row shapes vary by vendor (AWS rows carry `AZ`, Azure
//! rows `AvailabilityZone`, GCP rows neither), so rows stay dynamic.

/// Rows of one vendor's latest snapshot.
pub type LatestRows = Vec<serde_json::Value>;
