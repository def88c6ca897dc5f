//! Latest module endpoints.
//!
//! Fetches the current-snapshot array for one vendor table. These files are
//! meant for direct table display and bypass any reconstruction.
//!
//! # Usage
//!
//! All endpoint methods are available on [`SpotFeedClient`](crate::client::SpotFeedClient).

use crate::client::SpotFeedClient;
use crate::errors::SpotFeedError;
use crate::latest::models::LatestRows;

impl SpotFeedClient {
    /// Retrieves the latest snapshot rows for a vendor table.
    ///
    /// **Endpoint:** `GET /latest_data/latest_{table}.json`
    ///
    /// # Parameters
    /// - `table` - vendor table name (`aws`/`gcp`/`azure`)
    ///
    /// # Returns
    /// The raw snapshot rows. A body that is not a JSON array is rejected
    /// as invalid response data.
    pub async fn get_latest(&self, table: &str) -> Result<LatestRows, SpotFeedError> {
        let path = format!("latest_{}.json", table);
        let resp = self.latest_get(&path).await?;
        let value: serde_json::Value = serde_json::from_str(&resp)
            .map_err(|e| {
                SpotFeedError::Other(
                    format!("Invalid snapshot format: Parse error: {e}. Response: {resp}"),
                )
            })?;
        match value {
            serde_json::Value::Array(rows) => Ok(rows),
            _ => Err(SpotFeedError::Other("Invalid response data".to_string())),
        }
    }
}
