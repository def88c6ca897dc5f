//! Query module endpoints.
//!
//! Implements the historical range query against the archive's query API.
//!
//! # Usage
//!
//! All endpoint methods are available on [`SpotFeedClient`](crate::client::SpotFeedClient).

use crate::client::SpotFeedClient;
use crate::errors::SpotFeedError;
use crate::query::models::{HistoryQuery, HistoryResponse};

impl SpotFeedClient {
    /// Runs a historical range query.
    ///
    /// **Endpoint:** `GET /query-api/?TableName=...&InstanceType=...&...`
    ///
    /// # Query Parameters
    /// - `TableName` - vendor table (`aws`/`gcp`/`azure`)
    /// - `InstanceType` / `Region` / `AZ` - concrete value or `"*"` wildcard
    /// - `AvailabilityZone` / `InstanceTier` - Azure-only fields
    /// - `Start` / `End` - inclusive calendar bounds, at most one month apart
    ///
    /// The remote service caps results at 20,000 rows; callers seeing
    /// exactly that many rows should treat the result as possibly
    /// truncated.
    ///
    /// # Returns
    /// [`HistoryResponse`] with the application status and raw rows
    pub async fn get_history(
        &self,
        params: &HistoryQuery,
    ) -> Result<HistoryResponse, SpotFeedError> {
        // Only append '?' if there are actual query params to avoid malformed URLs
        let query = serde_urlencoded::to_string(params)
            .map_err(|e| SpotFeedError::Other(
                format!("Failed to serialize params: {}", e),
            ))?;
        let path = if query.is_empty() {
            String::new()
        } else {
            format!("?{}", query)
        };
        let resp = self.query_get(&path).await?;
        let data: HistoryResponse = serde_json::from_str(&resp)
            .map_err(|e| {
                SpotFeedError::Other(
                    format!(
                        "Invalid query response format: Parse error: {e}. Response: {resp}"
                    ),
                )
            })?;
        Ok(data)
    }
}
