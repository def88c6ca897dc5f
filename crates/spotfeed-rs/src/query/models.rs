//! Query module models.
//!
//! Parameters and response envelope for the historical range-query API.
//! Field names follow the wire contract exactly (`TableName`, `AZ`, ...);
//! the wildcard value on the wire is `"*"`.

use derive_more::Display;
use serde::{Deserialize, Serialize};


/// Query parameters for the historical range API.
///
/// `az` is sent for AWS queries; `availability_zone` and `instance_tier`
/// are sent for Azure (the tier is always the wildcard). GCP sends neither.
/// Optional fields are omitted from the query string entirely when unset.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HistoryQuery {
    #[serde(rename = "TableName")]
    pub table_name: String,
    #[serde(rename = "InstanceType")]
    pub instance_type: String,
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "AZ", skip_serializing_if = "Option::is_none")]
    pub az: Option<String>,
    #[serde(rename = "InstanceTier", skip_serializing_if = "Option::is_none")]
    pub instance_tier: Option<String>,
    #[serde(rename = "AvailabilityZone", skip_serializing_if = "Option::is_none")]
    pub availability_zone: Option<String>,
    #[serde(rename = "Start")]
    pub start: String,
    #[serde(rename = "End")]
    pub end: String,
}


/// Response envelope from the query API.
///
/// The service reports application-level failures through `Status`
/// (403/500) rather than the HTTP status line; `Data` carries the raw rows.
/// Row shapes vary by vendor, so they stay as JSON values here.
#[derive(Debug, Clone, Deserialize, Display)]
#[display("query response status={:?} rows={}", status, data.len())]
pub struct HistoryResponse {
    #[serde(rename = "Status", default)]
    pub status: Option<u16>,
    #[serde(rename = "Data", default)]
    pub data: Vec<serde_json::Value>,
}
