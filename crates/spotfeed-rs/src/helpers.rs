use crate::errors::SpotFeedError;
use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::Client;
/// Helper functions for making HTTP requests against the archive feeds
use url::Url;


/// Make a GET request against one of the feed hosts (all feeds are public).
pub(crate) async fn fetch_get(
    http_client: &Client,
    base_url: &str,
    path: &str,
) -> Result<String, SpotFeedError> {
    let base = base_url.trim_end_matches('/');
    let url = if path.is_empty() {
        base.to_string()
    } else if path.starts_with('?') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    };
    let parsed = Url::parse(&url).map_err(|e| SpotFeedError::Other(e.to_string()))?;
    let resp = http_client.get(parsed.as_str()).send().await?;
    let status = resp.status();
    let body: String = resp.text().await?;
    if !status.is_success() {
        return Err(SpotFeedError::Other(format!("HTTP {}: {}", status, body)));
    }
    Ok(body)
}


/// Parse a feed timestamp into UTC.
///
/// The collectors stamp rows as `2024-01-02 00:00:00`; older feeds and the
/// query API also emit RFC3339 variants, so all three shapes are accepted.
pub fn parse_feed_time(ts: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(ts, fmt) {
            return Some(naive.and_utc());
        }
    }
    None
}
