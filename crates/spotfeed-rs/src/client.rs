use crate::errors::SpotFeedError;
use crate::helpers;
use reqwest::Client;


// Default feed hosts for the production archive deployment.
const SELECTOR_BASE: &str = "https://d3k1qgrv82x0hc.cloudfront.net/query-selector/";
const QUERY_BASE: &str = "https://d3k1qgrv82x0hc.cloudfront.net/query-api/";
const LATEST_BASE: &str = "https://spotgrid-archive.s3.us-west-2.amazonaws.com/latest_data/";


/// Client for the spotgrid archive feeds.
///
/// All three feeds are public GETs; the client carries one `reqwest` client
/// and the three base URLs.
///
/// # Available Feed Categories
///
/// ## Association
/// - [`get_aws_association`](SpotFeedClient::get_aws_association) - AWS instance/region/zone dump
/// - [`get_azure_association`](SpotFeedClient::get_azure_association) - Azure instance/region dump
/// - [`get_gcp_association`](SpotFeedClient::get_gcp_association) - GCP region/instance dump
///
/// ## Query
/// - [`get_history`](SpotFeedClient::get_history) - historical range query
///
/// ## Latest
/// - [`get_latest`](SpotFeedClient::get_latest) - latest snapshot rows for one vendor table
///
/// # Example
/// ```no_run
/// use spotfeed_rs::SpotFeedClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = SpotFeedClient::new();
/// let rows = client.get_latest("aws").await?;
/// println!("{} current rows", rows.len());
/// # Ok(())
/// # }
/// ```
pub struct SpotFeedClient {
    pub(crate) http_client: Client,
    pub(crate) selector_base: String,
    pub(crate) query_base: String,
    pub(crate) latest_base: String,
}


impl SpotFeedClient {
    /// Create a new SpotFeedClient pointed at the default feed hosts
    pub fn new() -> SpotFeedClient {
        SpotFeedClient {
            http_client: Client::new(),
            selector_base: SELECTOR_BASE.to_string(),
            query_base: QUERY_BASE.to_string(),
            latest_base: LATEST_BASE.to_string(),
        }
    }


    /// Create a new SpotFeedClient with custom feed hosts
    /// Useful for testing or pointing at a staging deployment
    pub fn new_with_config(
        selector_base: Option<String>,
        query_base: Option<String>,
        latest_base: Option<String>,
    ) -> SpotFeedClient {
        SpotFeedClient {
            http_client: Client::new(),
            selector_base: selector_base.unwrap_or_else(|| SELECTOR_BASE.to_string()),
            query_base: query_base.unwrap_or_else(|| QUERY_BASE.to_string()),
            latest_base: latest_base.unwrap_or_else(|| LATEST_BASE.to_string()),
        }
    }


    /// Wrapper for GET requests against the selector (association) host
    pub async fn selector_get(&self, path: &str) -> Result<String, SpotFeedError> {
        helpers::fetch_get(&self.http_client, &self.selector_base, path).await
    }


    /// Wrapper for GET requests against the query host
    pub async fn query_get(&self, path: &str) -> Result<String, SpotFeedError> {
        helpers::fetch_get(&self.http_client, &self.query_base, path).await
    }


    /// Wrapper for GET requests against the latest-snapshot host
    pub async fn latest_get(&self, path: &str) -> Result<String, SpotFeedError> {
        helpers::fetch_get(&self.http_client, &self.latest_base, path).await
    }
}

impl Default for SpotFeedClient {
    fn default() -> Self {
        Self::new()
    }
}
