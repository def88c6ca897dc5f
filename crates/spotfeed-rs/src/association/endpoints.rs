//! Association module endpoints.
//!
//! Fetches the per-vendor association dumps from the selector host. The
//! dumps are regenerated by the collectors; a fetch always returns the
//! whole payload, never a delta.
//!
//! # Usage
//!
//! All endpoint methods are available on [`SpotFeedClient`](crate::client::SpotFeedClient).

use crate::association::models::{
    AwsAssociationDump, AzureAssociationDump, GcpAssociationDump,
};
use crate::client::SpotFeedClient;
use crate::errors::SpotFeedError;

const ASSOCIATION_AWS: &str = "associated/association_aws.json";
const ASSOCIATION_AZURE: &str = "associated/association_azure.json";
const ASSOCIATION_GCP: &str = "associated/association_gcp.json";

impl SpotFeedClient {
    /// Retrieves the AWS association dump.
    ///
    /// **Endpoint:** `GET /query-selector/associated/association_aws.json`
    ///
    /// # Returns
    /// [`AwsAssociationDump`] mapping instance type to its region and zone lists
    pub async fn get_aws_association(&self) -> Result<AwsAssociationDump, SpotFeedError> {
        let resp = self.selector_get(ASSOCIATION_AWS).await?;
        let data: AwsAssociationDump = serde_json::from_str(&resp)
            .map_err(|e| {
                SpotFeedError::Other(
                    format!("Invalid association payload: Parse error: {e}. Response: {resp}"),
                )
            })?;
        Ok(data)
    }


    /// Retrieves the Azure association dump.
    ///
    /// **Endpoint:** `GET /query-selector/associated/association_azure.json`
    ///
    /// # Returns
    /// [`AzureAssociationDump`] mapping instance type to its region list
    pub async fn get_azure_association(&self) -> Result<AzureAssociationDump, SpotFeedError> {
        let resp = self.selector_get(ASSOCIATION_AZURE).await?;
        let data: AzureAssociationDump = serde_json::from_str(&resp)
            .map_err(|e| {
                SpotFeedError::Other(
                    format!("Invalid association payload: Parse error: {e}. Response: {resp}"),
                )
            })?;
        Ok(data)
    }


    /// Retrieves the GCP association dump.
    ///
    /// **Endpoint:** `GET /query-selector/associated/association_gcp.json`
    ///
    /// # Returns
    /// [`GcpAssociationDump`] listing region-to-instances entries
    pub async fn get_gcp_association(&self) -> Result<GcpAssociationDump, SpotFeedError> {
        let resp = self.selector_get(ASSOCIATION_GCP).await?;
        let data: GcpAssociationDump = serde_json::from_str(&resp)
            .map_err(|e| {
                SpotFeedError::Other(
                    format!("Invalid association payload: Parse error: {e}. Response: {resp}"),
                )
            })?;
        Ok(data)
    }
}
