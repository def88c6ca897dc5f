//! Association module models.
//!
//! Raw shapes of the per-vendor association dumps. Each dump ships as a
//! single-element JSON array wrapping the actual payload; membership lists
//! may contain the literal `"nan"` placeholder where the collector had no
//! data, which consumers are expected to discard.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;


/// One instance type's membership in the AWS dump.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwsAssociationEntry {
    #[serde(rename = "Region", default)]
    pub regions: Vec<String>,
    #[serde(rename = "AZ", default)]
    pub zones: Vec<String>,
}


/// One instance type's membership in the Azure dump. Azure has no
/// per-instance zone list; zones there are a fixed enumeration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AzureAssociationEntry {
    #[serde(rename = "Region", default)]
    pub regions: Vec<String>,
}


/// AWS dump: `[ { "<instance>": { "Region": [...], "AZ": [...] } } ]`.
pub type AwsAssociationDump = Vec<BTreeMap<String, AwsAssociationEntry>>;

/// Azure dump: `[ { "<instance>": { "Region": [...] } } ]`.
pub type AzureAssociationDump = Vec<BTreeMap<String, AzureAssociationEntry>>;

/// GCP dump is inverted relative to the other two:
/// `[ [ { "<region>": ["<instance>", ...] }, ... ] ]`.
pub type GcpAssociationDump = Vec<Vec<BTreeMap<String, Vec<String>>>>;
