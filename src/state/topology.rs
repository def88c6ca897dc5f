use std::collections::{BTreeMap, BTreeSet};

use spotfeed_rs::association::models::{
    AwsAssociationDump, AzureAssociationDump, GcpAssociationDump,
};

use crate::types::{ArchiveFailure, Vendor, NO_DATA};

/// One instance type's membership: the regions it is offered in and (AWS
/// only) the zones it is offered in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstanceOffer {
    pub regions: BTreeSet<String>,
    pub zones: BTreeSet<String>,
}

/// Per-vendor bidirectional membership over instance types, regions and
/// zones, built once from a raw association dump.
///
/// Forward and reverse indices are filled together, so membership is
/// symmetric by construction: `R ∈ regions_for(I)` iff `I ∈
/// instances_in(R)`. The index is immutable once built; a new dump
/// produces a new index, never an in-place patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopologyIndex {
    vendor: Vendor,
    instances: BTreeMap<String, InstanceOffer>,
    regions: BTreeMap<String, BTreeSet<String>>,
    zones: BTreeMap<String, BTreeSet<String>>,
}

impl TopologyIndex {
    fn empty(vendor: Vendor) -> Self {
        Self {
            vendor,
            instances: BTreeMap::new(),
            regions: BTreeMap::new(),
            zones: BTreeMap::new(),
        }
    }

    /// Build from the AWS dump: `[{ "<instance>": {Region, AZ} }]`.
    pub fn from_aws(dump: &AwsAssociationDump) -> Result<Self, ArchiveFailure> {
        let entries = dump
            .first()
            .ok_or(ArchiveFailure::TopologyUnavailable(Vendor::Aws))?;
        let mut index = Self::empty(Vendor::Aws);
        for (instance, entry) in entries {
            index.link(instance, &entry.regions, &entry.zones);
        }
        Ok(index)
    }

    /// Build from the Azure dump: `[{ "<instance>": {Region} }]`.
    pub fn from_azure(dump: &AzureAssociationDump) -> Result<Self, ArchiveFailure> {
        let entries = dump
            .first()
            .ok_or(ArchiveFailure::TopologyUnavailable(Vendor::Azure))?;
        let mut index = Self::empty(Vendor::Azure);
        for (instance, entry) in entries {
            index.link(instance, &entry.regions, &[]);
        }
        Ok(index)
    }

    /// Build from the GCP dump, which is inverted: `[[{ "<region>":
    /// [instances] }]]`.
    pub fn from_gcp(dump: &GcpAssociationDump) -> Result<Self, ArchiveFailure> {
        let entries = dump
            .first()
            .ok_or(ArchiveFailure::TopologyUnavailable(Vendor::Gcp))?;
        let mut index = Self::empty(Vendor::Gcp);
        for obj in entries {
            for (region, instances) in obj {
                for instance in instances {
                    index.link(instance, std::slice::from_ref(region), &[]);
                }
            }
        }
        Ok(index)
    }

    /// Record one instance's membership, dropping "nan" placeholders and
    /// filling forward and reverse indices in the same pass.
    fn link(&mut self, instance: &str, regions: &[String], zones: &[String]) {
        for r in regions.iter().filter(|r| r.as_str() != NO_DATA) {
            self.regions
                .entry(r.clone())
                .or_default()
                .insert(instance.to_string());
        }
        for z in zones.iter().filter(|z| z.as_str() != NO_DATA) {
            self.zones
                .entry(z.clone())
                .or_default()
                .insert(instance.to_string());
        }
        let offer = self.instances.entry(instance.to_string()).or_default();
        offer
            .regions
            .extend(regions.iter().filter(|r| r.as_str() != NO_DATA).cloned());
        offer
            .zones
            .extend(zones.iter().filter(|z| z.as_str() != NO_DATA).cloned());
    }

    pub fn vendor(&self) -> Vendor {
        self.vendor
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn instance_names(&self) -> Vec<String> {
        self.instances.keys().cloned().collect()
    }

    pub fn region_names(&self) -> Vec<String> {
        self.regions.keys().cloned().collect()
    }

    pub fn zone_names(&self) -> Vec<String> {
        self.zones.keys().cloned().collect()
    }

    pub fn regions_for(&self, instance: &str) -> Option<&BTreeSet<String>> {
        self.instances.get(instance).map(|o| &o.regions)
    }

    pub fn zones_for(&self, instance: &str) -> Option<&BTreeSet<String>> {
        self.instances.get(instance).map(|o| &o.zones)
    }

    pub fn instances_in(&self, region: &str) -> Option<&BTreeSet<String>> {
        self.regions.get(region)
    }

    /// True when the instance is offered in the region.
    pub fn offers(&self, instance: &str, region: &str) -> bool {
        self.regions_for(instance).is_some_and(|r| r.contains(region))
    }
}
