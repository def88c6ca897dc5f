use chrono::{Months, NaiveDate};

use spotfeed_rs::query::models::HistoryQuery;

use crate::state::vendor::VendorTopology;
use crate::types::{ALL, ArchiveFailure, DateRange, FilterEdit, Vendor, WILDCARD};

/// Azure's zone choices are a fixed enumeration, independent of topology.
pub const AZURE_ZONES: &[&str] = &["ALL", "1", "2", "3", "Single"];

/// How a vendor's filter fields constrain each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyRule {
    /// Strict left-to-right chain: Instance -> Region -> AZ. Downstream
    /// controls stay disabled until their upstream field is set.
    Chain,
    /// Region and Instance constrain each other; no ordering between them.
    Mutual,
}

/// Where a vendor's zone options come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneSource {
    /// Derived from the topology's per-instance zone sets plus the
    /// zone-region map.
    Derived,
    /// Fixed enumeration, never derived from data.
    Fixed(&'static [&'static str]),
    /// Vendor has no zone field at all.
    None,
}

/// Per-vendor dependency shape. Adding a vendor is a data change here,
/// not new control flow in the resolver.
#[derive(Debug, Clone, Copy)]
pub struct FilterSpec {
    pub rule: DependencyRule,
    pub zones: ZoneSource,
}

pub fn spec_for(vendor: Vendor) -> FilterSpec {
    match vendor {
        Vendor::Aws => FilterSpec {
            rule: DependencyRule::Chain,
            zones: ZoneSource::Derived,
        },
        Vendor::Azure => FilterSpec {
            rule: DependencyRule::Mutual,
            zones: ZoneSource::Fixed(AZURE_ZONES),
        },
        Vendor::Gcp => FilterSpec {
            rule: DependencyRule::Mutual,
            zones: ZoneSource::None,
        },
    }
}

/// The user's current selection. `None` = unset; the literal "ALL" is the
/// wildcard and is always a valid terminal choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub instance: Option<String>,
    pub region: Option<String>,
    pub az: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl FilterState {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            instance: None,
            region: None,
            az: None,
            start_date,
            end_date,
        }
    }
}

/// Valid options per field plus interactivity gating, recomputed on every
/// edit and exposed to collaborators as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOptions {
    pub instances: Vec<String>,
    pub regions: Vec<String>,
    pub azs: Vec<String>,
    pub region_enabled: bool,
    pub az_enabled: bool,
}

/// One vendor's filter state and option sets, what a rendering
/// collaborator needs to draw the three selects and the date pickers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSession {
    pub vendor: Vendor,
    pub state: FilterState,
    pub options: FieldOptions,
}

impl FilterSession {
    /// Fresh session: nothing selected, dates defaulting to yesterday
    /// through today, options derived from the topology (or degraded to
    /// wildcard-only when none is loaded).
    pub fn initial(vendor: Vendor, topology: Option<&VendorTopology>, today: NaiveDate) -> Self {
        let resolver = FilterResolver::new(vendor, topology);
        let yesterday = today.pred_opt().unwrap_or(today);
        let mut session = FilterSession {
            vendor,
            state: FilterState::new(yesterday, today),
            options: resolver.initial_options(),
        };
        resolver.gate(&mut session);
        session
    }
}

fn wildcard_only() -> Vec<String> {
    vec![ALL.to_string()]
}

/// Applies filter edits for one vendor against one topology load,
/// producing the next consistent session. Pure: no I/O, no shared state.
///
/// The resolver never leaves a session whose concrete field values are
/// mutually inconsistent with the topology: an edit either keeps a
/// downstream selection that is still valid or clears it.
pub struct FilterResolver<'a> {
    vendor: Vendor,
    spec: FilterSpec,
    topology: Option<&'a VendorTopology>,
}

impl<'a> FilterResolver<'a> {
    pub fn new(vendor: Vendor, topology: Option<&'a VendorTopology>) -> Self {
        Self {
            vendor,
            spec: spec_for(vendor),
            topology,
        }
    }

    /// Full option sets for an empty selection. With no topology loaded
    /// every set degrades to the wildcard singleton.
    pub fn initial_options(&self) -> FieldOptions {
        let Some(topo) = self.topology else {
            return FieldOptions {
                instances: wildcard_only(),
                regions: wildcard_only(),
                azs: wildcard_only(),
                region_enabled: false,
                az_enabled: false,
            };
        };
        let azs = match self.spec.zones {
            ZoneSource::Derived => wildcard_only(),
            ZoneSource::Fixed(list) => list.iter().map(|s| s.to_string()).collect(),
            ZoneSource::None => Vec::new(),
        };
        FieldOptions {
            instances: topo.index.instance_names(),
            regions: std::iter::once(ALL.to_string())
                .chain(topo.index.region_names())
                .collect(),
            azs,
            region_enabled: false,
            az_enabled: false,
        }
    }

    /// Apply one edit, returning the next consistent session.
    pub fn apply(&self, session: &FilterSession, edit: FilterEdit) -> FilterSession {
        let mut next = session.clone();
        match edit {
            FilterEdit::StartDate(d) => {
                next.state.start_date = d;
                // Moving the start forward can push the span past the
                // service limit; pull the end in with it.
                if let Some(cap) = d.checked_add_months(Months::new(1)) {
                    if next.state.end_date > cap {
                        next.state.end_date = cap;
                    }
                }
            }
            FilterEdit::EndDate(d) => next.state.end_date = d,
            FilterEdit::Instance(v) => self.apply_instance(&mut next, v),
            FilterEdit::Region(v) => self.apply_region(&mut next, v),
            FilterEdit::Zone(v) => next.state.az = v,
        }
        self.gate(&mut next);
        next
    }

    fn apply_instance(&self, next: &mut FilterSession, v: Option<String>) {
        let Some(topo) = self.topology else {
            return;
        };
        match self.spec.rule {
            DependencyRule::Chain => match &v {
                Some(val) if val != ALL => {
                    let Some(regions) = topo.index.regions_for(val) else {
                        // Unknown instance type: ignore the edit.
                        return;
                    };
                    next.options.regions = std::iter::once(ALL.to_string())
                        .chain(regions.iter().cloned())
                        .collect();
                    let kept_region = next
                        .state
                        .region
                        .as_deref()
                        .filter(|r| *r != ALL && regions.contains(*r))
                        .map(str::to_string);
                    match kept_region {
                        Some(region) => {
                            // The previous region still works for this
                            // instance; only the zone choice resets.
                            next.options.azs = self.zone_options(val, &region);
                            next.state.instance = v;
                            next.state.az = None;
                        }
                        None => {
                            next.options.azs = wildcard_only();
                            next.state.instance = v;
                            next.state.region = None;
                            next.state.az = None;
                        }
                    }
                }
                _ => {
                    next.options.regions = wildcard_only();
                    next.options.azs = wildcard_only();
                    next.state.instance = v;
                    next.state.region = None;
                    next.state.az = None;
                }
            },
            DependencyRule::Mutual => {
                next.state.instance = v.clone();
                if let Some(val) = v.as_deref().filter(|s| *s != ALL) {
                    if let Some(regions) = topo.index.regions_for(val) {
                        next.options.regions = std::iter::once(ALL.to_string())
                            .chain(regions.iter().cloned())
                            .collect();
                    }
                }
                // Wildcard or cleared: "ALL" never narrows, options stand.
            }
        }
    }

    fn apply_region(&self, next: &mut FilterSession, v: Option<String>) {
        let Some(topo) = self.topology else {
            return;
        };
        match self.spec.rule {
            DependencyRule::Chain => {
                // A region change always invalidates the zone choice.
                next.state.region = v.clone();
                next.state.az = None;
                let concrete_region = v.as_deref().filter(|r| *r != ALL);
                let concrete_instance = next
                    .state
                    .instance
                    .as_deref()
                    .filter(|i| *i != ALL);
                next.options.azs = match (concrete_instance, concrete_region) {
                    (Some(i), Some(r)) => self.zone_options(i, r),
                    _ => wildcard_only(),
                };
            }
            DependencyRule::Mutual => {
                next.state.region = v.clone();
                if let Some(val) = v.as_deref().filter(|s| *s != ALL) {
                    if let Some(instances) = topo.index.instances_in(val) {
                        next.options.instances = instances.iter().cloned().collect();
                    }
                }
            }
        }
    }

    /// Zones of `instance` whose derived region is `region`, wildcard
    /// first. Collapses to the wildcard singleton when nothing matches;
    /// never an error.
    fn zone_options(&self, instance: &str, region: &str) -> Vec<String> {
        let Some(topo) = self.topology else {
            return wildcard_only();
        };
        let (Some(zonemap), Some(zones)) = (topo.zones.as_ref(), topo.index.zones_for(instance))
        else {
            return wildcard_only();
        };
        let subset: Vec<String> = zones
            .iter()
            .filter(|z| zonemap.resolve(z) == Some(region))
            .cloned()
            .collect();
        if subset.is_empty() {
            wildcard_only()
        } else {
            std::iter::once(ALL.to_string()).chain(subset).collect()
        }
    }

    /// Recompute which downstream controls are interactive.
    pub fn gate(&self, next: &mut FilterSession) {
        match self.spec.rule {
            DependencyRule::Chain => {
                next.options.region_enabled = next.state.instance.is_some();
                next.options.az_enabled = next.state.region.is_some();
            }
            DependencyRule::Mutual => {
                next.options.region_enabled = true;
                next.options.az_enabled = matches!(self.spec.zones, ZoneSource::Fixed(_));
            }
        }
    }

    /// Re-derive a session against a fresh topology load by replaying the
    /// previous selection left to right. Selections the new topology no
    /// longer supports are dropped; what survives is consistent by
    /// construction.
    pub fn rebuild(&self, session: &FilterSession) -> FilterSession {
        let mut next = FilterSession {
            vendor: self.vendor,
            state: FilterState::new(session.state.start_date, session.state.end_date),
            options: self.initial_options(),
        };
        self.gate(&mut next);

        if let Some(i) = session.state.instance.clone() {
            next = self.apply(&next, FilterEdit::Instance(Some(i)));
        }
        if self.spec.rule == DependencyRule::Chain && next.state.instance.is_none() {
            return next;
        }
        if let Some(r) = session.state.region.clone() {
            if next.options.regions.contains(&r) {
                next = self.apply(&next, FilterEdit::Region(Some(r)));
            }
        }
        if let Some(z) = session.state.az.clone() {
            let valid = match self.spec.zones {
                ZoneSource::Derived => next.options.azs.contains(&z),
                ZoneSource::Fixed(list) => list.contains(&z.as_str()),
                ZoneSource::None => false,
            };
            if valid {
                next = self.apply(&next, FilterEdit::Zone(Some(z)));
            }
        }
        next
    }
}

/// Validate a submission and build the wire query.
///
/// Rejections happen before any remote call: missing required fields (AWS
/// additionally requires the zone), bad date spans, concrete values while
/// no topology is loaded, and AWS zones that resolve to no region or to a
/// different region than the selected one.
pub fn validate_submission(
    vendor: Vendor,
    topology: Option<&VendorTopology>,
    state: &FilterState,
    max_range_months: u32,
) -> Result<(HistoryQuery, DateRange), ArchiveFailure> {
    let spec = spec_for(vendor);

    let instance = state
        .instance
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            ArchiveFailure::InvalidFilterSubmission("instance is not set".to_string())
        })?;
    let region = state
        .region
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ArchiveFailure::InvalidFilterSubmission("region is not set".to_string()))?;
    let az: Option<&str> = match spec.zones {
        ZoneSource::Derived => {
            let z = state.az.as_deref().filter(|s| !s.is_empty()).ok_or_else(|| {
                ArchiveFailure::InvalidFilterSubmission("AZ is not set".to_string())
            })?;
            Some(z)
        }
        ZoneSource::Fixed(_) => Some(state.az.as_deref().unwrap_or(ALL)),
        ZoneSource::None => None,
    };

    if state.start_date > state.end_date {
        return Err(ArchiveFailure::InvalidDateRange(
            "start date is after end date".to_string(),
        ));
    }
    let cap = state
        .start_date
        .checked_add_months(Months::new(max_range_months))
        .ok_or_else(|| {
            ArchiveFailure::InvalidDateRange("start date out of range".to_string())
        })?;
    if state.end_date > cap {
        return Err(ArchiveFailure::InvalidDateRange(format!(
            "span exceeds {} month(s)",
            max_range_months
        )));
    }

    let concrete = std::iter::once(instance)
        .chain(std::iter::once(region))
        .chain(az)
        .any(|s| s != ALL);
    match topology {
        None if concrete => {
            return Err(ArchiveFailure::InvalidFilterSubmission(
                "association data is not loaded".to_string(),
            ));
        }
        None => {}
        Some(topo) => {
            if vendor == Vendor::Aws {
                if let (Some(z), Some(zonemap)) = (az, topo.zones.as_ref()) {
                    if z != ALL {
                        let owner = zonemap.resolve_required(z)?;
                        if region != ALL && owner != region {
                            return Err(ArchiveFailure::InvalidFilterSubmission(format!(
                                "zone {} is not in region {}",
                                z, region
                            )));
                        }
                    }
                }
            }
        }
    }

    let wild = |s: &str| {
        if s == ALL {
            WILDCARD.to_string()
        } else {
            s.to_string()
        }
    };
    let params = HistoryQuery {
        table_name: vendor.table_name().to_string(),
        instance_type: wild(instance),
        region: wild(region),
        az: (vendor == Vendor::Aws).then(|| wild(az.unwrap_or(ALL))),
        instance_tier: (vendor == Vendor::Azure).then(|| WILDCARD.to_string()),
        availability_zone: (vendor == Vendor::Azure).then(|| wild(az.unwrap_or(ALL))),
        start: state.start_date.format("%Y-%m-%d").to_string(),
        end: state.end_date.format("%Y-%m-%d").to_string(),
    };
    Ok((
        params,
        DateRange {
            start: state.start_date,
            end: state.end_date,
        },
    ))
}
