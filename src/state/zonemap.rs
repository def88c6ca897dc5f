use std::collections::BTreeMap;

use crate::state::topology::TopologyIndex;
use crate::types::{ArchiveFailure, NO_DATA};

// Cardinal tokens in match order. The order matters: codes concatenate in
// the order tokens are tested, so "southeast" derives "se" and a
// hypothetical "eastnorth" would derive "ne".
const DIRECTIONS: [(&str, char); 5] = [
    ("north", 'n'),
    ("south", 's'),
    ("east", 'e'),
    ("west", 'w'),
    ("central", 'c'),
];

/// Derive the zone-id prefix for a region name: `ap-southeast-3` ->
/// `apse3`, `us-west-2` -> `usw2`, `eu-central-1` -> `euc1`.
///
/// Regions that are not exactly `<area>-<direction>-<number>`, or whose
/// direction segment contains no known cardinal token, are unresolvable
/// and yield `None`. Unrecognized direction words inside a compound
/// segment are silently dropped; that matching behavior is load-bearing
/// for existing zone ids and must not be widened.
pub fn derive_zone_prefix(region: &str) -> Option<String> {
    if region.is_empty() || region == NO_DATA {
        return None;
    }
    let parts: Vec<&str> = region.split('-').collect();
    if parts.len() != 3 {
        return None;
    }
    let (area, direction, number) = (parts[0], parts[1], parts[2]);
    let code = parse_direction(direction)?;
    Some(format!("{area}{code}{number}"))
}

fn parse_direction(direction: &str) -> Option<String> {
    // Plain single-token directions.
    for (token, code) in DIRECTIONS {
        if direction == token {
            return Some(code.to_string());
        }
    }
    // Compound directions: take each token found as a substring, in table
    // order, removing the first occurrence so it is not counted twice.
    let mut result = String::new();
    let mut remaining = direction.to_string();
    for (token, code) in DIRECTIONS {
        if remaining.contains(token) {
            result.push(code);
            remaining = remaining.replacen(token, "", 1);
        }
    }
    if result.is_empty() { None } else { Some(result) }
}

/// AWS-only mapping from zone id to its owning region, derived from the
/// zones and regions actually observed in a topology.
///
/// Zones whose region could not be derived are simply absent: they are
/// treated as belonging to no region for filtering purposes, never
/// guessed. Rebuilt whenever the topology is rebuilt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneRegionMap {
    map: BTreeMap<String, String>,
}

impl ZoneRegionMap {
    pub fn build(index: &TopologyIndex) -> Self {
        let zones = index.zone_names();
        let mut map = BTreeMap::new();
        for region in index.region_names() {
            let Some(prefix) = derive_zone_prefix(&region) else {
                continue;
            };
            let prefix = format!("{prefix}-");
            for zone in &zones {
                if zone.starts_with(&prefix) {
                    map.insert(zone.clone(), region.clone());
                }
            }
        }
        Self { map }
    }

    pub fn resolve(&self, zone: &str) -> Option<&str> {
        if zone.is_empty() || zone == NO_DATA {
            return None;
        }
        self.map.get(zone).map(String::as_str)
    }

    pub fn resolve_required(&self, zone: &str) -> Result<&str, ArchiveFailure> {
        self.resolve(zone)
            .ok_or_else(|| ArchiveFailure::UnresolvableZone(zone.to_string()))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
