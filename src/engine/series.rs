use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde_json::Value;

use spotfeed_rs::parse_feed_time;

use crate::types::{DateRange, Vendor};

/// Fields never charted even when numeric.
const IDENTIFIER_FIELDS: [&str; 2] = ["id", "ID"];

/// One normalized observation from the change-log feed: the entity group
/// it belongs to, its instant, and its numeric fields.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesEvent {
    pub group: String,
    pub time_ms: i64,
    pub values: BTreeMap<String, f64>,
}

/// One dense output row: an instant plus `field__group` composite cells
/// holding the most recently known value per curve.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesRow {
    pub time_ms: i64,
    pub cells: BTreeMap<String, f64>,
}

/// Boundary-complete table ready for step-wise charting. Consumers render
/// with hold-last-value interpolation, never linear.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesTable {
    pub rows: Vec<SeriesRow>,
    pub groups: Vec<String>,
    pub fields: Vec<String>,
    /// Exactly the remote row cap came back; the tail may be missing.
    pub truncated: bool,
}

/// Composite cell key separating concurrent curves on one time axis.
pub fn composite_key(field: &str, group: &str) -> String {
    format!("{field}__{group}")
}

/// Every field that is numeric anywhere in the result set, identifier
/// fields excluded.
fn detect_numeric_fields(rows: &[Value]) -> BTreeSet<String> {
    let mut fields = BTreeSet::new();
    for row in rows {
        let Some(obj) = row.as_object() else { continue };
        for (key, value) in obj {
            if value.is_number() && !IDENTIFIER_FIELDS.contains(&key.as_str()) {
                fields.insert(key.clone());
            }
        }
    }
    fields
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// The raw field carrying a row's zone, where the vendor has one.
fn zone_field(vendor: Vendor) -> Option<&'static str> {
    match vendor {
        Vendor::Aws => Some("AZ"),
        Vendor::Azure => Some("AvailabilityZone"),
        Vendor::Gcp => None,
    }
}

/// Entity-group key in vendor priority order: `(instance, region, zone)`
/// when the row carries a zone, else `(instance, region)`.
fn group_key(vendor: Vendor, obj: &serde_json::Map<String, Value>) -> Option<String> {
    let instance = obj.get("InstanceType").and_then(scalar_to_string)?;
    let region = obj.get("Region").and_then(scalar_to_string)?;
    let zone = zone_field(vendor)
        .and_then(|f| obj.get(f))
        .and_then(scalar_to_string);
    Some(match zone {
        Some(z) => format!("{instance}-{region}-{z}"),
        None => format!("{instance}-{region}"),
    })
}

/// Map raw feed rows for one vendor into normalized events. Rows without
/// a parseable timestamp or identity are skipped.
pub fn normalize_rows(vendor: Vendor, rows: &[Value]) -> Vec<SeriesEvent> {
    let numeric = detect_numeric_fields(rows);
    rows.iter()
        .filter_map(|row| {
            let obj = row.as_object()?;
            let time = obj
                .get("Time")
                .or_else(|| obj.get("time"))
                .and_then(Value::as_str)?;
            let time_ms = parse_feed_time(time)?.timestamp_millis();
            let group = group_key(vendor, obj)?;
            let mut values = BTreeMap::new();
            for key in &numeric {
                if let Some(v) = obj.get(key).and_then(Value::as_f64) {
                    values.insert(key.clone(), v);
                }
            }
            Some(SeriesEvent {
                group,
                time_ms,
                values,
            })
        })
        .collect()
}

fn day_start_ms(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or(0)
}

fn day_end_ms(date: NaiveDate) -> i64 {
    date.and_hms_milli_opt(23, 59, 59, 999)
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or(0)
}

/// Reconstruct a dense, boundary-complete table from sparse change events.
///
/// The feed only records instants where something changed, so the output
/// is synthesized in four parts:
/// 1. events sharing a timestamp merge into one row of composite cells,
/// 2. a start-boundary row at `range.start` backward-fills every curve
///    from the nearest earlier value, falling forward to the first later
///    value when no earlier one exists (the chart must not open blank
///    when the first change lands mid-window),
/// 3. an end-boundary row at `range.end` backward-fills only, so a curve
///    never extends past the requested window,
/// 4. merged rows strictly inside `(start, end]` pass through verbatim.
///
/// Nothing is emitted when no part carries a value.
pub fn reconstruct(events: &[SeriesEvent], range: DateRange) -> SeriesTable {
    let mut groups = BTreeSet::new();
    let mut fields = BTreeSet::new();
    let mut by_time: BTreeMap<i64, BTreeMap<String, f64>> = BTreeMap::new();

    for event in events {
        groups.insert(event.group.clone());
        for (field, value) in &event.values {
            fields.insert(field.clone());
            by_time
                .entry(event.time_ms)
                .or_default()
                .insert(composite_key(field, &event.group), *value);
        }
    }

    // BTreeMap iteration is already ascending by timestamp.
    let sorted: Vec<SeriesRow> = by_time
        .into_iter()
        .map(|(time_ms, cells)| SeriesRow { time_ms, cells })
        .collect();

    let start_ms = day_start_ms(range.start);
    let end_ms = day_end_ms(range.end);

    let mut start_row = SeriesRow {
        time_ms: start_ms,
        cells: BTreeMap::new(),
    };
    let mut end_row = SeriesRow {
        time_ms: end_ms,
        cells: BTreeMap::new(),
    };
    let mut has_start = false;
    let mut has_end = false;

    for field in &fields {
        for group in &groups {
            let key = composite_key(field, group);

            let backward = sorted
                .iter()
                .rev()
                .find(|r| r.time_ms <= start_ms && r.cells.contains_key(&key))
                .or_else(|| {
                    sorted
                        .iter()
                        .find(|r| r.time_ms > start_ms && r.cells.contains_key(&key))
                });
            if let Some(row) = backward {
                start_row.cells.insert(key.clone(), row.cells[&key]);
                has_start = true;
            }

            let closing = sorted
                .iter()
                .rev()
                .find(|r| r.time_ms <= end_ms && r.cells.contains_key(&key));
            if let Some(row) = closing {
                end_row.cells.insert(key.clone(), row.cells[&key]);
                has_end = true;
            }
        }
    }

    let middle: Vec<SeriesRow> = sorted
        .into_iter()
        .filter(|r| r.time_ms > start_ms && r.time_ms <= end_ms)
        .collect();

    let mut rows = Vec::new();
    if has_start || !middle.is_empty() || has_end {
        rows.push(start_row);
        rows.extend(middle);
        rows.push(end_row);
    }

    SeriesTable {
        rows,
        groups: groups.into_iter().collect(),
        fields: fields.into_iter().collect(),
        truncated: false,
    }
}
