use chrono::NaiveDate;
use serde_json::{Value, json};
use spotgrid::engine::series::{composite_key, normalize_rows, reconstruct};
use spotgrid::types::{DateRange, Vendor};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn range(start: NaiveDate, end: NaiveDate) -> DateRange {
    DateRange { start, end }
}

fn day_start_ms(d: NaiveDate) -> i64 {
    d.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp_millis()
}

fn day_end_ms(d: NaiveDate) -> i64 {
    d.and_hms_milli_opt(23, 59, 59, 999)
        .unwrap()
        .and_utc()
        .timestamp_millis()
}

fn aws_row(az: &str, time: &str, price: f64) -> Value {
    json!({
        "id": 17,
        "InstanceType": "m5.large",
        "Region": "us-east-1",
        "AZ": az,
        "SpotPrice": price,
        "Time": time
    })
}

/// NORMALIZATION
#[test]
fn test_numeric_fields_detected_and_identifiers_excluded() {
    let rows = vec![json!({
        "id": 42,
        "InstanceType": "m5.large",
        "Region": "us-east-1",
        "AZ": "use1-az1",
        "SpotPrice": 0.05,
        "SPS": 3,
        "IF": 2.5,
        "Savings": 70,
        "Time": "2024-01-02 00:00:00"
    })];
    let events = normalize_rows(Vendor::Aws, &rows);
    assert_eq!(events.len(), 1);

    let values = &events[0].values;
    assert_eq!(values.len(), 4);
    assert_eq!(values["SpotPrice"], 0.05);
    assert_eq!(values["SPS"], 3.0);
    assert_eq!(values["IF"], 2.5);
    assert_eq!(values["Savings"], 70.0);
    assert!(!values.contains_key("id"));
}

#[test]
fn test_group_keys_follow_vendor_priority() {
    let aws = normalize_rows(Vendor::Aws, &[aws_row("use1-az1", "2024-01-02 00:00:00", 0.05)]);
    assert_eq!(aws[0].group, "m5.large-us-east-1-use1-az1");

    let azure = normalize_rows(
        Vendor::Azure,
        &[json!({
            "InstanceType": "Standard_D2s_v3",
            "Region": "eastus",
            "AvailabilityZone": 1,
            "SpotPrice": 0.031,
            "Time": "2024-01-02 00:00:00"
        })],
    );
    assert_eq!(azure[0].group, "Standard_D2s_v3-eastus-1");

    let gcp = normalize_rows(
        Vendor::Gcp,
        &[json!({
            "InstanceType": "n2-standard-4",
            "Region": "us-central1",
            "SpotPrice": 0.042,
            "Time": "2024-01-02 00:00:00"
        })],
    );
    assert_eq!(gcp[0].group, "n2-standard-4-us-central1");
}

#[test]
fn test_rows_without_identity_or_time_are_skipped() {
    let rows = vec![
        json!({"Region": "us-east-1", "SpotPrice": 0.05, "Time": "2024-01-02 00:00:00"}),
        json!({"InstanceType": "m5.large", "Region": "us-east-1", "SpotPrice": 0.05}),
        json!({"InstanceType": "m5.large", "Region": "us-east-1", "SpotPrice": 0.05,
               "Time": "not a timestamp"}),
    ];
    assert!(normalize_rows(Vendor::Aws, &rows).is_empty());
}

/// BOUNDARY SYNTHESIS
#[test]
fn test_single_mid_window_event_fills_both_boundaries() {
    let rows = vec![aws_row("use1-az1", "2024-01-02 00:00:00", 0.05)];
    let events = normalize_rows(Vendor::Aws, &rows);
    let table = reconstruct(&events, range(date(2024, 1, 1), date(2024, 1, 3)));

    assert_eq!(table.rows.len(), 3);
    let key = composite_key("SpotPrice", "m5.large-us-east-1-use1-az1");

    let first = &table.rows[0];
    assert_eq!(first.time_ms, day_start_ms(date(2024, 1, 1)));
    // No earlier event exists: the start boundary forward-fills.
    assert_eq!(first.cells[&key], 0.05);

    let last = &table.rows[2];
    assert_eq!(last.time_ms, day_end_ms(date(2024, 1, 3)));
    assert_eq!(last.cells[&key], 0.05);
}

#[test]
fn test_boundaries_are_exact_and_middles_strictly_inside() {
    let rows = vec![
        aws_row("use1-az1", "2023-12-28 10:00:00", 0.04),
        aws_row("use1-az1", "2024-01-01 12:00:00", 0.05),
        aws_row("use1-az1", "2024-01-02 08:00:00", 0.06),
        aws_row("use1-az1", "2024-01-05 00:00:00", 0.09),
    ];
    let events = normalize_rows(Vendor::Aws, &rows);
    let r = range(date(2024, 1, 1), date(2024, 1, 3));
    let table = reconstruct(&events, r);

    let start_ms = day_start_ms(r.start);
    let end_ms = day_end_ms(r.end);

    assert_eq!(table.rows.first().unwrap().time_ms, start_ms);
    assert_eq!(table.rows.last().unwrap().time_ms, end_ms);
    for row in &table.rows[1..table.rows.len() - 1] {
        assert!(row.time_ms > start_ms && row.time_ms < end_ms);
    }
    // Every emitted row lies within the requested window.
    for row in &table.rows {
        assert!(row.time_ms >= start_ms && row.time_ms <= end_ms);
    }

    let key = composite_key("SpotPrice", "m5.large-us-east-1-use1-az1");
    // Start backward-fills from the December event.
    assert_eq!(table.rows[0].cells[&key], 0.04);
    // End backward-fills from the last in-window event; the January 5th
    // change never leaks in.
    assert_eq!(table.rows.last().unwrap().cells[&key], 0.06);
    // The two in-window events pass through verbatim.
    assert_eq!(table.rows.len(), 4);
}

#[test]
fn test_same_timestamp_events_merge_into_one_row() {
    let rows = vec![
        aws_row("use1-az1", "2024-01-02 00:00:00", 0.05),
        aws_row("use1-az2", "2024-01-02 00:00:00", 0.07),
    ];
    let events = normalize_rows(Vendor::Aws, &rows);
    let table = reconstruct(&events, range(date(2024, 1, 1), date(2024, 1, 3)));

    // start boundary + one merged row + end boundary
    assert_eq!(table.rows.len(), 3);
    assert_eq!(table.groups.len(), 2);

    let merged = &table.rows[1];
    let az1 = composite_key("SpotPrice", "m5.large-us-east-1-use1-az1");
    let az2 = composite_key("SpotPrice", "m5.large-us-east-1-use1-az2");
    assert_eq!(merged.cells[&az1], 0.05);
    assert_eq!(merged.cells[&az2], 0.07);
}

#[test]
fn test_end_boundary_never_fills_forward() {
    // The only event lands after the window closes.
    let rows = vec![aws_row("use1-az1", "2024-01-10 00:00:00", 0.08)];
    let events = normalize_rows(Vendor::Aws, &rows);
    let table = reconstruct(&events, range(date(2024, 1, 1), date(2024, 1, 3)));

    // The start boundary may borrow the future value (deliberate
    // fallback); the end boundary must not.
    assert_eq!(table.rows.len(), 2);
    let key = composite_key("SpotPrice", "m5.large-us-east-1-use1-az1");
    assert_eq!(table.rows[0].cells[&key], 0.08);
    assert!(table.rows[1].cells.is_empty());
}

#[test]
fn test_event_before_window_backfills_both_boundaries() {
    let rows = vec![aws_row("use1-az1", "2023-12-01 00:00:00", 0.03)];
    let events = normalize_rows(Vendor::Aws, &rows);
    let table = reconstruct(&events, range(date(2024, 1, 1), date(2024, 1, 3)));

    assert_eq!(table.rows.len(), 2);
    let key = composite_key("SpotPrice", "m5.large-us-east-1-use1-az1");
    assert_eq!(table.rows[0].cells[&key], 0.03);
    assert_eq!(table.rows[1].cells[&key], 0.03);
}

#[test]
fn test_no_events_emit_nothing() {
    let table = reconstruct(&[], range(date(2024, 1, 1), date(2024, 1, 3)));
    assert!(table.rows.is_empty());
    assert!(table.groups.is_empty());
    assert!(table.fields.is_empty());
}

#[test]
fn test_groups_fill_independently() {
    let rows = vec![
        aws_row("use1-az1", "2023-12-30 00:00:00", 0.04),
        aws_row("use1-az2", "2024-01-02 06:00:00", 0.07),
    ];
    let events = normalize_rows(Vendor::Aws, &rows);
    let table = reconstruct(&events, range(date(2024, 1, 1), date(2024, 1, 3)));

    let az1 = composite_key("SpotPrice", "m5.large-us-east-1-use1-az1");
    let az2 = composite_key("SpotPrice", "m5.large-us-east-1-use1-az2");

    let first = &table.rows[0];
    // az1 backward-fills from before the window; az2 has nothing earlier
    // and forward-fills from its first change.
    assert_eq!(first.cells[&az1], 0.04);
    assert_eq!(first.cells[&az2], 0.07);

    let last = table.rows.last().unwrap();
    assert_eq!(last.cells[&az1], 0.04);
    assert_eq!(last.cells[&az2], 0.07);
}
