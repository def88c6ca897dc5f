use chrono::{TimeZone, Utc};
use spotfeed_rs::parse_feed_time;
#[test]
fn test_collector_timestamp_format() {
    let parsed = parse_feed_time("2024-01-02 00:00:00").unwrap();
    assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap());
}
#[test]
fn test_rfc3339_variants() {
    let zulu = parse_feed_time("2024-01-02T09:30:00Z").unwrap();
    assert_eq!(zulu, Utc.with_ymd_and_hms(2024, 1, 2, 9, 30, 0).unwrap());

    let offset = parse_feed_time("2024-01-02T09:30:00+09:00").unwrap();
    assert_eq!(offset, Utc.with_ymd_and_hms(2024, 1, 2, 0, 30, 0).unwrap());

    let bare = parse_feed_time("2024-01-02T09:30:00").unwrap();
    assert_eq!(bare, Utc.with_ymd_and_hms(2024, 1, 2, 9, 30, 0).unwrap());
}
#[test]
fn test_garbage_is_rejected() {
    assert!(parse_feed_time("not a timestamp").is_none());
    assert!(parse_feed_time("").is_none());
    assert!(parse_feed_time("2024-13-40 99:99:99").is_none());
}
