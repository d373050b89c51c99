#![cfg(test)]
use std::future::pending;
use std::io::Write;
use std::time::Duration;

use sniffr_core::session::StopReason;
use sniffr_core::source::ReplaySource;
use sniffr_core::vendors::{export_unknown, VendorTable};
use sniffr_core::CoreError;
use tempfile::NamedTempFile;

use super::util::session;

fn capture(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file
}

#[tokio::test]
async fn replayed_capture_produces_a_report() {
    let file = capture(&[
        r#"{"id": "phone", "rssi": -60, "name": "Kim's Phone", "manufacturer_data": "4c000c0e"}"#,
        "",
        r#"{"id": "beacon", "address": "5a:11:22:33:44:55", "rssi": -64, "manufacturer_data": "4c001219"}"#,
        "this line is not json",
        r#"{"id": "phone", "rssi": -58, "delay_ms": 5}"#,
        r#"{"id": "band", "rssi": -80, "services": ["180d"]}"#,
    ]);

    let mut source = ReplaySource::open(file.path()).await.unwrap();
    let mut session = session();
    let reason = session.run(&mut source, Duration::from_secs(10), pending()).await;
    assert_eq!(reason, StopReason::SourceExhausted);

    let report = session.finalize().unwrap().unwrap();
    assert_eq!(report.total_events, 4);
    assert_eq!(report.total_records, 3);
    assert_eq!(report.families[0].groups.len(), 1);
    assert_eq!(report.families[0].groups[0].detections, 3);
    assert_eq!(report.unidentified.len(), 1);
    assert_eq!(report.estimated_devices(), 2);
}

#[tokio::test]
async fn missing_capture_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = ReplaySource::open(&dir.path().join("absent.jsonl")).await;
    assert!(matches!(result, Err(CoreError::Io { .. })));
}

#[test]
fn vendor_overrides_and_unknown_export_round_trip_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("vendors.json");
    std::fs::write(&db, r#"{"eeff": "Acme Widgets"}"#).unwrap();

    let mut table = VendorTable::builtin();
    let before = table.len();
    assert_eq!(table.merge_file(&db).unwrap(), 1);
    assert_eq!(table.len(), before + 1);

    let mut session = session();
    session.handle_event(
        &sniffr_common::device::event::AdvertisementEvent::new("x", -70)
            .with_manufacturer_data(vec![0x34, 0x12]),
    );
    let report = session.finalize().unwrap().unwrap();

    let out = dir.path().join("unknown.json");
    export_unknown(&report.unknown_vendors, &out).unwrap();
    let written: Vec<String> = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written, vec!["1234"]);
}
