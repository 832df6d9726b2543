//! Tests for ledger egress and timeline export

use std::time::{Duration, Instant};

use tasksched::core::{timeline, timeline_json, ExecutionLedger, TimelineEntry, WorkItem};

#[test]
fn test_records_keep_insertion_order() {
    let ledger = ExecutionLedger::new();
    let start = Instant::now();
    for (i, station) in ["Bus", "Airport", "Bus"].iter().enumerate() {
        let item = WorkItem::with_id(format!("w{i}"), "x", 1, 1);
        ledger.record(station, &item, start, 1).unwrap();
    }
    let ids: Vec<_> = ledger.snapshot().into_iter().map(|r| r.work_item_id).collect();
    assert_eq!(ids, ["w0", "w1", "w2"]);
    assert_eq!(ledger.records_for("Bus").len(), 2);
}

#[test]
fn test_start_measured_from_epoch() {
    let ledger = ExecutionLedger::new();
    let item = WorkItem::with_id("w", "x", 1, 1);
    let later = ledger.epoch() + Duration::from_millis(250);
    ledger.record("Bus", &item, later, 1).unwrap();
    assert_eq!(ledger.snapshot()[0].start, Duration::from_millis(250));
}

#[test]
fn test_timeline_json_round_trips() {
    let ledger = ExecutionLedger::new();
    let item = WorkItem::with_id("w", "Visitor Anna#3", 2, 1);
    ledger.record("Amusement", &item, ledger.epoch(), 2).unwrap();
    let records = ledger.drain();

    let json = timeline_json(&records).unwrap();
    let parsed: Vec<TimelineEntry> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, timeline(&records));
    assert_eq!(parsed[0].label, "Visitor Anna#3");
}
