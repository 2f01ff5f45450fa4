//! Tests for transaction assembly, wire serialization, and local commit.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use seating_engine::conflict::find_conflict;
use seating_engine::error::BookingError;
use seating_engine::selection::SelectionState;
use seating_engine::slot::{Slot, CLOSING};
use seating_engine::transaction::{build_transaction, commit};
use seating_engine::AvailabilityIndex;
use serde_json::json;

fn date(text: &str) -> NaiveDate {
    text.parse().unwrap()
}

fn slot(text: &str) -> Slot {
    Slot::parse(text).unwrap()
}

fn selection(tables: &[u32]) -> SelectionState {
    SelectionState {
        date: date("2024-06-01"),
        start: slot("19:00"),
        duration_minutes: 60,
        tables: tables.iter().copied().collect(),
    }
}

fn starters(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ── Validation ──────────────────────────────────────────────────────────────

#[test]
fn empty_table_set_is_refused() {
    let index = AvailabilityIndex::new();
    let result = build_transaction(
        &index,
        &selection(&[]),
        4,
        starters(&[]),
        "1 Main St",
        "555-0100",
        CLOSING,
    );
    assert!(matches!(result, Err(BookingError::Validation(_))));
}

#[test]
fn blank_contact_fields_are_refused() {
    let index = AvailabilityIndex::new();
    for (address, phone) in [("", "555-0100"), ("   ", "555-0100"), ("1 Main St", ""), ("1 Main St", "  ")] {
        let result = build_transaction(
            &index,
            &selection(&[7]),
            4,
            starters(&[]),
            address,
            phone,
            CLOSING,
        );
        assert!(
            matches!(result, Err(BookingError::Validation(_))),
            "address={address:?} phone={phone:?} should be refused"
        );
    }
}

#[test]
fn drift_since_the_last_ui_check_is_caught_at_build_time() {
    // The table gets booked between the UI's validation and submit.
    let mut index = AvailabilityIndex::new();
    index.mark_occupied(date("2024-06-01"), slot("19:30"), 30, &BTreeSet::from([7]));

    let result = build_transaction(
        &index,
        &selection(&[7]),
        4,
        starters(&[]),
        "1 Main St",
        "555-0100",
        CLOSING,
    );
    assert!(matches!(
        result,
        Err(BookingError::TableConflict { table: 7, .. })
    ));
}

// ── Wire shape ──────────────────────────────────────────────────────────────

#[test]
fn payload_serializes_with_the_backend_field_names() {
    let index = AvailabilityIndex::new();
    let tx = build_transaction(
        &index,
        &selection(&[7, 2]),
        4,
        starters(&["bread", "water"]),
        "1 Main St",
        "555-0100",
        CLOSING,
    )
    .unwrap();

    let payload = serde_json::to_value(&tx).unwrap();
    assert_eq!(
        payload,
        json!({
            "date": "2024-06-01",
            "hour": "19:00",
            "table": [2, 7],
            "ppl": 4,
            "duration": 1.0,
            "starters": ["bread", "water"],
            "address": "1 Main St",
            "phone": "555-0100",
        })
    );
}

#[test]
fn fractional_durations_survive_the_payload() {
    let index = AvailabilityIndex::new();
    let mut sel = selection(&[7]);
    sel.duration_minutes = 90;

    let tx = build_transaction(&index, &sel, 2, starters(&[]), "1 Main St", "555-0100", CLOSING)
        .unwrap();
    let payload = serde_json::to_value(&tx).unwrap();
    assert_eq!(payload["duration"], json!(1.5));
}

#[test]
fn contact_fields_are_trimmed() {
    let index = AvailabilityIndex::new();
    let tx = build_transaction(
        &index,
        &selection(&[7]),
        4,
        starters(&[]),
        "  1 Main St ",
        " 555-0100 ",
        CLOSING,
    )
    .unwrap();

    assert_eq!(tx.address, "1 Main St");
    assert_eq!(tx.phone, "555-0100");
}

// ── Commit ──────────────────────────────────────────────────────────────────

#[test]
fn committed_booking_is_immediately_visible() {
    let mut index = AvailabilityIndex::new();
    let tx = build_transaction(
        &index,
        &selection(&[7]),
        4,
        starters(&[]),
        "1 Main St",
        "555-0100",
        CLOSING,
    )
    .unwrap();

    commit(&mut index, &tx);

    // The exact committed range now conflicts, with no feed refresh.
    assert_eq!(
        find_conflict(&index, date("2024-06-01"), slot("19:00"), 60, 7),
        Some(slot("19:00"))
    );
    // A second identical transaction is refused at build time.
    let again = build_transaction(
        &index,
        &selection(&[7]),
        4,
        starters(&[]),
        "1 Main St",
        "555-0100",
        CLOSING,
    );
    assert!(matches!(
        again,
        Err(BookingError::TableConflict { table: 7, .. })
    ));
}

#[test]
fn commit_occupies_every_selected_table() {
    let mut index = AvailabilityIndex::new();
    let tx = build_transaction(
        &index,
        &selection(&[2, 7]),
        6,
        starters(&[]),
        "1 Main St",
        "555-0100",
        CLOSING,
    )
    .unwrap();

    commit(&mut index, &tx);

    let occupants = index.occupants_at(date("2024-06-01"), slot("19:30"));
    assert_eq!(occupants, &BTreeSet::from([2, 7]));
}
