//! Tests for half-hour slot parsing, conversion, and range iteration.

use seating_engine::error::BookingError;
use seating_engine::slot::{
    self, duration_from_hours, duration_hours, is_within_operating_hours, Slot, CLOSING, OPENING,
};

#[test]
fn parse_on_the_hour_and_half_hour() {
    assert_eq!(Slot::parse("12:00").unwrap().hours(), 12.0);
    assert_eq!(Slot::parse("13:30").unwrap().hours(), 13.5);
    assert_eq!(Slot::parse("00:00").unwrap().hours(), 0.0);
    assert_eq!(Slot::parse("23:30").unwrap().hours(), 23.5);
}

#[test]
fn parse_rejects_malformed_text() {
    for text in ["", "noon", "12", "12:", ":30", "12:3", "12:300", "xx:30"] {
        assert!(
            matches!(Slot::parse(text), Err(BookingError::InvalidHour(_))),
            "{text:?} should be rejected"
        );
    }
}

#[test]
fn parse_rejects_off_grid_minutes() {
    // A half-hour index has no key for 12:15.
    assert!(matches!(
        Slot::parse("12:15"),
        Err(BookingError::InvalidHour(_))
    ));
    assert!(matches!(
        Slot::parse("12:01"),
        Err(BookingError::InvalidHour(_))
    ));
}

#[test]
fn parse_rejects_out_of_range_hours() {
    assert!(Slot::parse("24:00").is_err());
    assert!(Slot::parse("25:30").is_err());
}

#[test]
fn from_hours_matches_parse() {
    assert_eq!(Slot::from_hours(13.5).unwrap(), Slot::parse("13:30").unwrap());
    assert_eq!(Slot::from_hours(0.0).unwrap(), Slot::parse("00:00").unwrap());
    // 24.0 is the closing boundary, valid as a window edge but not as "HH:MM".
    assert_eq!(Slot::from_hours(24.0).unwrap(), CLOSING);
}

#[test]
fn from_hours_rejects_off_grid_values() {
    assert!(Slot::from_hours(13.25).is_err());
    assert!(Slot::from_hours(-0.5).is_err());
    assert!(Slot::from_hours(24.5).is_err());
    assert!(Slot::from_hours(f64::NAN).is_err());
}

#[test]
fn display_formats_as_hour_text() {
    assert_eq!(Slot::parse("09:00").unwrap().to_string(), "09:00");
    assert_eq!(Slot::parse("18:30").unwrap().to_string(), "18:30");
    assert_eq!(Slot::parse("00:30").unwrap().to_string(), "00:30");
}

#[test]
fn serde_round_trips_through_hour_text() {
    let slot = Slot::parse("19:30").unwrap();
    let json = serde_json::to_string(&slot).unwrap();
    assert_eq!(json, "\"19:30\"");
    let back: Slot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, slot);
}

#[test]
fn duration_conversion_round_trips() {
    assert_eq!(duration_from_hours(2.0).unwrap(), 120);
    assert_eq!(duration_from_hours(1.5).unwrap(), 90);
    assert_eq!(duration_from_hours(0.0).unwrap(), 0);
    assert_eq!(duration_hours(90), 1.5);
}

#[test]
fn duration_rejects_off_grid_and_negative_values() {
    assert!(matches!(
        duration_from_hours(1.25),
        Err(BookingError::InvalidDuration(_))
    ));
    assert!(duration_from_hours(-1.0).is_err());
    assert!(duration_from_hours(24.5).is_err());
}

#[test]
fn slots_in_range_excludes_the_end() {
    // 18:00 for 2 hours covers four slots, 20:00 is not among them.
    let slots: Vec<String> = slot::slots_in_range(Slot::parse("18:00").unwrap(), 120)
        .map(|s| s.to_string())
        .collect();
    assert_eq!(slots, ["18:00", "18:30", "19:00", "19:30"]);
}

#[test]
fn zero_duration_range_is_empty() {
    let mut range = slot::slots_in_range(Slot::parse("12:00").unwrap(), 0);
    assert!(range.next().is_none());
}

#[test]
fn ranges_are_restartable() {
    let range = slot::slots_in_range(Slot::parse("12:00").unwrap(), 60);
    let first: Vec<_> = range.clone().collect();
    let second: Vec<_> = range.collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn operating_window_is_half_open() {
    let open = OPENING;
    let close = CLOSING;
    assert!(is_within_operating_hours(Slot::parse("12:00").unwrap(), open, close));
    assert!(is_within_operating_hours(Slot::parse("23:30").unwrap(), open, close));
    assert!(!is_within_operating_hours(Slot::parse("11:30").unwrap(), open, close));
    assert!(!is_within_operating_hours(CLOSING, open, close));
}
