//! Typed records for the three upstream occupancy feeds.
//!
//! The backend exposes one-off bookings, single calendar events, and
//! daily-repeating calendar events as separate JSON arrays. They arrive here
//! already parsed into `serde_json::Value`s; deserialization is per-record,
//! and a malformed record is skipped with a logged warning so it cannot
//! block the rest of the occupancy data.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{BookingError, Result};
use crate::slot::{self, Slot};

/// Venue-unique positive table identifier.
pub type TableId = u32;

/// Recurrence marker on a calendar event.
///
/// The repeating feed only ever emits `"daily"`; anything else (including
/// the `false` the single-event feed carries in the same field) behaves as
/// `none`, a single occurrence at the anchor date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Recurrence {
    Daily,
    #[default]
    None,
}

impl<'de> Deserialize<'de> for Recurrence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(s) if s == "daily" => Recurrence::Daily,
            _ => Recurrence::None,
        })
    }
}

/// A one-off booking confirmed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Reservation {
    pub date: NaiveDate,
    #[serde(rename = "hour")]
    pub start: Slot,
    #[serde(rename = "duration", deserialize_with = "duration_minutes")]
    pub duration_minutes: u32,
    #[serde(rename = "table", deserialize_with = "table_set")]
    pub tables: BTreeSet<TableId>,
}

/// A calendar event blocking tables, from either event feed.
///
/// The upstream field is spelled `repeat` in the legacy feeds and
/// `recurrence` in newer payloads; both deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CalendarEvent {
    pub date: NaiveDate,
    #[serde(rename = "hour")]
    pub start: Slot,
    #[serde(rename = "duration", deserialize_with = "duration_minutes")]
    pub duration_minutes: u32,
    #[serde(rename = "table", deserialize_with = "table_set")]
    pub tables: BTreeSet<TableId>,
    #[serde(default, alias = "repeat")]
    pub recurrence: Recurrence,
}

fn duration_minutes<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<u32, D::Error> {
    let hours = f64::deserialize(deserializer)?;
    slot::duration_from_hours(hours).map_err(serde::de::Error::custom)
}

/// The upstream feeds carry `table` both as a bare integer and as an array
/// of integers; accept either.
fn table_set<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<BTreeSet<TableId>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(TableId),
        Many(Vec<TableId>),
    }

    let tables: BTreeSet<TableId> = match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(id) => BTreeSet::from([id]),
        OneOrMany::Many(ids) => ids.into_iter().collect(),
    };
    if tables.contains(&0) {
        return Err(serde::de::Error::custom("table ids must be positive"));
    }
    Ok(tables)
}

/// Parse an ISO `YYYY-MM-DD` calendar date.
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    text.parse()
        .map_err(|_| BookingError::InvalidDate(text.to_string()))
}

/// Deserialize the one-off booking feed, skipping malformed records.
pub fn parse_reservations(feed: &Value) -> Vec<Reservation> {
    parse_records(feed, "booking")
}

/// Deserialize a calendar-event feed (single or repeating), skipping
/// malformed records.
pub fn parse_events(feed: &Value) -> Vec<CalendarEvent> {
    parse_records(feed, "event")
}

fn parse_records<T: DeserializeOwned>(feed: &Value, kind: &str) -> Vec<T> {
    let Some(records) = feed.as_array() else {
        tracing::warn!("{kind} feed is not an array, treating as empty");
        return Vec::new();
    };

    let mut parsed = Vec::with_capacity(records.len());
    for record in records {
        match serde_json::from_value(record.clone()) {
            Ok(item) => parsed.push(item),
            Err(e) => tracing::warn!("skipping malformed {kind} record: {e}"),
        }
    }
    parsed
}

/// All three upstream feeds, resolved together.
///
/// [`AvailabilityIndex::build`] takes the whole batch, so an index built
/// from fewer than three feeds is unrepresentable. On a data refresh the
/// caller parses a fresh batch and replaces its index wholesale; results of
/// a stale in-flight refresh are dropped, never merged (last build wins).
///
/// [`AvailabilityIndex::build`]: crate::availability::AvailabilityIndex::build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedBatch {
    pub reservations: Vec<Reservation>,
    pub events: Vec<CalendarEvent>,
    pub repeating_events: Vec<CalendarEvent>,
}

impl FeedBatch {
    /// Parse the three raw feed payloads in one step.
    pub fn parse(bookings: &Value, events: &Value, repeating_events: &Value) -> Self {
        Self {
            reservations: parse_reservations(bookings),
            events: parse_events(events),
            repeating_events: parse_events(repeating_events),
        }
    }
}
