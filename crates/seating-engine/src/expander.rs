//! Bounded expansion of recurring calendar events into concrete dates.
//!
//! The repeating feed anchors each event at a single date. A daily event
//! occupies every date from the anchor through a fixed lookahead horizon,
//! inclusive on both ends; the date picker never offers dates beyond that
//! horizon, so expansion stays bounded.

use chrono::{Duration, NaiveDate};

use crate::feed::Recurrence;

/// Days a daily event reaches past its anchor date. The anchor itself
/// counts too, so a daily event covers `RECURRENCE_HORIZON_DAYS + 1` dates.
pub const RECURRENCE_HORIZON_DAYS: u32 = 14;

/// Expand an anchor date into `anchor, anchor+1, .., anchor+horizon_days`,
/// inclusive on both ends.
///
/// Deterministic: `horizon_days + 1` dates, strictly increasing by one
/// calendar day.
pub fn expand_daily(anchor: NaiveDate, horizon_days: u32) -> Vec<NaiveDate> {
    (0..=i64::from(horizon_days))
        .map(|offset| anchor + Duration::days(offset))
        .collect()
}

/// The dates a calendar event occupies, honoring its recurrence.
///
/// Only `daily` events expand; any other recurrence occupies the anchor
/// date alone.
pub fn expand_dates(recurrence: Recurrence, anchor: NaiveDate) -> Vec<NaiveDate> {
    match recurrence {
        Recurrence::Daily => expand_daily(anchor, RECURRENCE_HORIZON_DAYS),
        Recurrence::None => vec![anchor],
    }
}
