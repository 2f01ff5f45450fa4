//! Half-hour time-slot values and discretization.
//!
//! The occupancy index keys time at half-hour granularity. A [`Slot`] is a
//! time of day stored as minutes since midnight, so `"13:30"` is 810 and the
//! 24:00 closing boundary is 1440. Durations are plain minute counts and
//! must be multiples of [`SLOT_MINUTES`].

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{BookingError, Result};

/// Minutes covered by one slot.
pub const SLOT_MINUTES: u32 = 30;

/// Reference venue opening time, 12:00.
pub const OPENING: Slot = Slot(12 * 60);

/// Reference venue closing time, 24:00.
pub const CLOSING: Slot = Slot(24 * 60);

/// A time of day on the half-hour grid.
///
/// Ordered, copyable, and usable as a map key. Serializes as the upstream
/// `"HH:MM"` text so feed records and the outbound payload round-trip
/// without a separate wire type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot(u16);

impl Slot {
    /// Parse `"HH:MM"` hour text into a slot.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InvalidHour`] when the text is unparsable or
    /// the minutes are not `00`/`30`. A half-hour-discretized index has no
    /// key for anything off the grid, so rounding would invent occupancy the
    /// feed never asserted.
    pub fn parse(text: &str) -> Result<Self> {
        let bad = || BookingError::InvalidHour(text.to_string());
        let (hh, mm) = text.split_once(':').ok_or_else(bad)?;
        if mm.len() != 2 {
            return Err(bad());
        }
        let hours: u16 = hh.parse().map_err(|_| bad())?;
        let minutes: u16 = mm.parse().map_err(|_| bad())?;
        if hours > 23 || (minutes != 0 && minutes != 30) {
            return Err(bad());
        }
        Ok(Slot(hours * 60 + minutes))
    }

    /// Convert a widget-supplied hour number (e.g. `13.5`) to a slot.
    ///
    /// Accepts `0.0..=24.0` in half-hour steps; `24.0` is the closing
    /// boundary.
    pub fn from_hours(hours: f64) -> Result<Self> {
        let halves = hours * 2.0;
        if !(0.0..=48.0).contains(&halves) || halves.fract() != 0.0 {
            return Err(BookingError::InvalidHour(hours.to_string()));
        }
        Ok(Slot(halves as u16 * SLOT_MINUTES as u16))
    }

    /// The numeric hour-with-fraction value (`13:30` is `13.5`).
    pub fn hours(self) -> f64 {
        f64::from(self.0) / 60.0
    }

    /// Minutes since midnight.
    pub fn minutes(self) -> u32 {
        u32::from(self.0)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl Serialize for Slot {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Slot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Slot::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// Convert an hour-count duration (possibly fractional, e.g. `1.5`) to
/// minutes.
///
/// # Errors
///
/// Returns [`BookingError::InvalidDuration`] when the value is negative,
/// off the half-hour grid, or longer than 24 hours.
pub fn duration_from_hours(hours: f64) -> Result<u32> {
    let halves = hours * 2.0;
    if !(0.0..=48.0).contains(&halves) || halves.fract() != 0.0 {
        return Err(BookingError::InvalidDuration(hours));
    }
    Ok(halves as u32 * SLOT_MINUTES)
}

/// A minute-count duration as the hour number the wire format uses.
pub fn duration_hours(minutes: u32) -> f64 {
    f64::from(minutes) / 60.0
}

/// The slots covered by `[start, start + duration)`.
///
/// This is the single discretization primitive: occupancy writes and
/// conflict scans both walk the same sequence. The iterator is finite and
/// `Clone`, so a range can be rewalked from the start.
pub fn slots_in_range(start: Slot, duration_minutes: u32) -> SlotRange {
    SlotRange {
        next: start.minutes(),
        end: start.minutes() + duration_minutes,
    }
}

/// Whether `slot` lies within the operating window `[opening, closing)`.
pub fn is_within_operating_hours(slot: Slot, opening: Slot, closing: Slot) -> bool {
    opening <= slot && slot < closing
}

/// Iterator over half-hour slots, created by [`slots_in_range`].
#[derive(Debug, Clone)]
pub struct SlotRange {
    next: u32,
    end: u32,
}

impl Iterator for SlotRange {
    type Item = Slot;

    fn next(&mut self) -> Option<Slot> {
        if self.next >= self.end {
            return None;
        }
        let slot = Slot(self.next as u16);
        self.next += SLOT_MINUTES;
        Some(slot)
    }
}
