//! The date → slot → table occupancy index.
//!
//! Built once per data refresh from the three feeds, queried on every
//! render, and mutated exactly once per locally committed booking. A table
//! id present at a slot means that table is unavailable for any selection
//! overlapping the slot on that date. Entries are added, never removed.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::expander;
use crate::feed::{FeedBatch, TableId};
use crate::slot::{self, Slot};

static NO_OCCUPANTS: BTreeSet<TableId> = BTreeSet::new();

/// Occupancy index over dates and half-hour slots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilityIndex {
    booked: BTreeMap<NaiveDate, BTreeMap<Slot, BTreeSet<TableId>>>,
}

impl AvailabilityIndex {
    /// An empty index: every table free on every date.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index from a complete feed batch.
    ///
    /// Every reservation and single event contributes one [`mark_occupied`]
    /// call; repeating events contribute one per expanded date, keeping the
    /// event's own hour, duration and tables. All three feeds union
    /// into the same structure, so processing order does not affect the
    /// result.
    ///
    /// [`mark_occupied`]: Self::mark_occupied
    pub fn build(feeds: &FeedBatch) -> Self {
        let mut index = Self::new();
        for r in &feeds.reservations {
            index.mark_occupied(r.date, r.start, r.duration_minutes, &r.tables);
        }
        for e in &feeds.events {
            index.mark_occupied(e.date, e.start, e.duration_minutes, &e.tables);
        }
        for e in &feeds.repeating_events {
            for date in expander::expand_dates(e.recurrence, e.date) {
                index.mark_occupied(date, e.start, e.duration_minutes, &e.tables);
            }
        }
        index
    }

    /// Mark every table in `tables` occupied for each slot of
    /// `[start, start + duration)` on `date`.
    ///
    /// The single occupancy-writing primitive: feeds go through it at build
    /// time and committed bookings go through it again, so both kinds of
    /// occupancy are indistinguishable to queries. Slot sets are sets, so
    /// re-inserting an already occupied table changes nothing.
    pub fn mark_occupied(
        &mut self,
        date: NaiveDate,
        start: Slot,
        duration_minutes: u32,
        tables: &BTreeSet<TableId>,
    ) {
        for s in slot::slots_in_range(start, duration_minutes) {
            self.booked
                .entry(date)
                .or_default()
                .entry(s)
                .or_default()
                .extend(tables.iter().copied());
        }
    }

    /// True when `date` has no occupancy entry at all, meaning every table
    /// is free for the whole day. Distinct from a known date whose queried
    /// slot happens to be empty.
    pub fn is_date_fully_available(&self, date: NaiveDate) -> bool {
        !self.booked.contains_key(&date)
    }

    /// The tables occupied on `date` at `slot`. Empty when nothing is
    /// recorded there; never fails.
    pub fn occupants_at(&self, date: NaiveDate, slot: Slot) -> &BTreeSet<TableId> {
        self.booked
            .get(&date)
            .and_then(|day| day.get(&slot))
            .unwrap_or(&NO_OCCUPANTS)
    }
}
