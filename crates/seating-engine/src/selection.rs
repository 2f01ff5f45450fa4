//! Caller-owned selection state and the per-table render states derived
//! from it.
//!
//! The engine never owns what the user has picked. The UI passes its
//! current [`SelectionState`] into queries and guarded mutations, and
//! render state is recomputed from the index on every update instead of
//! being toggled in place, so "booked" always wins over a stale "selected".

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::availability::AvailabilityIndex;
use crate::conflict;
use crate::error::Result;
use crate::feed::TableId;
use crate::slot::Slot;

/// The user's in-progress choice of date, start hour, duration and tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    pub date: NaiveDate,
    pub start: Slot,
    pub duration_minutes: u32,
    pub tables: BTreeSet<TableId>,
}

/// Render state of one table for the currently selected date and hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TableState {
    Available,
    Booked,
    Selected,
}

/// Derive the render state of `table` at the selection's date and hour.
///
/// A table is booked iff the index lists it at that exact slot; selection
/// is layered on top and never shadows booked.
pub fn table_state(
    index: &AvailabilityIndex,
    selection: &SelectionState,
    table: TableId,
) -> TableState {
    if index
        .occupants_at(selection.date, selection.start)
        .contains(&table)
    {
        TableState::Booked
    } else if selection.tables.contains(&table) {
        TableState::Selected
    } else {
        TableState::Available
    }
}

/// Derive states for a venue's whole table list, in input order.
pub fn table_states(
    index: &AvailabilityIndex,
    selection: &SelectionState,
    tables: &[TableId],
) -> Vec<(TableId, TableState)> {
    tables
        .iter()
        .map(|&t| (t, table_state(index, selection, t)))
        .collect()
}

impl SelectionState {
    /// A selection with no tables picked yet.
    pub fn new(date: NaiveDate, start: Slot, duration_minutes: u32) -> Self {
        Self {
            date,
            start,
            duration_minutes,
            tables: BTreeSet::new(),
        }
    }

    /// Toggle `table` in the selection.
    ///
    /// Deselecting always succeeds. Selecting validates the grown selection
    /// against the index first and refuses without touching the state, so a
    /// booked table can never enter the set. Returns whether the table is
    /// selected afterwards.
    pub fn toggle_table(
        &mut self,
        index: &AvailabilityIndex,
        table: TableId,
        closing: Slot,
    ) -> Result<bool> {
        if self.tables.remove(&table) {
            return Ok(false);
        }

        let mut grown = self.clone();
        grown.tables.insert(table);
        conflict::validate_selection(index, &grown, closing)?;
        *self = grown;
        Ok(true)
    }

    /// Change the requested duration, refusing without touching the state
    /// when the new range runs past closing or over an existing booking of
    /// a selected table.
    pub fn set_duration(
        &mut self,
        index: &AvailabilityIndex,
        duration_minutes: u32,
        closing: Slot,
    ) -> Result<()> {
        let mut changed = self.clone();
        changed.duration_minutes = duration_minutes;
        conflict::validate_selection(index, &changed, closing)?;
        *self = changed;
        Ok(())
    }

    /// Drop selected tables that have become booked at the selection's date
    /// and hour, e.g. after a data refresh or another local commit.
    pub fn drop_booked(&mut self, index: &AvailabilityIndex) {
        let occupied = index.occupants_at(self.date, self.start);
        self.tables.retain(|t| !occupied.contains(t));
    }
}
