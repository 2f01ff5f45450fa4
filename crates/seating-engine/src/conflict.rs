//! Stateless availability and conflict queries over an [`AvailabilityIndex`].
//!
//! These are the predicates the UI consults before letting a selection
//! change through, and once more right before submission. They never mutate
//! the index, and both refusal paths (past closing, table taken) fail
//! closed.

use chrono::NaiveDate;

use crate::availability::AvailabilityIndex;
use crate::error::{BookingError, Result};
use crate::feed::TableId;
use crate::selection::SelectionState;
use crate::slot::{self, Slot};

/// Whether `table` is free on `date` at exactly `slot`.
pub fn is_table_free_at_slot(
    index: &AvailabilityIndex,
    date: NaiveDate,
    slot: Slot,
    table: TableId,
) -> bool {
    !index.occupants_at(date, slot).contains(&table)
}

/// Minutes left in the operating window from `start`. Caps duration input.
pub fn remaining_before_closing(start: Slot, closing: Slot) -> u32 {
    closing.minutes().saturating_sub(start.minutes())
}

/// The first slot of `[start, start + duration)` at which `table` is
/// already occupied on `date`, or `None` when the whole range is free.
///
/// The authoritative predicate both for rendering a table as booked and for
/// rejecting an attempted selection.
pub fn find_conflict(
    index: &AvailabilityIndex,
    date: NaiveDate,
    start: Slot,
    duration_minutes: u32,
    table: TableId,
) -> Option<Slot> {
    slot::slots_in_range(start, duration_minutes)
        .find(|&s| !is_table_free_at_slot(index, date, s, table))
}

/// Check a whole selection against the index: the duration must fit before
/// `closing`, and every selected table must be free for the full range.
///
/// Runs before accepting a duration change or table toggle, and once more at
/// transaction build time to guard against drift between the last UI check
/// and submit.
///
/// # Errors
///
/// [`BookingError::DurationExceedsClosing`] when the range runs past the
/// window, otherwise [`BookingError::TableConflict`] naming the first
/// offending table and slot.
pub fn validate_selection(
    index: &AvailabilityIndex,
    selection: &SelectionState,
    closing: Slot,
) -> Result<()> {
    let available_minutes = remaining_before_closing(selection.start, closing);
    if selection.duration_minutes > available_minutes {
        return Err(BookingError::DurationExceedsClosing {
            requested_minutes: selection.duration_minutes,
            available_minutes,
        });
    }

    for &table in &selection.tables {
        if let Some(slot) = find_conflict(
            index,
            selection.date,
            selection.start,
            selection.duration_minutes,
            table,
        ) {
            return Err(BookingError::TableConflict { table, slot });
        }
    }
    Ok(())
}
