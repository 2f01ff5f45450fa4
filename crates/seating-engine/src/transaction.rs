//! Outbound reservation transactions.
//!
//! A transaction is assembled from the current selection plus the contact
//! fields, re-validated against the index one last time, serialized as the
//! POST body the backend expects, and on acceptance committed back into the
//! local index so follow-up queries see the new booking before any feed
//! refresh.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::availability::AvailabilityIndex;
use crate::conflict;
use crate::error::{BookingError, Result};
use crate::feed::TableId;
use crate::selection::SelectionState;
use crate::slot::{self, Slot};

/// The reservation-creation payload.
///
/// Serializes with the backend's wire names: `date` (ISO), `hour`
/// ("HH:MM"), `table` (integer list), `ppl`, `duration` (hours as a
/// number), `starters`, `address`, `phone`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingTransaction {
    pub date: NaiveDate,
    #[serde(rename = "hour")]
    pub start: Slot,
    #[serde(rename = "table")]
    pub tables: Vec<TableId>,
    #[serde(rename = "ppl")]
    pub people: u32,
    #[serde(rename = "duration", serialize_with = "as_hours")]
    pub duration_minutes: u32,
    pub starters: BTreeSet<String>,
    pub address: String,
    pub phone: String,
}

fn as_hours<S: serde::Serializer>(
    minutes: &u32,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(slot::duration_hours(*minutes))
}

/// Assemble a transaction from the selection and contact details.
///
/// Tables are emitted in ascending id order.
///
/// # Errors
///
/// [`BookingError::Validation`] when no tables are selected or a contact
/// field is blank; otherwise whatever the final
/// [`conflict::validate_selection`] re-check reports. That re-check guards
/// against state drift between the last UI validation and submit.
pub fn build_transaction(
    index: &AvailabilityIndex,
    selection: &SelectionState,
    people: u32,
    starters: BTreeSet<String>,
    address: &str,
    phone: &str,
    closing: Slot,
) -> Result<BookingTransaction> {
    if selection.tables.is_empty() {
        return Err(BookingError::Validation("no tables selected".to_string()));
    }
    if address.trim().is_empty() {
        return Err(BookingError::Validation(
            "address must not be empty".to_string(),
        ));
    }
    if phone.trim().is_empty() {
        return Err(BookingError::Validation(
            "phone must not be empty".to_string(),
        ));
    }
    conflict::validate_selection(index, selection, closing)?;

    Ok(BookingTransaction {
        date: selection.date,
        start: selection.start,
        tables: selection.tables.iter().copied().collect(),
        people,
        duration_minutes: selection.duration_minutes,
        starters,
        address: address.trim().to_string(),
        phone: phone.trim().to_string(),
    })
}

/// Apply an accepted transaction to the local index.
///
/// Optimistic: the backend may still reject the POST, but local queries
/// must treat the booking's slots as occupied immediately instead of
/// waiting for the next feed refresh. Uses the same occupancy-writing
/// primitive the feeds do.
pub fn commit(index: &mut AvailabilityIndex, tx: &BookingTransaction) {
    let tables: BTreeSet<TableId> = tx.tables.iter().copied().collect();
    index.mark_occupied(tx.date, tx.start, tx.duration_minutes, &tables);
}
