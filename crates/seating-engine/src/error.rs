//! Error types for the seating engine.

use thiserror::Error;

use crate::feed::TableId;
use crate::slot::Slot;

#[derive(Error, Debug)]
pub enum BookingError {
    /// Hour text that is not "HH:MM" or does not land on a half-hour
    /// slot boundary.
    #[error("invalid hour text: {0:?}")]
    InvalidHour(String),

    /// Date text that is not an ISO calendar date.
    #[error("invalid date: {0:?}")]
    InvalidDate(String),

    /// Duration that is negative, off the half-hour grid, or longer than
    /// a full day.
    #[error("invalid duration: {0} hours")]
    InvalidDuration(f64),

    /// The requested duration runs past the venue's closing time.
    #[error(
        "requested duration of {requested_minutes} min exceeds the \
         {available_minutes} min left before closing"
    )]
    DurationExceedsClosing {
        requested_minutes: u32,
        available_minutes: u32,
    },

    /// A selected table is already occupied in the requested range.
    #[error("table {table} is already booked at {slot}")]
    TableConflict { table: TableId, slot: Slot },

    /// The transaction is missing required fields.
    #[error("invalid reservation: {0}")]
    Validation(String),
}

/// Convenience alias used throughout the engine.
pub type Result<T> = std::result::Result<T, BookingError>;
