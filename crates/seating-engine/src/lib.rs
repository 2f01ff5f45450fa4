//! # seating-engine
//!
//! Table-availability and booking-conflict engine for a restaurant
//! ordering/reservation front-end.
//!
//! Three backend feeds describe existing occupancy: one-off bookings,
//! single calendar events, and daily-repeating calendar events. The engine
//! normalizes them into a date → half-hour-slot → table-set index, answers
//! the availability and conflict queries that gate table selection and
//! duration changes, and assembles the outbound reservation payload,
//! committing it back into the index so a fresh booking is visible locally
//! before the server confirms it.
//!
//! ## Modules
//!
//! - [`slot`] — half-hour time-slot values and discretization
//! - [`expander`] — bounded expansion of daily-recurring events
//! - [`feed`] — typed feed records and skip-and-log parsing
//! - [`availability`] — the occupancy index
//! - [`conflict`] — stateless availability and conflict queries
//! - [`selection`] — caller-owned selection state and render states
//! - [`transaction`] — outbound payload assembly and local commit
//! - [`error`] — error types

pub mod availability;
pub mod conflict;
pub mod error;
pub mod expander;
pub mod feed;
pub mod selection;
pub mod slot;
pub mod transaction;

pub use availability::AvailabilityIndex;
pub use conflict::{
    find_conflict, is_table_free_at_slot, remaining_before_closing, validate_selection,
};
pub use error::BookingError;
pub use expander::{expand_daily, RECURRENCE_HORIZON_DAYS};
pub use feed::{CalendarEvent, FeedBatch, Recurrence, Reservation, TableId};
pub use selection::{table_state, table_states, SelectionState, TableState};
pub use slot::{Slot, CLOSING, OPENING};
pub use transaction::{build_transaction, commit, BookingTransaction};
