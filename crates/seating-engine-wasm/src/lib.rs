//! WASM bindings for seating-engine.
//!
//! Exposes the occupancy index and booking queries to the JavaScript
//! front-end via `wasm-bindgen`. All composite values cross the boundary as
//! JSON strings; dates are ISO `"YYYY-MM-DD"` text and hours are the
//! `"HH:MM"` text the widgets already hold.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p seating-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir dist/wasm/ \
//!   target/wasm32-unknown-unknown/release/seating_engine_wasm.wasm
//! ```

use std::collections::BTreeSet;

use chrono::NaiveDate;
use seating_engine::conflict;
use seating_engine::feed::{self, FeedBatch, TableId};
use seating_engine::selection::{self, SelectionState, TableState};
use seating_engine::slot::{self, Slot, CLOSING};
use seating_engine::transaction;
use seating_engine::AvailabilityIndex;
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct TableStateDto {
    table: TableId,
    state: TableState,
}

// ---------------------------------------------------------------------------
// Helpers: parse primitive UI values into engine types
// ---------------------------------------------------------------------------

fn js_err(e: impl ToString) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_date(text: &str) -> Result<NaiveDate, JsValue> {
    feed::parse_date(text).map_err(js_err)
}

fn parse_hour(text: &str) -> Result<Slot, JsValue> {
    Slot::parse(text).map_err(js_err)
}

fn parse_duration(hours: f64) -> Result<u32, JsValue> {
    slot::duration_from_hours(hours).map_err(js_err)
}

fn parse_feed_value(json: &str, kind: &str) -> Result<Value, JsValue> {
    serde_json::from_str(json).map_err(|e| js_err(format!("invalid {kind} feed JSON: {e}")))
}

fn parse_table_ids(json: &str) -> Result<BTreeSet<TableId>, JsValue> {
    serde_json::from_str(json).map_err(|e| js_err(format!("invalid table list JSON: {e}")))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// One booking widget's view of venue occupancy.
///
/// Constructed from the three feed payloads after all of them have resolved;
/// on a data refresh the JS side builds a fresh session and drops this one
/// (last build wins). `submit` is the only mutation.
#[wasm_bindgen]
pub struct BookingSession {
    index: AvailabilityIndex,
}

#[wasm_bindgen]
impl BookingSession {
    /// Build the occupancy index from the three feed JSON payloads:
    /// one-off bookings, single events, and daily-repeating events.
    ///
    /// Individual malformed records are skipped; a payload that is not
    /// valid JSON at all is an error.
    #[wasm_bindgen(constructor)]
    pub fn new(
        bookings_json: &str,
        events_json: &str,
        repeating_json: &str,
    ) -> Result<BookingSession, JsValue> {
        let bookings = parse_feed_value(bookings_json, "booking")?;
        let events = parse_feed_value(events_json, "event")?;
        let repeating = parse_feed_value(repeating_json, "repeating event")?;

        let batch = FeedBatch::parse(&bookings, &events, &repeating);
        Ok(Self {
            index: AvailabilityIndex::build(&batch),
        })
    }

    /// Whether `date` has no recorded occupancy at all.
    #[wasm_bindgen(js_name = "isDateFullyAvailable")]
    pub fn is_date_fully_available(&self, date: &str) -> Result<bool, JsValue> {
        Ok(self.index.is_date_fully_available(parse_date(date)?))
    }

    /// The table ids occupied at `date`/`hour`, as a JSON integer array.
    #[wasm_bindgen(js_name = "occupantsAt")]
    pub fn occupants_at(&self, date: &str, hour: &str) -> Result<String, JsValue> {
        let occupants = self.index.occupants_at(parse_date(date)?, parse_hour(hour)?);
        serde_json::to_string(occupants).map_err(js_err)
    }

    /// The first conflicting slot ("HH:MM") for `table` over
    /// `[hour, hour + duration)`, or `null` when the range is free.
    #[wasm_bindgen(js_name = "findConflict")]
    pub fn find_conflict(
        &self,
        date: &str,
        hour: &str,
        duration_hours: f64,
        table: TableId,
    ) -> Result<Option<String>, JsValue> {
        let conflict = conflict::find_conflict(
            &self.index,
            parse_date(date)?,
            parse_hour(hour)?,
            parse_duration(duration_hours)?,
            table,
        );
        Ok(conflict.map(|s| s.to_string()))
    }

    /// Hours still bookable between `hour` and closing; caps the hours
    /// widget.
    #[wasm_bindgen(js_name = "remainingHours")]
    pub fn remaining_hours(&self, hour: &str) -> Result<f64, JsValue> {
        let minutes = conflict::remaining_before_closing(parse_hour(hour)?, CLOSING);
        Ok(slot::duration_hours(minutes))
    }

    /// Render states for the venue's tables at `date`/`hour`, given the
    /// currently selected table ids. Returns a JSON array of
    /// `{table, state}` with `state` one of `"available"`, `"booked"`,
    /// `"selected"`.
    #[wasm_bindgen(js_name = "tableStates")]
    pub fn table_states(
        &self,
        date: &str,
        hour: &str,
        tables_json: &str,
        selected_json: &str,
    ) -> Result<String, JsValue> {
        let tables: Vec<TableId> = serde_json::from_str(tables_json)
            .map_err(|e| js_err(format!("invalid table list JSON: {e}")))?;
        let selection = SelectionState {
            date: parse_date(date)?,
            start: parse_hour(hour)?,
            duration_minutes: 0,
            tables: parse_table_ids(selected_json)?,
        };

        let dtos: Vec<TableStateDto> = selection::table_states(&self.index, &selection, &tables)
            .into_iter()
            .map(|(table, state)| TableStateDto { table, state })
            .collect();
        serde_json::to_string(&dtos).map_err(js_err)
    }

    /// Validate the full selection and contact details, commit the booking
    /// into the local index, and return the reservation payload to POST.
    ///
    /// On any refusal (no tables, blank contact fields, past closing, table
    /// conflict) nothing is committed and the error message is returned.
    #[wasm_bindgen(js_name = "submit")]
    #[allow(clippy::too_many_arguments)]
    pub fn submit(
        &mut self,
        date: &str,
        hour: &str,
        duration_hours: f64,
        tables_json: &str,
        people: u32,
        starters_json: &str,
        address: &str,
        phone: &str,
    ) -> Result<String, JsValue> {
        let selection = SelectionState {
            date: parse_date(date)?,
            start: parse_hour(hour)?,
            duration_minutes: parse_duration(duration_hours)?,
            tables: parse_table_ids(tables_json)?,
        };
        let starters: BTreeSet<String> = serde_json::from_str(starters_json)
            .map_err(|e| js_err(format!("invalid starters JSON: {e}")))?;

        let tx = transaction::build_transaction(
            &self.index,
            &selection,
            people,
            starters,
            address,
            phone,
            CLOSING,
        )
        .map_err(js_err)?;

        transaction::commit(&mut self.index, &tx);
        serde_json::to_string(&tx).map_err(js_err)
    }
}
