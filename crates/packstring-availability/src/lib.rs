//! Trip availability store
//!
//! Bridges the hand-editable `availability.yaml` file and concurrent
//! in-process readers. Reads are lenient (a typo in the file must never
//! blank a trip's public listing), writes are strict and atomic.

pub mod store;

pub use store::{is_valid_status, AvailabilityStore, DateSlot, Trips, VALID_STATUSES};
