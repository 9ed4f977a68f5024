//! Trip booking: form validation and the in-memory trip ledger.

mod ledger;
mod model;

pub use ledger::TripLedger;
pub use model::{
    BookingError, BookingField, BookingRequest, Trip, TripStatus, ValidBooking, DATE_FORMAT,
};
