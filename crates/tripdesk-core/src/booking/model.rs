//! Trip booking domain model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::Display;
use thiserror::Error;

/// Date format accepted by the booking form.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum TripStatus {
    Confirmed,
    Pending,
}

/// A booked trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: u32,
    pub destination: String,
    pub travel_date: NaiveDate,
    pub return_date: NaiveDate,
    pub travelers: u32,
    pub status: TripStatus,
}

impl Trip {
    /// Long-form date, e.g. `March 15, 2024`.
    pub fn format_date(date: NaiveDate) -> String {
        date.format("%B %-d, %Y").to_string()
    }
}

/// Booking form fields, named the way the form labels them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum BookingField {
    Destination,
    TravelDate,
    ReturnDate,
    Travelers,
}

/// Why a booking form was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("Please fill in all fields to book your trip (missing: {0}).")]
    MissingField(BookingField),

    #[error("Invalid {field} '{value}': expected YYYY-MM-DD.")]
    InvalidDate { field: BookingField, value: String },

    #[error("Invalid travelers '{0}': expected a positive whole number.")]
    InvalidTravelers(String),

    #[error("Return date must be after travel date.")]
    ReturnNotAfterTravel,
}

impl BookingError {
    /// The form field the user should fix.
    pub fn field(&self) -> BookingField {
        match self {
            BookingError::MissingField(field) => *field,
            BookingError::InvalidDate { field, .. } => *field,
            BookingError::InvalidTravelers(_) => BookingField::Travelers,
            BookingError::ReturnNotAfterTravel => BookingField::ReturnDate,
        }
    }
}

/// Raw booking form input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub destination: String,
    pub travel_date: String,
    pub return_date: String,
    pub travelers: String,
}

/// A booking request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidBooking {
    pub destination: String,
    pub travel_date: NaiveDate,
    pub return_date: NaiveDate,
    pub travelers: u32,
}

impl BookingRequest {
    pub fn new(
        destination: impl Into<String>,
        travel_date: impl Into<String>,
        return_date: impl Into<String>,
        travelers: impl Into<String>,
    ) -> Self {
        Self {
            destination: destination.into(),
            travel_date: travel_date.into(),
            return_date: return_date.into(),
            travelers: travelers.into(),
        }
    }

    /// Checks presence of every field first, then formats, then date order.
    pub fn validate(&self) -> Result<ValidBooking, BookingError> {
        let destination = required(&self.destination, BookingField::Destination)?;
        let travel_date = required(&self.travel_date, BookingField::TravelDate)?;
        let return_date = required(&self.return_date, BookingField::ReturnDate)?;
        let travelers = required(&self.travelers, BookingField::Travelers)?;

        let travel_date = parse_date(travel_date, BookingField::TravelDate)?;
        let return_date = parse_date(return_date, BookingField::ReturnDate)?;
        let travelers = travelers
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| BookingError::InvalidTravelers(travelers.to_string()))?;

        if return_date <= travel_date {
            return Err(BookingError::ReturnNotAfterTravel);
        }

        Ok(ValidBooking {
            destination: destination.to_string(),
            travel_date,
            return_date,
            travelers,
        })
    }
}

fn required(value: &str, field: BookingField) -> Result<&str, BookingError> {
    let value = value.trim();
    if value.is_empty() {
        Err(BookingError::MissingField(field))
    } else {
        Ok(value)
    }
}

fn parse_date(value: &str, field: BookingField) -> Result<NaiveDate, BookingError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| BookingError::InvalidDate {
        field,
        value: value.to_string(),
    })
}
