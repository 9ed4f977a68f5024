use chrono::NaiveDate;

use super::model::{BookingError, BookingRequest, Trip, TripStatus};

/// Ordered list of booked trips.
#[derive(Debug, Clone, Default)]
pub struct TripLedger {
    trips: Vec<Trip>,
}

impl TripLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger pre-filled with the two demo trips.
    pub fn with_demo_trips() -> Self {
        let mut ledger = Self::new();
        ledger.push_demo("Paris, France", (2024, 3, 15), (2024, 3, 22), 2, TripStatus::Confirmed);
        ledger.push_demo("Tokyo, Japan", (2024, 5, 10), (2024, 5, 18), 1, TripStatus::Pending);
        ledger
    }

    fn push_demo(
        &mut self,
        destination: &str,
        travel: (i32, u32, u32),
        ret: (i32, u32, u32),
        travelers: u32,
        status: TripStatus,
    ) {
        let (Some(travel_date), Some(return_date)) = (
            NaiveDate::from_ymd_opt(travel.0, travel.1, travel.2),
            NaiveDate::from_ymd_opt(ret.0, ret.1, ret.2),
        ) else {
            return;
        };
        self.trips.push(Trip {
            id: self.next_id(),
            destination: destination.to_string(),
            travel_date,
            return_date,
            travelers,
            status,
        });
    }

    fn next_id(&self) -> u32 {
        self.trips.len() as u32 + 1
    }

    /// Validates the form and appends a confirmed trip.
    pub fn book(&mut self, request: &BookingRequest) -> Result<&Trip, BookingError> {
        let booking = request.validate()?;
        let trip = Trip {
            id: self.next_id(),
            destination: booking.destination,
            travel_date: booking.travel_date,
            return_date: booking.return_date,
            travelers: booking.travelers,
            status: TripStatus::Confirmed,
        };
        tracing::info!(
            "[Booking] Trip #{} to {} booked for {} traveler(s)",
            trip.id,
            trip.destination,
            trip.travelers
        );
        self.trips.push(trip);
        Ok(&self.trips[self.trips.len() - 1])
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_trips() {
        let ledger = TripLedger::with_demo_trips();
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.trips()[0].destination, "Paris, France");
        assert_eq!(ledger.trips()[0].status, TripStatus::Confirmed);
        assert_eq!(ledger.trips()[1].id, 2);
        assert_eq!(ledger.trips()[1].status, TripStatus::Pending);
    }

    #[test]
    fn test_book_appends_confirmed_trip() {
        let mut ledger = TripLedger::with_demo_trips();
        let trip = ledger
            .book(&BookingRequest::new("Paris", "2024-03-15", "2024-03-22", "2"))
            .unwrap()
            .clone();

        assert_eq!(trip.id, 3);
        assert_eq!(trip.destination, "Paris");
        assert_eq!(trip.travelers, 2);
        assert_eq!(trip.status, TripStatus::Confirmed);
        assert_eq!(ledger.trips().last(), Some(&trip));
    }

    #[test]
    fn test_rejected_booking_leaves_ledger_untouched() {
        let mut ledger = TripLedger::new();
        let result = ledger.book(&BookingRequest::new("Paris", "2024-03-15", "2024-03-10", "2"));
        assert_eq!(result.unwrap_err(), BookingError::ReturnNotAfterTravel);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_ids_are_sequential() {
        let mut ledger = TripLedger::new();
        for _ in 0..3 {
            ledger
                .book(&BookingRequest::new("Rome", "2025-01-01", "2025-01-02", "1"))
                .unwrap();
        }
        let ids: Vec<u32> = ledger.trips().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
