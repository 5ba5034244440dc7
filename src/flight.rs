use crate::aircraft::AircraftType;
use crate::error::ValidationError;
use crate::time::{Time, TimeWindow};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

pub type FlightId = Arc<str>;
pub type AirlineCode = Arc<str>;
pub type LocationId = Arc<str>;

/// A turnaround that needs a gate from `scheduled_arrival` until `scheduled_departure`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub id: FlightId,
    pub airline: AirlineCode,
    pub aircraft_type: AircraftType,
    pub origin: LocationId,
    pub destination: LocationId,
    pub scheduled_arrival: Time,
    pub scheduled_departure: Time,
    pub passenger_count: u32,
    #[serde(default)]
    pub connecting_flight_id: Option<FlightId>,
}

impl Flight {
    pub fn occupancy(&self) -> (Time, Time) {
        (self.scheduled_arrival, self.scheduled_departure)
    }

    pub fn overlaps(&self, other: &Flight) -> bool {
        Time::is_overlapping(&self.occupancy(), &other.occupancy())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.scheduled_arrival > self.scheduled_departure {
            return Err(ValidationError::MalformedWindow {
                flight: self.id.clone(),
                arrival: self.scheduled_arrival,
                departure: self.scheduled_departure,
            });
        }
        Ok(())
    }
}

/// Splits raw records into flights fit for scheduling and rejected ones.
///
/// Flights outside `window` are dropped silently; malformed and duplicate
/// records are returned with their reason. The surviving flights are ordered
/// by arrival, then departure, then id.
pub fn prepare_flights(
    raw: Vec<Flight>,
    window: Option<&TimeWindow>,
) -> (Vec<Flight>, Vec<ValidationError>) {
    let mut seen: HashSet<FlightId> = HashSet::new();
    let mut rejected = vec![];
    let mut flights = Vec::with_capacity(raw.len());
    for flight in raw {
        if let Err(e) = flight.validate() {
            rejected.push(e);
        } else if !seen.insert(flight.id.clone()) {
            rejected.push(ValidationError::DuplicateFlight {
                flight: flight.id.clone(),
            });
        } else if window.map_or(true, |w| {
            w.touches(flight.scheduled_arrival, flight.scheduled_departure)
        }) {
            flights.push(flight);
        }
    }
    flights.sort_by(|a, b| {
        (a.scheduled_arrival, a.scheduled_departure, &a.id)
            .cmp(&(b.scheduled_arrival, b.scheduled_departure, &b.id))
    });
    (flights, rejected)
}
