use crate::aircraft::Compatibility;
use crate::flight::Flight;
use crate::gate::Gate;
use crate::policy::Policy;
use crate::schedule::Scenario;
use crate::time::Time;
use crate::transit::TransitTime;
use proptest::prelude::Strategy;
use proptest::prop_oneof;
use proptest::strategy::Just;
use std::sync::Arc;

pub fn id(s: &str) -> Arc<str> {
    Arc::from(s)
}

/// 09:00 on the first day.
pub const NINE: u64 = 9 * 60;

pub fn flight(
    flight_id: &str,
    airline: &str,
    aircraft_type: &str,
    arrival: u64,
    departure: u64,
    passengers: u32,
) -> Flight {
    Flight {
        id: id(flight_id),
        airline: id(airline),
        aircraft_type: id(aircraft_type),
        origin: id("BOM"),
        destination: id("DEL"),
        scheduled_arrival: Time(arrival),
        scheduled_departure: Time(departure),
        passenger_count: passengers,
        connecting_flight_id: None,
    }
}

pub fn add_flight(
    scenario: &mut Scenario,
    flight_id: &str,
    aircraft_type: &str,
    arrival: u64,
    departure: u64,
    passengers: u32,
) {
    scenario.flights.push(flight(
        flight_id,
        "AI",
        aircraft_type,
        arrival,
        departure,
        passengers,
    ));
}

pub fn connect(scenario: &mut Scenario, from: &str, to: &str) {
    if let Some(f) = scenario.flights.iter_mut().find(|f| *f.id == *from) {
        f.connecting_flight_id = Some(id(to));
    }
}

pub fn add_gate(scenario: &mut Scenario, gate_id: &str, terminal_id: &str, aircraft_types: &[&str]) {
    scenario.gates.push(Gate {
        id: id(gate_id),
        terminal_id: id(terminal_id),
        max_passengers: 300,
    });
    for ty in aircraft_types {
        scenario.compatibility.push(Compatibility {
            gate_id: id(gate_id),
            aircraft_type: id(ty),
        });
    }
}

pub fn add_transit(scenario: &mut Scenario, from: &str, to: &str, minutes: u64) {
    scenario.transit_times.push(TransitTime {
        from_location: id(from),
        to_location: id(to),
        transport_mode: id("PASSENGER"),
        minutes,
    });
}

pub fn scenario() -> Scenario {
    Scenario {
        policy: Policy {
            time_limit_secs: 60.0,
            ..Policy::default()
        },
        ..Scenario::default()
    }
}

pub fn arb_id(prefix: &'static str) -> impl Strategy<Value = Arc<str>> {
    prop_oneof![
        Just(Arc::from(format!("{}_1", prefix))),
        Just(Arc::from(format!("{}_2", prefix))),
        Just(Arc::from(format!("{}_3", prefix))),
    ]
}

/// Flights with unique ids `FL_<n>` spread over one day.
pub fn arb_flights(max: usize) -> impl Strategy<Value = Vec<Flight>> {
    proptest::collection::vec(
        (arb_id("AL"), arb_id("AC"), 0..1440u64, 10..240u64, 50..300u32),
        0..max,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(n, (airline, ty, arr, dur, pax))| Flight {
                id: Arc::from(format!("FL_{n}")),
                airline,
                aircraft_type: ty,
                origin: id("BOM"),
                destination: id("DEL"),
                scheduled_arrival: Time(arr),
                scheduled_departure: Time(arr + dur),
                passenger_count: pax,
                connecting_flight_id: None,
            })
            .collect()
    })
}
