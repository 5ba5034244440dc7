use crate::flight::FlightId;
use crate::gate::GateId;
use crate::schedule::Problem;
use crate::schedule::result::AssignmentRecord;
use crate::time::Time;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// A hard rule broken by an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    GateOverlap {
        gate: GateId,
        first: FlightId,
        second: FlightId,
    },
    IncompatibleGate {
        flight: FlightId,
        gate: GateId,
    },
    UnknownGate {
        flight: FlightId,
        gate: GateId,
    },
    UnknownFlight {
        flight: FlightId,
    },
    AssignedTwice {
        flight: FlightId,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::GateOverlap {
                gate,
                first,
                second,
            } => write!(f, "{first} and {second} overlap on gate {gate}"),
            Violation::IncompatibleGate { flight, gate } => {
                write!(f, "gate {gate} cannot take the aircraft of {flight}")
            }
            Violation::UnknownGate { flight, gate } => {
                write!(f, "{flight} is assigned to unknown gate {gate}")
            }
            Violation::UnknownFlight { flight } => write!(f, "{flight} is not part of the run"),
            Violation::AssignedTwice { flight } => write!(f, "{flight} holds more than one gate"),
        }
    }
}

/// Re-checks `records` against the compatibility and conflict rules of `problem`.
pub fn verify(problem: &Problem, records: &[AssignmentRecord]) -> Vec<Violation> {
    let flights = problem
        .flights
        .iter()
        .enumerate()
        .map(|(i, f)| (f.id.clone(), i))
        .collect::<HashMap<FlightId, usize>>();
    let gates = problem
        .gates
        .iter()
        .enumerate()
        .map(|(i, g)| (g.id.clone(), i))
        .collect::<HashMap<GateId, usize>>();

    let mut violations = vec![];
    let mut seen = HashMap::<FlightId, usize>::new();
    let mut stays = BTreeMap::<GateId, Vec<(Time, Time, FlightId)>>::new();
    for record in records {
        let Some(f) = flights.get(&record.flight_id).copied() else {
            violations.push(Violation::UnknownFlight {
                flight: record.flight_id.clone(),
            });
            continue;
        };
        let count = seen.entry(record.flight_id.clone()).or_default();
        *count += 1;
        if *count == 2 {
            violations.push(Violation::AssignedTwice {
                flight: record.flight_id.clone(),
            });
        }
        let Some(g) = gates.get(&record.gate_id).copied() else {
            violations.push(Violation::UnknownGate {
                flight: record.flight_id.clone(),
                gate: record.gate_id.clone(),
            });
            continue;
        };
        let flight = &problem.flights[f];
        if !problem.compatibility.is_compatible(&flight.aircraft_type, g) {
            violations.push(Violation::IncompatibleGate {
                flight: flight.id.clone(),
                gate: record.gate_id.clone(),
            });
        }
        stays.entry(record.gate_id.clone()).or_default().push((
            flight.scheduled_arrival,
            flight.scheduled_departure,
            flight.id.clone(),
        ));
    }

    for (gate, mut on_gate) in stays {
        on_gate.sort();
        for (i, a) in on_gate.iter().enumerate() {
            for b in on_gate[i + 1..]
                .iter()
                .take_while(|b| b.0 < a.1)
                .filter(|b| Time::is_overlapping(&(a.0, a.1), &(b.0, b.1)))
            {
                violations.push(Violation::GateOverlap {
                    gate: gate.clone(),
                    first: a.2.clone(),
                    second: b.2.clone(),
                });
            }
        }
    }
    violations
}
