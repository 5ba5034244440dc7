use crate::error::ValidationError;
use crate::flight::{AirlineCode, FlightId};
use crate::gate::{GateId, TerminalId};
use crate::schedule::Problem;
use crate::time::Time;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use tabled::Tabled;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolveStatus {
    /// The solver proved no better schedule exists.
    Optimal,
    /// A valid schedule that was not proven optimal.
    Feasible,
    Infeasible,
    /// The deadline passed; the schedule, if any, is the best one known.
    Timeout,
}

impl SolveStatus {
    pub fn has_schedule(&self) -> bool {
        !matches!(self, SolveStatus::Infeasible)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SolveStatus::Optimal => "OPTIMAL",
            SolveStatus::Feasible => "FEASIBLE",
            SolveStatus::Infeasible => "INFEASIBLE",
            SolveStatus::Timeout => "TIMEOUT",
        };
        write!(f, "{name}")
    }
}

/// One assigned flight, flattened for export.
#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct AssignmentRecord {
    #[tabled(rename = "Flight")]
    pub flight_id: FlightId,
    #[tabled(rename = "Airline")]
    pub airline: AirlineCode,
    #[tabled(rename = "Gate")]
    pub gate_id: GateId,
    #[tabled(rename = "Terminal")]
    pub terminal_id: TerminalId,
    #[tabled(rename = "Arrival")]
    pub arrival_time: Time,
    #[tabled(rename = "Departure")]
    pub departure_time: Time,
    #[tabled(rename = "Passengers")]
    pub passenger_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TerminalUsage {
    pub terminal: TerminalId,
    pub flights: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunMetrics {
    pub total_assigned: usize,
    pub total_passengers: u64,
    pub terminal_usage: Vec<TerminalUsage>,
    pub terminal_usage_difference: u64,
    pub gate_usage_difference: u64,
    pub preference_violations: usize,
    pub total_transit_minutes: u64,
    pub objective: i64,
}

impl RunMetrics {
    /// Metrics of `gate_of` computed straight from the data, without a model.
    pub fn evaluate(problem: &Problem, gate_of: &[Option<usize>]) -> Self {
        let flights = &problem.flights;
        let gates = &problem.gates;
        let policy = &problem.policy;

        let mut gate_usage = vec![0u64; gates.len()];
        gate_of.iter().flatten().for_each(|g| gate_usage[*g] += 1);

        let terminal_usage = crate::gate::terminals(gates)
            .into_iter()
            .map(|(terminal, members)| TerminalUsage {
                terminal,
                flights: members.iter().map(|g| gate_usage[*g]).sum(),
            })
            .collect::<Vec<TerminalUsage>>();

        let assigned = || flights.iter().zip(gate_of).filter_map(|(f, g)| g.map(|g| (f, g)));
        let preference_violations = assigned()
            .filter(|(f, g)| {
                policy
                    .preferred_terminal(&f.airline)
                    .is_some_and(|t| gates[*g].terminal_id != *t)
            })
            .count();

        let index = flights
            .iter()
            .enumerate()
            .map(|(i, f)| (f.id.clone(), i))
            .collect::<HashMap<FlightId, usize>>();
        let total_transit_minutes = flights
            .iter()
            .enumerate()
            .filter_map(|(i, f)| {
                let k = *index.get(f.connecting_flight_id.as_ref()?)?;
                if k == i {
                    return None;
                }
                let (from, to) = (gate_of[i]?, gate_of[k]?);
                Some(problem.transit.lookup(&gates[from].id, &gates[to].id))
            })
            .sum();

        let mut metrics = RunMetrics {
            total_assigned: assigned().count(),
            total_passengers: assigned().map(|(f, _)| f.passenger_count as u64).sum(),
            terminal_usage_difference: spread(terminal_usage.iter().map(|t| t.flights)),
            gate_usage_difference: spread(gate_usage.iter().copied()),
            terminal_usage,
            preference_violations,
            total_transit_minutes,
            objective: 0,
        };
        metrics.objective = crate::schedule::objective::score(&problem.weights, &metrics);
        metrics
    }
}

pub(crate) fn spread<I: Iterator<Item = u64> + Clone>(values: I) -> u64 {
    match (values.clone().max(), values.min()) {
        (Some(max), Some(min)) => max - min,
        _ => 0,
    }
}

/// Size of the constraint model behind a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModelStats {
    pub flights: usize,
    pub gates: usize,
    pub unassignable_flights: usize,
    pub conflict_pairs: usize,
    pub variables: usize,
    pub constraints: usize,
    pub assignment_variables: usize,
    pub preference_indicators: usize,
    pub connections: usize,
    pub transit_legs: usize,
}

/// Everything a run hands to its consumers.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleOutcome {
    pub status: SolveStatus,
    pub assignments: Vec<AssignmentRecord>,
    pub unassigned: Vec<FlightId>,
    pub rejected: Vec<ValidationError>,
    pub metrics: RunMetrics,
    pub stats: ModelStats,
}

impl ScheduleOutcome {
    pub fn gate_of(&self, flight: &str) -> Option<&GateId> {
        self.assignments
            .iter()
            .find(|r| *r.flight_id == *flight)
            .map(|r| &r.gate_id)
    }
}
