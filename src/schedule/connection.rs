use crate::flight::{Flight, FlightId};
use crate::gate::Gate;
use crate::schedule::assignment::AssignmentVars;
use crate::schedule::model::{ConstraintKind, LinearExpr, Model, VarId};
use crate::transit::TransitTable;
use std::collections::HashMap;
use tracing::debug;

/// Transit contribution of one (first-leg gate, second-leg gate) combination.
#[derive(Debug, Clone)]
pub struct TransitLeg {
    pub from_flight: usize,
    pub to_flight: usize,
    pub from_gate: usize,
    pub to_gate: usize,
    pub minutes: u64,
    /// 1 exactly when both legs sit on this gate combination.
    pub both: VarId,
    pub transit: VarId,
}

#[derive(Debug, Default)]
pub struct ConnectionVars {
    pub legs: Vec<TransitLeg>,
    /// Connections with both flights inside the run.
    pub connections: Vec<(usize, usize)>,
}

impl ConnectionVars {
    pub fn total(&self) -> LinearExpr {
        LinearExpr::sum(self.legs.iter().map(|l| l.transit))
    }
}

/// Encodes transit time for every connection whose second leg is in the run.
///
/// For each admissible gate combination a conjunction indicator `both` is tied
/// to the two assignment variables (`both >= a + b - 1`, `both <= a`,
/// `both <= b`), and the transit variable is bounded by `minutes * both <=
/// transit <= bound * both`. Since a flight holds at most one gate, at most one
/// combination per connection can be active. Combinations costing zero minutes
/// get no variables.
pub fn encode_connections(
    model: &mut Model,
    flights: &[Flight],
    gates: &[Gate],
    assign: &AssignmentVars,
    transit: &TransitTable,
) -> ConnectionVars {
    let index = flights
        .iter()
        .enumerate()
        .map(|(i, f)| (f.id.clone(), i))
        .collect::<HashMap<FlightId, usize>>();
    let bound = transit.upper_bound() as i64;

    let mut vars = ConnectionVars::default();
    for (i, flight) in flights.iter().enumerate() {
        let Some(next_id) = &flight.connecting_flight_id else {
            continue;
        };
        let Some(k) = index.get(next_id).copied().filter(|k| *k != i) else {
            debug!(flight = %flight.id, connecting = %next_id, "connecting flight not in run");
            continue;
        };
        vars.connections.push((i, k));

        for (g1, a) in assign.for_flight(i) {
            for (g2, b) in assign.for_flight(k) {
                let minutes = transit.lookup(&gates[*g1].id, &gates[*g2].id);
                if minutes == 0 {
                    continue;
                }
                let tag = format!("{}_{}_{}_{}", flight.id, next_id, gates[*g1].id, gates[*g2].id);
                let both = model.new_bool(format!("both_{tag}"));
                let time = model.new_int(format!("transit_time_{tag}"), 0, bound);

                model.greater_eq(
                    ConstraintKind::Connection,
                    LinearExpr::from_terms([(1, both), (-1, *a), (-1, *b)]),
                    -1,
                );
                model.less_eq(ConstraintKind::Connection, LinearExpr::from_terms([(1, both), (-1, *a)]), 0);
                model.less_eq(ConstraintKind::Connection, LinearExpr::from_terms([(1, both), (-1, *b)]), 0);
                model.greater_eq(
                    ConstraintKind::Connection,
                    LinearExpr::from_terms([(1, time), (-(minutes as i64), both)]),
                    0,
                );
                model.less_eq(
                    ConstraintKind::Connection,
                    LinearExpr::from_terms([(1, time), (-bound, both)]),
                    0,
                );

                vars.legs.push(TransitLeg {
                    from_flight: i,
                    to_flight: k,
                    from_gate: *g1,
                    to_gate: *g2,
                    minutes,
                    both,
                    transit: time,
                });
            }
        }
    }
    debug!(
        connections = vars.connections.len(),
        legs = vars.legs.len(),
        "connection transit encoded"
    );
    vars
}
