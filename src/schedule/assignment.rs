use crate::flight::Flight;
use crate::schedule::conflict::ConflictGraph;
use crate::schedule::model::{ConstraintKind, LinearExpr, Model, VarId};
use tracing::debug;

/// One boolean per admissible (flight, gate) pair.
///
/// Pairs outside the admissible sets never get a variable.
#[derive(Debug, Default)]
pub struct AssignmentVars {
    by_flight: Vec<Vec<(usize, VarId)>>,
    by_gate: Vec<Vec<(usize, VarId)>>,
}

impl AssignmentVars {
    /// Variables of flight `f` as `(gate, var)`, ordered by gate.
    pub fn for_flight(&self, f: usize) -> &[(usize, VarId)] {
        &self.by_flight[f]
    }

    /// Variables on gate `g` as `(flight, var)`, ordered by flight.
    pub fn for_gate(&self, g: usize) -> &[(usize, VarId)] {
        &self.by_gate[g]
    }

    pub fn var(&self, f: usize, g: usize) -> Option<VarId> {
        let vars = &self.by_flight[f];
        vars.binary_search_by_key(&g, |(gate, _)| *gate)
            .ok()
            .map(|i| vars[i].1)
    }

    /// Every `(flight, gate, var)` triple in flight then gate order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, VarId)> + '_ {
        self.by_flight
            .iter()
            .enumerate()
            .flat_map(|(f, vars)| vars.iter().map(move |(g, v)| (f, *g, *v)))
    }

    pub fn len(&self) -> usize {
        self.by_flight.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn flights(&self) -> usize {
        self.by_flight.len()
    }

    /// Number of assigned flights.
    pub fn coverage(&self) -> LinearExpr {
        LinearExpr::sum(self.iter().map(|(_, _, v)| v))
    }

    /// Passengers on assigned flights.
    pub fn passengers(&self, flights: &[Flight]) -> LinearExpr {
        LinearExpr::from_terms(
            self.iter()
                .map(|(f, _, v)| (flights[f].passenger_count as i64, v)),
        )
    }
}

/// Declares the assignment variables and the hard constraints on them.
///
/// A flight gets at most one gate (exactly one under `require_full_coverage`)
/// and two overlapping flights never share a gate. A flight without admissible
/// gates contributes nothing and stays unassigned.
pub fn encode_assignments(
    model: &mut Model,
    flights: &[Flight],
    gate_count: usize,
    admissible: &[Vec<usize>],
    conflicts: &ConflictGraph,
    require_full_coverage: bool,
) -> AssignmentVars {
    let mut by_gate = vec![Vec::new(); gate_count];
    let by_flight = flights
        .iter()
        .zip(admissible)
        .enumerate()
        .map(|(f, (flight, gates))| {
            gates
                .iter()
                .map(|g| {
                    let var = model.new_bool(format!("assign_{}_{}", flight.id, g));
                    by_gate[*g].push((f, var));
                    (*g, var)
                })
                .collect::<Vec<(usize, VarId)>>()
        })
        .collect::<Vec<_>>();

    for vars in by_flight.iter().filter(|vars| !vars.is_empty()) {
        let once = LinearExpr::sum(vars.iter().map(|(_, v)| *v));
        if require_full_coverage {
            model.equal(ConstraintKind::OneGate, once, 1);
        } else {
            model.less_eq(ConstraintKind::OneGate, once, 1);
        }
    }

    let vars = AssignmentVars { by_flight, by_gate };
    for (a, b) in conflicts.pairs() {
        for (x, y) in shared_gates(vars.for_flight(*a), vars.for_flight(*b)) {
            model.less_eq(ConstraintKind::Conflict, LinearExpr::sum([x, y]), 1);
        }
    }

    debug!(
        variables = vars.len(),
        unassignable = vars.by_flight.iter().filter(|v| v.is_empty()).count(),
        conflicts = model.count(ConstraintKind::Conflict),
        "assignment variables declared"
    );
    vars
}

/// Merge of two gate-sorted lists, yielding the variable pair of every common gate.
fn shared_gates(a: &[(usize, VarId)], b: &[(usize, VarId)]) -> Vec<(VarId, VarId)> {
    let (mut i, mut j) = (0, 0);
    let mut shared = vec![];
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                shared.push((a[i].1, b[j].1));
                i += 1;
                j += 1;
            }
        }
    }
    shared
}
