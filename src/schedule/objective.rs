use crate::flight::Flight;
use crate::policy::ObjectiveWeights;
use crate::schedule::assignment::AssignmentVars;
use crate::schedule::balance::{BalanceVars, PreferenceVars};
use crate::schedule::connection::ConnectionVars;
use crate::schedule::model::LinearExpr;
use crate::schedule::result::RunMetrics;

/// Scalarised objective (maximised):
///
/// ```text
///   coverage * assigned + passengers * pax
/// - terminal_balance * terminal spread - gate_balance * gate spread
/// - preference * violations - transit * transit minutes
/// ```
pub fn compose(
    weights: &ObjectiveWeights,
    flights: &[Flight],
    assign: &AssignmentVars,
    balance: &BalanceVars,
    preferences: &PreferenceVars,
    connections: &ConnectionVars,
) -> LinearExpr {
    let mut objective = LinearExpr::new();
    for (f, _, x) in assign.iter() {
        objective.add_term(
            weights.coverage + weights.passengers * flights[f].passenger_count as i64,
            x,
        );
    }
    if let Some(spread) = balance.terminal.spread {
        objective.add_term(-weights.terminal_balance, spread);
    }
    if let Some(spread) = balance.gate.spread {
        objective.add_term(-weights.gate_balance, spread);
    }
    for (_, _, v) in &preferences.violations {
        objective.add_term(-weights.preference, *v);
    }
    for leg in &connections.legs {
        objective.add_term(-weights.transit, leg.transit);
    }
    objective
}

/// The same objective evaluated from realised metrics.
pub fn score(weights: &ObjectiveWeights, metrics: &RunMetrics) -> i64 {
    weights.coverage * metrics.total_assigned as i64
        + weights.passengers * metrics.total_passengers as i64
        - weights.terminal_balance * metrics.terminal_usage_difference as i64
        - weights.gate_balance * metrics.gate_usage_difference as i64
        - weights.preference * metrics.preference_violations as i64
        - weights.transit * metrics.total_transit_minutes as i64
}
