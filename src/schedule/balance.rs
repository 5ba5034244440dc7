use crate::flight::Flight;
use crate::gate::{Gate, TerminalId};
use crate::policy::Policy;
use crate::schedule::assignment::AssignmentVars;
use crate::schedule::model::{ConstraintKind, LinearExpr, Model, VarId};
use tracing::debug;

/// Usage counters for a family of groups (terminals or gates) and their spread.
#[derive(Debug, Default)]
pub struct UsageVars {
    pub usage: Vec<VarId>,
    /// `max(usage) - min(usage)`; absent when there are no groups.
    pub spread: Option<VarId>,
}

#[derive(Debug, Default)]
pub struct BalanceVars {
    pub terminals: Vec<TerminalId>,
    pub terminal: UsageVars,
    pub gate: UsageVars,
}

#[derive(Clone, Copy)]
struct UsageKinds {
    prefix: &'static str,
    usage: ConstraintKind,
    spread: ConstraintKind,
}

const TERMINAL: UsageKinds = UsageKinds {
    prefix: "terminal",
    usage: ConstraintKind::TerminalUsage,
    spread: ConstraintKind::TerminalSpread,
};

const GATE: UsageKinds = UsageKinds {
    prefix: "gate",
    usage: ConstraintKind::GateUsage,
    spread: ConstraintKind::GateSpread,
};

/// Terminal and gate usage counters with their max-minus-min spreads.
pub fn encode_balance(model: &mut Model, gates: &[Gate], assign: &AssignmentVars) -> BalanceVars {
    let n = assign.flights() as i64;
    let (terminals, terminal_groups): (Vec<TerminalId>, Vec<Vec<usize>>) =
        crate::gate::terminals(gates).into_iter().unzip();
    let gate_groups = (0..gates.len()).map(|g| vec![g]).collect::<Vec<_>>();

    let terminal = encode_usage(model, &terminal_groups, assign, n, TERMINAL);
    let gate = encode_usage(model, &gate_groups, assign, n, GATE);
    debug!(
        terminals = terminals.len(),
        gates = gates.len(),
        "balance counters declared"
    );
    BalanceVars {
        terminals,
        terminal,
        gate,
    }
}

fn encode_usage(
    model: &mut Model,
    groups: &[Vec<usize>],
    assign: &AssignmentVars,
    n: i64,
    kinds: UsageKinds,
) -> UsageVars {
    let usage = groups
        .iter()
        .enumerate()
        .map(|(k, gates)| {
            let var = model.new_int(format!("{}_usage_{k}", kinds.prefix), 0, n);
            // usage - Σ assign == 0
            let mut expr = LinearExpr::from_terms([(1, var)]);
            gates
                .iter()
                .flat_map(|g| assign.for_gate(*g))
                .for_each(|(_, v)| expr.add_term(-1, *v));
            model.equal(kinds.usage, expr, 0);
            var
        })
        .collect::<Vec<VarId>>();

    if usage.is_empty() {
        return UsageVars {
            usage,
            spread: None,
        };
    }

    let max = model.new_int(format!("max_{}_usage", kinds.prefix), 0, n);
    let min = model.new_int(format!("min_{}_usage", kinds.prefix), 0, n);
    for u in &usage {
        model.greater_eq(kinds.spread, LinearExpr::from_terms([(1, max), (-1, *u)]), 0);
        model.less_eq(kinds.spread, LinearExpr::from_terms([(1, min), (-1, *u)]), 0);
    }
    // the objective pushes the spread down, which pins max and min to the real extremes
    let spread = model.new_int(format!("{}_usage_difference", kinds.prefix), 0, n);
    model.equal(
        kinds.spread,
        LinearExpr::from_terms([(1, spread), (-1, max), (1, min)]),
        0,
    );
    UsageVars {
        usage,
        spread: Some(spread),
    }
}

/// Soft airline terminal preferences.
#[derive(Debug, Default)]
pub struct PreferenceVars {
    /// `(flight, gate, indicator)` for every assignment that lands outside the preferred terminal.
    pub violations: Vec<(usize, usize, VarId)>,
}

impl PreferenceVars {
    pub fn total(&self) -> LinearExpr {
        LinearExpr::sum(self.violations.iter().map(|(_, _, v)| *v))
    }
}

/// Links every off-preference assignment to an indicator: `assign <= violation`.
///
/// The implication only runs one way, so an unassigned flight leaves its
/// indicators free and the objective keeps them at zero.
pub fn encode_preferences(
    model: &mut Model,
    flights: &[Flight],
    gates: &[Gate],
    assign: &AssignmentVars,
    policy: &Policy,
) -> PreferenceVars {
    let mut violations = vec![];
    for (f, flight) in flights.iter().enumerate() {
        let Some(preferred) = policy.preferred_terminal(&flight.airline) else {
            continue;
        };
        for (g, x) in assign
            .for_flight(f)
            .iter()
            .filter(|(g, _)| gates[*g].terminal_id != *preferred)
        {
            let violation = model.new_bool(format!("pref_violation_{}_{}", flight.id, gates[*g].id));
            model.less_eq(
                ConstraintKind::Preference,
                LinearExpr::from_terms([(1, *x), (-1, violation)]),
                0,
            );
            violations.push((f, *g, violation));
        }
    }
    debug!(indicators = violations.len(), "preference indicators declared");
    PreferenceVars { violations }
}
