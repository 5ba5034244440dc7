use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Formatter;
use std::sync::Arc;
use tabled::Tabled;

pub type GateId = Arc<str>;
pub type TerminalId = Arc<str>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Tabled)]
pub struct Gate {
    pub id: GateId,
    pub terminal_id: TerminalId,
    pub max_passengers: u32,
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.terminal_id)
    }
}

/// Sorts gates by id and drops repeated ids, keeping the first record.
pub fn prepare_gates(mut gates: Vec<Gate>) -> Vec<Gate> {
    gates.sort_by(|a, b| a.id.cmp(&b.id));
    gates.dedup_by(|b, a| a.id == b.id);
    gates
}

/// Distinct terminals of `gates` in id order, each with the indices of its gates.
pub fn terminals(gates: &[Gate]) -> Vec<(TerminalId, Vec<usize>)> {
    let mut by_terminal = std::collections::BTreeMap::<TerminalId, Vec<usize>>::new();
    gates
        .iter()
        .enumerate()
        .for_each(|(g, gate)| by_terminal.entry(gate.terminal_id.clone()).or_default().push(g));
    by_terminal.into_iter().collect()
}
