use crate::flight::Flight;
use crate::gate::{Gate, GateId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

pub type AircraftType = Arc<str>;

/// One row of the static aircraft type ↔ gate relation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Compatibility {
    pub gate_id: GateId,
    pub aircraft_type: AircraftType,
}

/// Per aircraft type, the indices (into the sorted gate list) of gates able to take it.
#[derive(Debug, Default)]
pub struct CompatibilityIndex {
    by_type: HashMap<AircraftType, Vec<usize>>,
}

impl CompatibilityIndex {
    pub fn new(gates: &[Gate], rows: &[Compatibility]) -> Self {
        let gate_index = gates
            .iter()
            .enumerate()
            .map(|(i, g)| (g.id.clone(), i))
            .collect::<HashMap<GateId, usize>>();

        let mut by_type = HashMap::<AircraftType, Vec<usize>>::new();
        rows.iter()
            // rows pointing at gates outside the current gate set are ignored
            .filter_map(|row| gate_index.get(&row.gate_id).map(|g| (row.aircraft_type.clone(), *g)))
            .for_each(|(ty, g)| by_type.entry(ty).or_default().push(g));
        by_type.values_mut().for_each(|gs| {
            gs.sort_unstable();
            gs.dedup();
        });
        CompatibilityIndex { by_type }
    }

    pub fn gates_for(&self, aircraft_type: &AircraftType) -> &[usize] {
        self.by_type.get(aircraft_type).map_or(&[], |gs| gs.as_slice())
    }

    pub fn is_compatible(&self, aircraft_type: &AircraftType, gate: usize) -> bool {
        self.gates_for(aircraft_type).binary_search(&gate).is_ok()
    }

    /// Admissible gate indices for every flight, in flight order.
    ///
    /// With `enforce_capacity`, gates smaller than the flight's passenger load are left out.
    pub fn admissible(
        &self,
        flights: &[Flight],
        gates: &[Gate],
        enforce_capacity: bool,
    ) -> Vec<Vec<usize>> {
        flights
            .iter()
            .map(|f| {
                self.gates_for(&f.aircraft_type)
                    .iter()
                    .copied()
                    .filter(|g| !enforce_capacity || gates[*g].max_passengers >= f.passenger_count)
                    .collect()
            })
            .collect()
    }
}
