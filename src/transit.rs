use crate::flight::LocationId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

pub type TransportMode = Arc<str>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitTime {
    pub from_location: LocationId,
    pub to_location: LocationId,
    pub transport_mode: TransportMode,
    pub minutes: u64,
}

/// Transit minutes between two locations for a single transport mode.
#[derive(Debug)]
pub struct TransitTable {
    minutes: HashMap<(LocationId, LocationId), u64>,
    default_minutes: u64,
}

impl TransitTable {
    pub fn new(rows: &[TransitTime], mode: &str, default_minutes: u64) -> Self {
        let minutes = rows
            .iter()
            .filter(|r| *r.transport_mode == *mode)
            .map(|r| ((r.from_location.clone(), r.to_location.clone()), r.minutes))
            .collect();
        TransitTable {
            minutes,
            default_minutes,
        }
    }

    /// Looked-up minutes; a missing pair falls back to the default, except that staying put costs 0.
    pub fn lookup(&self, from: &LocationId, to: &LocationId) -> u64 {
        match self.minutes.get(&(from.clone(), to.clone())) {
            Some(m) => *m,
            None if from == to => 0,
            None => self.default_minutes,
        }
    }

    /// Largest value `lookup` can return.
    pub fn upper_bound(&self) -> u64 {
        self.minutes
            .values()
            .copied()
            .max()
            .unwrap_or(0)
            .max(self.default_minutes)
    }
}
