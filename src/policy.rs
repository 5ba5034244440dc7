use crate::error::ConfigError;
use crate::flight::{AirlineCode, Flight};
use crate::gate::TerminalId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Objective weights as configured. Passengers dominate the soft terms per unit;
/// coverage is checked against the whole run in [`Weights::resolve`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    /// Weight of one assigned flight. When unset it is derived per run.
    pub coverage: Option<i64>,
    pub passengers: i64,
    pub terminal_balance: i64,
    pub gate_balance: i64,
    pub preference: i64,
    pub transit: i64,
}

impl Default for Weights {
    fn default() -> Self {
        Weights {
            coverage: None,
            passengers: 10_000,
            terminal_balance: 1_000,
            gate_balance: 100,
            preference: 500,
            transit: 1,
        }
    }
}

/// Weights of one run with the coverage weight settled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ObjectiveWeights {
    pub coverage: i64,
    pub passengers: i64,
    pub terminal_balance: i64,
    pub gate_balance: i64,
    pub preference: i64,
    pub transit: i64,
}

impl Weights {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let named = [
            ("coverage", self.coverage.unwrap_or(0)),
            ("passengers", self.passengers),
            ("terminal_balance", self.terminal_balance),
            ("gate_balance", self.gate_balance),
            ("preference", self.preference),
            ("transit", self.transit),
        ];
        if let Some((name, _)) = named.iter().find(|(_, w)| *w < 0) {
            return Err(ConfigError::NegativeWeight(name));
        }
        if let Some((name, w)) = named[2..].iter().find(|(_, w)| *w > self.passengers) {
            return Err(ConfigError::WeightOrdering(format!(
                "{name} ({w}) must not exceed passengers ({})",
                self.passengers
            )));
        }
        Ok(())
    }

    /// Most the passenger, balance, preference and transit terms can move the
    /// objective between two schedules of `flights`.
    ///
    /// Spreads and the violation count each lie in `0..=flights.len()` and every
    /// connection has at most one active leg costing at most `transit_bound`.
    pub fn coverage_floor(&self, flights: &[Flight], transit_bound: u64) -> i64 {
        let n = flights.len() as i64;
        let passengers = flights.iter().map(|f| f.passenger_count as i64).sum::<i64>();
        let connections = flights
            .iter()
            .filter(|f| f.connecting_flight_id.is_some())
            .count() as i64;
        let soft = self.terminal_balance + self.gate_balance + self.preference;
        self.passengers
            .saturating_mul(passengers)
            .saturating_add(soft.saturating_mul(n))
            .saturating_add(
                self.transit
                    .saturating_mul(transit_bound as i64)
                    .saturating_mul(connections),
            )
    }

    /// Settles the coverage weight above `floor`, so one more assigned flight
    /// outweighs any change in the other terms.
    pub fn resolve(&self, floor: i64) -> Result<ObjectiveWeights, ConfigError> {
        let required = floor.saturating_add(1);
        let coverage = match self.coverage {
            None => required,
            Some(c) if c >= required => c,
            Some(c) => return Err(ConfigError::CoverageTooSmall { coverage: c, required }),
        };
        Ok(ObjectiveWeights {
            coverage,
            passengers: self.passengers,
            terminal_balance: self.terminal_balance,
            gate_balance: self.gate_balance,
            preference: self.preference,
            transit: self.transit,
        })
    }
}

/// Policy data injected into one scheduling run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    pub weights: Weights,
    pub airline_preferences: BTreeMap<AirlineCode, TerminalId>,
    pub default_transit_minutes: u64,
    pub transit_mode: String,
    pub time_limit_secs: f64,
    pub require_full_coverage: bool,
    pub enforce_gate_capacity: bool,
}

impl Default for Policy {
    fn default() -> Self {
        Policy {
            weights: Weights::default(),
            airline_preferences: BTreeMap::new(),
            default_transit_minutes: 30,
            transit_mode: "PASSENGER".to_string(),
            time_limit_secs: 300.0,
            require_full_coverage: false,
            enforce_gate_capacity: false,
        }
    }
}

impl Policy {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.deadline()?;
        self.weights.validate()
    }

    pub fn deadline(&self) -> Result<Duration, ConfigError> {
        if self.time_limit_secs <= 0.0 {
            return Err(ConfigError::InvalidDeadline);
        }
        Duration::try_from_secs_f64(self.time_limit_secs).map_err(|_| ConfigError::InvalidDeadline)
    }

    pub fn preferred_terminal(&self, airline: &AirlineCode) -> Option<&TerminalId> {
        self.airline_preferences.get(airline)
    }
}
