pub mod assignment;
pub mod balance;
pub mod builder;
pub mod conflict;
pub mod connection;
pub mod engine;
pub mod incumbent;
pub mod model;
pub mod objective;
pub mod result;
pub mod verify;


use crate::aircraft::{Compatibility, CompatibilityIndex};
use crate::error::{ConfigError, Error, ScenarioError, ValidationError};
use crate::flight::{Flight, prepare_flights};
use crate::gate::{Gate, prepare_gates};
use crate::policy::{ObjectiveWeights, Policy};
use crate::time::TimeWindow;
use crate::transit::{TransitTable, TransitTime};
use builder::GateModel;
use engine::Engine;
use result::ScheduleOutcome;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Raw input records of one scheduling run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scenario {
    pub flights: Vec<Flight>,
    pub gates: Vec<Gate>,
    #[serde(default)]
    pub compatibility: Vec<Compatibility>,
    #[serde(default)]
    pub transit_times: Vec<TransitTime>,
    #[serde(default)]
    pub policy: Policy,
}

impl Scenario {
    pub fn load_from_file(path: &str) -> Result<Self, ScenarioError> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }
}

/// Validated, ordered inputs that a [`GateModel`] is built from.
#[derive(Debug)]
pub struct Problem {
    pub flights: Vec<Flight>,
    pub gates: Vec<Gate>,
    pub compatibility: CompatibilityIndex,
    pub transit: TransitTable,
    pub policy: Policy,
    /// Configured weights with the coverage weight settled for these flights.
    pub weights: ObjectiveWeights,
    pub deadline: Duration,
    pub rejected: Vec<ValidationError>,
}

impl Problem {
    pub fn new(scenario: Scenario, window: Option<TimeWindow>) -> Result<Self, ConfigError> {
        scenario.policy.validate()?;
        let deadline = scenario.policy.deadline()?;
        let (flights, rejected) = prepare_flights(scenario.flights, window.as_ref());
        rejected
            .iter()
            .for_each(|e| warn!(error = %e, "flight record rejected"));
        let gates = prepare_gates(scenario.gates);
        let compatibility = CompatibilityIndex::new(&gates, &scenario.compatibility);
        let transit = TransitTable::new(
            &scenario.transit_times,
            &scenario.policy.transit_mode,
            scenario.policy.default_transit_minutes,
        );
        let weights = scenario.policy.weights.resolve(
            scenario
                .policy
                .weights
                .coverage_floor(&flights, transit.upper_bound()),
        )?;
        info!(
            flights = flights.len(),
            gates = gates.len(),
            rejected = rejected.len(),
            coverage_weight = weights.coverage,
            "scenario prepared"
        );
        Ok(Problem {
            flights,
            gates,
            compatibility,
            transit,
            policy: scenario.policy,
            weights,
            deadline,
            rejected,
        })
    }
}

/// Builds, solves and extracts one batch schedule.
#[instrument(skip_all)]
pub fn run(
    scenario: Scenario,
    window: Option<TimeWindow>,
    engine: &dyn Engine,
) -> Result<ScheduleOutcome, Error> {
    let problem = Problem::new(scenario, window)?;
    let solved = GateModel::build(&problem).solve(engine)?;
    Ok(solved.into_outcome())
}
