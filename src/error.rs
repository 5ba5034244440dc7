use crate::flight::FlightId;
use crate::time::Time;
use serde::Serialize;
use thiserror::Error;

/// Failures while reading a scenario document.
#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse scenario: {0}")]
    Json(#[from] serde_json::Error),
}

/// A flight record rejected before model construction.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("flight {flight} arrives at {arrival} after it departs at {departure}")]
    MalformedWindow {
        flight: FlightId,
        arrival: Time,
        departure: Time,
    },
    #[error("flight {flight} appears more than once")]
    DuplicateFlight { flight: FlightId },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("objective weights break the priority ordering: {0}")]
    WeightOrdering(String),
    #[error("objective weight {0} is negative")]
    NegativeWeight(&'static str),
    #[error("coverage weight {coverage} does not outweigh the other objective terms, needs at least {required}")]
    CoverageTooSmall { coverage: i64, required: i64 },
    #[error("solver deadline must be a positive, finite number of seconds")]
    InvalidDeadline,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("solver backend failed: {0}")]
    Backend(String),
    #[error("solver backend panicked")]
    Panicked,
    #[error("solver returned an unusable solution: {0}")]
    InvalidSolution(String),
    #[error("solver worker disconnected before replying")]
    WorkerLost,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Scenario(#[from] ScenarioError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Engine(#[from] EngineError),
}
