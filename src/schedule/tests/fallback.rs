use crate::error::{ConfigError, EngineError, Error};
use crate::schedule::builder::GateModel;
use crate::schedule::engine::{Engine, EngineOutcome, MicroLpEngine};
use crate::schedule::model::Model;
use crate::schedule::result::SolveStatus;
use crate::schedule::tests::utils::{NINE, add_flight, add_gate, id, scenario};
use crate::schedule::verify::verify;
use crate::schedule::{Problem, Scenario, run};
use std::time::Duration;

/// Gives up immediately, as if the deadline had passed.
struct Expired;

impl Engine for Expired {
    fn solve(&self, _: &Model, _: Duration) -> Result<EngineOutcome, EngineError> {
        Ok(EngineOutcome::Timeout)
    }
}

/// Reports a proven optimum as merely feasible.
struct Unproven;

impl Engine for Unproven {
    fn solve(&self, model: &Model, deadline: Duration) -> Result<EngineOutcome, EngineError> {
        match MicroLpEngine.solve(model, deadline)? {
            EngineOutcome::Optimal(values) => Ok(EngineOutcome::Feasible(values)),
            other => Ok(other),
        }
    }
}

struct Broken;

/// Answers with a value vector that does not match the model.
struct Truncated;

impl Engine for Truncated {
    fn solve(&self, _: &Model, _: Duration) -> Result<EngineOutcome, EngineError> {
        Ok(EngineOutcome::Feasible(vec![]))
    }
}

/// Claims every variable is one.
struct AllOnes;

impl Engine for AllOnes {
    fn solve(&self, model: &Model, _: Duration) -> Result<EngineOutcome, EngineError> {
        Ok(EngineOutcome::Optimal(vec![1; model.variables().len()]))
    }
}

impl Engine for Broken {
    fn solve(&self, _: &Model, _: Duration) -> Result<EngineOutcome, EngineError> {
        Err(EngineError::Backend("out of memory".into()))
    }
}

fn busy_morning() -> Scenario {
    let mut s = scenario();
    add_gate(&mut s, "T1-G1", "T1", &["A320", "B737"]);
    add_gate(&mut s, "T1-G2", "T1", &["A320"]);
    add_gate(&mut s, "T2-G1", "T2", &["B737"]);
    add_flight(&mut s, "FL1", "A320", NINE, NINE + 60, 150);
    add_flight(&mut s, "FL2", "B737", NINE + 15, NINE + 75, 170);
    add_flight(&mut s, "FL3", "A320", NINE + 30, NINE + 90, 140);
    add_flight(&mut s, "FL4", "B737", NINE + 45, NINE + 105, 160);
    add_flight(&mut s, "FL5", "A320", NINE + 60, NINE + 120, 130);
    s
}

#[test]
fn test_timeout_returns_first_fit_schedule() {
    let problem = Problem::new(busy_morning(), None).unwrap();
    let solved = GateModel::build(&problem).solve(&Expired).unwrap();

    assert_eq!(SolveStatus::Timeout, solved.status());
    assert!(verify(&problem, &solved.records()).is_empty());
    // FL1 and FL5 share T1-G1, FL3 takes T1-G2, FL2 gets T2-G1 and FL4 finds nothing left
    assert_eq!(4, solved.metrics().total_assigned);
    assert_eq!(
        Some(&id("T2-G1")),
        solved
            .records()
            .iter()
            .find(|r| *r.flight_id == *"FL2")
            .map(|r| &r.gate_id)
    );
}

#[test]
fn test_timeout_schedule_prefers_airline_terminal() {
    let mut s = scenario();
    add_gate(&mut s, "T1-G1", "T1", &["A320"]);
    add_gate(&mut s, "T3-G1", "T3", &["A320"]);
    add_flight(&mut s, "AI101", "A320", NINE, NINE + 60, 150);
    s.policy.airline_preferences.insert(id("AI"), id("T3"));

    let outcome = run(s, None, &Expired).unwrap();

    assert_eq!(SolveStatus::Timeout, outcome.status);
    assert_eq!(Some(&id("T3-G1")), outcome.gate_of("AI101"));
    assert_eq!(0, outcome.metrics.preference_violations);
}

#[test]
fn test_strict_timeout_without_full_cover_has_no_schedule() {
    let mut s = scenario();
    add_gate(&mut s, "G1", "T1", &["A320"]);
    add_flight(&mut s, "FL1", "A320", NINE, NINE + 60, 150);
    add_flight(&mut s, "FL2", "A320", NINE + 30, NINE + 90, 150);
    s.policy.require_full_coverage = true;

    let outcome = run(s, None, &Expired).unwrap();

    assert_eq!(SolveStatus::Timeout, outcome.status);
    assert!(outcome.assignments.is_empty());
    assert_eq!(2, outcome.unassigned.len());
}

#[test]
fn test_unproven_solution_is_feasible() {
    let outcome = run(busy_morning(), None, &Unproven).unwrap();
    let optimal = run(busy_morning(), None, &MicroLpEngine).unwrap();

    assert_eq!(SolveStatus::Feasible, outcome.status);
    assert_eq!(SolveStatus::Optimal, optimal.status);
    assert_eq!(optimal.metrics.objective, outcome.metrics.objective);
}

#[test]
fn test_optimum_beats_first_fit() {
    let timed_out = run(busy_morning(), None, &Expired).unwrap();
    let optimal = run(busy_morning(), None, &MicroLpEngine).unwrap();
    assert!(optimal.metrics.objective >= timed_out.metrics.objective);
}

#[test]
fn test_tiny_deadline_still_yields_valid_schedule() {
    let mut s = busy_morning();
    s.policy.time_limit_secs = 1e-9;
    let problem = Problem::new(s, None).unwrap();
    let solved = GateModel::build(&problem).solve(&MicroLpEngine).unwrap();

    assert!(matches!(
        solved.status(),
        SolveStatus::Timeout | SolveStatus::Optimal
    ));
    assert!(verify(&problem, &solved.records()).is_empty());
}

#[test]
fn test_engine_failure_is_propagated() {
    let err = run(busy_morning(), None, &Broken).unwrap_err();
    assert!(matches!(err, Error::Engine(EngineError::Backend(_))));
}

#[test]
fn test_wrong_length_solution_is_refused() {
    let err = run(busy_morning(), None, &Truncated).unwrap_err();
    assert!(matches!(err, Error::Engine(EngineError::InvalidSolution(_))));
}

#[test]
fn test_infeasible_solution_is_refused() {
    let problem = Problem::new(busy_morning(), None).unwrap();
    let err = GateModel::build(&problem).solve(&AllOnes).unwrap_err();
    assert!(matches!(err, EngineError::InvalidSolution(_)));
}

#[test]
fn test_trivial_model_skips_the_engine() {
    let mut s = scenario();
    add_gate(&mut s, "G1", "T1", &["A320"]);
    add_flight(&mut s, "FL1", "A380", NINE, NINE + 60, 500);

    let outcome = run(s, None, &Broken).unwrap();

    assert_eq!(SolveStatus::Feasible, outcome.status);
    assert_eq!(vec![id("FL1")], outcome.unassigned);
}

#[test]
fn test_invalid_policy_stops_before_building() {
    let mut s = busy_morning();
    s.policy.time_limit_secs = 0.0;
    let err = run(s, None, &Broken).unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::InvalidDeadline)));

    let mut s = busy_morning();
    s.policy.time_limit_secs = 1e30;
    let err = run(s, None, &Broken).unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::InvalidDeadline)));

    let mut s = busy_morning();
    s.policy.weights.coverage = Some(1_000_000);
    let err = run(s, None, &Broken).unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::CoverageTooSmall { .. })));

    let mut s = busy_morning();
    s.policy.weights.preference = 20_000;
    let err = run(s, None, &Broken).unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::WeightOrdering(_))));
}
