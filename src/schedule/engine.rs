//! Boundary to the combinatorial solver.

use crate::error::EngineError;
use crate::schedule::model::{Domain, LinearExpr, Model, Relation};
use good_lp::{
    Expression, ProblemVariables, ResolutionError, Solution, SolverModel, Variable, constraint,
    default_solver, variable,
};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::mpsc::{RecvTimeoutError, channel};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// What the solver made of a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineOutcome {
    /// Proven optimal; one value per model variable.
    Optimal(Vec<i64>),
    /// Feasible but not proven optimal.
    Feasible(Vec<i64>),
    Infeasible,
    /// Deadline passed before the engine produced a solution.
    Timeout,
}

pub trait Engine {
    fn solve(&self, model: &Model, deadline: Duration) -> Result<EngineOutcome, EngineError>;
}

/// `good_lp` with the pure-Rust microlp backend, run on its own thread so the
/// caller can give up at the deadline.
///
/// microlp cannot be interrupted: after a timeout the worker keeps its copy of
/// the model and runs until microlp returns, and its answer is dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct MicroLpEngine;

impl Engine for MicroLpEngine {
    #[instrument(skip_all, fields(variables = model.variables().len(), constraints = model.constraints().len()))]
    fn solve(&self, model: &Model, deadline: Duration) -> Result<EngineOutcome, EngineError> {
        let started = Instant::now();
        let job = model.clone();
        let (tx, rx) = channel();
        thread::Builder::new()
            .name("gate-assign-solver".into())
            .spawn(move || {
                let res = catch_unwind(AssertUnwindSafe(|| run_model(&job)))
                    .unwrap_or(Err(EngineError::Panicked));
                // the caller may have stopped waiting
                let _ = tx.send(res);
            })
            .map_err(|e| EngineError::Backend(e.to_string()))?;

        match rx.recv_timeout(deadline) {
            Ok(res) => {
                info!(elapsed_ms = started.elapsed().as_millis() as u64, "solver finished");
                res
            }
            Err(RecvTimeoutError::Timeout) => {
                warn!(
                    deadline_ms = deadline.as_millis() as u64,
                    "solver deadline exceeded, worker left running in the background"
                );
                Ok(EngineOutcome::Timeout)
            }
            Err(RecvTimeoutError::Disconnected) => Err(EngineError::WorkerLost),
        }
    }
}

fn to_expression(expr: &LinearExpr, handles: &[Variable]) -> Expression {
    expr.terms
        .iter()
        .fold(Expression::from(expr.constant as f64), |acc, (coef, var)| {
            acc + (*coef as f64) * handles[var.index()]
        })
}

fn run_model(model: &Model) -> Result<EngineOutcome, EngineError> {
    let mut vars = ProblemVariables::new();
    let handles = model
        .variables()
        .iter()
        .map(|v| {
            let definition = match v.domain {
                Domain::Binary => variable().binary(),
                Domain::Integer { lower, upper } => {
                    variable().integer().min(lower as f64).max(upper as f64)
                }
            };
            vars.add(definition.name(v.name.clone()))
        })
        .collect::<Vec<Variable>>();

    let objective = to_expression(model.objective(), &handles);
    let mut problem = vars.maximise(objective).using(default_solver);
    for c in model.constraints() {
        let lhs = to_expression(&c.expr, &handles);
        let rhs = c.rhs as f64;
        problem.add_constraint(match c.relation {
            Relation::LessEq => constraint!(lhs <= rhs),
            Relation::Equal => constraint!(lhs == rhs),
            Relation::GreaterEq => constraint!(lhs >= rhs),
        });
    }

    match problem.solve() {
        Ok(solution) => {
            let values = handles
                .iter()
                .map(|h| solution.value(*h).round() as i64)
                .collect::<Vec<i64>>();
            debug!(objective = model.objective().evaluate(&values), "optimal solution");
            Ok(EngineOutcome::Optimal(values))
        }
        Err(ResolutionError::Infeasible) => Ok(EngineOutcome::Infeasible),
        Err(e) => Err(EngineError::Backend(e.to_string())),
    }
}
