use crate::error::EngineError;
use crate::schedule::Problem;
use crate::schedule::assignment::{AssignmentVars, encode_assignments};
use crate::schedule::balance::{BalanceVars, PreferenceVars, encode_balance, encode_preferences};
use crate::schedule::conflict::ConflictGraph;
use crate::schedule::connection::{ConnectionVars, encode_connections};
use crate::schedule::engine::{Engine, EngineOutcome};
use crate::schedule::incumbent::first_fit;
use crate::schedule::model::{Model, VarId};
use crate::schedule::objective::compose;
use crate::schedule::result::{
    AssignmentRecord, ModelStats, RunMetrics, ScheduleOutcome, SolveStatus, TerminalUsage,
};
use tracing::{info, instrument, warn};

/// A gate assignment model that is still accepting constraints.
pub struct GateModel<'p> {
    problem: &'p Problem,
    admissible: Vec<Vec<usize>>,
    conflicts: ConflictGraph,
    model: Model,
    assign: AssignmentVars,
    balance: BalanceVars,
    preferences: PreferenceVars,
    connections: ConnectionVars,
}

impl<'p> GateModel<'p> {
    #[instrument(skip_all, fields(flights = problem.flights.len(), gates = problem.gates.len()))]
    pub fn build(problem: &'p Problem) -> Self {
        let flights = &problem.flights;
        let gates = &problem.gates;
        let policy = &problem.policy;

        let admissible =
            problem
                .compatibility
                .admissible(flights, gates, policy.enforce_gate_capacity);
        let conflicts = ConflictGraph::build(flights);

        let mut model = Model::new();
        let assign = encode_assignments(
            &mut model,
            flights,
            gates.len(),
            &admissible,
            &conflicts,
            policy.require_full_coverage,
        );
        let balance = encode_balance(&mut model, gates, &assign);
        let preferences = encode_preferences(&mut model, flights, gates, &assign, policy);
        let connections = encode_connections(&mut model, flights, gates, &assign, &problem.transit);
        model.maximise(compose(
            &problem.weights,
            flights,
            &assign,
            &balance,
            &preferences,
            &connections,
        ));

        let gate_model = GateModel {
            problem,
            admissible,
            conflicts,
            model,
            assign,
            balance,
            preferences,
            connections,
        };
        let stats = gate_model.stats();
        info!(
            variables = stats.variables,
            constraints = stats.constraints,
            conflict_pairs = stats.conflict_pairs,
            unassignable = stats.unassignable_flights,
            "gate model built"
        );
        gate_model
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn assignments(&self) -> &AssignmentVars {
        &self.assign
    }

    pub fn conflicts(&self) -> &ConflictGraph {
        &self.conflicts
    }

    pub fn balance(&self) -> &BalanceVars {
        &self.balance
    }

    pub fn preferences(&self) -> &PreferenceVars {
        &self.preferences
    }

    pub fn connections(&self) -> &ConnectionVars {
        &self.connections
    }

    pub fn stats(&self) -> ModelStats {
        ModelStats {
            flights: self.problem.flights.len(),
            gates: self.problem.gates.len(),
            unassignable_flights: self.admissible.iter().filter(|a| a.is_empty()).count(),
            conflict_pairs: self.conflicts.len(),
            variables: self.model.variables().len(),
            constraints: self.model.constraints().len(),
            assignment_variables: self.assign.len(),
            preference_indicators: self.preferences.violations.len(),
            connections: self.connections.connections.len(),
            transit_legs: self.connections.legs.len(),
        }
    }

    /// Hands the model to `engine` and freezes the outcome.
    #[instrument(skip_all, fields(deadline_secs = self.problem.policy.time_limit_secs))]
    pub fn solve(self, engine: &dyn Engine) -> Result<Solved<'p>, EngineError> {
        let stats = self.stats();
        let problem = self.problem;
        let unassigned = vec![None; problem.flights.len()];

        if self.assign.is_empty() {
            info!("no admissible flight/gate pair, every flight stays unassigned");
            return Ok(Solved::from_assignment(problem, SolveStatus::Feasible, unassigned, stats));
        }

        let solved = match engine.solve(&self.model, problem.deadline)? {
            EngineOutcome::Optimal(values) => self.extract(SolveStatus::Optimal, &values, stats)?,
            EngineOutcome::Feasible(values) => self.extract(SolveStatus::Feasible, &values, stats)?,
            EngineOutcome::Infeasible => {
                warn!("model is infeasible");
                Solved::from_assignment(problem, SolveStatus::Infeasible, unassigned, stats)
            }
            EngineOutcome::Timeout => {
                match first_fit(&problem.flights, &problem.gates, &self.admissible, &problem.policy) {
                    Some(gate_of) => {
                        info!("returning first-fit schedule after timeout");
                        Solved::from_assignment(problem, SolveStatus::Timeout, gate_of, stats)
                    }
                    None => Solved::from_assignment(problem, SolveStatus::Timeout, unassigned, stats),
                }
            }
        };
        let metrics = &solved.metrics;
        info!(
            status = %solved.status,
            assigned = metrics.total_assigned,
            passengers = metrics.total_passengers,
            terminal_usage_difference = metrics.terminal_usage_difference,
            gate_usage_difference = metrics.gate_usage_difference,
            preference_violations = metrics.preference_violations,
            transit_minutes = metrics.total_transit_minutes,
            "run finished"
        );
        Ok(solved)
    }

    /// Reads the decision values back into a flight → gate map and the realised metrics.
    ///
    /// Values that do not fit the model are refused rather than read.
    fn extract(
        self,
        status: SolveStatus,
        values: &[i64],
        stats: ModelStats,
    ) -> Result<Solved<'p>, EngineError> {
        let expected = self.model.variables().len();
        if values.len() != expected {
            return Err(EngineError::InvalidSolution(format!(
                "{} values for {expected} variables",
                values.len()
            )));
        }
        if !self.model.is_feasible(values) {
            warn!("engine values violate the model");
            return Err(EngineError::InvalidSolution(
                "values violate the model".to_string(),
            ));
        }
        let mut gate_of = vec![None; self.problem.flights.len()];
        self.assign
            .iter()
            .filter(|(_, _, x)| values[x.index()] == 1)
            .for_each(|(f, g, _)| gate_of[f] = Some(g));

        let value = |v: Option<VarId>| v.map_or(0, |v| values[v.index()].max(0) as u64);
        let metrics = RunMetrics {
            total_assigned: gate_of.iter().flatten().count(),
            total_passengers: gate_of
                .iter()
                .zip(&self.problem.flights)
                .filter(|(g, _)| g.is_some())
                .map(|(_, f)| f.passenger_count as u64)
                .sum(),
            terminal_usage: self
                .balance
                .terminals
                .iter()
                .zip(&self.balance.terminal.usage)
                .map(|(terminal, u)| TerminalUsage {
                    terminal: terminal.clone(),
                    flights: value(Some(*u)),
                })
                .collect(),
            terminal_usage_difference: value(self.balance.terminal.spread),
            gate_usage_difference: value(self.balance.gate.spread),
            preference_violations: self
                .preferences
                .violations
                .iter()
                .filter(|(_, _, v)| values[v.index()] == 1)
                .count(),
            total_transit_minutes: self.connections.total().evaluate(values).max(0) as u64,
            objective: self.model.objective().evaluate(values),
        };
        Ok(Solved {
            problem: self.problem,
            status,
            gate_of,
            metrics,
            stats,
        })
    }
}

/// Read-only result of one run.
#[derive(Debug)]
pub struct Solved<'p> {
    problem: &'p Problem,
    status: SolveStatus,
    gate_of: Vec<Option<usize>>,
    metrics: RunMetrics,
    stats: ModelStats,
}

impl<'p> Solved<'p> {
    fn from_assignment(
        problem: &'p Problem,
        status: SolveStatus,
        gate_of: Vec<Option<usize>>,
        stats: ModelStats,
    ) -> Self {
        let metrics = RunMetrics::evaluate(problem, &gate_of);
        Solved {
            problem,
            status,
            gate_of,
            metrics,
            stats,
        }
    }

    pub fn status(&self) -> SolveStatus {
        self.status
    }

    /// Gate index of flight `f`, if it got one.
    pub fn gate_of(&self, f: usize) -> Option<usize> {
        self.gate_of[f]
    }

    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }

    pub fn stats(&self) -> &ModelStats {
        &self.stats
    }

    pub fn records(&self) -> Vec<AssignmentRecord> {
        self.problem
            .flights
            .iter()
            .zip(&self.gate_of)
            .filter_map(|(f, g)| {
                let gate = &self.problem.gates[(*g)?];
                Some(AssignmentRecord {
                    flight_id: f.id.clone(),
                    airline: f.airline.clone(),
                    gate_id: gate.id.clone(),
                    terminal_id: gate.terminal_id.clone(),
                    arrival_time: f.scheduled_arrival,
                    departure_time: f.scheduled_departure,
                    passenger_count: f.passenger_count,
                })
            })
            .collect()
    }

    pub fn into_outcome(self) -> ScheduleOutcome {
        ScheduleOutcome {
            status: self.status,
            assignments: self.records(),
            unassigned: self
                .problem
                .flights
                .iter()
                .zip(&self.gate_of)
                .filter(|(_, g)| g.is_none())
                .map(|(f, _)| f.id.clone())
                .collect(),
            rejected: self.problem.rejected.clone(),
            metrics: self.metrics,
            stats: self.stats,
        }
    }
}
