//! Solver adapter: runs a [`Model`] through the `good_lp` MILP backend.
//!
//! Only this module knows about `good_lp`. The rest of the crate builds
//! solver-agnostic [`Model`] values.

use good_lp::solvers::{SolutionStatus, WithTimeLimit};
use good_lp::{
    constraint, microlp, variable, Expression, ProblemVariables, ResolutionError, Solution,
    SolverModel, Variable, VariableDefinition,
};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::error::{ConfigError, SolveError};
use crate::model::{self, LinearExpr, Model, Relation, VariableDomain};

/// Tolerance used when re-checking a solution the backend did not prove optimal.
const FEASIBILITY_TOLERANCE: f64 = 1e-6;

/// Solver configuration with termination criteria.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SolverConfig {
    /// Stop after this many seconds and keep the best roster found so far.
    /// `None` waits for a proven optimum. Must be finite and positive;
    /// [`SolverConfig::validate`] rejects anything else and [`solve`]
    /// ignores it.
    pub time_limit_secs: Option<f64>,
}

impl SolverConfig {
    pub fn with_time_limit(limit: Duration) -> Self {
        Self {
            time_limit_secs: Some(limit.as_secs_f64()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.time_limit_secs {
            Some(secs) if !(secs.is_finite() && secs > 0.0) => Err(ConfigError::InvalidTimeLimit),
            _ => Ok(()),
        }
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_secs
            .filter(|secs| secs.is_finite() && *secs > 0.0)
            .map(Duration::from_secs_f64)
    }
}

/// How the backend stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolveStatus {
    /// Proven optimal.
    Optimal,
    /// Best roster found before the time limit; optimality not proven.
    Feasible,
}

impl SolveStatus {
    /// Returns the status as a SCREAMING_SNAKE_CASE string for API responses.
    ///
    /// ```
    /// use shift_roster::solver::SolveStatus;
    ///
    /// assert_eq!(SolveStatus::Optimal.as_str(), "OPTIMAL");
    /// assert_eq!(SolveStatus::Feasible.as_str(), "FEASIBLE");
    /// ```
    pub fn as_str(self) -> &'static str {
        match self {
            SolveStatus::Optimal => "OPTIMAL",
            SolveStatus::Feasible => "FEASIBLE",
        }
    }
}

impl From<SolutionStatus> for SolveStatus {
    fn from(status: SolutionStatus) -> Self {
        match status {
            SolutionStatus::Optimal => SolveStatus::Optimal,
            SolutionStatus::TimeLimit | SolutionStatus::GapLimit => SolveStatus::Feasible,
        }
    }
}

/// Solved values for every model variable, indexed by [`model::VarId`].
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub values: Vec<f64>,
    /// Objective recomputed from `values`.
    pub objective: f64,
    pub status: SolveStatus,
    pub duration: Duration,
}

impl Assignment {
    pub fn value(&self, var: model::VarId) -> f64 {
        self.values[var.index()]
    }
}

/// Solves `model` once on the calling thread.
///
/// With a time limit the backend stops on its own and returns its incumbent
/// as [`SolveStatus::Feasible`]; if it has none yet the call fails with
/// [`SolveError::TimeLimitReached`].
pub fn solve(model: &Model, config: &SolverConfig) -> Result<Assignment, SolveError> {
    let start = Instant::now();
    let stats = model.stats();
    let time_limit = config.time_limit();

    info!(
        variables = stats.variables,
        constraints = stats.constraints,
        time_limit = ?time_limit,
        "Starting MILP solver"
    );

    let (values, status) = run_backend(model, time_limit)?;
    let objective = model.objective().evaluate(&values);
    let duration = start.elapsed();

    if status == SolveStatus::Feasible {
        let violated = model.violated_constraints(&values, FEASIBILITY_TOLERANCE);
        if !violated.is_empty() {
            warn!(
                count = violated.len(),
                first = violated[0],
                "Solver incumbent violates constraints"
            );
            return Err(SolveError::Backend(format!(
                "incumbent violates {} constraints, first {}",
                violated.len(),
                violated[0]
            )));
        }
    }

    info!(
        duration_secs = duration.as_secs_f64(),
        objective,
        status = status.as_str(),
        "Solving complete"
    );

    Ok(Assignment {
        values,
        objective,
        status,
        duration,
    })
}

fn run_backend(
    model: &Model,
    time_limit: Option<Duration>,
) -> Result<(Vec<f64>, SolveStatus), SolveError> {
    let mut problem_vars = ProblemVariables::new();
    let handles: Vec<Variable> = model
        .variables()
        .iter()
        .map(|v| problem_vars.add(definition(v)))
        .collect();

    // constant offsets do not move the optimum
    let objective = expression(model.objective(), &handles);
    let mut problem = problem_vars.minimise(objective).using(microlp);
    if let Some(limit) = time_limit {
        problem = problem.with_time_limit(limit.as_secs_f64());
    }

    for c in model.constraints() {
        let lhs = expression(&c.expr, &handles);
        let rhs = c.rhs - c.expr.constant;
        let translated = match c.relation {
            Relation::Eq => constraint::eq(lhs, rhs),
            Relation::Le => constraint::leq(lhs, rhs),
            Relation::Ge => constraint::geq(lhs, rhs),
        };
        problem.add_constraint(translated);
    }

    let solution = problem
        .solve()
        .map_err(|err| resolution_error(err, time_limit))?;
    let status = SolveStatus::from(solution.status());
    let values = handles.iter().map(|&v| solution.value(v)).collect();

    Ok((values, status))
}

fn definition(var: &model::Variable) -> VariableDefinition {
    let def = variable().name(var.name.clone());
    match var.domain {
        VariableDomain::Binary => def.binary(),
        VariableDomain::Integer { min, max } => def.integer().min(min).max(max),
        VariableDomain::Continuous { min, max } => def.min(min).max(max),
    }
}

fn expression(expr: &LinearExpr, handles: &[Variable]) -> Expression {
    let mut out = Expression::with_capacity(expr.terms.len());
    for &(var, coefficient) in &expr.terms {
        out.add_mul(coefficient, handles[var.index()]);
    }
    out
}

/// The backend reports an expired limit without an incumbent as `Other`.
fn resolution_error(err: ResolutionError, time_limit: Option<Duration>) -> SolveError {
    match (err, time_limit) {
        (ResolutionError::Infeasible, _) => SolveError::Infeasible,
        (ResolutionError::Unbounded, _) => SolveError::Unbounded,
        (ResolutionError::Other(_), Some(limit)) => SolveError::TimeLimitReached { limit },
        (other, _) => SolveError::Backend(other.to_string()),
    }
}
