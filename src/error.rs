//! Error types for roster scheduling.

use std::time::Duration;
use thiserror::Error;

use crate::domain::ShiftKind;

/// Input rejected before any model is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("requirement table defines no days")]
    EmptyHorizon,
    #[error("{shift} shift lists {found} days of requirements, expected {expected}")]
    RequirementLengthMismatch {
        shift: ShiftKind,
        expected: usize,
        found: usize,
    },
    #[error("employee {employee} works the {shift} shift, which has no requirement entry")]
    MissingRequirement { employee: String, shift: ShiftKind },
    #[error("{shift} shift has no senior employee")]
    NoSeniorOnShift { shift: ShiftKind },
    #[error("employee id {id} appears more than once")]
    DuplicateEmployee { id: String },
    #[error("max consecutive days must be at least 1")]
    InvalidMaxConsecutiveDays,
    #[error("solver time limit must be a positive number of seconds")]
    InvalidTimeLimit,
}

/// Failure reported by the solver adapter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    #[error("no assignment satisfies every hard constraint")]
    Infeasible,
    #[error("objective is unbounded")]
    Unbounded,
    #[error("solver did not finish within {limit:?}")]
    TimeLimitReached { limit: Duration },
    #[error("solver failed: {0}")]
    Backend(String),
}

/// Any failure of the scheduling pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Solve(#[from] SolveError),
}

impl ScheduleError {
    pub fn is_infeasible(&self) -> bool {
        matches!(self, ScheduleError::Solve(SolveError::Infeasible))
    }
}
