//! Shift roster scheduling as a mixed-integer linear program.
//!
//! Employees belong to one shift category (day, swing, night) for the whole
//! horizon. [`pipeline::schedule`] builds a solver-agnostic [`model::Model`]
//! with the hard rules (exact coverage, mandatory off-days, a bound on
//! consecutive working days, a senior on every shift), adds the soft penalty
//! objective, solves it with `good_lp`, and projects the binaries back into a
//! day-by-day roster.

pub mod analysis;
pub mod api;
pub mod builder;
pub mod console;
pub mod constraints;
pub mod demo_data;
pub mod domain;
pub mod dto;
pub mod error;
pub mod model;
pub mod objective;
pub mod pipeline;
pub mod projection;
pub mod solver;
pub mod validation;

pub use domain::{Employee, Roster, Seniority, ShiftKind, ShiftRequirements};
pub use error::{ConfigError, ScheduleError, SolveError};
pub use pipeline::{schedule, ScheduleOutcome, SchedulingConfig};
