//! Input validation for roster problems.
//!
//! Checks run before any variable is created. Detects:
//! - Empty horizons and requirement arrays of different lengths
//! - Duplicate employee ids
//! - Employees whose shift has no requirement entry
//! - Shift categories without a senior employee
//! - A zero max-consecutive-days bound

use std::collections::HashSet;

use crate::domain::{Roster, ShiftRequirements};
use crate::error::ConfigError;

/// Validates the roster and requirement table, returning the horizon length.
pub fn validate(
    roster: &Roster,
    requirements: &ShiftRequirements,
    max_consecutive_days: usize,
) -> Result<usize, ConfigError> {
    if max_consecutive_days == 0 {
        return Err(ConfigError::InvalidMaxConsecutiveDays);
    }

    let horizon = requirements.horizon();
    if horizon == 0 {
        return Err(ConfigError::EmptyHorizon);
    }
    for (shift, counts) in requirements.iter() {
        if counts.len() != horizon {
            return Err(ConfigError::RequirementLengthMismatch {
                shift,
                expected: horizon,
                found: counts.len(),
            });
        }
    }

    let mut seen = HashSet::with_capacity(roster.len());
    for employee in roster.employees() {
        if !seen.insert(employee.id.as_str()) {
            return Err(ConfigError::DuplicateEmployee {
                id: employee.id.clone(),
            });
        }
        if !requirements.contains(employee.shift) {
            return Err(ConfigError::MissingRequirement {
                employee: employee.id.clone(),
                shift: employee.shift,
            });
        }
    }

    for shift in requirements.shifts() {
        if !roster.on_shift(shift).any(|(_, e)| e.is_senior()) {
            return Err(ConfigError::NoSeniorOnShift { shift });
        }
    }

    Ok(horizon)
}
