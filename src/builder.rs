//! Model builder: turns a roster and requirement table into a [`Model`].

use tracing::debug;

use crate::constraints::{self, STREAK_LENGTH};
use crate::domain::{Roster, ShiftRequirements};
use crate::error::ConfigError;
use crate::model::{Model, VarId};
use crate::validation::validate;

/// Decision and indicator variables, keyed by `(employee index, day)`.
///
/// Schedule variables exist only for each employee's own shift, so the shift
/// is implied by the employee and never part of the key.
#[derive(Debug, Clone)]
pub struct ScheduleVariables {
    horizon: usize,
    schedule: Vec<Vec<VarId>>,
    five_day_streak: Vec<Vec<VarId>>,
    one_day_streak: Vec<Vec<VarId>>,
}

impl ScheduleVariables {
    fn create(model: &mut Model, roster: &Roster, horizon: usize) -> Self {
        let windows = horizon.saturating_sub(STREAK_LENGTH - 1);
        let mut schedule = Vec::with_capacity(roster.len());
        let mut five_day_streak = Vec::with_capacity(roster.len());
        let mut one_day_streak = Vec::with_capacity(roster.len());

        for employee in roster.employees() {
            let (id, shift) = (&employee.id, employee.shift);
            schedule.push(
                (0..horizon)
                    .map(|day| model.add_binary(format!("schedule[{id}][{day}][{shift}]")))
                    .collect(),
            );
            five_day_streak.push(
                (0..windows)
                    .map(|day| model.add_binary(format!("five_day_streak[{id}][{day}]")))
                    .collect(),
            );
            one_day_streak.push(
                (0..horizon)
                    .map(|day| model.add_binary(format!("one_day_streak[{id}][{day}]")))
                    .collect(),
            );
        }

        Self {
            horizon,
            schedule,
            five_day_streak,
            one_day_streak,
        }
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// `schedule[employee, day]` for the employee's own shift.
    pub fn schedule(&self, employee: usize, day: usize) -> VarId {
        self.schedule[employee][day]
    }

    /// Indicators for the windows starting at day 0, 1, ...
    ///
    /// Empty when the horizon is under five days.
    pub fn five_day_streaks(&self, employee: usize) -> &[VarId] {
        &self.five_day_streak[employee]
    }

    pub fn one_day_streaks(&self, employee: usize) -> &[VarId] {
        &self.one_day_streak[employee]
    }
}

/// Validates the input and builds variables plus every hard constraint family.
///
/// The objective is left empty; see [`objective::compose`](crate::objective::compose).
pub fn build(
    roster: &Roster,
    requirements: &ShiftRequirements,
    max_consecutive_days: usize,
) -> Result<(Model, ScheduleVariables), ConfigError> {
    let horizon = validate(roster, requirements, max_consecutive_days)?;

    let mut model = Model::new();
    let vars = ScheduleVariables::create(&mut model, roster, horizon);

    constraints::add_coverage(&mut model, &vars, roster, requirements);
    constraints::add_max_consecutive_days(&mut model, &vars, roster, max_consecutive_days);
    constraints::add_off_days(&mut model, &vars, roster);
    constraints::add_seniority(&mut model, &vars, roster, requirements);
    constraints::add_streak_links(&mut model, &vars, roster);

    let stats = model.stats();
    debug!(
        employees = roster.len(),
        days = horizon,
        variables = stats.variables,
        constraints = stats.constraints,
        "Built roster model"
    );

    Ok((model, vars))
}
