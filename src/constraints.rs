//! Hard constraint families and streak indicator linkage.
//!
//! Each family appends named linear constraints to the [`Model`]. Days are
//! 0-indexed here; mandatory off-days arrive 1-indexed and are converted by
//! [`Employee::off_day_indices`](crate::domain::Employee::off_day_indices).

use crate::builder::ScheduleVariables;
use crate::domain::{Roster, ShiftRequirements};
use crate::model::{LinearExpr, Model, Relation};

/// Number of consecutive days covered by a five-day streak indicator.
pub const STREAK_LENGTH: usize = 5;

// =========================================================================
// HARD: Coverage
// =========================================================================
// Assigned headcount equals the requirement exactly; overstaffing is not allowed.
pub fn add_coverage(
    model: &mut Model,
    vars: &ScheduleVariables,
    roster: &Roster,
    requirements: &ShiftRequirements,
) {
    for day in 0..vars.horizon() {
        for shift in requirements.shifts() {
            let staffed =
                LinearExpr::sum(roster.on_shift(shift).map(|(e, _)| vars.schedule(e, day)));
            model.add_constraint(
                format!("coverage[{shift}][{day}]"),
                staffed,
                Relation::Eq,
                f64::from(requirements.required(shift, day)),
            );
        }
    }
}

// =========================================================================
// HARD: Max Consecutive Days
// =========================================================================
// Every window of `max + 1` days holds at most `max` worked days. Windows do
// not wrap around the horizon.
pub fn add_max_consecutive_days(
    model: &mut Model,
    vars: &ScheduleVariables,
    roster: &Roster,
    max_consecutive_days: usize,
) {
    let windows = vars.horizon().saturating_sub(max_consecutive_days);
    for (e, employee) in roster.employees().iter().enumerate() {
        for start in 0..windows {
            let worked = LinearExpr::sum(
                (start..=start + max_consecutive_days).map(|day| vars.schedule(e, day)),
            );
            model.add_constraint(
                format!("max_consecutive[{}][{start}]", employee.id),
                worked,
                Relation::Le,
                max_consecutive_days as f64,
            );
        }
    }
}

// =========================================================================
// HARD: Mandatory Off-Days
// =========================================================================
pub fn add_off_days(model: &mut Model, vars: &ScheduleVariables, roster: &Roster) {
    for (e, employee) in roster.employees().iter().enumerate() {
        for day in employee.off_day_indices(vars.horizon()) {
            model.add_constraint(
                format!("off_day[{}][{}]", employee.id, day + 1),
                LinearExpr::from(vars.schedule(e, day)),
                Relation::Eq,
                0.0,
            );
        }
    }
}

// =========================================================================
// HARD: Senior On Every Shift
// =========================================================================
pub fn add_seniority(
    model: &mut Model,
    vars: &ScheduleVariables,
    roster: &Roster,
    requirements: &ShiftRequirements,
) {
    for day in 0..vars.horizon() {
        for shift in requirements.shifts() {
            let seniors = LinearExpr::sum(
                roster
                    .on_shift(shift)
                    .filter(|(_, employee)| employee.is_senior())
                    .map(|(e, _)| vars.schedule(e, day)),
            );
            model.add_constraint(
                format!("senior[{shift}][{day}]"),
                seniors,
                Relation::Ge,
                1.0,
            );
        }
    }
}

// =========================================================================
// LINK: Streak Indicators
// =========================================================================
// Five-day streak: AND of five schedule variables.
//   streak <= x[d + k]  for k in 0..5
//   streak >= Σ x[d..d + 5] - 4
//
// Isolated single day, with prev_off = 1 - x[d - 1] and next_off = 1 - x[d + 1]
// (both 1 past the horizon edge):
//   single >= x[d] - (1 - prev_off) - (1 - next_off)
//   single <= x[d], single <= prev_off, single <= next_off
pub fn add_streak_links(model: &mut Model, vars: &ScheduleVariables, roster: &Roster) {
    let horizon = vars.horizon();

    for (e, employee) in roster.employees().iter().enumerate() {
        for (day, &streak) in vars.five_day_streaks(e).iter().enumerate() {
            for k in 0..STREAK_LENGTH {
                model.add_constraint(
                    format!("five_day_streak_cap[{}][{day}][{k}]", employee.id),
                    LinearExpr::from(streak) - LinearExpr::from(vars.schedule(e, day + k)),
                    Relation::Le,
                    0.0,
                );
            }
            let worked = LinearExpr::sum((day..day + STREAK_LENGTH).map(|d| vars.schedule(e, d)));
            model.add_constraint(
                format!("five_day_streak[{}][{day}]", employee.id),
                LinearExpr::from(streak) - worked,
                Relation::Ge,
                -((STREAK_LENGTH - 1) as f64),
            );
        }

        for (day, &single) in vars.one_day_streaks(e).iter().enumerate() {
            let works = LinearExpr::from(vars.schedule(e, day));
            let prev_off = if day == 0 {
                LinearExpr::constant(1.0)
            } else {
                LinearExpr::constant(1.0) - LinearExpr::from(vars.schedule(e, day - 1))
            };
            let next_off = if day + 1 == horizon {
                LinearExpr::constant(1.0)
            } else {
                LinearExpr::constant(1.0) - LinearExpr::from(vars.schedule(e, day + 1))
            };
            let prev_on = LinearExpr::constant(1.0) - prev_off.clone();
            let next_on = LinearExpr::constant(1.0) - next_off.clone();
            let id = &employee.id;

            model.add_constraint(
                format!("one_day_streak_def1[{id}][{day}]"),
                LinearExpr::from(single) - (works.clone() - prev_on - next_on),
                Relation::Ge,
                0.0,
            );
            model.add_constraint(
                format!("one_day_streak_def2[{id}][{day}]"),
                LinearExpr::from(single) - works,
                Relation::Le,
                0.0,
            );
            model.add_constraint(
                format!("one_day_streak_def3[{id}][{day}]"),
                LinearExpr::from(single) - prev_off,
                Relation::Le,
                0.0,
            );
            model.add_constraint(
                format!("one_day_streak_def4[{id}][{day}]"),
                LinearExpr::from(single) - next_off,
                Relation::Le,
                0.0,
            );
        }
    }
}
