//! Schedule analysis: hard-rule violations and the objective breakdown of a roster.
//!
//! Works on a [`ScheduleResult`] alone, so it can score rosters that were
//! edited by hand as well as solver output. For an optimal solve the
//! breakdown total equals the solver objective.

use serde::Serialize;

use crate::constraints::STREAK_LENGTH;
use crate::domain::{Roster, ShiftKind, ShiftRequirements};
use crate::pipeline::SchedulingConfig;
use crate::projection::ScheduleResult;

/// A broken hard rule. Days are 1-indexed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Violation {
    #[serde(rename_all = "camelCase")]
    Coverage {
        day: usize,
        shift: ShiftKind,
        required: u32,
        assigned: usize,
    },
    #[serde(rename_all = "camelCase")]
    MissingSenior { day: usize, shift: ShiftKind },
    #[serde(rename_all = "camelCase")]
    OffDayWorked { employee: String, day: usize },
    #[serde(rename_all = "camelCase")]
    MaxConsecutiveExceeded {
        employee: String,
        start_day: usize,
        max: usize,
    },
    #[serde(rename_all = "camelCase")]
    WrongShift {
        employee: String,
        day: usize,
        shift: ShiftKind,
    },
    #[serde(rename_all = "camelCase")]
    UnknownEmployee { employee: String, day: usize },
}

/// Objective terms counted on the roster itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub unmet_preferences: usize,
    pub five_day_streaks: usize,
    pub one_day_streaks: usize,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleAnalysis {
    pub feasible: bool,
    pub violations: Vec<Violation>,
    pub score: ScoreBreakdown,
}

pub fn analyze(
    result: &ScheduleResult,
    roster: &Roster,
    requirements: &ShiftRequirements,
    config: &SchedulingConfig,
) -> ScheduleAnalysis {
    let horizon = requirements.horizon();
    let mut violations = Vec::new();

    // worked[e][d], 0-indexed days
    let mut worked = vec![vec![false; horizon]; roster.len()];

    for day_schedule in result.days() {
        let day = day_schedule.day;
        for (&shift, ids) in &day_schedule.shifts {
            for id in ids {
                match roster.employees().iter().position(|e| &e.id == id) {
                    Some(e) => {
                        if roster.employees()[e].shift != shift {
                            violations.push(Violation::WrongShift {
                                employee: id.clone(),
                                day,
                                shift,
                            });
                        }
                        if (1..=horizon).contains(&day) {
                            worked[e][day - 1] = true;
                        }
                    }
                    None => violations.push(Violation::UnknownEmployee {
                        employee: id.clone(),
                        day,
                    }),
                }
            }
        }
    }

    for day in 0..horizon {
        let bucket = result.day(day + 1);
        for shift in requirements.shifts() {
            let assigned = bucket.map(|d| d.assigned(shift)).unwrap_or(&[]);
            let required = requirements.required(shift, day);
            if assigned.len() != required as usize {
                violations.push(Violation::Coverage {
                    day: day + 1,
                    shift,
                    required,
                    assigned: assigned.len(),
                });
            }
            let has_senior = assigned
                .iter()
                .filter_map(|id| roster.get(id))
                .any(|e| e.is_senior() && e.shift == shift);
            if !has_senior {
                violations.push(Violation::MissingSenior { day: day + 1, shift });
            }
        }
    }

    let max = config.max_consecutive_days;
    let mut score = ScoreBreakdown {
        unmet_preferences: 0,
        five_day_streaks: 0,
        one_day_streaks: 0,
        total: 0.0,
    };

    for (employee, days) in roster.employees().iter().zip(&worked) {
        for day in employee.off_day_indices(horizon) {
            if days[day] {
                violations.push(Violation::OffDayWorked {
                    employee: employee.id.clone(),
                    day: day + 1,
                });
            }
        }
        for start in 0..horizon.saturating_sub(max) {
            if days[start..=start + max].iter().all(|&w| w) {
                violations.push(Violation::MaxConsecutiveExceeded {
                    employee: employee.id.clone(),
                    start_day: start + 1,
                    max,
                });
            }
        }

        score.unmet_preferences += employee
            .preferred_off_day_indices(horizon)
            .filter(|&day| days[day])
            .count();
        score.five_day_streaks += days
            .windows(STREAK_LENGTH)
            .filter(|window| window.iter().all(|&w| w))
            .count();
        score.one_day_streaks += (0..horizon)
            .filter(|&day| {
                let prev_off = day == 0 || !days[day - 1];
                let next_off = day + 1 == horizon || !days[day + 1];
                days[day] && prev_off && next_off
            })
            .count();
    }

    let weights = &config.weights;
    score.total = weights.unmet_preference * score.unmet_preferences as f64
        + weights.five_day_streak * score.five_day_streaks as f64
        + weights.one_day_streak * score.one_day_streaks as f64;

    ScheduleAnalysis {
        feasible: violations.is_empty(),
        violations,
        score,
    }
}
