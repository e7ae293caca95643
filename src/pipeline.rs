//! The scheduling pipeline: build → objective → solve → project.
//!
//! Every call builds a fresh model; nothing is shared between calls, so
//! independent requests can run on separate threads.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::builder::build;
use crate::domain::{Roster, ShiftRequirements};
use crate::error::ScheduleError;
use crate::model::ModelStats;
use crate::objective::{compose, ObjectiveWeights};
use crate::projection::{project, streaks, ScheduleResult, StreakReport};
use crate::solver::{solve, SolveStatus, SolverConfig};

/// Default bound on consecutive working days.
pub const DEFAULT_MAX_CONSECUTIVE_DAYS: usize = 5;

/// Everything that tunes one scheduling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchedulingConfig {
    pub max_consecutive_days: usize,
    pub weights: ObjectiveWeights,
    pub solver: SolverConfig,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            max_consecutive_days: DEFAULT_MAX_CONSECUTIVE_DAYS,
            weights: ObjectiveWeights::default(),
            solver: SolverConfig::default(),
        }
    }
}

/// A solved roster with the solver's view of it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleOutcome {
    pub schedule: ScheduleResult,
    pub streaks: StreakReport,
    pub objective: f64,
    pub status: SolveStatus,
    pub model: ModelStats,
}

/// Runs one complete scheduling request.
pub fn schedule(
    roster: &Roster,
    requirements: &ShiftRequirements,
    config: &SchedulingConfig,
) -> Result<ScheduleOutcome, ScheduleError> {
    info!(
        employees = roster.len(),
        days = requirements.horizon(),
        max_consecutive_days = config.max_consecutive_days,
        "Scheduling roster"
    );

    config.solver.validate()?;
    let (mut model, vars) = build(roster, requirements, config.max_consecutive_days)?;
    compose(&mut model, &vars, roster, &config.weights);

    let assignment = solve(&model, &config.solver)?;

    Ok(ScheduleOutcome {
        schedule: project(&assignment, &vars, roster, requirements),
        streaks: streaks(&assignment, &vars, roster),
        objective: assignment.objective,
        status: assignment.status,
        model: model.stats(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::domain::{Employee, Seniority, ShiftKind};
    use crate::error::{ConfigError, SolveError};

    /// Six employees, seven days, requirement 1 on every shift. `X` is kept
    /// off days 1–2 and `A` off days 3–7, which pins `X` to days 3–7.
    fn forced_streak() -> (Roster, ShiftRequirements) {
        let roster = Roster::new(vec![
            Employee::new("A", Seniority::Senior, ShiftKind::Day).with_off_days(3..=7),
            Employee::new("X", Seniority::Senior, ShiftKind::Day).with_off_days([1, 2]),
            Employee::new("S1", Seniority::Senior, ShiftKind::Swing),
            Employee::new("S2", Seniority::Senior, ShiftKind::Swing),
            Employee::new("N1", Seniority::Senior, ShiftKind::Night),
            Employee::new("N2", Seniority::Senior, ShiftKind::Night).with_preferred_off_days([4]),
        ]);
        let reqs = ShiftRequirements::new()
            .with_shift(ShiftKind::Day, vec![1; 7])
            .with_shift(ShiftKind::Swing, vec![1; 7])
            .with_shift(ShiftKind::Night, vec![1; 7]);
        (roster, reqs)
    }

    /// Two shifts, mixed seniority, one preferred and one mandatory off-day each.
    fn small_team() -> (Roster, ShiftRequirements) {
        let roster = Roster::new(vec![
            Employee::new("A", Seniority::Senior, ShiftKind::Day).with_off_days([2]),
            Employee::new("B", Seniority::Senior, ShiftKind::Day).with_preferred_off_days([5, 6]),
            Employee::new("C", Seniority::Mid, ShiftKind::Day).with_off_days([7]),
            Employee::new("D", Seniority::Junior, ShiftKind::Day),
            Employee::new("M", Seniority::Senior, ShiftKind::Night).with_off_days([4]),
            Employee::new("N", Seniority::Senior, ShiftKind::Night),
            Employee::new("O", Seniority::Mid, ShiftKind::Night).with_preferred_off_days([1]),
        ]);
        let reqs = ShiftRequirements::new()
            .with_shift(ShiftKind::Day, [2, 2, 3, 2, 2, 2, 2, 2])
            .with_shift(ShiftKind::Night, [2, 1, 1, 2, 1, 2, 1, 2]);
        (roster, reqs)
    }

    #[test]
    fn test_solved_schedule_respects_hard_rules() {
        let (roster, reqs) = small_team();
        let config = SchedulingConfig::default();
        let outcome = schedule(&roster, &reqs, &config).unwrap();

        assert_eq!(outcome.schedule.horizon(), 8);
        for (d, day) in outcome.schedule.days().iter().enumerate() {
            for shift in reqs.shifts() {
                let assigned = day.assigned(shift);
                // coverage is exact
                assert_eq!(assigned.len(), reqs.required(shift, d) as usize);
                // a senior of that shift is present
                assert!(assigned
                    .iter()
                    .any(|id| roster.get(id).is_some_and(|e| e.is_senior() && e.shift == shift)));
            }
        }
        for employee in roster.employees() {
            for &off in &employee.off_days {
                assert!(!outcome.schedule.works(&employee.id, off));
            }
            for start in 1..=(8 - config.max_consecutive_days) {
                let run = (start..=start + config.max_consecutive_days)
                    .filter(|&day| outcome.schedule.works(&employee.id, day))
                    .count();
                assert!(run <= config.max_consecutive_days);
            }
        }

        let analysis = analyze(&outcome.schedule, &roster, &reqs, &config);
        assert!(analysis.feasible, "{:?}", analysis.violations);
        assert!((analysis.score.total - outcome.objective).abs() < 1e-6);
        assert_eq!(outcome.status, SolveStatus::Optimal);
    }

    #[test]
    fn test_objective_is_stable_across_runs() {
        let (roster, reqs) = small_team();
        let config = SchedulingConfig::default();

        let first = schedule(&roster, &reqs, &config).unwrap();
        let second = schedule(&roster, &reqs, &config).unwrap();

        assert!((first.objective - second.objective).abs() < 1e-6);
    }

    #[test]
    fn test_forced_five_day_streak_is_reported() {
        let (roster, reqs) = forced_streak();
        let outcome = schedule(&roster, &reqs, &SchedulingConfig::default()).unwrap();

        for day in 3..=7 {
            assert_eq!(outcome.schedule.day(day).unwrap().assigned(ShiftKind::Day), ["X"]);
        }
        let x = outcome.streaks.get("X").unwrap();
        assert_eq!(x.five_day_streak_starts, vec![3]);
        assert!(x.one_day_streaks.is_empty());
    }

    #[test]
    fn test_single_day_at_horizon_start_is_isolated() {
        let roster = Roster::new(vec![
            Employee::new("Y", Seniority::Senior, ShiftKind::Day).with_off_days(2..=4),
            Employee::new("Z", Seniority::Senior, ShiftKind::Day).with_off_days([1]),
        ]);
        let reqs = ShiftRequirements::new().with_shift(ShiftKind::Day, vec![1; 4]);

        let outcome = schedule(&roster, &reqs, &SchedulingConfig::default()).unwrap();

        assert!(outcome.schedule.works("Y", 1));
        assert_eq!(outcome.streaks.get("Y").unwrap().one_day_streaks, vec![1]);
        assert!(outcome.streaks.get("Z").unwrap().one_day_streaks.is_empty());
        assert!((outcome.objective - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_understaffed_roster_is_infeasible() {
        let roster = Roster::new(vec![
            Employee::new("A", Seniority::Senior, ShiftKind::Night),
            Employee::new("B", Seniority::Mid, ShiftKind::Night),
        ]);
        let reqs = ShiftRequirements::new().with_shift(ShiftKind::Night, [2, 3, 2]);

        let err = schedule(&roster, &reqs, &SchedulingConfig::default()).unwrap_err();
        assert!(err.is_infeasible());
        assert_eq!(err, ScheduleError::Solve(SolveError::Infeasible));
    }

    #[test]
    fn test_configuration_errors_surface_before_solving() {
        let (roster, _) = forced_streak();
        let reqs = ShiftRequirements::new()
            .with_shift(ShiftKind::Day, vec![1; 7])
            .with_shift(ShiftKind::Swing, vec![1; 7]);

        let err = schedule(&roster, &reqs, &SchedulingConfig::default()).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::Config(ConfigError::MissingRequirement {
                employee: "N1".into(),
                shift: ShiftKind::Night,
            })
        );
    }

    #[test]
    fn test_invalid_time_limit_is_a_configuration_error() {
        let (roster, reqs) = forced_streak();
        let mut config = SchedulingConfig::default();
        config.solver.time_limit_secs = Some(0.0);

        let err = schedule(&roster, &reqs, &config).unwrap_err();
        assert_eq!(err, ScheduleError::Config(ConfigError::InvalidTimeLimit));
    }

    #[test]
    fn test_time_limited_solve_keeps_hard_rules() {
        let (roster, reqs) = forced_streak();
        let mut config = SchedulingConfig::default();
        config.solver.time_limit_secs = Some(30.0);

        let outcome = schedule(&roster, &reqs, &config).unwrap();
        let analysis = analyze(&outcome.schedule, &roster, &reqs, &config);

        assert!(analysis.feasible, "{:?}", analysis.violations);
        assert_eq!(outcome.status, SolveStatus::Optimal);
    }

    #[test]
    fn test_config_deserializes_partially() {
        let config: SchedulingConfig =
            serde_json::from_str(r#"{"maxConsecutiveDays": 4, "solver": {"timeLimitSecs": 10}}"#)
                .unwrap();

        assert_eq!(config.max_consecutive_days, 4);
        assert_eq!(config.weights, ObjectiveWeights::default());
        assert_eq!(config.solver.time_limit_secs, Some(10.0));
    }
}
