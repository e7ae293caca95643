//! Result projector: solved binaries back to a day/shift roster.

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use crate::builder::ScheduleVariables;
use crate::domain::{Roster, ShiftKind, ShiftRequirements};
use crate::solver::Assignment;

/// Solved values above this count as 1. Backends return binaries as floats
/// that can sit a hair away from 0 or 1.
pub const ASSIGNED_THRESHOLD: f64 = 0.5;

#[inline]
pub fn is_assigned(value: f64) -> bool {
    value > ASSIGNED_THRESHOLD
}

/// Employees working each shift on one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySchedule {
    /// 1-indexed day number.
    pub day: usize,
    pub shifts: BTreeMap<ShiftKind, Vec<String>>,
}

impl DaySchedule {
    pub fn label(&self) -> String {
        format!("Day {}", self.day)
    }

    pub fn assigned(&self, shift: ShiftKind) -> &[String] {
        self.shifts.get(&shift).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn works(&self, employee: &str) -> bool {
        self.shifts.values().flatten().any(|id| id == employee)
    }
}

/// `"Day N" → {shift → [employee id]}`, serialized in day order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleResult {
    days: Vec<DaySchedule>,
}

impl ScheduleResult {
    pub fn new(days: Vec<DaySchedule>) -> Self {
        Self { days }
    }

    pub fn days(&self) -> &[DaySchedule] {
        &self.days
    }

    pub fn horizon(&self) -> usize {
        self.days.len()
    }

    /// Looks up a day by its 1-indexed number.
    pub fn day(&self, day: usize) -> Option<&DaySchedule> {
        self.days.iter().find(|d| d.day == day)
    }

    /// Whether `employee` works any shift on the 1-indexed `day`.
    pub fn works(&self, employee: &str, day: usize) -> bool {
        self.day(day).is_some_and(|d| d.works(employee))
    }
}

impl Serialize for ScheduleResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.days.len()))?;
        for day in &self.days {
            map.serialize_entry(&day.label(), &day.shifts)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ScheduleResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ScheduleVisitor;

        impl<'de> Visitor<'de> for ScheduleVisitor {
            type Value = ScheduleResult;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map from \"Day N\" to shift assignments")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut days = Vec::new();
                while let Some((label, shifts)) =
                    access.next_entry::<String, BTreeMap<ShiftKind, Vec<String>>>()?
                {
                    let day = label
                        .strip_prefix("Day ")
                        .and_then(|n| n.trim().parse::<usize>().ok())
                        .filter(|&n| n >= 1)
                        .ok_or_else(|| de::Error::custom(format!("invalid day label: {label}")))?;
                    days.push(DaySchedule { day, shifts });
                }
                days.sort_by_key(|d| d.day);
                if let Some(pair) = days.windows(2).find(|pair| pair[0].day == pair[1].day) {
                    return Err(de::Error::custom(format!("duplicate day: Day {}", pair[0].day)));
                }
                Ok(ScheduleResult { days })
            }
        }

        deserializer.deserialize_map(ScheduleVisitor)
    }
}

/// Maps solved schedule variables to a [`ScheduleResult`].
///
/// Every shift in `requirements` gets a bucket on every day, possibly empty.
/// Employees appear in roster order.
pub fn project(
    assignment: &Assignment,
    vars: &ScheduleVariables,
    roster: &Roster,
    requirements: &ShiftRequirements,
) -> ScheduleResult {
    let days = (0..vars.horizon())
        .map(|day| {
            let shifts = requirements
                .shifts()
                .map(|shift| {
                    let ids = roster
                        .on_shift(shift)
                        .filter(|(e, _)| is_assigned(assignment.value(vars.schedule(*e, day))))
                        .map(|(_, employee)| employee.id.clone())
                        .collect();
                    (shift, ids)
                })
                .collect();
            DaySchedule { day: day + 1, shifts }
        })
        .collect();

    ScheduleResult::new(days)
}

/// Active streak indicators of one employee, as 1-indexed days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeStreaks {
    pub employee: String,
    /// First day of each five-day window the employee works entirely.
    pub five_day_streak_starts: Vec<usize>,
    /// Days worked with a day off (or the horizon edge) on both sides.
    pub one_day_streaks: Vec<usize>,
}

/// Streak indicators read back from the solver, one entry per employee in roster order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StreakReport {
    pub employees: Vec<EmployeeStreaks>,
}

impl StreakReport {
    pub fn get(&self, employee: &str) -> Option<&EmployeeStreaks> {
        self.employees.iter().find(|s| s.employee == employee)
    }
}

pub fn streaks(assignment: &Assignment, vars: &ScheduleVariables, roster: &Roster) -> StreakReport {
    let active = |indicators: &[crate::model::VarId]| -> Vec<usize> {
        indicators
            .iter()
            .enumerate()
            .filter(|&(_, &var)| is_assigned(assignment.value(var)))
            .map(|(day, _)| day + 1)
            .collect()
    };

    let employees = roster
        .employees()
        .iter()
        .enumerate()
        .map(|(e, employee)| EmployeeStreaks {
            employee: employee.id.clone(),
            five_day_streak_starts: active(vars.five_day_streaks(e)),
            one_day_streaks: active(vars.one_day_streaks(e)),
        })
        .collect();

    StreakReport { employees }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build;
    use crate::domain::{Employee, Seniority};
    use crate::solver::SolveStatus;
    use std::time::Duration;

    fn fixture() -> (Roster, ShiftRequirements, ScheduleVariables, usize) {
        let roster = Roster::new(vec![
            Employee::new("A", Seniority::Senior, ShiftKind::Day),
            Employee::new("B", Seniority::Mid, ShiftKind::Day),
            Employee::new("C", Seniority::Senior, ShiftKind::Night),
        ]);
        let reqs = ShiftRequirements::new()
            .with_shift(ShiftKind::Day, [1, 2])
            .with_shift(ShiftKind::Night, [1, 1]);
        let (model, vars) = build(&roster, &reqs, 5).unwrap();
        let n = model.variables().len();
        (roster, reqs, vars, n)
    }

    fn assignment(values: Vec<f64>) -> Assignment {
        Assignment {
            values,
            objective: 0.0,
            status: SolveStatus::Optimal,
            duration: Duration::ZERO,
        }
    }

    #[test]
    fn test_project_thresholds_near_binary_values() {
        let (roster, reqs, vars, n) = fixture();
        let mut values = vec![0.0; n];
        values[vars.schedule(0, 0).index()] = 0.9999997;
        values[vars.schedule(1, 0).index()] = 1e-7;
        values[vars.schedule(0, 1).index()] = 1.0;
        values[vars.schedule(1, 1).index()] = 1.0000002;
        values[vars.schedule(2, 0).index()] = 1.0;
        values[vars.schedule(2, 1).index()] = 1.0;

        let result = project(&assignment(values), &vars, &roster, &reqs);

        assert_eq!(result.horizon(), 2);
        assert_eq!(result.days()[0].assigned(ShiftKind::Day), ["A"]);
        assert_eq!(result.days()[1].assigned(ShiftKind::Day), ["A", "B"]);
        assert_eq!(result.days()[1].assigned(ShiftKind::Night), ["C"]);
        assert!(result.works("B", 2));
        assert!(!result.works("B", 1));
    }

    #[test]
    fn test_every_shift_bucket_present() {
        let (roster, reqs, vars, n) = fixture();
        let result = project(&assignment(vec![0.0; n]), &vars, &roster, &reqs);

        for day in result.days() {
            assert_eq!(day.shifts.len(), 2);
            assert!(day.shifts.values().all(Vec::is_empty));
        }
    }

    #[test]
    fn test_json_keeps_day_order() {
        let days = (1..=11)
            .map(|day| DaySchedule {
                day,
                shifts: BTreeMap::from([(ShiftKind::Day, vec!["A".to_string()])]),
            })
            .collect();
        let result = ScheduleResult::new(days);

        let json = serde_json::to_string(&result).unwrap();
        assert!(json.starts_with(r#"{"Day 1":{"day":["A"]},"Day 2":"#));
        assert!(json.find("\"Day 2\"").unwrap() < json.find("\"Day 10\"").unwrap());

        let back: ScheduleResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_bad_day_label_rejected() {
        let err = serde_json::from_str::<ScheduleResult>(r#"{"Monday":{"day":[]}}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_repeated_day_rejected() {
        let json = r#"{"Day 1":{"day":["A"]},"Day 2":{"day":[]},"Day 1":{"day":["B"]}}"#;
        let err = serde_json::from_str::<ScheduleResult>(json).unwrap_err();
        assert!(err.to_string().contains("duplicate day: Day 1"), "{err}");

        let padded = r#"{"Day 1":{"day":[]},"Day 01":{"day":[]}}"#;
        assert!(serde_json::from_str::<ScheduleResult>(padded).is_err());
    }

    #[test]
    fn test_streak_report_uses_one_indexed_days() {
        let (roster, _, vars, n) = fixture();
        let mut values = vec![0.0; n];
        values[vars.one_day_streaks(1)[1].index()] = 0.99;

        let report = streaks(&assignment(values), &vars, &roster);

        assert_eq!(report.employees.len(), 3);
        assert_eq!(report.get("B").unwrap().one_day_streaks, vec![2]);
        assert!(report.get("A").unwrap().one_day_streaks.is_empty());
        assert!(report.get("A").unwrap().five_day_streak_starts.is_empty());
    }
}
