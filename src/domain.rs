//! Domain model for the shift roster problem.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Seniority level of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seniority {
    Senior,
    Mid,
    Junior,
}

/// Shift category. Every employee belongs to exactly one for the whole horizon.
///
/// The derived ordering (day, swing, night) is the iteration order used
/// everywhere shifts are enumerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftKind {
    Day,
    Swing,
    Night,
}

impl ShiftKind {
    pub const ALL: [ShiftKind; 3] = [ShiftKind::Day, ShiftKind::Swing, ShiftKind::Night];

    pub fn as_str(self) -> &'static str {
        match self {
            ShiftKind::Day => "day",
            ShiftKind::Swing => "swing",
            ShiftKind::Night => "night",
        }
    }
}

impl fmt::Display for ShiftKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// An employee who can be assigned to their shift on any day of the horizon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub seniority: Seniority,
    pub shift: ShiftKind,
    /// 1-indexed days on which the employee must not work.
    #[serde(default)]
    pub off_days: BTreeSet<usize>,
    /// 1-indexed days the employee would like to have off.
    #[serde(default)]
    pub preferred_off_days: BTreeSet<usize>,
}

impl Employee {
    pub fn new(id: impl Into<String>, seniority: Seniority, shift: ShiftKind) -> Self {
        Self {
            id: id.into(),
            seniority,
            shift,
            off_days: BTreeSet::new(),
            preferred_off_days: BTreeSet::new(),
        }
    }

    pub fn with_off_days(mut self, days: impl IntoIterator<Item = usize>) -> Self {
        self.off_days.extend(days);
        self
    }

    pub fn with_preferred_off_days(mut self, days: impl IntoIterator<Item = usize>) -> Self {
        self.preferred_off_days.extend(days);
        self
    }

    pub fn is_senior(&self) -> bool {
        self.seniority == Seniority::Senior
    }

    /// Mandatory off-days converted to 0-indexed days inside `[0, horizon)`.
    pub fn off_day_indices(&self, horizon: usize) -> impl Iterator<Item = usize> + '_ {
        clip_to_horizon(&self.off_days, horizon)
    }

    /// Preferred off-days converted to 0-indexed days inside `[0, horizon)`.
    pub fn preferred_off_day_indices(&self, horizon: usize) -> impl Iterator<Item = usize> + '_ {
        clip_to_horizon(&self.preferred_off_days, horizon)
    }
}

fn clip_to_horizon(days: &BTreeSet<usize>, horizon: usize) -> impl Iterator<Item = usize> + '_ {
    days.iter()
        .filter(move |&&day| day >= 1 && day <= horizon)
        .map(|day| day - 1)
}

/// The employee roster, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    employees: Vec<Employee>,
}

impl Roster {
    pub fn new(employees: Vec<Employee>) -> Self {
        Self { employees }
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    /// Indices of the employees working `shift`, in roster order.
    pub fn on_shift(&self, shift: ShiftKind) -> impl Iterator<Item = (usize, &Employee)> {
        self.employees
            .iter()
            .enumerate()
            .filter(move |(_, e)| e.shift == shift)
    }
}

/// Daily headcount required per shift category.
///
/// Every category present must list one entry per day of the horizon;
/// `validation` rejects tables where that does not hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShiftRequirements {
    table: BTreeMap<ShiftKind, Vec<u32>>,
}

impl ShiftRequirements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shift(mut self, shift: ShiftKind, counts: impl IntoIterator<Item = u32>) -> Self {
        self.table.insert(shift, counts.into_iter().collect());
        self
    }

    /// Number of days in the planning horizon.
    pub fn horizon(&self) -> usize {
        self.table.values().map(Vec::len).max().unwrap_or(0)
    }

    /// Shift categories present in the table, in day/swing/night order.
    pub fn shifts(&self) -> impl Iterator<Item = ShiftKind> + '_ {
        self.table.keys().copied()
    }

    pub fn contains(&self, shift: ShiftKind) -> bool {
        self.table.contains_key(&shift)
    }

    pub fn counts(&self, shift: ShiftKind) -> Option<&[u32]> {
        self.table.get(&shift).map(Vec::as_slice)
    }

    /// Required headcount for `shift` on the 0-indexed `day`, 0 when undefined.
    pub fn required(&self, shift: ShiftKind, day: usize) -> u32 {
        self.table
            .get(&shift)
            .and_then(|counts| counts.get(day))
            .copied()
            .unwrap_or(0)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (ShiftKind, &[u32])> {
        self.table.iter().map(|(shift, counts)| (*shift, counts.as_slice()))
    }
}
