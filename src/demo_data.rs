//! Demo data for roster scheduling: a 23-person team across three shifts.

use serde::{Deserialize, Serialize};

use crate::domain::{Employee, Roster, Seniority, ShiftKind, ShiftRequirements};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoData {
    /// First week of the month.
    Small,
    /// The full 31-day month.
    Large,
}

impl std::str::FromStr for DemoData {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SMALL" => Ok(DemoData::Small),
            "LARGE" => Ok(DemoData::Large),
            _ => Err(()),
        }
    }
}

impl DemoData {
    pub fn as_str(&self) -> &'static str {
        match self {
            DemoData::Small => "SMALL",
            DemoData::Large => "LARGE",
        }
    }

    fn days(&self) -> usize {
        match self {
            DemoData::Small => 7,
            DemoData::Large => DAY_SHIFT_REQUIREMENTS.len(),
        }
    }
}

/// A roster together with its requirement table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoProblem {
    pub employees: Roster,
    pub requirements: ShiftRequirements,
}

/// List of available demo data sets.
pub fn list_demo_data() -> Vec<&'static str> {
    vec!["SMALL", "LARGE"]
}

/// Day-shift headcount for the month; weekends run one short.
const DAY_SHIFT_REQUIREMENTS: [u32; 31] = [
    7, 7, 7, 7, 6, 6, 7, 7, 7, 7, 7, 6, 6, 7, 7, 7, 7, 7, 6, 6, 7, 7, 7, 7, 7, 6, 6, 7, 7, 7, 7,
];
const SWING_SHIFT_HEADCOUNT: u32 = 4;
const NIGHT_SHIFT_HEADCOUNT: u32 = 3;

/// `(id, seniority, shift, off days)`. Preferred off-days equal the mandatory ones.
const TEAM: &[(&str, Seniority, ShiftKind, &[usize])] = &[
    ("A", Seniority::Senior, ShiftKind::Day, &[2, 3]),
    ("B", Seniority::Senior, ShiftKind::Day, &[]),
    ("C", Seniority::Senior, ShiftKind::Day, &[]),
    ("D", Seniority::Mid, ShiftKind::Day, &[10, 11, 12, 13]),
    ("E", Seniority::Mid, ShiftKind::Day, &[]),
    ("F", Seniority::Mid, ShiftKind::Day, &[]),
    ("G", Seniority::Mid, ShiftKind::Day, &[]),
    ("H", Seniority::Mid, ShiftKind::Day, &[]),
    ("I", Seniority::Mid, ShiftKind::Day, &[]),
    ("J", Seniority::Mid, ShiftKind::Day, &[]),
    ("K", Seniority::Junior, ShiftKind::Day, &[13, 14, 15]),
    ("L", Seniority::Junior, ShiftKind::Day, &[]),
    ("M", Seniority::Senior, ShiftKind::Swing, &[5, 6, 7, 8]),
    ("N", Seniority::Senior, ShiftKind::Swing, &[]),
    ("O", Seniority::Mid, ShiftKind::Swing, &[12, 13, 14]),
    ("P", Seniority::Mid, ShiftKind::Swing, &[]),
    ("Q", Seniority::Mid, ShiftKind::Swing, &[]),
    ("R", Seniority::Junior, ShiftKind::Swing, &[20, 21, 22]),
    ("S", Seniority::Senior, ShiftKind::Night, &[5, 6, 7]),
    ("T", Seniority::Senior, ShiftKind::Night, &[]),
    ("U", Seniority::Mid, ShiftKind::Night, &[19, 20, 21]),
    ("V", Seniority::Mid, ShiftKind::Night, &[]),
    ("W", Seniority::Junior, ShiftKind::Night, &[25, 26, 27]),
];

/// Generates the demo problem for the given size.
pub fn generate(demo: DemoData) -> DemoProblem {
    let days = demo.days();

    let employees = TEAM
        .iter()
        .map(|&(id, seniority, shift, off_days)| {
            Employee::new(id, seniority, shift)
                .with_off_days(off_days.iter().copied())
                .with_preferred_off_days(off_days.iter().copied())
        })
        .collect();

    let requirements = ShiftRequirements::new()
        .with_shift(ShiftKind::Day, DAY_SHIFT_REQUIREMENTS[..days].iter().copied())
        .with_shift(ShiftKind::Swing, vec![SWING_SHIFT_HEADCOUNT; days])
        .with_shift(ShiftKind::Night, vec![NIGHT_SHIFT_HEADCOUNT; days]);

    DemoProblem {
        employees: Roster::new(employees),
        requirements,
    }
}
