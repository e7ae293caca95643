//! Objective composer: weighted penalties over the builder's variables.

use serde::{Deserialize, Serialize};

use crate::builder::ScheduleVariables;
use crate::domain::Roster;
use crate::model::{LinearExpr, Model};

/// Penalty weights of the minimization objective.
///
/// Long unbroken runs weigh more than isolated single days, which weigh more
/// than a worked preferred day off.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObjectiveWeights {
    pub unmet_preference: f64,
    pub five_day_streak: f64,
    pub one_day_streak: f64,
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        Self {
            unmet_preference: 1.0,
            five_day_streak: 10.0,
            one_day_streak: 5.0,
        }
    }
}

/// Builds the objective expression without installing it.
pub fn objective(
    vars: &ScheduleVariables,
    roster: &Roster,
    weights: &ObjectiveWeights,
) -> LinearExpr {
    let mut objective = LinearExpr::new();

    for (e, employee) in roster.employees().iter().enumerate() {
        // 1 when the employee works a day they asked to have off
        for day in employee.preferred_off_day_indices(vars.horizon()) {
            objective.add_term(vars.schedule(e, day), weights.unmet_preference);
        }
        for &streak in vars.five_day_streaks(e) {
            objective.add_term(streak, weights.five_day_streak);
        }
        for &single in vars.one_day_streaks(e) {
            objective.add_term(single, weights.one_day_streak);
        }
    }

    objective
}

/// Installs the weighted objective on `model`.
pub fn compose(
    model: &mut Model,
    vars: &ScheduleVariables,
    roster: &Roster,
    weights: &ObjectiveWeights,
) {
    model.set_objective(objective(vars, roster, weights));
}
