//! DTOs for REST API requests/responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Roster, ShiftRequirements};
use crate::pipeline::SchedulingConfig;
use crate::projection::ScheduleResult;

/// Body of `POST /schedules`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub employees: Roster,
    pub requirements: ShiftRequirements,
    #[serde(default)]
    pub config: SchedulingConfig,
}

/// Body of `PUT /schedules/analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub employees: Roster,
    pub requirements: ShiftRequirements,
    pub schedule: ScheduleResult,
    #[serde(default)]
    pub config: SchedulingConfig,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub solver_engine: &'static str,
}

/// Error body returned alongside non-2xx status codes.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub kind: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ShiftKind;

    #[test]
    fn test_schedule_request_without_config() {
        let json = r#"{
            "employees": [{"id": "A", "seniority": "senior", "shift": "day"}],
            "requirements": {"day": [1, 1]}
        }"#;
        let request: ScheduleRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.employees.len(), 1);
        assert_eq!(request.requirements.required(ShiftKind::Day, 1), 1);
        assert_eq!(request.config, SchedulingConfig::default());
    }

    #[test]
    fn test_analyze_request_reads_day_labels() {
        let json = r#"{
            "employees": [{"id": "A", "seniority": "senior", "shift": "day"}],
            "requirements": {"day": [1, 1]},
            "schedule": {"Day 2": {"day": ["A"]}, "Day 1": {"day": ["A"]}}
        }"#;
        let request: AnalyzeRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.schedule.horizon(), 2);
        assert!(request.schedule.works("A", 2));
    }
}
