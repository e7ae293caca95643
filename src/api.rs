//! REST API handlers for shift roster scheduling.
//!
//! Every request is solved synchronously on the blocking pool; the server
//! keeps no state between requests.

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::analysis::{analyze, ScheduleAnalysis};
use crate::demo_data::{self, DemoData, DemoProblem};
use crate::dto::{AnalyzeRequest, ErrorResponse, HealthResponse, InfoResponse, ScheduleRequest};
use crate::error::{ScheduleError, SolveError};
use crate::pipeline::{self, ScheduleOutcome, SchedulingConfig};
use crate::projection::ScheduleResult;

/// Creates the API router.
pub fn router() -> Router {
    Router::new()
        // Health & Info
        .route("/health", get(health))
        .route("/info", get(info))
        // Demo data
        .route("/demo-data", get(list_demo_data))
        .route("/demo-data/{id}", get(get_demo_data))
        .route("/schedule", get(demo_schedule))
        .route("/api/v1/auto_calendar", get(demo_schedule))
        // Schedules
        .route("/schedules", post(create_schedule))
        .route("/schedules/analyze", put(analyze_schedule))
}

// ============================================================================
// Errors
// ============================================================================

/// A failed request: status code plus a JSON [`ErrorResponse`].
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    fn new(status: StatusCode, kind: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse {
                kind: kind.to_string(),
                message: message.into(),
            },
        }
    }
}

impl From<ScheduleError> for ApiError {
    fn from(err: ScheduleError) -> Self {
        let message = err.to_string();
        match err {
            ScheduleError::Config(_) => {
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, "config", message)
            }
            ScheduleError::Solve(SolveError::Infeasible) => {
                Self::new(StatusCode::CONFLICT, "infeasible", message)
            }
            ScheduleError::Solve(SolveError::TimeLimitReached { .. }) => {
                Self::new(StatusCode::GATEWAY_TIMEOUT, "timeLimit", message)
            }
            ScheduleError::Solve(_) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "solver", message)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

// ============================================================================
// Health & Info
// ============================================================================

/// GET /health - Health check endpoint.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "UP" })
}

/// GET /info - Application info endpoint.
async fn info() -> Json<InfoResponse> {
    Json(InfoResponse {
        name: "Shift Roster",
        version: env!("CARGO_PKG_VERSION"),
        solver_engine: "good_lp/microlp",
    })
}

// ============================================================================
// Demo data
// ============================================================================

/// GET /demo-data - List available demo data sets.
async fn list_demo_data() -> Json<Vec<&'static str>> {
    Json(demo_data::list_demo_data())
}

/// GET /demo-data/{id} - Get a specific demo data set.
async fn get_demo_data(Path(id): Path<String>) -> Result<Json<DemoProblem>, StatusCode> {
    match id.parse::<DemoData>() {
        Ok(demo) => Ok(Json(demo_data::generate(demo))),
        Err(_) => Err(StatusCode::NOT_FOUND),
    }
}

#[derive(Debug, Deserialize)]
struct DemoQuery {
    demo: Option<String>,
}

/// GET /schedule - Solve a demo roster and return the day-by-day schedule.
///
/// Defaults to the full-month LARGE set; `?demo=SMALL` picks the one-week set.
async fn demo_schedule(Query(query): Query<DemoQuery>) -> Result<Json<ScheduleResult>, ApiError> {
    let demo = match query.demo.as_deref() {
        None => DemoData::Large,
        Some(id) => id.parse::<DemoData>().map_err(|_| {
            ApiError::new(StatusCode::NOT_FOUND, "demoData", format!("unknown demo data: {id}"))
        })?,
    };
    let problem = demo_data::generate(demo);
    let request = ScheduleRequest {
        employees: problem.employees,
        requirements: problem.requirements,
        config: SchedulingConfig::default(),
    };
    let outcome = run_schedule(request).await?;
    Ok(Json(outcome.schedule))
}

// ============================================================================
// Schedules
// ============================================================================

/// POST /schedules - Solve the submitted roster.
async fn create_schedule(
    Json(request): Json<ScheduleRequest>,
) -> Result<Json<ScheduleOutcome>, ApiError> {
    run_schedule(request).await.map(Json)
}

/// PUT /schedules/analyze - Check a roster against the hard rules and score it.
async fn analyze_schedule(Json(request): Json<AnalyzeRequest>) -> Json<ScheduleAnalysis> {
    Json(analyze(
        &request.schedule,
        &request.employees,
        &request.requirements,
        &request.config,
    ))
}

async fn run_schedule(request: ScheduleRequest) -> Result<ScheduleOutcome, ApiError> {
    let result = tokio::task::spawn_blocking(move || {
        pipeline::schedule(&request.employees, &request.requirements, &request.config)
    })
    .await
    .map_err(|e| {
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "internal", e.to_string())
    })?;

    result.map_err(|err| {
        if err.is_infeasible() {
            info!("No roster satisfies the hard rules");
        } else {
            warn!(error = %err, "Scheduling request failed");
        }
        ApiError::from(err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(get_request("/health")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "UP"}));
    }

    #[tokio::test]
    async fn test_demo_data_listing_and_lookup() {
        let (status, body) = send(get_request("/demo-data")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!(["SMALL", "LARGE"]));

        let (status, body) = send(get_request("/demo-data/small")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["employees"].as_array().unwrap().len(), 23);

        let (status, _) = send(get_request("/demo-data/HUGE")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_schedule() {
        let body = json!({
            "employees": [
                {"id": "Y", "seniority": "senior", "shift": "day", "offDays": [2, 3, 4]},
                {"id": "Z", "seniority": "senior", "shift": "day", "offDays": [1]}
            ],
            "requirements": {"day": [1, 1, 1, 1]}
        });

        let (status, body) = send(json_request("POST", "/schedules", body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["schedule"]["Day 1"]["day"], json!(["Y"]));
        assert_eq!(body["schedule"]["Day 4"]["day"], json!(["Z"]));
        assert_eq!(body["status"], "OPTIMAL");
        assert_eq!(body["objective"].as_f64(), Some(5.0));
    }

    #[tokio::test]
    async fn test_create_schedule_error_statuses() {
        let no_senior = json!({
            "employees": [{"id": "A", "seniority": "mid", "shift": "night"}],
            "requirements": {"night": [1]}
        });
        let (status, body) = send(json_request("POST", "/schedules", no_senior)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["kind"], "config");

        let understaffed = json!({
            "employees": [{"id": "A", "seniority": "senior", "shift": "night"}],
            "requirements": {"night": [2]}
        });
        let (status, body) = send(json_request("POST", "/schedules", understaffed)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["kind"], "infeasible");

        let zero_limit = json!({
            "employees": [{"id": "A", "seniority": "senior", "shift": "night"}],
            "requirements": {"night": [1]},
            "config": {"solver": {"timeLimitSecs": 0}}
        });
        let (status, body) = send(json_request("POST", "/schedules", zero_limit)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["kind"], "config");
    }

    #[tokio::test]
    async fn test_analyze_schedule() {
        let body = json!({
            "employees": [
                {"id": "A", "seniority": "senior", "shift": "day", "offDays": [2]},
                {"id": "B", "seniority": "senior", "shift": "day"}
            ],
            "requirements": {"day": [1, 1]},
            "schedule": {"Day 1": {"day": ["B"]}, "Day 2": {"day": ["A"]}}
        });

        let (status, body) = send(json_request("PUT", "/schedules/analyze", body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["feasible"], false);
        assert_eq!(
            body["violations"],
            json!([{"kind": "offDayWorked", "employee": "A", "day": 2}])
        );
    }
}
