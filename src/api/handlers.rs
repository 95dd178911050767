//! HTTP request handlers for the payroll calendar API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::generate_calendar;
use crate::export::{to_csv, to_ical};
use crate::models::CalendarResult;

use super::request::CalendarRequest;
use super::response::{ApiError, ApiErrorResponse, CountrySummary};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calendar", post(calendar_handler))
        .route("/calendar/csv", post(calendar_csv_handler))
        .route("/calendar/ics", post(calendar_ics_handler))
        .route("/countries", get(countries_handler))
        .with_state(state)
}

/// Handler for POST /calendar.
///
/// Returns the full [`CalendarResult`], including the audit trace.
async fn calendar_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalendarRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calendar request");

    match run_calendar(&state, payload, correlation_id) {
        Ok(result) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            Json(result),
        )
            .into_response(),
        Err(response) => response,
    }
}

/// Handler for POST /calendar/csv.
async fn calendar_csv_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalendarRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing CSV calendar request");

    let result = match run_calendar(&state, payload, correlation_id) {
        Ok(result) => result,
        Err(response) => return response,
    };

    match to_csv(&result.rows) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "CSV export failed");
            engine_error_response(err.into())
        }
    }
}

/// Handler for POST /calendar/ics.
async fn calendar_ics_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalendarRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing iCalendar request");

    match run_calendar(&state, payload, correlation_id) {
        Ok(result) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/calendar; charset=utf-8")],
            to_ical(&result.rows, result.timestamp),
        )
            .into_response(),
        Err(response) => response,
    }
}

/// Handler for GET /countries.
///
/// Lists every loaded country with its subdivision codes.
async fn countries_handler(State(state): State<AppState>) -> Json<Vec<CountrySummary>> {
    Json(
        state
            .holidays()
            .countries()
            .map(CountrySummary::from)
            .collect(),
    )
}

/// Parses the request body, generates the calendar and logs the outcome.
///
/// On failure the ready-to-send error response is returned.
fn run_calendar(
    state: &AppState,
    payload: Result<Json<CalendarRequest>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<CalendarResult, Response> {
    // Handle JSON parsing errors
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return Err((
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response());
        }
    };

    let settings = request.into_settings().map_err(|err| {
        warn!(correlation_id = %correlation_id, error = %err, "Invalid calendar request");
        engine_error_response(err.into())
    })?;

    match generate_calendar(&settings, state.holidays()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                frequency = %settings.frequency,
                country = %settings.country,
                period_count = result.rows.len(),
                adjusted_count = result.adjusted_count(),
                duration_us = result.audit_trace.duration_us,
                "Calendar generated successfully"
            );
            Ok(result)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calendar generation failed"
            );
            Err(engine_error_response(err.into()))
        }
    }
}

fn engine_error_response(api_error: ApiErrorResponse) -> Response {
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HolidayConfigLoader;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let holidays =
            HolidayConfigLoader::load("./config/holidays").expect("Failed to load holidays");
        AppState::new(holidays)
    }

    fn post_json(uri: &str, body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(body.into())
            .unwrap()
    }

    async fn body_bytes(response: Response) -> axum::body::Bytes {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_api_001_valid_request_returns_200() {
        let router = create_router(create_test_state());
        let body = r#"{ "start_date": "2024-01-01", "frequency": "Bi-weekly" }"#;

        let response = router.oneshot(post_json("/calendar", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let result: CalendarResult = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(result.rows.len(), 26);
        assert_eq!(result.audit_trace.steps.len(), 26);
    }

    #[tokio::test]
    async fn test_api_002_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json("/calendar", "{invalid json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_api_003_missing_frequency_returns_validation_error() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json("/calendar", r#"{ "start_date": "2024-01-01" }"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("frequency"));
    }

    #[tokio::test]
    async fn test_api_004_unknown_frequency_returns_400() {
        let router = create_router(create_test_state());
        let body = r#"{ "start_date": "2024-01-01", "frequency": "Quarterly" }"#;

        let response = router.oneshot(post_json("/calendar", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "INVALID_FREQUENCY");
    }

    #[tokio::test]
    async fn test_api_005_missing_content_type_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/calendar")
                    .body(Body::from(
                        r#"{ "start_date": "2024-01-01", "frequency": "Weekly" }"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "MISSING_CONTENT_TYPE");
    }

    #[tokio::test]
    async fn test_csv_endpoint_returns_text_csv() {
        let router = create_router(create_test_state());
        let body = r#"{ "start_date": "2024-01-01", "frequency": "Monthly", "period_count": 6 }"#;

        let response = router
            .oneshot(post_json("/calendar/csv", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/csv; charset=utf-8"
        );
        let text = String::from_utf8(body_bytes(response).await.to_vec()).unwrap();
        assert_eq!(text.lines().count(), 7);
        assert!(text.starts_with("Period Start,Period End,Pay Date"));
    }

    #[tokio::test]
    async fn test_ics_endpoint_returns_calendar() {
        let router = create_router(create_test_state());
        let body = r#"{ "start_date": "2024-01-01", "frequency": "Weekly", "period_count": 8 }"#;

        let response = router
            .oneshot(post_json("/calendar/ics", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/calendar; charset=utf-8"
        );
        let text = String::from_utf8(body_bytes(response).await.to_vec()).unwrap();
        assert_eq!(text.matches("BEGIN:VEVENT").count(), 8);
    }

    #[tokio::test]
    async fn test_countries_endpoint_lists_loaded_tables() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/countries")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let countries: Vec<CountrySummary> =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        let codes: Vec<&str> = countries.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["CA", "UK", "US"]);

        let us = countries.iter().find(|c| c.code == "US").unwrap();
        assert!(us.subdivisions.contains(&"CA".to_string()));
    }
}
