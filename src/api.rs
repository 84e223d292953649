//! REST API for the Financial Wellness Auditor
//!
//! Thin HTTP adapter over the audit tools, for conversational front-ends
//! that cannot call the library directly.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::agent::AuditOrchestrator;
use crate::error::AuditorError;
use crate::models::{SessionContext, ToolInput};
use crate::presenter::ReportPresenter;
use crate::tools::{create_default_registry, ToolRegistry};

/// =============================
/// Request Models
/// =============================

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AuditRequest {
    pub claim: String,
    pub credit_score: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ToolRequest {
    pub session_id: Option<String>,
    #[serde(default)]
    pub parameters: serde_json::Value,
}

/// =============================
/// Response Wrapper
/// =============================

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Option<serde_json::Value>,
    pub error: Option<String>,
    pub timestamp: String,
}

impl ApiResponse {
    pub fn success<T: Serialize>(data: T) -> Self {
        Self {
            success: true,
            data: serde_json::to_value(data).ok(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub orchestrator: Arc<AuditOrchestrator>,
    pub presenter: Arc<ReportPresenter>,
    pub registry: Arc<ToolRegistry>,
}

impl ApiState {
    pub fn new(orchestrator: Arc<AuditOrchestrator>, presenter: Arc<ReportPresenter>) -> Self {
        let registry = Arc::new(create_default_registry(
            orchestrator.clone(),
            presenter.clone(),
        ));

        Self {
            orchestrator,
            presenter,
            registry,
        }
    }
}

/// =============================
/// Helpers
/// =============================

fn stable_uuid_from_string(input: &str) -> uuid::Uuid {
    use sha2::{Digest, Sha256};

    let hash = Sha256::digest(input.as_bytes());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&hash[..16]);

    // Set UUID version (4) and variant (RFC4122) bits.
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    uuid::Uuid::from_bytes(bytes)
}

/// Session ids from chat front-ends are often not UUIDs; map them stably.
pub fn session_uuid(value: &str) -> uuid::Uuid {
    let value = value.trim();
    uuid::Uuid::parse_str(value).unwrap_or_else(|_| stable_uuid_from_string(value))
}

fn status_for(error: &AuditorError) -> StatusCode {
    match error {
        AuditorError::InvalidToolInput(_) => StatusCode::BAD_REQUEST,
        AuditorError::ToolNotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(error: AuditorError) -> (StatusCode, Json<ApiResponse>) {
    let status = status_for(&error);
    warn!(status = %status, error = %error, "Request failed");
    (status, Json(ApiResponse::error(error.to_string())))
}

/// =============================
/// Health Endpoint
/// =============================

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// =============================
/// Audit Endpoints
/// =============================

async fn run_audit(
    State(state): State<ApiState>,
    Path(session_id): Path<String>,
    Json(req): Json<AuditRequest>,
) -> (StatusCode, Json<ApiResponse>) {
    let mut session = SessionContext::new(session_uuid(&session_id));
    if let Some(score) = req.credit_score {
        session = session.with_credit_score(score);
    }

    info!(session_id = %session.session_id, "Received audit request");

    match state.orchestrator.run_audit(&req.claim, &session).await {
        Ok(summary) => (StatusCode::OK, Json(ApiResponse::success(summary))),
        Err(e) => error_response(e),
    }
}

async fn present_report(
    State(state): State<ApiState>,
    Path(session_id): Path<String>,
) -> (StatusCode, Json<ApiResponse>) {
    let session_id = session_uuid(&session_id);

    match state.presenter.present(session_id).await {
        Ok(report) => (
            StatusCode::OK,
            Json(ApiResponse::success(serde_json::json!({ "report": report }))),
        ),
        Err(e) => error_response(e),
    }
}

async fn end_session(
    State(state): State<ApiState>,
    Path(session_id): Path<String>,
) -> (StatusCode, Json<ApiResponse>) {
    let session_id = session_uuid(&session_id);

    match state.orchestrator.end_session(session_id).await {
        Ok(teardown) => (StatusCode::OK, Json(ApiResponse::success(teardown))),
        Err(e) => error_response(e),
    }
}

/// =============================
/// Tool Endpoint
/// =============================

async fn call_tool(
    State(state): State<ApiState>,
    Path(tool_name): Path<String>,
    Json(req): Json<ToolRequest>,
) -> (StatusCode, Json<ApiResponse>) {
    let Some(session_id) = req.session_id.as_deref().filter(|s| !s.trim().is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("session_id is required".into())),
        );
    };

    let session = SessionContext::new(session_uuid(session_id));
    let input = ToolInput {
        tool_name,
        parameters: req.parameters,
    };

    match state.registry.execute(&session, &input).await {
        Ok(output) => (StatusCode::OK, Json(ApiResponse::success(output.data))),
        Err(e) => error_response(e),
    }
}

/// =============================
/// Router
/// =============================

pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/sessions/:session_id", delete(end_session))
        .route("/api/sessions/:session_id/audit", post(run_audit))
        .route("/api/sessions/:session_id/report", get(present_report))
        .route("/api/tools/:tool_name", post(call_tool))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(
    state: ApiState,
    port: u16,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("API Server listening on http://0.0.0.0:{}", port);
    info!("Local: http://127.0.0.1:{}", port);

    axum::serve(listener, router).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::AuditLog;
    use crate::presenter::REPORT_NOT_FOUND;
    use crate::state::InMemoryReportStore;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    fn router() -> Router {
        let store = Arc::new(InMemoryReportStore::new());
        let orchestrator = Arc::new(AuditOrchestrator::with_store(
            store.clone(),
            Arc::new(AuditLog::new()),
        ));
        let presenter = Arc::new(ReportPresenter::new(store));
        create_router(ApiState::new(orchestrator, presenter))
    }

    async fn send(router: &Router, request: Request<Body>) -> (StatusCode, ApiResponse) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_uri(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[test]
    fn test_session_uuid_is_stable() {
        let id = uuid::Uuid::new_v4();
        assert_eq!(session_uuid(&id.to_string()), id);
        assert_eq!(session_uuid("chat-42"), session_uuid("chat-42"));
        assert_ne!(session_uuid("chat-42"), session_uuid("chat-43"));
    }

    #[tokio::test]
    async fn test_audit_then_report() {
        let router = router();

        let (status, body) = send(
            &router,
            post_json(
                "/api/sessions/chat-1/audit",
                serde_json::json!({ "claim": "Is the 50/30/20 budget rule legit?" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body.data.unwrap()["summary_output"],
            "Generally True (66.67% match)."
        );

        let (status, body) = send(&router, get_uri("/api/sessions/chat-1/report")).await;
        assert_eq!(status, StatusCode::OK);
        let data = body.data.unwrap();
        let report = data["report"].as_str().unwrap();
        assert!(report.contains("**Accuracy assessment:** 66.67%"));
    }

    #[tokio::test]
    async fn test_end_session_route() {
        let router = router();

        send(
            &router,
            post_json(
                "/api/sessions/chat-9/audit",
                serde_json::json!({ "claim": "Make a budget" }),
            ),
        )
        .await;

        let delete_request = Request::builder()
            .method("DELETE")
            .uri("/api/sessions/chat-9")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&router, delete_request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body.data.unwrap(),
            serde_json::json!({ "report_removed": true, "audit_records_removed": 1 })
        );

        let (_, body) = send(&router, get_uri("/api/sessions/chat-9/report")).await;
        assert_eq!(body.data.unwrap()["report"], REPORT_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_report_for_fresh_session() {
        let router = router();
        let (status, body) = send(&router, get_uri("/api/sessions/fresh/report")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.data.unwrap()["report"], REPORT_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_tool_endpoint() {
        let router = router();

        let (status, body) = send(
            &router,
            post_json(
                "/api/tools/run_audit",
                serde_json::json!({
                    "session_id": "chat-7",
                    "parameters": { "claim": "Try the debt avalanche" }
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body.data.unwrap()["summary_output"],
            "False (Behavioral Myth) (60% match)."
        );

        let (status, body) = send(
            &router,
            post_json(
                "/api/tools/unknown_tool",
                serde_json::json!({ "session_id": "chat-7" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(!body.success);

        let (status, _) = send(
            &router,
            post_json("/api/tools/run_audit", serde_json::json!({ "parameters": {} })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_health() {
        let response = router().oneshot(get_uri("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
