//! Route handler functions for all API endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use brightline_core::types::{ChatRequest, ChatResponseEnvelope, ContactAck, ContactSubmission};

use crate::error::ApiError;
use crate::state::AppState;

/// Acknowledgement text for a dispatched contact submission.
pub const CONTACT_SENT: &str = "Email sent successfully";

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// POST /api/chat - one assistant turn.
pub async fn chat(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponseEnvelope>, ApiError> {
    let Json(request) = body?;
    let envelope = state.orchestrator.handle_request(request).await?;
    Ok(Json(envelope))
}

/// POST /api/contact - validate the form and email both parties.
pub async fn contact(
    State(state): State<AppState>,
    body: Result<Json<ContactSubmission>, JsonRejection>,
) -> Result<Json<ContactAck>, ApiError> {
    let Json(submission) = body?;
    state.intake.submit(&submission).await.map_err(|e| {
        tracing::warn!(error = %e, "Contact submission failed");
        ApiError::from(e)
    })?;
    Ok(Json(ContactAck {
        success: true,
        message: CONTACT_SENT.to_string(),
    }))
}

/// GET /health - liveness and uptime.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}
