use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap},
    routing::post,
    Json, Router,
};

use crate::error::Result;
use crate::models::{ContactSubmission, MessageResponse};
use crate::state::AppState;

pub const SENT_MESSAGE: &str = "Message sent successfully!";

/// Contact routes
pub fn contact_routes() -> Router<AppState> {
    Router::new().route("/send-email", post(send_email))
}

/// POST /send-email - Validate a submission and relay it as one email
async fn send_email(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<MessageResponse>> {
    let submission = parse_submission(&headers, &body)
        .inspect_err(|e| tracing::debug!(error = %e, "Rejected contact body"))?
        .validate()?;

    if let Err(e) = state.mailer.send_contact(&submission).await {
        tracing::error!(
            error = %e,
            kind = e.kind(),
            retryable = e.is_retryable(),
            "Error sending contact email"
        );
        return Err(e.into());
    }

    Ok(Json(MessageResponse::new(SENT_MESSAGE)))
}

/// Non-JSON and empty bodies read as an empty submission; only malformed JSON is an error.
fn parse_submission(headers: &HeaderMap, body: &[u8]) -> Result<ContactSubmission> {
    if !is_json(headers) || body.trim_ascii().is_empty() {
        return Ok(ContactSubmission::default());
    }

    Ok(serde_json::from_slice(body)?)
}

fn is_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || (essence.starts_with("application/") && essence.ends_with("+json"))
}
