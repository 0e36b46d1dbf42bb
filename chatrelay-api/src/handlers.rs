use axum::body::Bytes;
use axum::extract::State;
use axum::http::Method;
use axum::Json;
use chatrelay_app::domain::{InboundMessage, OutboundReply};
use chatrelay_app::AppContext;
use chatrelay_errors::AppError;

/// `POST /chatbot` with `{"message": ".."}`; answers `{"reply": ".."}`.
///
/// Any other method is rejected before the body is looked at. Upstream
/// failures never surface here, `RelayChat` folds them into the reply.
pub async fn chatbot(
    State(ctx): State<AppContext>,
    method: Method,
    body: Bytes,
) -> Result<Json<OutboundReply>, AppError> {
    if method != Method::POST {
        return Err(AppError::PostRequired);
    }

    let inbound = parse_inbound(&body).inspect_err(|e| {
        tracing::warn!("Rejected chat request: {}", e);
    })?;

    Ok(Json(ctx.relay_chat.execute(inbound).await))
}

// Only undecodable bytes are rejected. A JSON document that is not an object
// has no `message` field and relays an empty message.
fn parse_inbound(body: &[u8]) -> Result<InboundMessage, AppError> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| AppError::InvalidBody(e.to_string()))?;

    if !value.is_object() {
        return Ok(InboundMessage::default());
    }

    serde_json::from_value(value).map_err(|e| AppError::InvalidBody(e.to_string()))
}
