use serde::{Deserialize, Serialize};

pub const UNDERSTAND_FALLBACK: &str = "Sorry, I could not understand that.";
pub const CONNECT_FALLBACK: &str = "Sorry, there was an error connecting to the AI service.";

/// Why a call to the text-generation service did not yield a reply.
///
/// Callers only ever see [`UpstreamError::reply_text`]; the variant itself is
/// for logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum UpstreamError {
    #[error("Failed to reach AI service: {0}")]
    Network(String),

    #[error("AI service request timed out")]
    Timeout,

    #[error("AI service returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("AI service response is not valid JSON: {0}")]
    Decode(String),

    #[error("AI service response has no candidate text")]
    ShapeMismatch,
}

impl UpstreamError {
    pub fn reply_text(&self) -> &'static str {
        match self {
            Self::ShapeMismatch => UNDERSTAND_FALLBACK,
            Self::Network(_) | Self::Timeout | Self::Status { .. } | Self::Decode(_) => {
                CONNECT_FALLBACK
            }
        }
    }
}
