use crate::domain::{InboundMessage, OutboundReply};
use crate::infrastructure::gemini::GeminiClient;

/// Forwards one user message to the text-generation service and always
/// produces a reply, substituting a fallback string on failure.
pub struct RelayChat {
    client: GeminiClient,
}

impl RelayChat {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }

    pub fn model(&self) -> &str {
        self.client.model()
    }

    pub async fn execute(&self, inbound: InboundMessage) -> OutboundReply {
        match self.client.generate_reply(&inbound.message).await {
            Ok(text) => OutboundReply::new(text),
            Err(e) => {
                tracing::error!("Gemini API error: {}", e);
                OutboundReply::new(e.reply_text())
            }
        }
    }
}
