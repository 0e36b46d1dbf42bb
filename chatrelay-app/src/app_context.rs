use crate::application::RelayChat;
use crate::config::GeminiConfig;
use crate::infrastructure::gemini::GeminiClient;
use chatrelay_errors::AppError;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppContext {
    pub relay_chat: Arc<RelayChat>,
}

impl AppContext {
    pub fn new(config: GeminiConfig) -> Result<Self, AppError> {
        let client = GeminiClient::new(config)?;
        Ok(Self {
            relay_chat: Arc::new(RelayChat::new(client)),
        })
    }

    pub fn from_env() -> Result<Self, AppError> {
        Self::new(GeminiConfig::from_env()?)
    }
}
