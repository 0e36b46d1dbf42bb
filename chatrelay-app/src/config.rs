use chatrelay_errors::AppError;
use secrecy::SecretString;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const API_KEY_VAR: &str = "GEMINI_API_KEY";
const MODEL_VAR: &str = "GEMINI_MODEL";
const BASE_URL_VAR: &str = "GEMINI_API_BASE_URL";
const TIMEOUT_VAR: &str = "GEMINI_TIMEOUT_SECS";

/// Settings for the Gemini `generateContent` endpoint, read once at startup.
#[derive(Debug)]
pub struct GeminiConfig {
    pub api_key: SecretString,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let api_key = read(API_KEY_VAR)
            .ok_or_else(|| AppError::Config(format!("{API_KEY_VAR} must be set")))?;

        let mut config = Self::new(api_key);

        if let Some(model) = read(MODEL_VAR) {
            config.model = model;
        }

        if let Some(base_url) = read(BASE_URL_VAR) {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }

        if let Some(timeout) = read(TIMEOUT_VAR) {
            let secs = timeout
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    AppError::Config(format!(
                        "{TIMEOUT_VAR} must be a positive whole number of seconds"
                    ))
                })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}
