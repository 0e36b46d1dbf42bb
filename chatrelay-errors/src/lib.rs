mod app_error;
mod upstream_error;

pub use app_error::{AppError, ErrorBody, INVALID_BODY_MESSAGE, POST_REQUIRED_MESSAGE};
pub use upstream_error::{UpstreamError, CONNECT_FALLBACK, UNDERSTAND_FALLBACK};
