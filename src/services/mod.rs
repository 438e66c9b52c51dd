//! HTTP clients for the external services the pipeline stitches together.
//!
//! Each client wraps one vendor API: chat completions for text, a task
//! endpoint for image and video synthesis, text-to-speech, template
//! rendering and a webhook for notifications.

use std::time::Duration;

mod chat;
mod error;
mod render;
mod response;
mod speech;
mod task;
mod webhook;

pub use chat::{ChatClient, OPENAI_API_BASE_URL};
pub use error::ServiceError;
pub use render::{
    RenderClient, AUDIO_SOURCE_SLOT, CREATOMATE_API_BASE_URL, TEXT_SLOT, VIDEO_SOURCE_SLOT,
};
pub use response::ServiceResponse;
pub use speech::{SpeechClient, DEFAULT_VOICE_ID, ELEVENLABS_API_BASE_URL};
pub use task::{
    TaskClient, DEFAULT_IMAGE_MODEL, DEFAULT_VIDEO_MODEL, IMAGE_HEIGHT, IMAGE_WIDTH,
    PIAPI_API_BASE_URL, VIDEO_DURATION_SECS,
};
pub use webhook::{Delivery, WebhookNotifier};

/// Default timeout for HTTP requests (120 seconds).
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Default connection timeout (10 seconds).
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the HTTP client shared by every service.
pub fn build_http_client() -> Result<reqwest::Client, ServiceError> {
    let client = reqwest::Client::builder()
        .timeout(DEFAULT_TIMEOUT)
        .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
        .build()?;
    Ok(client)
}

/// Turn a non-success HTTP response into `ServiceError::ApiError`.
async fn ensure_success(
    service: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, ServiceError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    log::warn!("{} request failed with status {}", service, status);
    Err(ServiceError::ApiError {
        service,
        status,
        body,
    })
}

/// Join a base URL and a path without doubling the slash.
fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_with_single_slash() {
        assert_eq!(
            endpoint("https://api.piapi.ai/api/v1", "task"),
            "https://api.piapi.ai/api/v1/task"
        );
        assert_eq!(
            endpoint("https://api.piapi.ai/api/v1/", "task"),
            "https://api.piapi.ai/api/v1/task"
        );
    }

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client().is_ok());
    }
}
