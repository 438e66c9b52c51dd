//! Error type shared by all external service clients.

/// Errors that can occur when talking to an external service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("{service} API request failed with status {status}: {body}")]
    ApiError {
        /// Which service rejected the request
        service: &'static str,
        /// HTTP status code returned
        status: u16,
        /// Response body, if it could be read
        body: String,
    },

    #[error("{service} returned an unexpected response: {reason}")]
    MalformedResponse {
        service: &'static str,
        reason: String,
    },

    #[error("{0} not configured")]
    MissingCredential(&'static str),

    #[error("Missing input: {0}")]
    MissingInput(&'static str),
}
