//! ChatClient - chat completions against the OpenAI API.

use serde::{Deserialize, Serialize};

use super::{endpoint, ensure_success, ServiceError};

/// Default base URL for the OpenAI API.
pub const OPENAI_API_BASE_URL: &str = "https://api.openai.com/v1";

const SERVICE: &str = "OpenAI";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [Message<'a>; 2],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for the chat completion endpoint.
#[derive(Debug, Clone)]
pub struct ChatClient {
    api_key: String,
    base_url: String,
    http_client: reqwest::Client,
}

impl ChatClient {
    /// Create a client against the public OpenAI API.
    pub fn with_api_key(api_key: String, http_client: reqwest::Client) -> Result<Self, ServiceError> {
        Self::with_base_url(api_key, OPENAI_API_BASE_URL.to_string(), http_client)
    }

    /// Create a client against a custom base URL.
    pub fn with_base_url(
        api_key: String,
        base_url: String,
        http_client: reqwest::Client,
    ) -> Result<Self, ServiceError> {
        if api_key.is_empty() {
            return Err(ServiceError::MissingCredential("OPENAI_API_KEY"));
        }

        Ok(Self {
            api_key,
            base_url,
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run a single system + user completion and return the first choice's text.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::ApiError` on a non-success status and
    /// `ServiceError::MalformedResponse` when the reply has no choices or the
    /// first choice carries no text.
    pub async fn complete(
        &self,
        model: &str,
        system: &str,
        user: &str,
    ) -> Result<String, ServiceError> {
        let request_body = ChatRequest {
            model,
            messages: [
                Message {
                    role: "system",
                    content: system,
                },
                Message {
                    role: "user",
                    content: user,
                },
            ],
        };

        log::debug!("Requesting {} completion", model);
        let response = self
            .http_client
            .post(endpoint(&self.base_url, "chat/completions"))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;
        let response = ensure_success(SERVICE, response).await?;

        let completion: ChatResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ServiceError::MalformedResponse {
                service: SERVICE,
                reason: "completion has no message content".to_string(),
            })
    }
}
