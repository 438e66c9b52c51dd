//! SpeechClient - text-to-speech through the ElevenLabs API.

use serde::Serialize;

use super::{endpoint, ensure_success, ServiceError, ServiceResponse};

/// Default base URL for the ElevenLabs API.
pub const ELEVENLABS_API_BASE_URL: &str = "https://api.elevenlabs.io/v1";

/// Narrator voice used when none is configured.
pub const DEFAULT_VOICE_ID: &str = "onwK4e9ZLuTAKqWW03F9";

const SERVICE: &str = "ElevenLabs";

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Clone)]
pub struct SpeechClient {
    api_key: String,
    base_url: String,
    voice_id: String,
    http_client: reqwest::Client,
}

impl SpeechClient {
    pub fn with_api_key(api_key: String, http_client: reqwest::Client) -> Result<Self, ServiceError> {
        Self::with_base_url(api_key, ELEVENLABS_API_BASE_URL.to_string(), http_client)
    }

    pub fn with_base_url(
        api_key: String,
        base_url: String,
        http_client: reqwest::Client,
    ) -> Result<Self, ServiceError> {
        if api_key.is_empty() {
            return Err(ServiceError::MissingCredential("ELEVENLABS_KEY"));
        }

        Ok(Self {
            api_key,
            base_url,
            voice_id: DEFAULT_VOICE_ID.to_string(),
            http_client,
        })
    }

    pub fn with_voice(mut self, voice_id: String) -> Self {
        self.voice_id = voice_id;
        self
    }

    pub fn voice_id(&self) -> &str {
        &self.voice_id
    }

    /// Synthesize `script` with the configured voice.
    ///
    /// The response body is returned as JSON; the pipeline reads its `url`.
    pub async fn synthesize(&self, script: &str) -> Result<ServiceResponse, ServiceError> {
        let url = endpoint(
            &self.base_url,
            &format!("text-to-speech/{}", self.voice_id),
        );

        let response = self
            .http_client
            .post(url)
            .header("xi-api-key", &self.api_key)
            .json(&SpeechRequest { text: script })
            .send()
            .await?;
        let response = ensure_success(SERVICE, response).await?;

        Ok(ServiceResponse::new(response.json().await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_voice() {
        let client =
            SpeechClient::with_api_key("xi-key".to_string(), reqwest::Client::new()).unwrap();
        assert_eq!(client.voice_id(), DEFAULT_VOICE_ID);
    }

    #[test]
    fn test_with_voice() {
        let client = SpeechClient::with_api_key("xi-key".to_string(), reqwest::Client::new())
            .unwrap()
            .with_voice("narrator-2".to_string());
        assert_eq!(client.voice_id(), "narrator-2");
    }

    #[test]
    fn test_empty_api_key_is_rejected() {
        assert!(matches!(
            SpeechClient::with_api_key(String::new(), reqwest::Client::new()),
            Err(ServiceError::MissingCredential("ELEVENLABS_KEY"))
        ));
    }
}
