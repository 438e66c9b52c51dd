//! RenderClient - template rendering through the Creatomate API.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{endpoint, ensure_success, ServiceError, ServiceResponse};

/// Default base URL for the Creatomate API.
pub const CREATOMATE_API_BASE_URL: &str = "https://api.creatomate.com/v1";

/// Template slot receiving the clip.
pub const VIDEO_SOURCE_SLOT: &str = "Video-1.source";

/// Template slot receiving the narration audio.
pub const AUDIO_SOURCE_SLOT: &str = "Audio-1.source";

/// Template slot receiving the caption overlay.
pub const TEXT_SLOT: &str = "Text-1.text";

const SERVICE: &str = "Creatomate";

#[derive(Debug, Serialize)]
struct RenderRequest<'a> {
    template_id: &'a str,
    modifications: BTreeMap<&'static str, Option<&'a str>>,
}

#[derive(Debug, Clone)]
pub struct RenderClient {
    api_key: String,
    template_id: String,
    base_url: String,
    http_client: reqwest::Client,
}

impl RenderClient {
    pub fn with_api_key(
        api_key: String,
        template_id: String,
        http_client: reqwest::Client,
    ) -> Result<Self, ServiceError> {
        Self::with_base_url(
            api_key,
            template_id,
            CREATOMATE_API_BASE_URL.to_string(),
            http_client,
        )
    }

    pub fn with_base_url(
        api_key: String,
        template_id: String,
        base_url: String,
        http_client: reqwest::Client,
    ) -> Result<Self, ServiceError> {
        if api_key.is_empty() {
            return Err(ServiceError::MissingCredential("CREATOMATE_KEY"));
        }
        if template_id.is_empty() {
            return Err(ServiceError::MissingCredential("CREATOMATE_TEMPLATE_ID"));
        }

        Ok(Self {
            api_key,
            template_id,
            base_url,
            http_client,
        })
    }

    pub fn template_id(&self) -> &str {
        &self.template_id
    }

    /// Render the template with the first clip, the narration and the first caption.
    ///
    /// The template exposes a single clip slot, so only `video_urls[0]` and
    /// `captions[0]` are submitted; the remaining entries are ignored.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::MissingInput` if either list is empty.
    pub async fn render(
        &self,
        video_urls: &[Option<String>],
        captions: &[String],
        audio_url: Option<&str>,
    ) -> Result<ServiceResponse, ServiceError> {
        let video_url = video_urls
            .first()
            .ok_or(ServiceError::MissingInput("video urls"))?;
        let caption = captions
            .first()
            .ok_or(ServiceError::MissingInput("captions"))?;

        let mut modifications = BTreeMap::new();
        modifications.insert(VIDEO_SOURCE_SLOT, video_url.as_deref());
        modifications.insert(AUDIO_SOURCE_SLOT, audio_url);
        modifications.insert(TEXT_SLOT, Some(caption.as_str()));

        let request_body = RenderRequest {
            template_id: &self.template_id,
            modifications,
        };

        log::debug!("Submitting render for template {}", self.template_id);
        let response = self
            .http_client
            .post(endpoint(&self.base_url, "renders"))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;
        let response = ensure_success(SERVICE, response).await?;

        Ok(ServiceResponse::new(response.json().await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> RenderClient {
        RenderClient::with_api_key(
            "cm-key".to_string(),
            "tpl-1".to_string(),
            reqwest::Client::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_missing_template_is_rejected() {
        let result = RenderClient::with_api_key(
            "cm-key".to_string(),
            String::new(),
            reqwest::Client::new(),
        );
        assert!(matches!(
            result,
            Err(ServiceError::MissingCredential("CREATOMATE_TEMPLATE_ID"))
        ));
    }

    #[tokio::test]
    async fn test_render_rejects_empty_video_list() {
        let result = client()
            .render(&[], &["caption".to_string()], Some("https://a/audio.mp3"))
            .await;
        assert!(matches!(result, Err(ServiceError::MissingInput("video urls"))));
    }

    #[tokio::test]
    async fn test_render_rejects_empty_captions() {
        let result = client()
            .render(&[Some("https://v/0.mp4".to_string())], &[], None)
            .await;
        assert!(matches!(result, Err(ServiceError::MissingInput("captions"))));
    }
}
