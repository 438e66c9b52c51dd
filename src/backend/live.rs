//! LiveBackend - real calls to the language, image, video, speech and render services.

use crate::config::{Config, ModelSettings};
use crate::services::{ChatClient, RenderClient, ServiceError, ServiceResponse, SpeechClient, TaskClient};

use super::text::{tidy_block, tidy_lines};

const CAPTION_INSTRUCTION: &str = "Generate 5 short, wild TikTok captions for the topic below.";
const PROMPT_INSTRUCTION: &str = "Expand short caption into a detailed image generation prompt.";
const SCRIPT_INSTRUCTION: &str = "Write a funny narration for these TikTok captions.";

#[derive(Debug, Clone)]
pub struct LiveBackend {
    chat: ChatClient,
    tasks: TaskClient,
    speech: SpeechClient,
    render: RenderClient,
    models: ModelSettings,
}

impl LiveBackend {
    /// Build every service client from the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::MissingCredential` if a key needed by one of
    /// the clients is empty.
    pub fn from_config(config: &Config, http_client: reqwest::Client) -> Result<Self, ServiceError> {
        let creds = &config.credentials;
        let settings = &config.settings;

        let chat = ChatClient::with_base_url(
            creds.openai_api_key.clone(),
            settings.endpoints.openai.clone(),
            http_client.clone(),
        )?;
        let tasks = TaskClient::with_base_url(
            creds.piapi_key.clone(),
            settings.endpoints.piapi.clone(),
            http_client.clone(),
        )?
        .with_models(settings.models.image.clone(), settings.models.video.clone());
        let speech = SpeechClient::with_base_url(
            creds.elevenlabs_key.clone(),
            settings.endpoints.elevenlabs.clone(),
            http_client.clone(),
        )?
        .with_voice(settings.voice.voice_id.clone());
        let render = RenderClient::with_base_url(
            creds.creatomate_key.clone(),
            creds.creatomate_template_id.clone(),
            settings.endpoints.creatomate.clone(),
            http_client,
        )?;

        Ok(Self {
            chat,
            tasks,
            speech,
            render,
            models: settings.models.clone(),
        })
    }

    /// Ask the model for captions, one per non-blank reply line.
    pub async fn captions(&self, topic: &str) -> Result<Vec<String>, ServiceError> {
        let reply = self
            .chat
            .complete(&self.models.caption, CAPTION_INSTRUCTION, topic)
            .await?;
        Ok(tidy_lines(&reply))
    }

    pub async fn image_prompt(&self, caption: &str) -> Result<String, ServiceError> {
        let reply = self
            .chat
            .complete(&self.models.prompt, PROMPT_INSTRUCTION, caption)
            .await?;
        Ok(tidy_block(&reply))
    }

    pub async fn script(&self, captions: &[String]) -> Result<String, ServiceError> {
        let reply = self
            .chat
            .complete(&self.models.script, SCRIPT_INSTRUCTION, &captions.join("\n"))
            .await?;
        Ok(tidy_block(&reply))
    }

    pub async fn image(&self, prompt: &str) -> Result<ServiceResponse, ServiceError> {
        self.tasks.generate_image(prompt).await
    }

    pub async fn video(
        &self,
        image_url: Option<&str>,
        prompt: &str,
    ) -> Result<ServiceResponse, ServiceError> {
        self.tasks.generate_video(image_url, prompt).await
    }

    pub async fn voice(&self, script: &str) -> Result<ServiceResponse, ServiceError> {
        self.speech.synthesize(script).await
    }

    pub async fn render(
        &self,
        video_urls: &[Option<String>],
        captions: &[String],
        audio_url: Option<&str>,
    ) -> Result<ServiceResponse, ServiceError> {
        self.render.render(video_urls, captions, audio_url).await
    }
}
