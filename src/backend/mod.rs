//! Content-generation backends.
//!
//! Every pipeline stage goes through [`Backend`], which is either mocked or
//! live. The variant is chosen once from the configuration; stages never
//! re-check credentials themselves.

mod live;
mod mock;
mod text;

pub use live::LiveBackend;
pub use mock::{MockBackend, MOCK_CAPTION_COUNT};
pub use text::{tidy_block, tidy_lines};

use crate::config::{Config, Mode};
use crate::services::{ServiceError, ServiceResponse};

#[derive(Debug, Clone)]
pub enum Backend {
    Mock(MockBackend),
    Live(LiveBackend),
}

impl Backend {
    /// Pick the backend matching the configuration's mode.
    pub fn select(config: &Config, http_client: reqwest::Client) -> Result<Self, ServiceError> {
        match config.mode() {
            Mode::Mock => {
                log::warn!(
                    "Running in MOCK mode; missing: {}",
                    config.credentials.missing().join(", ")
                );
                Ok(Backend::Mock(MockBackend::new()))
            }
            Mode::Live => {
                log::info!("Running in LIVE mode");
                Ok(Backend::Live(LiveBackend::from_config(config, http_client)?))
            }
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Backend::Mock(_) => Mode::Mock,
            Backend::Live(_) => Mode::Live,
        }
    }

    pub async fn captions(&self, topic: &str) -> Result<Vec<String>, ServiceError> {
        match self {
            Backend::Mock(mock) => Ok(mock.captions(topic)),
            Backend::Live(live) => live.captions(topic).await,
        }
    }

    pub async fn image_prompt(&self, caption: &str) -> Result<String, ServiceError> {
        match self {
            Backend::Mock(mock) => Ok(mock.image_prompt(caption)),
            Backend::Live(live) => live.image_prompt(caption).await,
        }
    }

    pub async fn image(&self, prompt: &str) -> Result<ServiceResponse, ServiceError> {
        match self {
            Backend::Mock(mock) => Ok(mock.image(prompt)),
            Backend::Live(live) => live.image(prompt).await,
        }
    }

    pub async fn video(
        &self,
        image_url: Option<&str>,
        prompt: &str,
    ) -> Result<ServiceResponse, ServiceError> {
        match self {
            Backend::Mock(mock) => Ok(mock.video(image_url, prompt)),
            Backend::Live(live) => live.video(image_url, prompt).await,
        }
    }

    pub async fn script(&self, captions: &[String]) -> Result<String, ServiceError> {
        match self {
            Backend::Mock(mock) => Ok(mock.script(captions)),
            Backend::Live(live) => live.script(captions).await,
        }
    }

    pub async fn voice(&self, script: &str) -> Result<ServiceResponse, ServiceError> {
        match self {
            Backend::Mock(mock) => Ok(mock.voice(script)),
            Backend::Live(live) => live.voice(script).await,
        }
    }

    /// Render the final video. Only the first clip and caption are used.
    pub async fn render(
        &self,
        video_urls: &[Option<String>],
        captions: &[String],
        audio_url: Option<&str>,
    ) -> Result<ServiceResponse, ServiceError> {
        match self {
            Backend::Mock(mock) => Ok(mock.render()),
            Backend::Live(live) => live.render(video_urls, captions, audio_url).await,
        }
    }
}
