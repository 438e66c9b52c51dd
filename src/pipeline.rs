//! Pipeline orchestration for reelsmith.
//!
//! Runs the stages in a fixed order, each awaited before the next starts:
//! captions, image prompts, images, videos, narration script, voice, render
//! and finally the webhook notification.

use crate::backend::Backend;
use crate::config::Mode;
use crate::services::{Delivery, ServiceError, ServiceResponse, WebhookNotifier};

/// Errors that can stop a pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Caption generation produced no captions")]
    NoCaptions,

    #[error("{stage} produced {actual} results for {expected} inputs")]
    Misaligned {
        /// Stage whose output count is wrong
        stage: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Ordered, non-empty captions for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionSet(Vec<String>);

impl CaptionSet {
    /// # Errors
    ///
    /// Returns `PipelineError::NoCaptions` if `captions` is empty.
    pub fn new(captions: Vec<String>) -> Result<Self, PipelineError> {
        if captions.is_empty() {
            return Err(PipelineError::NoCaptions);
        }
        Ok(Self(captions))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Image prompts, index-aligned with a [`CaptionSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSet(Vec<String>);

impl PromptSet {
    /// # Errors
    ///
    /// Returns `PipelineError::Misaligned` unless there is exactly one prompt
    /// per caption.
    pub fn aligned(captions: &CaptionSet, prompts: Vec<String>) -> Result<Self, PipelineError> {
        check_aligned("Prompt expansion", captions.len(), prompts.len())?;
        Ok(Self(prompts))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn check_aligned(stage: &'static str, expected: usize, actual: usize) -> Result<(), PipelineError> {
    if expected != actual {
        return Err(PipelineError::Misaligned {
            stage,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Everything produced by one run.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub mode: Mode,
    pub topic: String,
    pub captions: CaptionSet,
    pub prompts: PromptSet,
    pub images: Vec<ServiceResponse>,
    pub videos: Vec<ServiceResponse>,
    pub script: String,
    pub audio: ServiceResponse,
    pub render: ServiceResponse,
    pub notification: Delivery,
}

impl PipelineReport {
    /// URL of the finished video, if the render service returned one.
    pub fn final_url(&self) -> Option<&str> {
        self.render.url()
    }
}

/// Runs a topic through every stage.
pub struct Pipeline {
    backend: Backend,
    notifier: WebhookNotifier,
}

impl Pipeline {
    pub fn new(backend: Backend, notifier: WebhookNotifier) -> Self {
        Self { backend, notifier }
    }

    pub fn mode(&self) -> Mode {
        self.backend.mode()
    }

    pub async fn generate_captions(&self, topic: &str) -> Result<CaptionSet, PipelineError> {
        CaptionSet::new(self.backend.captions(topic).await?)
    }

    pub async fn expand_prompts(&self, captions: &CaptionSet) -> Result<PromptSet, PipelineError> {
        let mut prompts = Vec::with_capacity(captions.len());
        for caption in captions.as_slice() {
            prompts.push(self.backend.image_prompt(caption).await?);
        }
        PromptSet::aligned(captions, prompts)
    }

    pub async fn generate_images(
        &self,
        prompts: &PromptSet,
    ) -> Result<Vec<ServiceResponse>, PipelineError> {
        let mut images = Vec::with_capacity(prompts.len());
        for prompt in prompts.as_slice() {
            images.push(self.backend.image(prompt).await?);
        }
        Ok(images)
    }

    /// One video per image, paired with the prompt the image came from.
    pub async fn generate_videos(
        &self,
        images: &[ServiceResponse],
        prompts: &PromptSet,
    ) -> Result<Vec<ServiceResponse>, PipelineError> {
        check_aligned("Image generation", prompts.len(), images.len())?;

        let mut videos = Vec::with_capacity(images.len());
        for (image, prompt) in images.iter().zip(prompts.as_slice()) {
            videos.push(self.backend.video(image.url(), prompt).await?);
        }
        Ok(videos)
    }

    /// Run the whole pipeline for `topic`.
    ///
    /// Stops at the first failing stage. The notification never fails the run.
    pub async fn run(&self, topic: &str) -> Result<PipelineReport, PipelineError> {
        log::info!("🎬 Starting TikTok/YouTube Generator Workflow ({} mode)", self.mode());

        let captions = self.generate_captions(topic).await?;
        log::info!("Generated captions: {:?}", captions.as_slice());

        let prompts = self.expand_prompts(&captions).await?;
        log::info!("Image prompts expanded");

        let images = self.generate_images(&prompts).await?;
        log::info!("Images generated");

        let videos = self.generate_videos(&images, &prompts).await?;
        log::info!("Videos created");

        let script = self.backend.script(captions.as_slice()).await?;
        let audio = self.backend.voice(&script).await?;
        log::info!("Voiceover done");

        let video_urls: Vec<Option<String>> = videos
            .iter()
            .map(|video| video.url().map(str::to_string))
            .collect();
        let render = self
            .backend
            .render(&video_urls, captions.as_slice(), audio.url())
            .await?;
        log::info!("Render complete");

        let message = format!(
            "✅ Video ready! {}",
            render.url().unwrap_or("(no url returned)")
        );
        let notification = self.notifier.notify(&message).await;

        log::info!("Workflow finished successfully.");
        Ok(PipelineReport {
            mode: self.mode(),
            topic: topic.to_string(),
            captions,
            prompts,
            images,
            videos,
            script,
            audio,
            render,
            notification,
        })
    }
}
