//! TaskClient - image and video synthesis through the PiAPI task endpoint.

use serde::Serialize;

use super::{endpoint, ensure_success, ServiceError, ServiceResponse};

/// Default base URL for the PiAPI task API.
pub const PIAPI_API_BASE_URL: &str = "https://api.piapi.ai/api/v1";

/// Default model for text-to-image tasks.
pub const DEFAULT_IMAGE_MODEL: &str = "Qubico/flux1-dev";

/// Default model for image-to-video tasks.
pub const DEFAULT_VIDEO_MODEL: &str = "kling";

/// Portrait output width in pixels.
pub const IMAGE_WIDTH: u32 = 540;

/// Portrait output height in pixels.
pub const IMAGE_HEIGHT: u32 = 960;

/// Length of every generated clip.
pub const VIDEO_DURATION_SECS: u32 = 5;

const SERVICE: &str = "PiAPI";

/// Request body for task submission.
#[derive(Debug, Serialize)]
struct TaskRequest<'a, I> {
    model: &'a str,
    task_type: &'a str,
    input: I,
}

#[derive(Debug, Serialize)]
struct ImageInput<'a> {
    prompt: &'a str,
    width: u32,
    height: u32,
}

#[derive(Debug, Serialize)]
struct VideoInput<'a> {
    prompt: &'a str,
    /// Serialized as `null` when the image stage produced no URL.
    image_url: Option<&'a str>,
    duration: u32,
}

/// Client for the PiAPI task-submission endpoint.
#[derive(Debug, Clone)]
pub struct TaskClient {
    api_key: String,
    base_url: String,
    image_model: String,
    video_model: String,
    http_client: reqwest::Client,
}

impl TaskClient {
    /// Create a client against the public PiAPI endpoint with default models.
    pub fn with_api_key(api_key: String, http_client: reqwest::Client) -> Result<Self, ServiceError> {
        Self::with_base_url(api_key, PIAPI_API_BASE_URL.to_string(), http_client)
    }

    /// Create a client against a custom base URL with default models.
    pub fn with_base_url(
        api_key: String,
        base_url: String,
        http_client: reqwest::Client,
    ) -> Result<Self, ServiceError> {
        if api_key.is_empty() {
            return Err(ServiceError::MissingCredential("PIAPI_KEY"));
        }

        Ok(Self {
            api_key,
            base_url,
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            video_model: DEFAULT_VIDEO_MODEL.to_string(),
            http_client,
        })
    }

    /// Override the image and video model identifiers.
    pub fn with_models(mut self, image_model: String, video_model: String) -> Self {
        self.image_model = image_model;
        self.video_model = video_model;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn image_model(&self) -> &str {
        &self.image_model
    }

    pub fn video_model(&self) -> &str {
        &self.video_model
    }

    /// Submit a 540x960 text-to-image task.
    pub async fn generate_image(&self, prompt: &str) -> Result<ServiceResponse, ServiceError> {
        let request_body = TaskRequest {
            model: &self.image_model,
            task_type: "txt2img",
            input: ImageInput {
                prompt,
                width: IMAGE_WIDTH,
                height: IMAGE_HEIGHT,
            },
        };
        self.submit(&request_body).await
    }

    /// Submit a five-second image-to-video task.
    pub async fn generate_video(
        &self,
        image_url: Option<&str>,
        prompt: &str,
    ) -> Result<ServiceResponse, ServiceError> {
        if image_url.is_none() {
            log::warn!("Image result has no url; submitting video task without one");
        }

        let request_body = TaskRequest {
            model: &self.video_model,
            task_type: "video_generation",
            input: VideoInput {
                prompt,
                image_url,
                duration: VIDEO_DURATION_SECS,
            },
        };
        self.submit(&request_body).await
    }

    async fn submit<I: Serialize>(
        &self,
        request_body: &TaskRequest<'_, I>,
    ) -> Result<ServiceResponse, ServiceError> {
        log::debug!(
            "Submitting {} task with model {}",
            request_body.task_type,
            request_body.model
        );
        let response = self
            .http_client
            .post(endpoint(&self.base_url, "task"))
            .header("X-API-Key", &self.api_key)
            .json(request_body)
            .send()
            .await?;
        let response = ensure_success(SERVICE, response).await?;

        Ok(ServiceResponse::new(response.json().await?))
    }
}
