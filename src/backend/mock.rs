//! MockBackend - deterministic stand-ins for every paid API call.

use crate::services::ServiceResponse;

/// Number of captions produced per topic.
pub const MOCK_CAPTION_COUNT: usize = 5;

/// Backend used when any credential is missing. Never touches the network.
#[derive(Debug, Clone, Default)]
pub struct MockBackend;

impl MockBackend {
    pub fn new() -> Self {
        Self
    }

    pub fn captions(&self, topic: &str) -> Vec<String> {
        (1..=MOCK_CAPTION_COUNT)
            .map(|i| format!("Mock caption {} for idea: {}", i, topic))
            .collect()
    }

    pub fn image_prompt(&self, caption: &str) -> String {
        format!("POV Flux prompt for '{}'", caption)
    }

    pub fn script(&self, _captions: &[String]) -> String {
        "Mock narration script matching the captions.".to_string()
    }

    pub fn image(&self, _prompt: &str) -> ServiceResponse {
        simulate("generate_image")
    }

    pub fn video(&self, _image_url: Option<&str>, _prompt: &str) -> ServiceResponse {
        simulate("generate_video")
    }

    pub fn voice(&self, _script: &str) -> ServiceResponse {
        simulate("generate_voice")
    }

    pub fn render(&self) -> ServiceResponse {
        simulate("render_final_video")
    }
}

fn simulate(name: &str) -> ServiceResponse {
    log::info!("[MOCK] Simulating {} API call.", name);
    ServiceResponse::mock(name)
}
