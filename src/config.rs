//! Configuration for reelsmith.
//!
//! Credentials come from the environment (after `.env` is loaded) and decide
//! whether the run is live or mocked. Non-secret settings such as endpoints,
//! model ids and the default topic are read from an optional TOML file at
//! `<config dir>/reelsmith/config.toml` or a custom path.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::services::{
    CREATOMATE_API_BASE_URL, DEFAULT_IMAGE_MODEL, DEFAULT_VIDEO_MODEL, DEFAULT_VOICE_ID,
    ELEVENLABS_API_BASE_URL, OPENAI_API_BASE_URL, PIAPI_API_BASE_URL,
};

pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const PIAPI_KEY_ENV: &str = "PIAPI_KEY";
pub const ELEVENLABS_KEY_ENV: &str = "ELEVENLABS_KEY";
pub const CREATOMATE_KEY_ENV: &str = "CREATOMATE_KEY";
pub const CREATOMATE_TEMPLATE_ID_ENV: &str = "CREATOMATE_TEMPLATE_ID";
pub const DISCORD_WEBHOOK_URL_ENV: &str = "DISCORD_WEBHOOK_URL";

/// Topic rendered when neither `--topic` nor the settings file provide one.
pub const DEFAULT_TOPIC: &str = "How AI helps me land my dream job";

/// Whether paid API calls are made or simulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Live,
    Mock,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Live => write!(f, "live"),
            Mode::Mock => write!(f, "mock"),
        }
    }
}

/// API credentials read from the environment.
///
/// Every value may be empty. If any of them is, the whole run is mocked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub openai_api_key: String,
    pub piapi_key: String,
    pub elevenlabs_key: String,
    pub creatomate_key: String,
    pub creatomate_template_id: String,
    pub discord_webhook_url: String,
}

impl Credentials {
    /// Read credentials from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read credentials through an arbitrary lookup, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).unwrap_or_default();
        Self {
            openai_api_key: read(OPENAI_API_KEY_ENV),
            piapi_key: read(PIAPI_KEY_ENV),
            elevenlabs_key: read(ELEVENLABS_KEY_ENV),
            creatomate_key: read(CREATOMATE_KEY_ENV),
            creatomate_template_id: read(CREATOMATE_TEMPLATE_ID_ENV),
            discord_webhook_url: read(DISCORD_WEBHOOK_URL_ENV),
        }
    }

    fn entries(&self) -> [(&'static str, &str); 6] {
        [
            (OPENAI_API_KEY_ENV, self.openai_api_key.as_str()),
            (PIAPI_KEY_ENV, self.piapi_key.as_str()),
            (ELEVENLABS_KEY_ENV, self.elevenlabs_key.as_str()),
            (CREATOMATE_KEY_ENV, self.creatomate_key.as_str()),
            (CREATOMATE_TEMPLATE_ID_ENV, self.creatomate_template_id.as_str()),
            (DISCORD_WEBHOOK_URL_ENV, self.discord_webhook_url.as_str()),
        ]
    }

    /// Names of the variables that are unset or empty.
    pub fn missing(&self) -> Vec<&'static str> {
        self.entries()
            .into_iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| name)
            .collect()
    }

    /// Names of the variables that are set (values are never exposed).
    pub fn present(&self) -> Vec<&'static str> {
        self.entries()
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(name, _)| name)
            .collect()
    }

    /// Live only when every credential is present.
    pub fn mode(&self) -> Mode {
        if self.missing().is_empty() {
            Mode::Live
        } else {
            Mode::Mock
        }
    }

    pub fn webhook_url(&self) -> Option<&str> {
        Some(self.discord_webhook_url.as_str()).filter(|url| !url.is_empty())
    }
}

/// Settings file structure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub endpoints: EndpointSettings,
    #[serde(default)]
    pub models: ModelSettings,
    #[serde(default)]
    pub voice: VoiceSettings,
}

/// Base URLs of the external services.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EndpointSettings {
    pub openai: String,
    pub piapi: String,
    pub elevenlabs: String,
    pub creatomate: String,
}

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            openai: OPENAI_API_BASE_URL.to_string(),
            piapi: PIAPI_API_BASE_URL.to_string(),
            elevenlabs: ELEVENLABS_API_BASE_URL.to_string(),
            creatomate: CREATOMATE_API_BASE_URL.to_string(),
        }
    }
}

/// Model identifiers per stage.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelSettings {
    pub caption: String,
    pub prompt: String,
    pub script: String,
    pub image: String,
    pub video: String,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            caption: "gpt-4o-mini".to_string(),
            prompt: "o3-mini".to_string(),
            script: "gpt-4o-mini".to_string(),
            image: DEFAULT_IMAGE_MODEL.to_string(),
            video: DEFAULT_VIDEO_MODEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct VoiceSettings {
    pub voice_id: String,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            voice_id: DEFAULT_VOICE_ID.to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a file path.
    /// Returns default settings if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if !path.exists() {
            log::debug!("No settings file at {}, using defaults", path.display());
            return Ok(Settings::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
            path: path.clone(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError { path, source: e })
    }

    /// Render these settings as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Everything a run needs, fixed once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub settings: Settings,
}

impl Config {
    pub fn new(credentials: Credentials, settings: Settings) -> Self {
        Self {
            credentials,
            settings,
        }
    }

    /// Load credentials from the environment and settings from `path`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Ok(Self::new(Credentials::from_env(), Settings::load(path)?))
    }

    pub fn mode(&self) -> Mode {
        self.credentials.mode()
    }

    /// Pick the topic: explicit override, then settings, then the default.
    pub fn topic(&self, override_topic: Option<&str>) -> String {
        override_topic
            .or(self.settings.topic.as_deref())
            .unwrap_or(DEFAULT_TOPIC)
            .to_string()
    }
}

/// Errors that can occur when loading or writing settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", .path.display())]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{}': {source}", .path.display())]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize settings: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

/// Get the default settings file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("reelsmith").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/reelsmith/config.toml")
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn full_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            (OPENAI_API_KEY_ENV, "sk-1"),
            (PIAPI_KEY_ENV, "pi-1"),
            (ELEVENLABS_KEY_ENV, "xi-1"),
            (CREATOMATE_KEY_ENV, "cm-1"),
            (CREATOMATE_TEMPLATE_ID_ENV, "tpl-1"),
            (DISCORD_WEBHOOK_URL_ENV, "https://discord.test/hook"),
        ])
    }

    fn credentials(env: &HashMap<&'static str, &'static str>) -> Credentials {
        Credentials::from_lookup(|name| env.get(name).map(|v| v.to_string()))
    }

    #[test]
    fn test_all_credentials_present_is_live() {
        let creds = credentials(&full_env());
        assert_eq!(creds.mode(), Mode::Live);
        assert!(creds.missing().is_empty());
        assert_eq!(creds.present().len(), 6);
    }

    #[test]
    fn test_no_credentials_is_mock() {
        let creds = Credentials::from_lookup(|_| None);
        assert_eq!(creds.mode(), Mode::Mock);
        assert_eq!(creds.missing().len(), 6);
        assert_eq!(creds.webhook_url(), None);
    }

    #[test]
    fn test_single_empty_credential_is_mock() {
        let mut env = full_env();
        env.insert(ELEVENLABS_KEY_ENV, "");
        let creds = credentials(&env);
        assert_eq!(creds.mode(), Mode::Mock);
        assert_eq!(creds.missing(), vec![ELEVENLABS_KEY_ENV]);
    }

    #[test]
    fn test_missing_webhook_forces_mock() {
        let mut env = full_env();
        env.remove(DISCORD_WEBHOOK_URL_ENV);
        assert_eq!(credentials(&env).mode(), Mode::Mock);
    }

    #[test]
    fn test_webhook_url_is_independent_of_mode() {
        let env = HashMap::from([(DISCORD_WEBHOOK_URL_ENV, "https://discord.test/hook")]);
        let creds = credentials(&env);
        assert_eq!(creds.mode(), Mode::Mock);
        assert_eq!(creds.webhook_url(), Some("https://discord.test/hook"));
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(Mode::Live.to_string(), "live");
        assert_eq!(Mode::Mock.to_string(), "mock");
    }

    #[test]
    fn test_settings_default_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(Some(dir.path().join("absent.toml").as_path())).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.models.prompt, "o3-mini");
        assert_eq!(settings.endpoints.piapi, PIAPI_API_BASE_URL);
    }

    #[test]
    fn test_settings_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "topic = \"Cats in space\"\n\n[endpoints]\nopenai = \"http://localhost:8080/v1\"\n",
        )
        .unwrap();

        let settings = Settings::load(Some(path.as_path())).unwrap();
        assert_eq!(settings.topic.as_deref(), Some("Cats in space"));
        assert_eq!(settings.endpoints.openai, "http://localhost:8080/v1");
        assert_eq!(settings.endpoints.creatomate, CREATOMATE_API_BASE_URL);
        assert_eq!(settings.voice.voice_id, DEFAULT_VOICE_ID);
    }

    #[test]
    fn test_settings_invalid_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "topic = [unterminated").unwrap();

        let err = Settings::load(Some(path.as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_settings_toml_round_trip() {
        let settings = Settings::default();
        let text = settings.to_toml().unwrap();
        let parsed: Settings = toml::from_str(&text).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_topic_precedence() {
        let mut config = Config::new(Credentials::default(), Settings::default());
        assert_eq!(config.topic(None), DEFAULT_TOPIC);

        config.settings.topic = Some("From settings".to_string());
        assert_eq!(config.topic(None), "From settings");
        assert_eq!(config.topic(Some("From flag")), "From flag");
    }

    #[test]
    fn test_default_path_ends_with_config_toml() {
        let path = default_path();
        assert!(path.ends_with("reelsmith/config.toml"));
    }
}
