//! Subcommand handlers for the pipeline run and config actions.

use std::path::{Path, PathBuf};

use super::args::ConfigAction;
use crate::backend::Backend;
use crate::config::{default_path, Config, Settings};
use crate::pipeline::{Pipeline, PipelineError, PipelineReport};
use crate::services::{build_http_client, WebhookNotifier};

/// Run the pipeline once and print where the final video is.
pub fn run_generate(topic: Option<&str>, config_path: Option<&Path>) -> Result<(), String> {
    let config = Config::load(config_path).map_err(|e| e.to_string())?;
    let topic = config.topic(topic);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| format!("Failed to create async runtime: {}", e))?;

    let report = rt
        .block_on(generate(&config, &topic))
        .map_err(|e| e.to_string())?;

    println!("Mode: {}", report.mode);
    println!("Topic: {}", report.topic);
    println!(
        "Final video: {}",
        report.final_url().unwrap_or("(no url returned)")
    );
    Ok(())
}

/// Build the backend and notifier from `config` and run `topic` through them.
pub async fn generate(config: &Config, topic: &str) -> Result<PipelineReport, PipelineError> {
    let http_client = build_http_client()?;
    let backend = Backend::select(config, http_client.clone())?;
    let notifier = WebhookNotifier::new(
        config.credentials.webhook_url().map(str::to_string),
        http_client,
    );

    Pipeline::new(backend, notifier).run(topic).await
}

/// Handle config subcommand actions.
pub fn handle_config_action(action: ConfigAction, config_path: Option<&Path>) -> Result<(), String> {
    let path = config_path.map(PathBuf::from).unwrap_or_else(default_path);

    match action {
        ConfigAction::Show => {
            let config = Config::load(Some(path.as_path())).map_err(|e| e.to_string())?;
            let credentials = &config.credentials;

            println!("Current configuration:");
            println!("  Mode: {}", config.mode());
            println!("  Topic: {}", config.topic(None));
            println!("  Credentials set: {}", list_or_none(&credentials.present()));
            println!("  Credentials missing: {}", list_or_none(&credentials.missing()));
            println!("  OpenAI endpoint: {}", config.settings.endpoints.openai);
            println!("  PiAPI endpoint: {}", config.settings.endpoints.piapi);
            println!("  ElevenLabs endpoint: {}", config.settings.endpoints.elevenlabs);
            println!("  Creatomate endpoint: {}", config.settings.endpoints.creatomate);
            println!();

            if path.exists() {
                println!("Config file: {} (exists)", path.display());
            } else {
                println!("Config file: {} (not found)", path.display());
            }
            Ok(())
        }
        ConfigAction::Init => {
            if path.exists() {
                return Err(format!(
                    "Config file already exists: {}\nUse 'reelsmith config show' to view current settings.",
                    path.display()
                ));
            }

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| format!("Error creating config directory: {}", e))?;
            }

            std::fs::write(&path, default_settings_file()?)
                .map_err(|e| format!("Error writing config file: {}", e))?;

            println!("Created config file: {}", path.display());
            Ok(())
        }
    }
}

/// Commented settings file written by `config init`.
fn default_settings_file() -> Result<String, String> {
    let body = Settings::default().to_toml().map_err(|e| e.to_string())?;
    Ok(format!(
        "# reelsmith configuration\n\
         # API keys are read from the environment, never from this file.\n\
         \n\
         # Topic used when --topic is not given\n\
         # topic = \"How AI helps me land my dream job\"\n\
         \n\
         {}",
        body
    ))
}

fn list_or_none(names: &[&str]) -> String {
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_file_parses() {
        let text = default_settings_file().unwrap();
        let settings: Settings = toml::from_str(&text).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_config_init_writes_then_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        handle_config_action(ConfigAction::Init, Some(path.as_path())).unwrap();
        assert!(path.exists());

        let err = handle_config_action(ConfigAction::Init, Some(path.as_path())).unwrap_err();
        assert!(err.contains("already exists"));
    }

    #[test]
    fn test_list_or_none() {
        assert_eq!(list_or_none(&[]), "(none)");
        assert_eq!(list_or_none(&["A", "B"]), "A, B");
    }
}
