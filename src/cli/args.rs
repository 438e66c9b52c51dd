//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Turn a topic into a short-form video using hosted AI services
#[derive(Parser, Debug)]
#[command(name = "reelsmith")]
#[command(version, about = "Generate a short-form video from a topic", long_about = None)]
#[command(after_help = "ENVIRONMENT:
    OPENAI_API_KEY, PIAPI_KEY, ELEVENLABS_KEY, CREATOMATE_KEY,
    CREATOMATE_TEMPLATE_ID, DISCORD_WEBHOOK_URL

    If any of these is unset the run is mocked: no paid API is called.
    Values are also read from a .env file in the working directory.")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Topic to build the video around (default: settings file, then built-in)
    #[arg(long, short)]
    pub topic: Option<String>,

    /// Settings file path
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["reelsmith"]);
        assert!(args.topic.is_none());
        assert!(args.config.is_none());
        assert!(args.command.is_none());
    }

    #[test]
    fn test_args_topic() {
        let args = Args::parse_from(["reelsmith", "--topic", "Cats in space"]);
        assert_eq!(args.topic.as_deref(), Some("Cats in space"));

        let args = Args::parse_from(["reelsmith", "-t", "Dogs"]);
        assert_eq!(args.topic.as_deref(), Some("Dogs"));
    }

    #[test]
    fn test_args_config_path() {
        let args = Args::parse_from(["reelsmith", "--config", "/tmp/reelsmith.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/reelsmith.toml")));
    }

    #[test]
    fn test_config_subcommands() {
        let args = Args::parse_from(["reelsmith", "config", "show"]);
        assert!(matches!(
            args.command,
            Some(Command::Config {
                action: ConfigAction::Show
            })
        ));

        let args = Args::parse_from(["reelsmith", "config", "init"]);
        assert!(matches!(
            args.command,
            Some(Command::Config {
                action: ConfigAction::Init
            })
        ));
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        assert!(Args::try_parse_from(["reelsmith", "--camera", "0"]).is_err());
    }
}
