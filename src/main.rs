use clap::Parser;

use reelsmith::cli::{handle_config_action, run_generate, Args, Command};

/// Load .env file and install the logger.
///
/// Variables already set in the environment are not overridden.
/// Log level defaults to `info` and follows `RUST_LOG` when set.
fn init() {
    // dotenv::dotenv() returns Err if .env doesn't exist, which is fine
    let _ = dotenv::dotenv();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

fn main() {
    init();

    let args = Args::parse();

    let result = match args.command {
        Some(Command::Config { action }) => handle_config_action(action, args.config.as_deref()),
        None => run_generate(args.topic.as_deref(), args.config.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
