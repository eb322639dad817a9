use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;

mod cli;
mod console;
mod logging;

use cli::{Cli, Commands};
use gurucore::{build_registry, Config, IncomingMessage};

/// Main entry point
///
/// Parses CLI arguments, loads configuration and dispatches to the
/// selected subcommand.
///
/// # Errors
/// Returns an error if initialization fails (logging, store connection,
/// HTTP client).
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Load environment variables from .env if present
    let _ = dotenv();

    let config = Config::from_env();
    logging::init_logger(&config, cli.verbose)?;
    logging::log_configuration(&config);

    let registry = Arc::new(build_registry(&config).await?);

    match cli.command {
        Some(Commands::Say { user, text }) => {
            console::say(&registry, IncomingMessage::new(user, text.join(" "))).await;
            Ok(())
        }
        Some(Commands::Scripts) => {
            for line in registry.help() {
                println!("{}", line);
            }
            Ok(())
        }
        Some(Commands::Shell { user }) => console::run_shell(registry, user).await,
        None => console::run_shell(registry, "shell".to_string()).await,
    }
}
