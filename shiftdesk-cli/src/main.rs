//! Shiftdesk CLI
//!
//! Terminal front end for the admin panel core:
//! - `login` / `logout` / `status` manage the stored bearer token
//! - `jobs ...` lists, shows and approves jobs
//!
//! Configuration comes from the environment (optionally a `.env` file):
//! `SHIFTDESK_ENVIRONMENT`, `SHIFTDESK_<ENV>_BASE_URL`, `SHIFTDESK_<ENV>_TIMEOUT`.

use anyhow::Result;
use clap::Parser;

mod auth_commands;
mod cli;
mod commands;
mod job_commands;
mod logging;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let _log_guard = logging::init(&cli.log_level);

    let config = shiftdesk_client::config::resolve();
    tracing::debug!(
        environment = %config.environment,
        base_url = %config.base_url,
        command = ?cli.command,
        "Shiftdesk {} starting",
        env!("CARGO_PKG_VERSION")
    );

    match cli.command {
        Commands::Login { phone } => auth_commands::login(phone).await,
        Commands::Logout => auth_commands::logout(),
        Commands::Status => commands::handle_status(),
        Commands::Config { json } => commands::handle_config(json),
        Commands::Jobs(cmd) => commands::handle_job_command(cmd).await,
    }
}
