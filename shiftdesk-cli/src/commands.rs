use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;

use shiftdesk_client::{config, ApiClient, ClientError, FileTokenStore, TokenStore};

use crate::cli::JobCommands;
use crate::job_commands;

pub fn token_store() -> Result<FileTokenStore> {
    FileTokenStore::open_default().context("Failed to locate the data directory")
}

pub fn api_client() -> Result<ApiClient> {
    let store = token_store()?;
    ApiClient::new(config::resolve().clone(), Arc::new(store))
        .context("Failed to build the HTTP client")
}

/// One-line message for a client error, with a hint when retrying can help.
pub fn error_line(err: &ClientError) -> String {
    if err.status() == Some(401) {
        return "Not signed in or session expired. Run `shiftdesk login`.".to_string();
    }
    if err.is_retryable() {
        return format!("{} (try again in a moment)", err.user_message());
    }
    err.user_message()
}

/// Turn a client error into the message shown to the user.
pub fn describe(err: ClientError) -> anyhow::Error {
    tracing::debug!(error = ?err, "Request failed");
    anyhow::anyhow!(error_line(&err))
}

pub async fn handle_job_command(cmd: JobCommands) -> Result<()> {
    let client = api_client()?;
    if !client.token_store().has_token() {
        eprintln!("{}", "Not signed in; the request will be sent without a token.".yellow());
    }

    match cmd {
        JobCommands::List { status, page, size, json } => {
            job_commands::list_jobs(client, status.as_deref(), page, size, json).await
        }
        JobCommands::Pending { json } => job_commands::pending_jobs(client, json).await,
        JobCommands::Show { id, json } => job_commands::show_job(client, &id, json).await,
        JobCommands::Approve { id } => job_commands::approve_job(client, &id).await,
        JobCommands::SetStatus { id, status } => {
            job_commands::set_job_status(client, &id, &status).await
        }
    }
}

pub fn handle_status() -> Result<()> {
    let config = config::resolve();
    let store = token_store()?;

    println!("{}", "Shiftdesk Status".cyan().bold());
    println!("  Environment: {}", config.environment);
    println!("  API: {}", config.base_url);
    if store.has_token() {
        println!("  Signed in: {}", "yes".green());
    } else {
        println!("  Signed in: {}", "no".yellow());
    }
    println!("  Token file: {}", store.path().display());
    println!("  Version: {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}

pub fn handle_config(json: bool) -> Result<()> {
    let config = config::resolve();

    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
    } else {
        println!("{}", "API Configuration:".cyan().bold());
        println!("  Environment: {}", config.environment);
        println!("  Base URL: {}", config.base_url);
        println!("  Timeout: {} ms", config.timeout_ms);
        for (name, value) in &config.default_headers {
            println!("  Header {}: {}", name, value);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_line_hints_retry_for_transient_failures() {
        let line = error_line(&ClientError::Timeout { timeout_ms: 30_000 });
        assert_eq!(line, "Request timed out after 30000 ms (try again in a moment)");

        let line = error_line(&ClientError::Http { status: 503, message: "Bakimda".to_string() });
        assert_eq!(line, "Bakimda (try again in a moment)");
    }

    #[test]
    fn test_error_line_without_hint() {
        assert_eq!(
            error_line(&ClientError::InvalidCode),
            "Verification code is incorrect."
        );
        assert_eq!(
            error_line(&ClientError::Http { status: 409, message: "Already approved".to_string() }),
            "Already approved"
        );
        assert!(error_line(&ClientError::Http { status: 401, message: String::new() })
            .contains("shiftdesk login"));
    }
}
