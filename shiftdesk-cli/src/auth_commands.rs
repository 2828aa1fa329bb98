use anyhow::{Context, Result};
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use shiftdesk_client::{AuthFlow, ClientError, Countdown, TokenStore};

use crate::commands::{api_client, error_line, token_store};

type InputLines = Lines<BufReader<Stdin>>;

enum CodeStep {
    SignedIn,
    Back,
}

pub async fn login(phone: Option<String>) -> Result<()> {
    let mut flow = AuthFlow::new(api_client()?);
    tracing::debug!(state = flow.state().name(), "Interactive login");
    if flow.is_authenticated() {
        println!("{}", "Already signed in. Run `shiftdesk logout` first.".yellow());
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut phone = phone;

    loop {
        let input = match phone.take() {
            Some(p) => p,
            None => prompt(&mut lines, "Phone number: ").await?,
        };

        println!("{}", "Sending verification code...".cyan());
        if let Err(e) = flow.submit_phone(&input).await {
            eprintln!("{} {}", "✗".red(), error_line(&e));
            continue;
        }

        match code_step(&mut flow, &mut lines).await? {
            CodeStep::SignedIn => {
                println!("{} Signed in", "✓".green());
                return Ok(());
            }
            CodeStep::Back => continue,
        }
    }
}

async fn code_step(flow: &mut AuthFlow, lines: &mut InputLines) -> Result<CodeStep> {
    if let Some(session) = flow.session() {
        println!(
            "Code sent to {}. Resend available in {}.",
            session.phone.grouped().green(),
            session.entry.remaining_label()
        );
    }
    println!("Type the code, 'r' to resend or 'b' to change the number.");

    // Dropped on every return path, which stops the ticker.
    let mut countdown = Countdown::every_second();

    loop {
        tokio::select! {
            _ = countdown.tick() => {
                if flow.tick() {
                    println!("{}", "You can request a new code now ('r').".cyan());
                }
            }
            line = lines.next_line() => {
                let line = line.context("Failed to read input")?.context("Input closed")?;
                match line.trim() {
                    "" => {}
                    "b" => {
                        flow.back();
                        return Ok(CodeStep::Back);
                    }
                    "r" => resend(flow).await,
                    text => {
                        if let Some(step) = enter_code(flow, text).await {
                            return Ok(step);
                        }
                    }
                }
            }
        }
    }
}

async fn resend(flow: &mut AuthFlow) {
    match flow.resend_code().await {
        Ok(true) => println!("{} New code sent", "✓".green()),
        Ok(false) => {
            let remaining = flow.session().map(|s| s.entry.remaining_label()).unwrap_or_default();
            println!("{}", format!("Resend available in {}.", remaining).yellow());
        }
        Err(e) => eprintln!("{} {}", "✗".red(), error_line(&e)),
    }
}

/// Paste `text` into the entry and verify it.
///
/// `None` keeps the user on the code step.
async fn enter_code(flow: &mut AuthFlow, text: &str) -> Option<CodeStep> {
    let result = match flow.paste_code(text).await {
        Ok(update) if update.submit.is_some() => Ok(()),
        Ok(_) => flow.submit_entry().await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) if flow.is_authenticated() => return Some(CodeStep::SignedIn),
        Ok(()) => {}
        Err(ClientError::InvalidCode) => {
            eprintln!("{} Code rejected. Check the SMS and try again.", "✗".red());
        }
        Err(e) => eprintln!("{} {}", "✗".red(), error_line(&e)),
    }

    // The flow left the code step (e.g. the token could not be saved).
    flow.session().is_none().then_some(CodeStep::Back)
}

async fn prompt(lines: &mut InputLines, label: &str) -> Result<String> {
    use std::io::Write;

    print!("{}", label);
    std::io::stdout().flush().context("Failed to write prompt")?;
    lines.next_line().await.context("Failed to read input")?.context("Input closed")
}

pub fn logout() -> Result<()> {
    let store = token_store()?;
    let mut flow = AuthFlow::new(api_client()?);
    flow.logout();

    if store.has_token() {
        anyhow::bail!("Token file could not be removed: {}", store.path().display());
    }
    println!("{} Signed out", "✓".green());
    Ok(())
}
