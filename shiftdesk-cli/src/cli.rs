use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "shiftdesk",
    about = "Shiftdesk admin panel - phone login and job approval",
    version = env!("CARGO_PKG_VERSION"),
    author,
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(about = "Sign in with a phone number and a one-time code")]
    Login {
        #[arg(short, long, help = "Phone number, e.g. 0555 123 45 67")]
        phone: Option<String>,
    },

    #[command(about = "Forget the stored token")]
    Logout,

    #[command(about = "Show environment and sign-in status")]
    Status,

    #[command(about = "Show the resolved API configuration")]
    Config {
        #[arg(short, long, help = "Output as JSON")]
        json: bool,
    },

    #[command(subcommand, about = "Browse and approve jobs")]
    Jobs(JobCommands),
}

#[derive(Debug, Subcommand)]
pub enum JobCommands {
    #[command(about = "List jobs, optionally filtered by status")]
    List {
        #[arg(short, long, help = "Status name or code (e.g. 'approved', 'waiting-approve', '2')")]
        status: Option<String>,

        #[arg(long, default_value = "0", help = "Zero-based page index")]
        page: u32,

        #[arg(long, default_value = "20", help = "Jobs per page")]
        size: u32,

        #[arg(short, long, help = "Output as JSON")]
        json: bool,
    },

    #[command(about = "List jobs waiting for approval")]
    Pending {
        #[arg(short, long, help = "Output as JSON")]
        json: bool,
    },

    #[command(about = "Show one job")]
    Show {
        #[arg(help = "Job ID")]
        id: String,

        #[arg(short, long, help = "Output as JSON")]
        json: bool,
    },

    #[command(about = "Approve a job")]
    Approve {
        #[arg(help = "Job ID")]
        id: String,
    },

    #[command(about = "Set a job's status")]
    SetStatus {
        #[arg(help = "Job ID")]
        id: String,

        #[arg(help = "Status name or code")]
        status: String,
    },
}
