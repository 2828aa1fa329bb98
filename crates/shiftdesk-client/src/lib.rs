//! # Shiftdesk Client
//!
//! Authentication and HTTP request core of the Shiftdesk admin panel.
//!
//! ```text
//! config::resolve ──► ApiClient ──► AuthFlow / JobService
//!                        ▲              │
//!                        └── TokenStore ◄┘
//! ```
//!
//! - [`config`] picks the environment and its base URL, timeout and headers.
//! - [`TokenStore`] keeps the single bearer token ([`FileTokenStore`], [`MemoryTokenStore`]).
//! - [`ApiClient`] sends JSON requests with bearer injection and a hard timeout.
//! - [`auth`] holds the phone/OTP login state machine and its async driver.
//! - [`OtpEntry`] models the code entry boxes and resend cooldown; [`Countdown`] ticks it.
//! - [`JobService`] lists, fetches and approves jobs.

pub mod auth;
mod client;
pub mod config;
mod countdown;
mod error;
mod jobs;
mod otp;
mod token_store;

pub use auth::{AuthEffect, AuthEvent, AuthFlow, AuthMachine, AuthState, PhoneSession, SessionId};
pub use client::{ApiClient, RequestOptions};
pub use countdown::Countdown;
pub use error::ClientError;
pub use jobs::{JobService, PENDING_PAGE_SIZE};
pub use otp::{EntryUpdate, OtpEntry, DEFAULT_CODE_LENGTH, RESEND_WINDOW_SECS};
pub use reqwest::Method;
pub use token_store::{get_data_dir, FileTokenStore, MemoryTokenStore, TokenStore};
