//! # Shiftdesk Types
//!
//! Core types, models, and error definitions for the Shiftdesk admin panel.
//!
//! - **`error`** - Typed errors for local validation and configuration
//! - **`models`** - Backend envelope, auth payloads, jobs, phone numbers, API config
//!
//! ## Architecture Role
//!
//! `shiftdesk-types` sits at the bottom of the dependency graph:
//!
//! ```text
//!        shiftdesk-types (this crate)
//!                │
//!                ▼
//!        shiftdesk-client
//!                │
//!                ▼
//!          shiftdesk-cli
//! ```
//!
//! Nothing in here performs I/O.

pub mod error;
pub mod models;

pub use error::{ConfigError, ValidationError};

pub use models::{
    ApiConfig, ApiResponse, Environment, Job, JobListRequest, JobPage, JobStatus, JobTagInfo,
    LoginByPhoneRequest, LoginByPhoneResponse, PhoneNumber, ValidateLoginCodeRequest,
    ValidateLoginCodeResponse,
};
