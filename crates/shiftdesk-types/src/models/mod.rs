//! Domain models for the Shiftdesk admin panel.
//!
//! Wire types use camelCase JSON to match the backend contract.

mod api;
mod config;
mod job;
mod phone;

pub use api::{
    ApiResponse, LoginByPhoneRequest, LoginByPhoneResponse, ValidateLoginCodeRequest,
    ValidateLoginCodeResponse,
};
pub use config::{default_headers, ApiConfig, Environment};
pub use job::{Job, JobListRequest, JobPage, JobStatus, JobTagInfo};
pub use phone::{PhoneNumber, COUNTRY_CODE, NATIONAL_DIGITS};
