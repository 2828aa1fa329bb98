//! Shift-work job postings and list queries.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Lifecycle status of a job, transported as its integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum JobStatus {
    Draft = 0,
    WaitingApprove = 1,
    Approved = 2,
    WaitingApplicationApprove = 3,
    ProvisionCompleted = 4,
    ProvisionFailed = 5,
    CaptureCompleted = 6,
    CaptureFailed = 7,
    PlatformTransferWaiting = 8,
    PlatformTransferCompleted = 9,
    PlatformTransferFailed = 10,
    Cancelled = 11,
}

impl JobStatus {
    pub const ALL: [JobStatus; 12] = [
        JobStatus::Draft,
        JobStatus::WaitingApprove,
        JobStatus::Approved,
        JobStatus::WaitingApplicationApprove,
        JobStatus::ProvisionCompleted,
        JobStatus::ProvisionFailed,
        JobStatus::CaptureCompleted,
        JobStatus::CaptureFailed,
        JobStatus::PlatformTransferWaiting,
        JobStatus::PlatformTransferCompleted,
        JobStatus::PlatformTransferFailed,
        JobStatus::Cancelled,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    /// Kebab-case name accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            JobStatus::Draft => "draft",
            JobStatus::WaitingApprove => "waiting-approve",
            JobStatus::Approved => "approved",
            JobStatus::WaitingApplicationApprove => "waiting-application-approve",
            JobStatus::ProvisionCompleted => "provision-completed",
            JobStatus::ProvisionFailed => "provision-failed",
            JobStatus::CaptureCompleted => "capture-completed",
            JobStatus::CaptureFailed => "capture-failed",
            JobStatus::PlatformTransferWaiting => "platform-transfer-waiting",
            JobStatus::PlatformTransferCompleted => "platform-transfer-completed",
            JobStatus::PlatformTransferFailed => "platform-transfer-failed",
            JobStatus::Cancelled => "cancelled",
        }
    }
}

impl TryFrom<u8> for JobStatus {
    type Error = ValidationError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        JobStatus::ALL
            .into_iter()
            .find(|status| status.code() == code)
            .ok_or_else(|| ValidationError::UnknownJobStatus { value: code.to_string() })
    }
}

impl From<JobStatus> for u8 {
    fn from(status: JobStatus) -> Self {
        status.code()
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for JobStatus {
    type Err = ValidationError;

    /// Accepts the kebab-case name or the numeric code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<u8>() {
            return JobStatus::try_from(code);
        }
        let normalized = trimmed.to_ascii_lowercase().replace('_', "-");
        JobStatus::ALL
            .into_iter()
            .find(|status| status.name() == normalized)
            .ok_or_else(|| ValidationError::UnknownJobStatus { value: s.to_string() })
    }
}

/// Localized tag attached to a job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobTagInfo {
    pub tag_id: String,
    pub tag_names: BTreeMap<String, String>,
}

/// A job posting as returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Job {
    pub id: String,
    pub plan_name: String,
    pub address_title: String,
    /// Job title per language code. The backend spells the key this way.
    pub job_defination_translations: BTreeMap<String, String>,
    pub personnel_need_count: u32,
    pub work_start_date: String,
    pub work_end_date: String,
    pub hourly_price: f64,
    pub tenant_name: String,
    pub application_count: u32,
    pub approved_application_count: u32,
    pub tag_ids: Vec<String>,
    pub job_tag_infos: Vec<JobTagInfo>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub distance: f64,
    pub created_time: String,
}

impl Job {
    /// Turkish title, then English, then whatever translation exists.
    pub fn title(&self) -> Option<&str> {
        let translations = &self.job_defination_translations;
        translations
            .get("tr")
            .or_else(|| translations.get("en"))
            .or_else(|| translations.values().next())
            .map(String::as_str)
    }
}

/// Paging and filtering for the job list endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JobListRequest {
    pub page_index: Option<u32>,
    pub page_size: Option<u32>,
    pub job_status: Option<JobStatus>,
}

impl JobListRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, index: u32, size: u32) -> Self {
        self.page_index = Some(index);
        self.page_size = Some(size);
        self
    }

    pub fn status(mut self, status: JobStatus) -> Self {
        self.job_status = Some(status);
        self
    }

    /// Query parameters in the order the backend documents them.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(index) = self.page_index {
            pairs.push(("PageIndex", index.to_string()));
        }
        if let Some(size) = self.page_size {
            pairs.push(("PageSize", size.to_string()));
        }
        if let Some(status) = self.job_status {
            pairs.push(("Filter.Field", "JobStatus".to_string()));
            pairs.push(("Filter.Operator", "eq".to_string()));
            pairs.push(("Filter.Value", status.code().to_string()));
        }
        pairs
    }
}

/// One page of jobs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobPage {
    pub items: Vec<Job>,
    pub index: u32,
    pub size: u32,
    pub count: u64,
    pub pages: u32,
    pub has_previous: bool,
    pub has_next: bool,
}
