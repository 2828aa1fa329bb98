//! Job listing, lookup and status changes. Every call is authenticated.

use serde_json::Value;
use shiftdesk_types::{ApiResponse, Job, JobListRequest, JobPage, JobStatus};

use crate::client::{ApiClient, RequestOptions};
use crate::error::ClientError;

const JOBS_PATH: &str = "/application/jobs";

/// Page size of the approval queue.
pub const PENDING_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone)]
pub struct JobService {
    client: ApiClient,
}

impl JobService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, request: &JobListRequest) -> Result<ApiResponse<JobPage>, ClientError> {
        let path = list_path(request);
        tracing::debug!(%path, "Listing jobs");
        self.client.get(&path, RequestOptions::new()).await
    }

    /// First page of jobs waiting for approval.
    pub async fn pending(&self, page_size: u32) -> Result<ApiResponse<JobPage>, ClientError> {
        let request = JobListRequest::new().page(0, page_size).status(JobStatus::WaitingApprove);
        self.list(&request).await
    }

    pub async fn get(&self, id: &str) -> Result<ApiResponse<Job>, ClientError> {
        self.client.get(&job_path(id), RequestOptions::new()).await
    }

    /// `PATCH /application/jobs/{id}/{code}` with no body.
    pub async fn update_status(
        &self,
        id: &str,
        status: JobStatus,
    ) -> Result<ApiResponse<Value>, ClientError> {
        let path = format!("{}/{}", job_path(id), status.code());
        let response = self.client.patch::<(), _>(&path, None, RequestOptions::new()).await?;
        tracing::info!(job = id, status = %status, "Job status updated");
        Ok(response)
    }

    pub async fn approve(&self, id: &str) -> Result<ApiResponse<Value>, ClientError> {
        self.update_status(id, JobStatus::Approved).await
    }
}

fn job_path(id: &str) -> String {
    format!("{}/{}", JOBS_PATH, urlencoding::encode(id))
}

fn list_path(request: &JobListRequest) -> String {
    let pairs = request.query_pairs();
    if pairs.is_empty() {
        return format!("{}/list", JOBS_PATH);
    }
    let query = url::form_urlencoded::Serializer::new(String::new()).extend_pairs(pairs).finish();
    format!("{}/list?{}", JOBS_PATH, query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_path_without_query() {
        assert_eq!(list_path(&JobListRequest::new()), "/application/jobs/list");
    }

    #[test]
    fn test_list_path_with_paging_and_filter() {
        let request = JobListRequest::new().page(2, 25).status(JobStatus::WaitingApprove);
        assert_eq!(
            list_path(&request),
            "/application/jobs/list?PageIndex=2&PageSize=25\
             &Filter.Field=JobStatus&Filter.Operator=eq&Filter.Value=1"
        );
    }

    #[test]
    fn test_job_path_encodes_segment() {
        assert_eq!(job_path("a/b c"), "/application/jobs/a%2Fb%20c");
    }
}
