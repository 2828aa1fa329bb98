#![allow(unused_crate_dependencies)]
#![allow(clippy::tests_outside_test_module, reason = "integration tests live in tests/ dir")]
#![allow(clippy::expect_used, reason = "integration test, panics are the assertion mechanism")]

use std::sync::Arc;

use serde_json::json;
use shiftdesk_client::{ApiClient, ClientError, JobService, MemoryTokenStore, PENDING_PAGE_SIZE};
use shiftdesk_types::{ApiConfig, Environment, JobListRequest, JobStatus};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service_for(server: &MockServer) -> JobService {
    let config = ApiConfig::new(Environment::Test, server.uri(), 5_000);
    let client = ApiClient::new(config, Arc::new(MemoryTokenStore::with_token("tok_abc")))
        .expect("client builds");
    JobService::new(client)
}

fn job_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "planName": "Weekend",
        "addressTitle": "Kadikoy Depot",
        "jobDefinationTranslations": {"en": "Picker", "tr": "Toplayici"},
        "personnelNeedCount": 4,
        "workStartDate": "2026-10-20T08:00:00",
        "workEndDate": "2026-10-20T16:00:00",
        "hourlyPrice": 185.5,
        "tenantName": "Acme Lojistik",
        "applicationCount": 7,
        "approvedApplicationCount": 2,
        "tagIds": ["t1"],
        "jobTagInfos": [{"tagId": "t1", "tagNames": {"tr": "Depo"}}],
        "distance": 0.0,
        "createdTime": "2026-10-18T09:30:00"
    })
}

#[tokio::test]
async fn test_list_sends_paging_and_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/application/jobs/list"))
        .and(query_param("PageIndex", "1"))
        .and(query_param("PageSize", "20"))
        .and(query_param("Filter.Field", "JobStatus"))
        .and(query_param("Filter.Operator", "eq"))
        .and(query_param("Filter.Value", "2"))
        .and(header("authorization", "Bearer tok_abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "items": [job_json("j-1")],
                "index": 1, "size": 20, "count": 21, "pages": 2,
                "hasPrevious": true, "hasNext": false
            },
            "success": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = JobListRequest::new().page(1, 20).status(JobStatus::Approved);
    let page = service_for(&server).list(&request).await.expect("list").into_data();

    assert_eq!(page.count, 21);
    assert!(page.has_previous);
    let job = &page.items[0];
    assert_eq!(job.title(), Some("Toplayici"));
    assert_eq!(job.personnel_need_count, 4);
    assert_eq!(job.job_tag_infos[0].tag_names.get("tr").map(String::as_str), Some("Depo"));
}

#[tokio::test]
async fn test_pending_queries_waiting_approve() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/application/jobs/list"))
        .and(query_param("PageIndex", "0"))
        .and(query_param("PageSize", PENDING_PAGE_SIZE.to_string()))
        .and(query_param("Filter.Value", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"items": []}})))
        .expect(1)
        .mount(&server)
        .await;

    let page = service_for(&server).pending(PENDING_PAGE_SIZE).await.expect("pending").data;
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn test_get_encodes_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/application/jobs/j%201"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": job_json("j 1")})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let job = service_for(&server).get("j 1").await.expect("get").into_data();
    assert_eq!(job.id, "j 1");
    assert_eq!(job.hourly_price, 185.5);
}

#[tokio::test]
async fn test_approve_patches_status_code() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/application/jobs/j-1/2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": true, "success": true})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/application/jobs/j-1/11"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({"message": "Already approved"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let resp = service.approve("j-1").await.expect("approve");
    assert!(resp.success);

    let err = service.update_status("j-1", JobStatus::Cancelled).await.expect_err("conflict");
    assert_eq!(err, ClientError::Http { status: 409, message: "Already approved".to_string() });
}
