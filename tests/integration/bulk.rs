//! Bulk API 2.0 query jobs through an authenticated facade.

use super::common::{authenticated, bearer};
use sfutils::bulk::JobState;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

fn job(state: &str) -> serde_json::Value {
    json!({
        "id": "750R0000000zlh9IAA",
        "operation": "query",
        "object": "Contact",
        "createdById": "005R0000000GiwjIAC",
        "createdDate": "2024-01-15T10:30:00.000+0000",
        "systemModstamp": "2024-01-15T10:30:05.000+0000",
        "state": state,
        "concurrencyMode": "Parallel",
        "contentType": "CSV",
        "apiVersion": 55.0,
        "lineEnding": "LF",
        "columnDelimiter": "COMMA"
    })
}

#[tokio::test]
async fn test_query_job_caller_driven_flow() {
    let (server, sf) = authenticated().await;

    Mock::given(method("POST"))
        .and(path("/services/data/v55.0/jobs/query"))
        .and(header("Authorization", bearer().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(job("UploadComplete")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/services/data/v55.0/jobs/query/750R0000000zlh9IAA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(job("InProgress")))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/services/data/v55.0/jobs/query/750R0000000zlh9IAA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(job("JobComplete")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/services/data/v55.0/jobs/query/750R0000000zlh9IAA/results"))
        .and(query_param("locator", "MTAwMDA"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Sforce-Locator", "null")
                .insert_header("Sforce-NumberOfRecords", "1")
                .set_body_string("\"Id\"\n\"003c\"\n"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/services/data/v55.0/jobs/query/750R0000000zlh9IAA/results"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Sforce-Locator", "MTAwMDA")
                .insert_header("Sforce-NumberOfRecords", "2")
                .set_body_string("\"Id\"\n\"003a\"\n\"003b\"\n"),
        )
        .mount(&server)
        .await;

    let bulk = sf.bulk();
    let created = bulk.create_query_job("SELECT Id FROM Contact").await.unwrap();
    assert_eq!(created.state, JobState::UploadComplete);

    let mut polls = 0;
    let finished = loop {
        polls += 1;
        let status = bulk.get_job_status(&created.id).await.unwrap();
        if status.state.is_terminal() {
            break status;
        }
    };
    assert_eq!(polls, 2);
    assert!(finished.state.is_success());

    let mut locator: Option<String> = None;
    let mut total = 0;
    let mut pages = 0;
    loop {
        let page = bulk.get_job_results(&created.id, locator.as_deref()).await.unwrap();
        total += page.record_count;
        pages += 1;
        match page.next_locator {
            Some(next) => locator = Some(next),
            None => break,
        }
    }
    assert_eq!(pages, 2);
    assert_eq!(total, 3);
}

#[tokio::test]
async fn test_list_jobs() {
    let (server, sf) = authenticated().await;
    Mock::given(method("GET"))
        .and(path("/services/data/v55.0/jobs/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "done": true,
            "records": [job("JobComplete"), job("Aborted")],
            "nextRecordsUrl": null
        })))
        .mount(&server)
        .await;

    let list = sf.bulk().list_jobs().await.unwrap();
    assert!(list.done);
    assert_eq!(list.records.len(), 2);
    assert_eq!(list.records[1].state, JobState::Aborted);
}
