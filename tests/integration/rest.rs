//! REST operations through an authenticated facade.

use super::common::{authenticated, bearer};
use sfutils::rest::{CompositeItem, ErrorKind, QueryPage, RawRecord};
use serde::Deserialize;
use serde_json::json;
use wiremock::matchers::{body_json, body_string, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[derive(Debug, Deserialize)]
struct Account {
    #[serde(rename = "Id")]
    id: String,
    #[serde(rename = "Name")]
    name: String,
}

#[tokio::test]
async fn test_record_lifecycle() {
    let (server, sf) = authenticated().await;
    let body = r#"{"Name":"Lifecycle Test","Industry":"Technology"}"#;

    Mock::given(method("POST"))
        .and(path("/services/data/v55.0/sobjects/Account"))
        .and(header("Authorization", bearer().as_str()))
        .and(body_string(body))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "001xx000003DGb2AAG", "success": true, "errors": []
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/services/data/v55.0/sobjects/Account/001xx000003DGb2AAG"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/services/data/v55.0/sobjects/Account/001xx000003DGb2AAG"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let rest = sf.rest();
    let created = rest
        .create("Account", &RawRecord::from_json(body).unwrap())
        .await
        .unwrap();
    let id = created.id.unwrap();

    rest.update("Account", &id, &RawRecord::from_json(r#"{"Name":"Renamed"}"#).unwrap())
        .await
        .unwrap();
    rest.delete("Account", &id).await.unwrap();
}

#[tokio::test]
async fn test_query_then_follow_cursor() {
    let (server, sf) = authenticated().await;

    Mock::given(method("GET"))
        .and(path("/services/data/v55.0/query"))
        .and(query_param("q", "SELECT Id, Name FROM Account"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalSize": 2,
            "done": false,
            "nextRecordsUrl": "/services/data/v55.0/query/01gxx-1",
            "records": [{"attributes": {"type": "Account"}, "Id": "001a", "Name": "A"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/services/data/v55.0/query/01gxx-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalSize": 2,
            "done": true,
            "records": [{"attributes": {"type": "Account"}, "Id": "001b", "Name": "B"}]
        })))
        .mount(&server)
        .await;

    let first: QueryPage = sf.rest().query("SELECT Id, Name FROM Account").await.unwrap();
    assert_eq!(first.total_size, 2);
    assert!(!first.done);

    let second: QueryPage = sf
        .rest()
        .query_next(first.next_records_url.as_deref().unwrap())
        .await
        .unwrap();
    assert!(second.done);

    let account: Account = second.records[0].parse().unwrap();
    assert_eq!(account.id, "001b");
    assert_eq!(account.name, "B");
}

#[tokio::test]
async fn test_collections_round_trip_three_records() {
    let (server, sf) = authenticated().await;

    Mock::given(method("POST"))
        .and(path("/services/data/v55.0/composite/sobjects"))
        .and(header("Authorization", bearer().as_str()))
        .and(body_json(json!({
            "allOrNone": true,
            "records": [
                {"attributes": {"type": "Contact"}, "LastName": "One"},
                {"attributes": {"type": "Contact"}, "LastName": "Two"},
                {"attributes": {"type": "Contact"}, "LastName": "Three"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "003a", "success": true, "errors": []},
            {"id": "003b", "success": true, "errors": []},
            {"id": "003c", "success": true, "errors": []}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let records: Vec<RawRecord> = ["One", "Two", "Three"]
        .iter()
        .map(|name| {
            RawRecord::from_json(format!(
                r#"{{"attributes":{{"type":"Contact"}},"LastName":"{name}"}}"#
            ))
            .unwrap()
        })
        .collect();

    let results = sf.rest().collections_create(&records).await.unwrap();
    let ids: Vec<_> = results.iter().filter_map(|r| r.id.as_deref()).collect();
    assert_eq!(ids, vec!["003a", "003b", "003c"]);
}

#[tokio::test]
async fn test_collections_failure_on_second_item() {
    let (server, sf) = authenticated().await;

    Mock::given(method("DELETE"))
        .and(path("/services/data/v55.0/composite/sobjects"))
        .and(query_param("ids", "003a,003b,003c"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "003a", "success": true, "errors": []},
            {"id": "003b", "success": false, "errors": [
                {"statusCode": "ENTITY_IS_DELETED", "message": "entity is deleted", "fields": []}
            ]},
            {"id": "003c", "success": true, "errors": []}
        ])))
        .mount(&server)
        .await;

    let err = sf
        .rest()
        .collections_delete(&["003a", "003b", "003c"])
        .await
        .unwrap_err();

    match &err.kind {
        ErrorKind::BatchPartialFailure { results, first_failure } => {
            assert_eq!(*first_failure, 1);
            assert_eq!(results.len(), 3);
            assert_eq!(results[1].errors[0].status_code, "ENTITY_IS_DELETED");
        }
        other => panic!("unexpected error kind: {other:?}"),
    }
    assert!(err.to_string().contains("ENTITY_IS_DELETED"));
}

#[tokio::test]
async fn test_collections_invalid_size_sends_nothing() {
    let (server, sf) = authenticated().await;
    Mock::given(method("POST"))
        .and(path("/services/data/v55.0/composite/sobjects"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let records: Vec<RawRecord> = (0..201)
        .map(|i| RawRecord::from_value(&json!({"attributes": {"type": "Account"}, "Name": i})).unwrap())
        .collect();
    let err = sf.rest().collections_create(&records).await.unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidBatchSize { size: 201, max: 200 }));
}

#[tokio::test]
async fn test_composite_upsert_correlates_by_reference_id() {
    let (server, sf) = authenticated().await;

    Mock::given(method("POST"))
        .and(path("/services/data/v55.0/composite"))
        .and(body_json(json!({
            "allOrNone": true,
            "compositeRequest": [
                {"body": {"LastName": "New"}, "method": "POST", "referenceId": "newContact",
                 "url": "/services/data/v55.0/sobjects/Contact"},
                {"body": {"LastName": "Existing"}, "method": "PATCH", "referenceId": "oldContact",
                 "url": "/services/data/v55.0/sobjects/Contact/003old"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "compositeResponse": [
                {"body": null, "httpHeaders": {}, "httpStatusCode": 204, "referenceId": "oldContact"},
                {"body": {"id": "003new", "success": true, "errors": []},
                 "httpHeaders": {"Location": "/services/data/v55.0/sobjects/Contact/003new"},
                 "httpStatusCode": 201, "referenceId": "newContact"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let items = vec![
        CompositeItem::new(
            "newContact",
            "Contact",
            RawRecord::from_json(r#"{"LastName":"New"}"#).unwrap(),
        ),
        CompositeItem::existing(
            "oldContact",
            "Contact",
            "003old",
            Some(RawRecord::from_json(r#"{"LastName":"Existing"}"#).unwrap()),
        ),
    ];

    let outcome = sf.rest().composite_upsert(&items).await.unwrap();
    assert!(outcome.all_succeeded());

    let pairs = outcome.correlate(&items);
    assert_eq!(pairs[0].1.unwrap().id(), Some("003new"));
    assert_eq!(pairs[1].1.unwrap().http_status_code, 204);
}

#[tokio::test]
async fn test_unauthorized_is_detectable() {
    let (server, sf) = authenticated().await;
    Mock::given(method("GET"))
        .and(path("/services/data/v55.0/sobjects/Account/describe"))
        .respond_with(ResponseTemplate::new(401).set_body_string(
            r#"[{"message":"Session expired or invalid","errorCode":"INVALID_SESSION_ID"}]"#,
        ))
        .mount(&server)
        .await;

    let err = sf.rest().describe("Account").await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.status(), Some(401));
}
