//! Composite API types.
//!
//! A composite call bundles up to [`MAX_COMPOSITE_SIZE`] record operations into
//! one all-or-none POST. Subresponses are matched to subrequests by
//! `referenceId`; their order is not guaranteed to follow the request.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use sfutils_client::{RequestMethod, UrlBuilder};

use crate::collections::validate_batch_size;
use crate::error::{Error, ErrorKind, Result};
use crate::record::RawRecord;
use crate::sobject::{ObjectResult, SalesforceError};

/// Platform ceiling for subrequests in one composite call.
pub const MAX_COMPOSITE_SIZE: usize = 25;

/// One record operation in a composite batch.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeItem {
    /// Caller-chosen key, unique within the batch.
    pub reference_id: String,
    /// SObject type, e.g. `"Account"`.
    pub sobject: String,
    /// Existing record id. Required for update and delete.
    pub id: Option<String>,
    /// Request body. Ignored for delete.
    pub body: Option<RawRecord>,
}

impl CompositeItem {
    /// An item for a new record.
    pub fn new(reference_id: impl Into<String>, sobject: impl Into<String>, body: RawRecord) -> Self {
        Self {
            reference_id: reference_id.into(),
            sobject: sobject.into(),
            id: None,
            body: Some(body),
        }
    }

    /// An item addressing an existing record.
    pub fn existing(
        reference_id: impl Into<String>,
        sobject: impl Into<String>,
        id: impl Into<String>,
        body: Option<RawRecord>,
    ) -> Self {
        Self {
            reference_id: reference_id.into(),
            sobject: sobject.into(),
            id: Some(id.into()),
            body,
        }
    }

    fn record_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

/// How every item in a composite batch is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeOperation {
    /// POST to the type endpoint.
    Create,
    /// PATCH to the record endpoint; every item needs an id.
    Update,
    /// PATCH when the item has an id, POST otherwise.
    Upsert,
    /// DELETE to the record endpoint, no body; every item needs an id.
    Delete,
}

/// Composite request envelope.
#[derive(Debug, Clone, Serialize)]
pub struct CompositeRequest {
    #[serde(rename = "allOrNone")]
    all_or_none: bool,
    #[serde(rename = "compositeRequest")]
    composite_request: Vec<CompositeSubrequest>,
}

impl CompositeRequest {
    /// Validate `items` and turn them into an all-or-none composite request.
    ///
    /// Fails locally, without any network traffic, when the batch is empty or
    /// larger than [`MAX_COMPOSITE_SIZE`], when a reference id repeats, or
    /// when an update or delete item has no id.
    pub fn build(urls: &UrlBuilder, operation: CompositeOperation, items: &[CompositeItem]) -> Result<Self> {
        validate_batch_size(items.len(), MAX_COMPOSITE_SIZE)?;

        let mut seen = HashSet::with_capacity(items.len());
        let mut subrequests = Vec::with_capacity(items.len());

        for item in items {
            if !seen.insert(item.reference_id.as_str()) {
                return Err(Error::new(ErrorKind::DuplicateReferenceId(
                    item.reference_id.clone(),
                )));
            }
            subrequests.push(CompositeSubrequest::for_item(urls, operation, item)?);
        }

        Ok(Self {
            all_or_none: true,
            composite_request: subrequests,
        })
    }

    /// The subrequests, in input order.
    pub fn subrequests(&self) -> &[CompositeSubrequest] {
        &self.composite_request
    }

    /// Reference ids of every subrequest, in input order.
    pub fn reference_ids(&self) -> impl Iterator<Item = &str> {
        self.composite_request.iter().map(|s| s.reference_id.as_str())
    }
}

/// One subrequest inside a [`CompositeRequest`].
#[derive(Debug, Clone, Serialize)]
pub struct CompositeSubrequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<RawRecord>,
    pub method: &'static str,
    #[serde(rename = "referenceId")]
    pub reference_id: String,
    pub url: String,
}

impl CompositeSubrequest {
    fn for_item(urls: &UrlBuilder, operation: CompositeOperation, item: &CompositeItem) -> Result<Self> {
        let missing_id = || {
            Error::new(ErrorKind::MissingRecordId {
                reference_id: item.reference_id.clone(),
            })
        };

        let (method, url, body) = match (operation, item.record_id()) {
            (CompositeOperation::Create, _) | (CompositeOperation::Upsert, None) => (
                RequestMethod::Post,
                urls.type_path(&item.sobject),
                item.body.clone(),
            ),
            (CompositeOperation::Update, Some(id)) | (CompositeOperation::Upsert, Some(id)) => (
                RequestMethod::Patch,
                urls.object_path(&item.sobject, id),
                item.body.clone(),
            ),
            (CompositeOperation::Delete, Some(id)) => {
                (RequestMethod::Delete, urls.object_path(&item.sobject, id), None)
            }
            (CompositeOperation::Update, None) | (CompositeOperation::Delete, None) => {
                return Err(missing_id())
            }
        };

        Ok(Self {
            body,
            method: method.as_str(),
            reference_id: item.reference_id.clone(),
            url,
        })
    }
}

/// Composite response envelope.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CompositeResponse {
    #[serde(rename = "compositeResponse")]
    pub composite_response: Vec<CompositeSubresponse>,
}

/// Body of one subresponse.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SubresponseBody {
    /// `{id, success, errors}` from record create.
    Record(ObjectResult),
    /// Error list from a failed subrequest.
    Errors(Vec<SalesforceError>),
    /// Anything else the platform returned.
    Other(serde_json::Value),
}

/// Result of one subrequest.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CompositeSubresponse {
    /// `null` for PATCH and DELETE subrequests that succeeded.
    #[serde(default)]
    pub body: Option<SubresponseBody>,
    #[serde(rename = "httpStatusCode")]
    pub http_status_code: u16,
    #[serde(rename = "referenceId")]
    pub reference_id: String,
}

impl CompositeSubresponse {
    /// True for a 2xx status whose body reports no failure.
    pub fn is_success(&self) -> bool {
        if !(200..300).contains(&self.http_status_code) {
            return false;
        }
        match &self.body {
            Some(SubresponseBody::Record(result)) => !result.is_failure(),
            Some(SubresponseBody::Errors(errors)) => errors.is_empty(),
            _ => true,
        }
    }

    /// The record id reported by a create subrequest.
    pub fn id(&self) -> Option<&str> {
        match &self.body {
            Some(SubresponseBody::Record(result)) => result.id.as_deref(),
            _ => None,
        }
    }

    /// Errors attached to this subresponse.
    pub fn errors(&self) -> &[SalesforceError] {
        match &self.body {
            Some(SubresponseBody::Record(result)) => &result.errors,
            Some(SubresponseBody::Errors(errors)) => errors,
            _ => &[],
        }
    }
}

/// Every subresponse of one composite call.
///
/// The call itself succeeds whenever the platform answered HTTP 200; whether
/// each subrequest succeeded is reported here. A reference id that was sent
/// but never answered counts as failed. Use [`all_succeeded`](Self::all_succeeded)
/// or [`into_result`](Self::into_result) to apply an all-or-none policy.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeOutcome {
    responses: Vec<CompositeSubresponse>,
    index: HashMap<String, usize>,
    missing: Vec<String>,
}

impl CompositeOutcome {
    /// Match `responses` against the reference ids that were sent.
    pub(crate) fn new<I>(sent: I, responses: Vec<CompositeSubresponse>) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let index: HashMap<String, usize> = responses
            .iter()
            .enumerate()
            .map(|(i, r)| (r.reference_id.clone(), i))
            .collect();
        let missing: Vec<String> = sent
            .into_iter()
            .map(Into::<String>::into)
            .filter(|id| !index.contains_key(id))
            .collect();
        Self {
            responses,
            index,
            missing,
        }
    }

    /// Subresponses in the order the platform returned them.
    pub fn responses(&self) -> &[CompositeSubresponse] {
        &self.responses
    }

    pub fn into_responses(self) -> Vec<CompositeSubresponse> {
        self.responses
    }

    /// True when every sent reference id was answered and succeeded.
    pub fn all_succeeded(&self) -> bool {
        self.missing.is_empty() && self.responses.iter().all(CompositeSubresponse::is_success)
    }

    /// Subresponses that came back failed.
    ///
    /// Reference ids with no subresponse at all are listed by
    /// [`missing_reference_ids`](Self::missing_reference_ids).
    pub fn failures(&self) -> Vec<&CompositeSubresponse> {
        self.responses.iter().filter(|r| !r.is_success()).collect()
    }

    /// Reference ids that were sent but got no subresponse, in input order.
    pub fn missing_reference_ids(&self) -> &[String] {
        &self.missing
    }

    /// Every reference id that did not succeed: failed subresponses first,
    /// then unanswered ids.
    pub fn failed_reference_ids(&self) -> Vec<&str> {
        self.failures()
            .into_iter()
            .map(|r| r.reference_id.as_str())
            .chain(self.missing.iter().map(String::as_str))
            .collect()
    }

    /// Look up a subresponse by reference id.
    pub fn get(&self, reference_id: &str) -> Option<&CompositeSubresponse> {
        self.index.get(reference_id).map(|&i| &self.responses[i])
    }

    /// Pair each input item with its subresponse, in input order.
    pub fn correlate<'a>(
        &'a self,
        items: &'a [CompositeItem],
    ) -> Vec<(&'a CompositeItem, Option<&'a CompositeSubresponse>)> {
        items
            .iter()
            .map(|item| (item, self.get(&item.reference_id)))
            .collect()
    }

    /// Fail with [`ErrorKind::CompositeFailure`] unless every sent reference id
    /// was answered and succeeded.
    pub fn into_result(self) -> Result<Self> {
        if self.all_succeeded() {
            Ok(self)
        } else {
            Err(Error::new(ErrorKind::CompositeFailure(self)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn urls() -> UrlBuilder {
        UrlBuilder::new("https://na1.salesforce.com", "55.0")
    }

    fn body(text: &str) -> RawRecord {
        RawRecord::from_json(text).unwrap()
    }

    fn items() -> Vec<CompositeItem> {
        vec![
            CompositeItem::new("ref1", "Account", body(r#"{"Name":"New"}"#)),
            CompositeItem::existing("ref2", "Contact", "003xx", Some(body(r#"{"LastName":"Doe"}"#))),
        ]
    }

    #[test]
    fn test_create_request_shape() {
        let request = CompositeRequest::build(&urls(), CompositeOperation::Create, &items()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&serde_json::to_string(&request).unwrap()).unwrap();

        assert_eq!(
            value,
            json!({
                "allOrNone": true,
                "compositeRequest": [
                    {"body": {"Name": "New"}, "method": "POST", "referenceId": "ref1", "url": "/services/data/v55.0/sobjects/Account"},
                    {"body": {"LastName": "Doe"}, "method": "POST", "referenceId": "ref2", "url": "/services/data/v55.0/sobjects/Contact"}
                ]
            })
        );
    }

    #[test]
    fn test_upsert_selects_method_per_item() {
        let request = CompositeRequest::build(&urls(), CompositeOperation::Upsert, &items()).unwrap();
        let subs = request.subrequests();
        assert_eq!(subs[0].method, "POST");
        assert_eq!(subs[0].url, "/services/data/v55.0/sobjects/Account");
        assert_eq!(subs[1].method, "PATCH");
        assert_eq!(subs[1].url, "/services/data/v55.0/sobjects/Contact/003xx");
    }

    #[test]
    fn test_upsert_treats_empty_id_as_create() {
        let item = CompositeItem::existing("r", "Account", "", Some(body("{}")));
        let request = CompositeRequest::build(&urls(), CompositeOperation::Upsert, &[item]).unwrap();
        assert_eq!(request.subrequests()[0].method, "POST");
    }

    #[test]
    fn test_delete_omits_body() {
        let items = vec![CompositeItem::existing("d1", "Account", "001xx", Some(body("{}")))];
        let request = CompositeRequest::build(&urls(), CompositeOperation::Delete, &items).unwrap();
        let text = serde_json::to_string(&request).unwrap();
        assert_eq!(
            text,
            r#"{"allOrNone":true,"compositeRequest":[{"method":"DELETE","referenceId":"d1","url":"/services/data/v55.0/sobjects/Account/001xx"}]}"#
        );
    }

    #[test]
    fn test_update_and_delete_require_id() {
        for op in [CompositeOperation::Update, CompositeOperation::Delete] {
            let err = CompositeRequest::build(&urls(), op, &items()).unwrap_err();
            assert!(
                matches!(err.kind, ErrorKind::MissingRecordId { ref reference_id } if reference_id == "ref1"),
                "{op:?}: {err}"
            );
        }
    }

    #[test]
    fn test_batch_size_limits() {
        let err = CompositeRequest::build(&urls(), CompositeOperation::Create, &[]).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidBatchSize { size: 0, max: 25 }));

        let many: Vec<_> = (0..26)
            .map(|i| CompositeItem::new(format!("r{i}"), "Account", body("{}")))
            .collect();
        let err = CompositeRequest::build(&urls(), CompositeOperation::Create, &many).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidBatchSize { size: 26, max: 25 }));

        assert!(CompositeRequest::build(&urls(), CompositeOperation::Create, &many[..25]).is_ok());
    }

    #[test]
    fn test_duplicate_reference_ids_rejected() {
        let items = vec![
            CompositeItem::new("same", "Account", body("{}")),
            CompositeItem::new("same", "Account", body("{}")),
        ];
        let err = CompositeRequest::build(&urls(), CompositeOperation::Create, &items).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::DuplicateReferenceId(ref r) if r == "same"));
    }

    #[test]
    fn test_subresponse_bodies() {
        let response: CompositeResponse = serde_json::from_value(json!({
            "compositeResponse": [
                {"body": {"id": "001a", "success": true, "errors": []}, "httpHeaders": {}, "httpStatusCode": 201, "referenceId": "created"},
                {"body": null, "httpHeaders": {}, "httpStatusCode": 204, "referenceId": "patched"},
                {"body": [{"errorCode": "NOT_FOUND", "message": "gone"}], "httpHeaders": {}, "httpStatusCode": 404, "referenceId": "missing"},
                {"body": [{"errorCode": "PROCESSING_HALTED", "message": "halted"}], "httpStatusCode": 400, "referenceId": "halted"}
            ]
        }))
        .unwrap();
        let outcome = CompositeOutcome::new(
            ["created", "patched", "missing", "halted"],
            response.composite_response,
        );

        let created = outcome.get("created").unwrap();
        assert!(created.is_success());
        assert_eq!(created.id(), Some("001a"));

        assert!(outcome.get("patched").unwrap().is_success());

        let missing = outcome.get("missing").unwrap();
        assert!(!missing.is_success());
        assert_eq!(missing.errors()[0].status_code, "NOT_FOUND");

        assert!(!outcome.all_succeeded());
        let failed: Vec<_> = outcome.failures().iter().map(|r| r.reference_id.as_str()).collect();
        assert_eq!(failed, vec!["missing", "halted"]);

        let err = outcome.into_result().unwrap_err();
        assert_eq!(err.to_string(), "Composite batch failed for: missing, halted");
    }

    #[test]
    fn test_correlate_by_reference_id_not_position() {
        let outcome = CompositeOutcome::new(
            ["ref1", "ref2"],
            serde_json::from_value(json!([
                {"body": null, "httpStatusCode": 204, "referenceId": "ref2"},
                {"body": {"id": "001new", "success": true, "errors": []}, "httpStatusCode": 201, "referenceId": "ref1"}
            ]))
            .unwrap(),
        );

        let items = items();
        let pairs = outcome.correlate(&items);
        assert_eq!(pairs[0].0.reference_id, "ref1");
        assert_eq!(pairs[0].1.and_then(CompositeSubresponse::id), Some("001new"));
        assert_eq!(pairs[1].0.reference_id, "ref2");
        assert_eq!(pairs[1].1.map(|r| r.http_status_code), Some(204));
        assert!(outcome.all_succeeded());
        assert!(outcome.into_result().is_ok());
    }

    #[test]
    fn test_unanswered_reference_ids_fail_the_batch() {
        let outcome = CompositeOutcome::new(["ref1", "ref2"], vec![]);
        let items = items();

        assert!(outcome.correlate(&items).iter().all(|(_, r)| r.is_none()));
        assert!(!outcome.all_succeeded());
        assert!(outcome.failures().is_empty());
        assert_eq!(outcome.missing_reference_ids(), ["ref1", "ref2"]);

        let err = outcome.into_result().unwrap_err();
        assert_eq!(err.to_string(), "Composite batch failed for: ref1, ref2");
    }

    #[test]
    fn test_short_response_reports_missing_and_failed() {
        let outcome = CompositeOutcome::new(
            ["a", "b", "c"],
            serde_json::from_value(json!([
                {"body": [{"errorCode": "NOT_FOUND", "message": "gone"}], "httpStatusCode": 404, "referenceId": "b"},
                {"body": null, "httpStatusCode": 204, "referenceId": "a"}
            ]))
            .unwrap(),
        );

        assert!(!outcome.all_succeeded());
        assert_eq!(outcome.missing_reference_ids(), ["c"]);
        assert_eq!(outcome.failed_reference_ids(), vec!["b", "c"]);
    }

    #[test]
    fn test_response_without_composite_response_is_rejected() {
        assert!(serde_json::from_value::<CompositeResponse>(json!({})).is_err());
    }
}
