//! Error types for sfutils-rest.

use crate::collections::CollectionResult;
use crate::composite::CompositeOutcome;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    pub kind: ErrorKind,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// The underlying client error, when the failure came from the HTTP layer.
    pub fn client_error(&self) -> Option<&sfutils_client::Error> {
        self.source.as_deref()?.downcast_ref::<sfutils_client::Error>()
    }

    /// HTTP status of an unexpected API response.
    pub fn status(&self) -> Option<u16> {
        self.client_error()?.status()
    }

    /// Raw body of an unexpected API response.
    pub fn body(&self) -> Option<&str> {
        self.client_error()?.body()
    }

    /// Returns true if the platform rejected the bearer token (HTTP 401).
    pub fn is_unauthorized(&self) -> bool {
        self.client_error().is_some_and(|e| e.is_unauthorized())
    }

    /// Per-item results of a collections batch that reported a failure, or
    /// whatever results came back when their count was wrong.
    pub fn batch_results(&self) -> Option<&[CollectionResult]> {
        match &self.kind {
            ErrorKind::BatchPartialFailure { results, .. }
            | ErrorKind::ResultCountMismatch { results, .. } => Some(results),
            _ => None,
        }
    }
}

fn first_failure_message(results: &[CollectionResult], index: &usize) -> String {
    let Some(result) = results.get(*index) else {
        return String::new();
    };
    match result.errors.first() {
        Some(err) => format!("{}: {}", err.status_code, err.message),
        None => "success=false without errors".to_string(),
    }
}

fn failed_reference_ids(outcome: &CompositeOutcome) -> String {
    outcome.failed_reference_ids().join(", ")
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    #[error("Client error: {0}")]
    Client(String),

    /// Batch size outside `[1, max]`. Raised before any request is sent.
    #[error("Invalid batch size {size}: must be between 1 and {max}")]
    InvalidBatchSize { size: usize, max: usize },

    /// A reference id appears more than once in one composite batch.
    #[error("Duplicate reference id in composite batch: {0}")]
    DuplicateReferenceId(String),

    /// An update or delete item has no record id.
    #[error("Composite item {reference_id} requires a record id")]
    MissingRecordId { reference_id: String },

    /// A collections batch came back with at least one failed item.
    ///
    /// `results` holds every item's result in input order; `first_failure`
    /// is the index of the first failed one.
    #[error(
        "Collection batch failed at item {first_failure}: {}",
        first_failure_message(.results, .first_failure)
    )]
    BatchPartialFailure {
        results: Vec<CollectionResult>,
        first_failure: usize,
    },

    /// A collections batch answered with a different number of results than
    /// items were sent. `results` holds what came back.
    #[error("Collection batch returned {} results for {expected} items", .results.len())]
    ResultCountMismatch {
        expected: usize,
        results: Vec<CollectionResult>,
    },

    /// A composite batch contained failed or unanswered subrequests.
    #[error("Composite batch failed for: {}", failed_reference_ids(.0))]
    CompositeFailure(CompositeOutcome),

    #[error("JSON error: {0}")]
    Json(String),
}

impl From<sfutils_client::Error> for Error {
    fn from(err: sfutils_client::Error) -> Self {
        Error {
            kind: ErrorKind::Client(err.to_string()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error {
            kind: ErrorKind::Json(err.to_string()),
            source: Some(Box::new(err)),
        }
    }
}
