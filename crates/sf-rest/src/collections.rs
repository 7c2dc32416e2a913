//! SObject Collections for batch operations.
//!
//! A collections call carries up to [`MAX_COLLECTION_SIZE`] records, is always
//! sent with `allOrNone: true`, and yields one result per record in input
//! order.

use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorKind, Result};
use crate::record::RawRecord;
use crate::sobject::SalesforceError;

/// Platform ceiling for records in one collections call.
pub const MAX_COLLECTION_SIZE: usize = 200;

/// Request envelope for collection create and update.
///
/// Records are written out verbatim, so each one must already carry its
/// `attributes.type` (and `id` for updates).
#[derive(Debug, Clone, Serialize)]
pub struct CollectionRequest<'a> {
    #[serde(rename = "allOrNone")]
    all_or_none: bool,
    records: &'a [RawRecord],
}

impl<'a> CollectionRequest<'a> {
    /// Wrap `records` in an all-or-none envelope.
    pub fn new(records: &'a [RawRecord]) -> Self {
        Self {
            all_or_none: true,
            records,
        }
    }
}

/// Result of a collection operation for one record.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct CollectionResult {
    #[serde(default)]
    pub id: Option<String>,
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<SalesforceError>,
    #[serde(default)]
    pub created: Option<bool>,
}

impl CollectionResult {
    /// True when the platform reported failure or attached any error.
    pub fn is_failure(&self) -> bool {
        !self.success || !self.errors.is_empty()
    }
}

/// Reject batches outside `[1, max]` before anything is sent.
pub(crate) fn validate_batch_size(size: usize, max: usize) -> Result<()> {
    if size == 0 || size > max {
        return Err(Error::new(ErrorKind::InvalidBatchSize { size, max }));
    }
    Ok(())
}

/// Turn any failed item into a batch failure that still carries every result.
///
/// A response whose length differs from the number of submitted items is a
/// failure too, since the unanswered items cannot be told apart.
pub(crate) fn check_results(
    expected: usize,
    results: Vec<CollectionResult>,
) -> Result<Vec<CollectionResult>> {
    if results.len() != expected {
        return Err(Error::new(ErrorKind::ResultCountMismatch { expected, results }));
    }
    match results.iter().position(CollectionResult::is_failure) {
        Some(first_failure) => Err(Error::new(ErrorKind::BatchPartialFailure {
            results,
            first_failure,
        })),
        None => Ok(results),
    }
}
