use sfutils_client::RequestBuilder;
use tracing::{instrument, warn};

use crate::collections::{
    check_results, validate_batch_size, CollectionRequest, CollectionResult, MAX_COLLECTION_SIZE,
};
use crate::error::Result;
use crate::record::RawRecord;

impl super::SalesforceRestClient {
    /// Create up to 200 records in one all-or-none call.
    ///
    /// Each record must carry `attributes.type`. Results come back in input
    /// order; if any item failed, the error carries every result.
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub async fn collections_create(&self, records: &[RawRecord]) -> Result<Vec<CollectionResult>> {
        validate_batch_size(records.len(), MAX_COLLECTION_SIZE)?;
        let url = self.urls().collections();
        let request = self.client.post(&url).json(&CollectionRequest::new(records))?;
        self.send_collection(request, records.len()).await
    }

    /// Update up to 200 records in one all-or-none call.
    ///
    /// Each record must carry `attributes.type` and `id`.
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub async fn collections_update(&self, records: &[RawRecord]) -> Result<Vec<CollectionResult>> {
        validate_batch_size(records.len(), MAX_COLLECTION_SIZE)?;
        let url = self.urls().collections();
        let request = self.client.patch(&url).json(&CollectionRequest::new(records))?;
        self.send_collection(request, records.len()).await
    }

    /// Delete up to 200 records by id in one all-or-none call.
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn collections_delete<S: AsRef<str>>(&self, ids: &[S]) -> Result<Vec<CollectionResult>> {
        validate_batch_size(ids.len(), MAX_COLLECTION_SIZE)?;
        let url = self.urls().collections_delete(ids);
        self.send_collection(self.client.delete(&url), ids.len()).await
    }

    async fn send_collection(&self, request: RequestBuilder, expected: usize) -> Result<Vec<CollectionResult>> {
        let results: Vec<CollectionResult> = self.client.send_json(request, 200).await?;
        check_results(expected, results).inspect_err(|err| warn!(error = %err, "collection batch failed"))
    }
}
