use tracing::{instrument, warn};

use crate::composite::{CompositeItem, CompositeOperation, CompositeOutcome, CompositeRequest, CompositeResponse};
use crate::error::Result;

impl super::SalesforceRestClient {
    /// Send one composite batch of up to 25 record operations.
    ///
    /// Returns once the platform answers HTTP 200; per-item success is read
    /// from the returned [`CompositeOutcome`]. A body without
    /// `compositeResponse` is a decode error.
    #[instrument(skip(self, items), fields(count = items.len()))]
    pub async fn composite(&self, operation: CompositeOperation, items: &[CompositeItem]) -> Result<CompositeOutcome> {
        let request = CompositeRequest::build(self.urls(), operation, items)?;
        let url = self.urls().composite();
        let response: CompositeResponse = self.client.post_json(&url, &request, 200).await?;

        let outcome = CompositeOutcome::new(request.reference_ids(), response.composite_response);
        if !outcome.all_succeeded() {
            warn!(
                failed = outcome.failures().len(),
                unanswered = outcome.missing_reference_ids().len(),
                "composite batch had failed subrequests"
            );
        }
        Ok(outcome)
    }

    /// Create every item.
    pub async fn composite_create(&self, items: &[CompositeItem]) -> Result<CompositeOutcome> {
        self.composite(CompositeOperation::Create, items).await
    }

    /// Update every item by id.
    pub async fn composite_update(&self, items: &[CompositeItem]) -> Result<CompositeOutcome> {
        self.composite(CompositeOperation::Update, items).await
    }

    /// Update items that have an id, create the rest.
    pub async fn composite_upsert(&self, items: &[CompositeItem]) -> Result<CompositeOutcome> {
        self.composite(CompositeOperation::Upsert, items).await
    }

    /// Delete every item by id.
    pub async fn composite_delete(&self, items: &[CompositeItem]) -> Result<CompositeOutcome> {
        self.composite(CompositeOperation::Delete, items).await
    }
}
