use tracing::instrument;

use crate::error::Result;
use crate::limits::Limits;

impl super::SalesforceRestClient {
    /// Get the org's limits.
    #[instrument(skip(self))]
    pub async fn limits(&self) -> Result<Limits> {
        let url = self.urls().limits();
        Ok(self.client.get_json(&url).await?)
    }
}
