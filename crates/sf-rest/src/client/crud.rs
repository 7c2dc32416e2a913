use tracing::instrument;

use crate::describe::DescribeSObjectResult;
use crate::error::Result;
use crate::record::RawRecord;
use crate::sobject::ObjectResult;

impl super::SalesforceRestClient {
    /// Create a record. Succeeds on HTTP 201.
    #[instrument(skip(self, body))]
    pub async fn create(&self, sobject: &str, body: &RawRecord) -> Result<ObjectResult> {
        let url = self.urls().type_endpoint(sobject);
        let request = self.client.post(&url).raw_json(body.as_str());
        Ok(self.client.send_json(request, 201).await?)
    }

    /// Update a record. Succeeds on HTTP 204.
    #[instrument(skip(self, body))]
    pub async fn update(&self, sobject: &str, id: &str, body: &RawRecord) -> Result<()> {
        let url = self.urls().object_endpoint(sobject, id);
        let request = self.client.patch(&url).raw_json(body.as_str());
        Ok(self.client.send_empty(request, 204).await?)
    }

    /// Delete a record. Succeeds on HTTP 204.
    #[instrument(skip(self))]
    pub async fn delete(&self, sobject: &str, id: &str) -> Result<()> {
        let url = self.urls().object_endpoint(sobject, id);
        Ok(self.client.send_empty(self.client.delete(&url), 204).await?)
    }

    /// Describe an SObject type.
    #[instrument(skip(self))]
    pub async fn describe(&self, sobject: &str) -> Result<DescribeSObjectResult> {
        let url = self.urls().describe(sobject);
        Ok(self.client.get_json(&url).await?)
    }
}
