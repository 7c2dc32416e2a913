use serde::de::DeserializeOwned;
use sfutils_client::QueryResult;
use tracing::instrument;

use crate::error::Result;

impl super::SalesforceRestClient {
    /// Run a SOQL query and return the first page.
    ///
    /// Use `T = RawRecord` to keep records as the platform returned them.
    #[instrument(skip(self))]
    pub async fn query<T: DeserializeOwned>(&self, soql: &str) -> Result<QueryResult<T>> {
        let url = self.urls().query(soql);
        Ok(self.client.get_json(&url).await?)
    }

    /// Fetch the page a previous result's `next_records_url` points to.
    #[instrument(skip(self))]
    pub async fn query_next<T: DeserializeOwned>(&self, next_records_url: &str) -> Result<QueryResult<T>> {
        let url = self.urls().next_page(next_records_url);
        Ok(self.client.get_json(&url).await?)
    }
}
