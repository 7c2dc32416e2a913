//! Bulk API 2.0 query job client.
//!
//! Every method is one HTTP round trip. Waiting for a job to finish is up to
//! the caller: poll [`BulkApiClient::get_job_status`] until
//! [`JobState::is_terminal`](crate::JobState::is_terminal).

use std::sync::Arc;

use tracing::{debug, instrument};

use sfutils_client::{AccessTokenSource, ClientConfig, SalesforceClient};

use crate::error::Result;
use crate::types::*;

/// Salesforce Bulk API 2.0 client for query jobs.
///
/// # Example
///
/// ```rust,ignore
/// use sfutils_bulk::BulkApiClient;
///
/// let client = BulkApiClient::new("https://myorg.my.salesforce.com", token_source)?;
///
/// let job = client.create_query_job("SELECT Id, Name FROM Account").await?;
/// while !client.get_job_status(&job.id).await?.state.is_terminal() {
///     tokio::time::sleep(std::time::Duration::from_secs(5)).await;
/// }
///
/// let mut locator = None;
/// loop {
///     let page = client.get_job_results(&job.id, locator.as_deref()).await?;
///     handle_csv(&page.body);
///     match page.next_locator {
///         Some(next) => locator = Some(next),
///         None => break,
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct BulkApiClient {
    client: SalesforceClient,
}

impl BulkApiClient {
    /// Create a new Bulk API client.
    pub fn new(base_url: impl Into<String>, token: Arc<dyn AccessTokenSource>) -> Result<Self> {
        let client = SalesforceClient::new(base_url, token)?;
        Ok(Self { client })
    }

    /// Create a new Bulk API client with custom HTTP configuration.
    pub fn with_config(
        base_url: impl Into<String>,
        token: Arc<dyn AccessTokenSource>,
        config: ClientConfig,
    ) -> Result<Self> {
        let client = SalesforceClient::with_config(base_url, token, config)?;
        Ok(Self { client })
    }

    /// Create a Bulk API client from an existing SalesforceClient.
    pub fn from_client(client: SalesforceClient) -> Self {
        Self { client }
    }

    /// Get the underlying SalesforceClient.
    pub fn inner(&self) -> &SalesforceClient {
        &self.client
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    /// Get the API version.
    pub fn api_version(&self) -> &str {
        self.client.api_version()
    }

    /// Set the API version.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.client = self.client.with_api_version(version);
        self
    }

    // =========================================================================
    // Query Job Operations
    // =========================================================================

    /// Create a query job for `soql`.
    #[instrument(skip(self))]
    pub async fn create_query_job(&self, soql: &str) -> Result<JobRecord> {
        self.create_job(CreateQueryJobRequest::new(soql)).await
    }

    /// Create a query job from a prepared request.
    #[instrument(skip(self, request), fields(operation = request.operation))]
    pub async fn create_job(&self, request: CreateQueryJobRequest) -> Result<JobRecord> {
        let url = self.client.urls().bulk_query_jobs();
        let job: JobRecord = self.client.post_json(&url, &request, 200).await?;
        debug!(job_id = %job.id, state = %job.state, "created query job");
        Ok(job)
    }

    /// Get a query job's current record.
    #[instrument(skip(self))]
    pub async fn get_job_status(&self, job_id: &str) -> Result<JobRecord> {
        let url = self.client.urls().bulk_query_job(job_id);
        Ok(self.client.get_json(&url).await?)
    }

    /// Get one page of a query job's results.
    ///
    /// Pass `None` for the first page, then the previous page's
    /// `next_locator` until it comes back `None`.
    #[instrument(skip(self))]
    pub async fn get_job_results(&self, job_id: &str, locator: Option<&str>) -> Result<QueryJobResults> {
        let url = self.client.urls().bulk_query_results(job_id);

        let mut request = self.client.get(&url).accept("text/csv");
        if let Some(loc) = locator {
            request = request.query("locator", loc);
        }

        let response = self.client.execute_expect(request, 200).await?;

        // Paging state is only in the headers
        let next_locator = response
            .sforce_locator()
            .filter(|s| !s.is_empty() && *s != "null")
            .map(str::to_string);
        let record_count = response.sforce_number_of_records().unwrap_or(0);

        let body = response.bytes().await?;
        debug!(record_count, has_more = next_locator.is_some(), "fetched query results page");

        Ok(QueryJobResults {
            record_count,
            next_locator,
            body,
        })
    }

    /// List query jobs.
    #[instrument(skip(self))]
    pub async fn list_jobs(&self) -> Result<JobList> {
        let url = self.client.urls().bulk_query_jobs();
        Ok(self.client.get_json(&url).await?)
    }
}
