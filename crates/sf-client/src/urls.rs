//! Endpoint URL construction.
//!
//! Every function here is pure: the same base URL, API version and arguments
//! always produce the same string. Path segments supplied by callers (object
//! types, record ids, job ids) are percent-encoded.

use urlencoding::encode;

/// Builds fully qualified endpoint URLs for one org and API version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlBuilder {
    base_url: String,
    api_version: String,
}

impl UrlBuilder {
    /// Create a builder. A trailing `/` on `base_url` is ignored.
    pub fn new(base_url: impl Into<String>, api_version: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_version: api_version.into(),
        }
    }

    /// The base URL, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The API version, e.g. `"55.0"`.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// `/services/data/v{version}`, relative to the base URL.
    pub fn data_path(&self) -> String {
        format!("/services/data/v{}", self.api_version)
    }

    /// `{base}/services/data/v{version}`
    pub fn data_root(&self) -> String {
        format!("{}{}", self.base_url, self.data_path())
    }

    /// `{base}/services/data/v{version}/sobjects`
    pub fn sobjects(&self) -> String {
        format!("{}/sobjects", self.data_root())
    }

    /// `{base}/services/data/v{version}/sobjects/{type}`
    pub fn type_endpoint(&self, sobject: &str) -> String {
        format!("{}{}", self.base_url, self.type_path(sobject))
    }

    /// `{base}/services/data/v{version}/sobjects/{type}/{id}`
    pub fn object_endpoint(&self, sobject: &str, id: &str) -> String {
        format!("{}{}", self.base_url, self.object_path(sobject, id))
    }

    /// `{base}/services/data/v{version}/sobjects/{type}/describe`
    pub fn describe(&self, sobject: &str) -> String {
        format!("{}/describe", self.type_endpoint(sobject))
    }

    /// Path of the type endpoint relative to the base URL, as composite
    /// subrequests expect it.
    pub fn type_path(&self, sobject: &str) -> String {
        format!("{}/sobjects/{}", self.data_path(), encode(sobject))
    }

    /// Path of the object-by-id endpoint relative to the base URL.
    pub fn object_path(&self, sobject: &str, id: &str) -> String {
        format!("{}/{}", self.type_path(sobject), encode(id))
    }

    /// `{base}/services/data/v{version}/query?q={soql}` with the query
    /// percent-encoded.
    pub fn query(&self, soql: &str) -> String {
        format!("{}/query?q={}", self.data_root(), encode(soql))
    }

    /// Resolve a `nextRecordsUrl` cursor against the base URL.
    ///
    /// Cursors are normally absolute paths (`/services/data/...`). A full URL
    /// keeps only its path and query, so the request always goes to this org
    /// and the bearer token never leaves it.
    pub fn next_page(&self, cursor: &str) -> String {
        let path = match url::Url::parse(cursor) {
            Ok(absolute) => match absolute.query() {
                Some(query) => format!("{}?{}", absolute.path(), query),
                None => absolute.path().to_string(),
            },
            Err(_) => cursor.to_string(),
        };
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// `{base}/services/data/v{version}/composite/sobjects`
    pub fn collections(&self) -> String {
        format!("{}/composite/sobjects", self.data_root())
    }

    /// `{collections}?allOrNone=true&ids={id1,id2,...}`
    ///
    /// Each id is percent-encoded on its own before joining, so an id holding
    /// `,` or `&` cannot split or truncate the list.
    pub fn collections_delete<S: AsRef<str>>(&self, ids: &[S]) -> String {
        let ids = ids
            .iter()
            .map(|id| encode(id.as_ref()).into_owned())
            .collect::<Vec<_>>()
            .join(",");
        format!("{}?allOrNone=true&ids={}", self.collections(), ids)
    }

    /// `{base}/services/data/v{version}/composite`
    pub fn composite(&self) -> String {
        format!("{}/composite", self.data_root())
    }

    /// `{base}/services/data/v{version}/jobs/query`
    pub fn bulk_query_jobs(&self) -> String {
        format!("{}/jobs/query", self.data_root())
    }

    /// `{base}/services/data/v{version}/jobs/query/{jobId}`
    pub fn bulk_query_job(&self, job_id: &str) -> String {
        format!("{}/{}", self.bulk_query_jobs(), encode(job_id))
    }

    /// `{base}/services/data/v{version}/jobs/query/{jobId}/results`
    pub fn bulk_query_results(&self, job_id: &str) -> String {
        format!("{}/results", self.bulk_query_job(job_id))
    }

    /// `{base}/services/data/v{version}/limits`
    pub fn limits(&self) -> String {
        format!("{}/limits", self.data_root())
    }

    /// `{base}/services/oauth2/token`
    pub fn token_endpoint(&self) -> String {
        format!("{}/services/oauth2/token", self.base_url)
    }
}
