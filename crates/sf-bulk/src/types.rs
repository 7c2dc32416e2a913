//! Types for Bulk API 2.0 query jobs.

use bytes::Bytes;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Deserialize API version that can be either a float (59.0) or string ("59.0").
pub(crate) fn deserialize_api_version<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ApiVersion {
        Float(f64),
        String(String),
    }

    Option::<ApiVersion>::deserialize(deserializer).map(|opt| {
        opt.map(|v| match v {
            ApiVersion::Float(f) => format!("{:.1}", f),
            ApiVersion::String(s) => s,
        })
    })
}

/// Bulk API 2.0 job states.
///
/// States the platform may add later decode as [`JobState::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum JobState {
    /// Job is open and accepting data
    Open,
    /// Job is queued for processing
    UploadComplete,
    /// Job is processing
    InProgress,
    /// Job was aborted
    Aborted,
    /// Job completed successfully
    JobComplete,
    /// Job failed
    Failed,
    /// A state this library does not know about
    Unknown(String),
}

impl JobState {
    /// The platform's name for this state.
    pub fn as_str(&self) -> &str {
        match self {
            JobState::Open => "Open",
            JobState::UploadComplete => "UploadComplete",
            JobState::InProgress => "InProgress",
            JobState::Aborted => "Aborted",
            JobState::JobComplete => "JobComplete",
            JobState::Failed => "Failed",
            JobState::Unknown(s) => s,
        }
    }

    /// Check if job is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobState::Aborted | JobState::JobComplete | JobState::Failed
        )
    }

    /// Check if job completed successfully.
    pub fn is_success(&self) -> bool {
        matches!(self, JobState::JobComplete)
    }
}

impl From<String> for JobState {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Open" => JobState::Open,
            "UploadComplete" => JobState::UploadComplete,
            "InProgress" => JobState::InProgress,
            "Aborted" => JobState::Aborted,
            "JobComplete" => JobState::JobComplete,
            "Failed" => JobState::Failed,
            _ => JobState::Unknown(s),
        }
    }
}

impl Serialize for JobState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl std::fmt::Display for JobState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Request Types
// =============================================================================

/// Request to create a query job.
#[derive(Debug, Clone, Serialize)]
pub struct CreateQueryJobRequest {
    /// `query`, or `queryAll` to include deleted and archived records
    pub operation: &'static str,
    /// SOQL query
    pub query: String,
}

impl CreateQueryJobRequest {
    /// Create a new query job request.
    pub fn new(soql: impl Into<String>) -> Self {
        Self {
            operation: "query",
            query: soql.into(),
        }
    }

    /// Use queryAll instead of query (includes deleted records).
    pub fn with_query_all(mut self) -> Self {
        self.operation = "queryAll";
        self
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// Query job record, as returned by job creation, status and listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    /// Job ID
    pub id: String,
    /// Operation type
    pub operation: String,
    /// SObject API name
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub created_by_id: Option<String>,
    /// Job creation time
    #[serde(default)]
    pub created_date: Option<String>,
    /// Last modification time
    #[serde(default)]
    pub system_modstamp: Option<String>,
    /// Current state
    pub state: JobState,
    #[serde(default)]
    pub concurrency_mode: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    /// API version (can be float like 59.0 or string like "59.0")
    #[serde(default, deserialize_with = "deserialize_api_version")]
    pub api_version: Option<String>,
    #[serde(default)]
    pub line_ending: Option<String>,
    #[serde(default)]
    pub column_delimiter: Option<String>,
    /// Number of records processed
    #[serde(default)]
    pub number_records_processed: i64,
    #[serde(default)]
    pub retries: i64,
    /// Total processing time in milliseconds
    #[serde(default)]
    pub total_processing_time: i64,
    /// Error message if failed
    #[serde(default)]
    pub error_message: Option<String>,
}

impl JobRecord {
    /// `created_date` parsed; the platform writes e.g. `2024-01-15T10:30:00.000+0000`.
    pub fn created_at(&self) -> Option<DateTime<FixedOffset>> {
        parse_platform_datetime(self.created_date.as_deref()?)
    }

    /// `system_modstamp` parsed.
    pub fn modified_at(&self) -> Option<DateTime<FixedOffset>> {
        parse_platform_datetime(self.system_modstamp.as_deref()?)
    }
}

fn parse_platform_datetime(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z")
        .or_else(|_| DateTime::parse_from_rfc3339(value))
        .ok()
}

/// One page of query job listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobList {
    pub done: bool,
    #[serde(default)]
    pub records: Vec<JobRecord>,
    #[serde(default)]
    pub next_records_url: Option<String>,
}

/// One page of query job results.
///
/// Paging state comes from the `Sforce-Locator` and `Sforce-NumberOfRecords`
/// response headers; the body is the CSV payload as returned.
#[derive(Debug, Clone)]
pub struct QueryJobResults {
    /// Records in this page. 0 when the header is missing or not a number.
    pub record_count: u64,
    /// Locator for the next page (None if no more pages)
    pub next_locator: Option<String>,
    /// CSV data
    pub body: Bytes,
}

impl QueryJobResults {
    /// Check whether another page is available.
    pub fn has_more(&self) -> bool {
        self.next_locator.is_some()
    }
}
