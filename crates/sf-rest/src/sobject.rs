//! Single-record result types.

use serde::{Deserialize, Serialize};

/// Result of a create operation (and of record-level composite subrequests).
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ObjectResult {
    #[serde(default)]
    pub id: Option<String>,
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<SalesforceError>,
}

impl ObjectResult {
    /// True when the platform reported failure or attached any error.
    pub fn is_failure(&self) -> bool {
        !self.success || !self.errors.is_empty()
    }
}

/// Salesforce error in operation results.
///
/// Record results use `statusCode`, HTTP error bodies use `errorCode`; both
/// land in `status_code`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct SalesforceError {
    #[serde(rename = "statusCode", alias = "errorCode")]
    pub status_code: String,
    pub message: String,
    #[serde(default)]
    pub fields: Vec<String>,
}

impl std::fmt::Display for SalesforceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status_code, self.message)?;
        if !self.fields.is_empty() {
            write!(f, " [{}]", self.fields.join(", "))?;
        }
        Ok(())
    }
}
