//! # sfutils-rest
//!
//! Salesforce REST API client: single-record CRUD, Describe, SOQL Query,
//! SObject Collections, Composite and Limits.
//!
//! ## Features
//!
//! - **SObject CRUD** - Create, Update, Delete individual records
//! - **SObject Collections** - All-or-none batches of up to 200 records
//! - **SOQL Query** - First page plus cursor-driven pagination
//! - **Describe** - Object and field metadata
//! - **Composite API** - Up to 25 record operations in one request
//! - **Limits** - Org usage limits
//!
//! Record bodies are [`RawRecord`]s: JSON text that goes on the wire
//! byte-for-byte as the caller supplied it.
//!
//! ## Example
//!
//! ```rust,ignore
//! use sfutils_client::StaticToken;
//! use sfutils_rest::{RawRecord, SalesforceRestClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sfutils_rest::Error> {
//!     let client = SalesforceRestClient::new(
//!         "https://myorg.my.salesforce.com",
//!         StaticToken::shared("access_token_here"),
//!     )?;
//!
//!     // Query
//!     let page = client
//!         .query::<RawRecord>("SELECT Id, Name FROM Account LIMIT 10")
//!         .await?;
//!
//!     // Create
//!     let created = client
//!         .create("Account", &RawRecord::from_json(r#"{"Name":"New Account"}"#)?)
//!         .await?;
//!     let id = created.id.unwrap_or_default();
//!
//!     // Update
//!     client
//!         .update("Account", &id, &RawRecord::from_json(r#"{"Name":"Updated"}"#)?)
//!         .await?;
//!
//!     // Delete
//!     client.delete("Account", &id).await?;
//!
//!     Ok(())
//! }
//! ```

mod client;
mod collections;
mod composite;
mod describe;
mod error;
mod limits;
mod record;
mod sobject;

// Main client
pub use client::SalesforceRestClient;

// Collection operations
pub use collections::{CollectionRequest, CollectionResult, MAX_COLLECTION_SIZE};

// Composite API
pub use composite::{
    CompositeItem, CompositeOperation, CompositeOutcome, CompositeRequest, CompositeSubrequest,
    CompositeSubresponse, SubresponseBody, MAX_COMPOSITE_SIZE,
};

// Describe types
pub use describe::{DescribeSObjectResult, FieldDescribe};

// Errors
pub use error::{Error, ErrorKind, Result};

// Limits
pub use limits::{Limit, Limits, PermissionSetsLimit};

// Records
pub use record::RawRecord;
pub use sobject::{ObjectResult, SalesforceError};

// Re-export the query page type from the client crate
pub use sfutils_client::QueryResult;

/// One page of query results with records kept verbatim.
pub type QueryPage = QueryResult<RawRecord>;
