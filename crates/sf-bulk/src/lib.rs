//! # sfutils-bulk
//!
//! Salesforce Bulk API 2.0 query jobs.
//!
//! ## Features
//!
//! - **Query Jobs** - Create a job for a SOQL query and check its state
//! - **Result Pages** - Fetch CSV result pages driven by the `Sforce-Locator` header
//! - **Job Listing** - List query jobs in the org
//!
//! There is no built-in waiting: callers poll [`BulkApiClient::get_job_status`]
//! until the job reaches a terminal [`JobState`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use sfutils_bulk::BulkApiClient;
//! use sfutils_client::StaticToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sfutils_bulk::Error> {
//!     let client = BulkApiClient::new(
//!         "https://myorg.my.salesforce.com",
//!         StaticToken::shared("access_token"),
//!     )?;
//!
//!     let job = client.create_query_job("SELECT Id, Name FROM Account").await?;
//!     let status = client.get_job_status(&job.id).await?;
//!     println!("{} is {}", status.id, status.state);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::BulkApiClient;
pub use error::{Error, ErrorKind, Result};
pub use types::{CreateQueryJobRequest, JobList, JobRecord, JobState, QueryJobResults};
