//! Org limits.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One usage limit.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Limit {
    #[serde(rename = "Max", default)]
    pub max: i64,
    #[serde(rename = "Remaining", default)]
    pub remaining: i64,
}

impl Limit {
    /// Amount consumed so far.
    pub fn used(&self) -> i64 {
        self.max.saturating_sub(self.remaining)
    }

    /// True when nothing is left.
    pub fn is_exhausted(&self) -> bool {
        self.remaining <= 0
    }
}

/// The `PermissionSets` limit, which nests a `CreateCustom` limit.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct PermissionSetsLimit {
    #[serde(rename = "Max", default)]
    pub max: i64,
    #[serde(rename = "Remaining", default)]
    pub remaining: i64,
    #[serde(rename = "CreateCustom", default)]
    pub create_custom: Limit,
}

/// Response of the limits endpoint.
///
/// Limits missing from a response decode as zero. Limits without a field
/// here are kept in `other`, keyed by their platform name.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Limits {
    #[serde(rename = "AnalyticsExternalDataSizeMB")]
    pub analytics_external_data_size_mb: Limit,
    #[serde(rename = "ConcurrentAsyncGetReportInstances")]
    pub concurrent_async_get_report_instances: Limit,
    #[serde(rename = "ConcurrentEinsteinDataInsightsStoryCreation")]
    pub concurrent_einstein_data_insights_story_creation: Limit,
    #[serde(rename = "ConcurrentEinsteinDiscoveryStoryCreation")]
    pub concurrent_einstein_discovery_story_creation: Limit,
    #[serde(rename = "ConcurrentSyncReportRuns")]
    pub concurrent_sync_report_runs: Limit,
    #[serde(rename = "DailyAnalyticsDataflowJobExecutions")]
    pub daily_analytics_dataflow_job_executions: Limit,
    #[serde(rename = "DailyAnalyticsUploadedFilesSizeMB")]
    pub daily_analytics_uploaded_files_size_mb: Limit,
    #[serde(rename = "DailyApiRequests")]
    pub daily_api_requests: Limit,
    #[serde(rename = "DailyAsyncApexExecutions")]
    pub daily_async_apex_executions: Limit,
    #[serde(rename = "DailyAsyncApexTests")]
    pub daily_async_apex_tests: Limit,
    #[serde(rename = "DailyBulkApiBatches")]
    pub daily_bulk_api_batches: Limit,
    #[serde(rename = "DailyBulkV2QueryFileStorageMB")]
    pub daily_bulk_v2_query_file_storage_mb: Limit,
    #[serde(rename = "DailyBulkV2QueryJobs")]
    pub daily_bulk_v2_query_jobs: Limit,
    #[serde(rename = "DailyDeliveredPlatformEvents")]
    pub daily_delivered_platform_events: Limit,
    #[serde(rename = "DailyDurableGenericStreamingApiEvents")]
    pub daily_durable_generic_streaming_api_events: Limit,
    #[serde(rename = "DailyDurableStreamingApiEvents")]
    pub daily_durable_streaming_api_events: Limit,
    #[serde(rename = "DailyEinsteinDataInsightsStoryCreation")]
    pub daily_einstein_data_insights_story_creation: Limit,
    #[serde(rename = "DailyEinsteinDiscoveryOptimizationJobRuns")]
    pub daily_einstein_discovery_optimization_job_runs: Limit,
    #[serde(rename = "DailyEinsteinDiscoveryPredictAPICalls")]
    pub daily_einstein_discovery_predict_api_calls: Limit,
    #[serde(rename = "DailyEinsteinDiscoveryPredictionsByCDC")]
    pub daily_einstein_discovery_predictions_by_cdc: Limit,
    #[serde(rename = "DailyEinsteinDiscoveryStoryCreation")]
    pub daily_einstein_discovery_story_creation: Limit,
    #[serde(rename = "DailyFunctionsApiCallLimit")]
    pub daily_functions_api_call_limit: Limit,
    #[serde(rename = "DailyGenericStreamingApiEvents")]
    pub daily_generic_streaming_api_events: Limit,
    #[serde(rename = "DailyStandardVolumePlatformEvents")]
    pub daily_standard_volume_platform_events: Limit,
    #[serde(rename = "DailyStreamingApiEvents")]
    pub daily_streaming_api_events: Limit,
    #[serde(rename = "DailyWorkflowEmails")]
    pub daily_workflow_emails: Limit,
    #[serde(rename = "DataStorageMB")]
    pub data_storage_mb: Limit,
    #[serde(rename = "DurableStreamingApiConcurrentClients")]
    pub durable_streaming_api_concurrent_clients: Limit,
    #[serde(rename = "FileStorageMB")]
    pub file_storage_mb: Limit,
    #[serde(rename = "HourlyAsyncReportRuns")]
    pub hourly_async_report_runs: Limit,
    #[serde(rename = "HourlyDashboardRefreshes")]
    pub hourly_dashboard_refreshes: Limit,
    #[serde(rename = "HourlyDashboardResults")]
    pub hourly_dashboard_results: Limit,
    #[serde(rename = "HourlyDashboardStatuses")]
    pub hourly_dashboard_statuses: Limit,
    #[serde(rename = "HourlyLongTermIdMapping")]
    pub hourly_long_term_id_mapping: Limit,
    #[serde(rename = "HourlyManagedContentPublicRequests")]
    pub hourly_managed_content_public_requests: Limit,
    #[serde(rename = "HourlyODataCallout")]
    pub hourly_odata_callout: Limit,
    #[serde(rename = "HourlyPublishedPlatformEvents")]
    pub hourly_published_platform_events: Limit,
    #[serde(rename = "HourlyPublishedStandardVolumePlatformEvents")]
    pub hourly_published_standard_volume_platform_events: Limit,
    #[serde(rename = "HourlyShortTermIdMapping")]
    pub hourly_short_term_id_mapping: Limit,
    #[serde(rename = "HourlySyncReportRuns")]
    pub hourly_sync_report_runs: Limit,
    #[serde(rename = "HourlyTimeBasedWorkflow")]
    pub hourly_time_based_workflow: Limit,
    #[serde(rename = "MassEmail")]
    pub mass_email: Limit,
    #[serde(rename = "MonthlyEinsteinDiscoveryStoryCreation")]
    pub monthly_einstein_discovery_story_creation: Limit,
    #[serde(rename = "MonthlyPlatformEventsUsageEntitlement")]
    pub monthly_platform_events_usage_entitlement: Limit,
    #[serde(rename = "Package2VersionCreates")]
    pub package2_version_creates: Limit,
    #[serde(rename = "Package2VersionCreatesWithoutValidation")]
    pub package2_version_creates_without_validation: Limit,
    #[serde(rename = "PermissionSets")]
    pub permission_sets: PermissionSetsLimit,
    #[serde(rename = "PrivateConnectOutboundCalloutHourlyLimitMB")]
    pub private_connect_outbound_callout_hourly_limit_mb: Limit,
    #[serde(rename = "PublishCallbackUsageInApex")]
    pub publish_callback_usage_in_apex: Limit,
    #[serde(rename = "SingleEmail")]
    pub single_email: Limit,
    #[serde(rename = "StreamingApiConcurrentClients")]
    pub streaming_api_concurrent_clients: Limit,
    #[serde(flatten)]
    pub other: HashMap<String, serde_json::Value>,
}

impl Limits {
    /// Look up a limit the struct has no field for.
    pub fn other_limit(&self, name: &str) -> Option<Limit> {
        serde_json::from_value(self.other.get(name)?.clone()).ok()
    }
}
