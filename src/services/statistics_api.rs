//! Trait for the paginated statistics source.

use serde_json::Value;

use crate::error::FetchError;

/// A source of per-area statistics records.
#[async_trait::async_trait]
pub trait StatisticsApi {
    /// Returns the records matching `filters` (semicolon-separated
    /// `key=value` predicates such as `areaType=nation`), shaped by
    /// `structure` (output name → metric name).
    async fn fetch_records(
        &self,
        filters: &str,
        structure: &[(&str, &str)],
    ) -> Result<Vec<Value>, FetchError>;
}
