// Cluster-wide stats: health, catalog and aggregation search as one composite.

use super::Dashboard;
use crate::error::DashboardResult;
use crate::metrics::{ingestion_rate, parse_byte_size};
use crate::models::{IndexSummary, StatsSummary};
use serde_json::json;
use tracing::debug;

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Last-hour aggregation query behind the stats view.
pub fn stats_query() -> serde_json::Value {
    json!({
        "size": 0,
        "query": {
            "range": { "@timestamp": { "gte": "now-1h" } }
        },
        "aggs": {
            "event_types": {
                "terms": { "field": "event_type", "size": 10 }
            },
            "alerts_by_severity": {
                "terms": { "field": "alert.severity", "size": 10 }
            },
            "hourly_events": {
                "date_histogram": { "field": "@timestamp", "calendar_interval": "1h" }
            },
            "recent_events": {
                "date_histogram": { "field": "@timestamp", "calendar_interval": "1m" }
            }
        }
    })
}

impl Dashboard {
    /// All three queries must succeed: totals are meaningless without the
    /// catalog, so any single failure fails the whole call.
    pub async fn get_stats(&self) -> DashboardResult<StatsSummary> {
        let pattern = &self.settings.index_pattern;
        let (health, indices, search) = tokio::join!(
            self.search.cluster_health(),
            self.search.list_indices(pattern),
            self.search.search(pattern, stats_query()),
        );
        let health = health?;
        let indices: Vec<IndexSummary> = indices?.into_iter().map(IndexSummary::from).collect();
        let search = search?;

        let total_documents: u64 = indices.iter().map(|i| i.doc_count).sum();
        let total_size_bytes: f64 = indices
            .iter()
            .map(|i| parse_byte_size(&i.store_size_raw))
            .sum();
        let recent = search.buckets("recent_events");

        debug!(
            operation = "get_stats",
            indices_count = indices.len(),
            recent_buckets = recent.len(),
            "cluster stats assembled"
        );

        Ok(StatsSummary {
            cluster_health: health,
            total_documents,
            total_size_bytes,
            total_size_gb: total_size_bytes / BYTES_PER_GB,
            indices_count: indices.len(),
            ingestion_rate: ingestion_rate(&recent),
            last_update: chrono::Local::now().format("%H:%M:%S").to_string(),
            aggregations: search.aggregations,
        })
    }
}
