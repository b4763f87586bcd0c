// Search cluster models

use serde::{Deserialize, Serialize};

/// `hits.total` is a bare integer on older clusters and `{ "value": n, "relation": ".." }`
/// on newer ones. Decoded here so nothing downstream sees both shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum HitsTotal {
    Count(u64),
    Object { value: u64 },
}

impl HitsTotal {
    pub fn value(&self) -> u64 {
        match *self {
            HitsTotal::Count(n) => n,
            HitsTotal::Object { value } => value,
        }
    }
}

impl Default for HitsTotal {
    fn default() -> Self {
        HitsTotal::Count(0)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchHits {
    #[serde(default)]
    pub total: HitsTotal,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub hits: SearchHits,
    #[serde(default)]
    pub aggregations: Option<serde_json::Value>,
}

impl SearchResponse {
    pub fn total_hits(&self) -> u64 {
        self.hits.total.value()
    }

    /// Buckets of a named date-histogram/terms aggregation, in response order.
    /// Missing or malformed aggregations yield an empty list.
    pub fn buckets(&self, name: &str) -> Vec<HistogramBucket> {
        self.aggregations
            .as_ref()
            .and_then(|a| a.get(name))
            .and_then(|agg| agg.get("buckets"))
            .and_then(|b| serde_json::from_value(b.clone()).ok())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HistogramBucket {
    #[serde(default)]
    pub key_as_string: Option<String>,
    #[serde(default)]
    pub doc_count: u64,
}

/// Row of `_cat/indices?format=json`. The cat API renders numbers as strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatIndexRow {
    #[serde(default)]
    pub index: String,
    #[serde(default)]
    pub health: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "docs.count", default)]
    pub docs_count: Option<String>,
    #[serde(rename = "store.size", default)]
    pub store_size: Option<String>,
    #[serde(
        rename = "creation.date",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub creation_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexSummary {
    pub name: String,
    pub health: String,
    pub status: String,
    pub doc_count: u64,
    pub store_size_raw: String,
}

impl From<CatIndexRow> for IndexSummary {
    fn from(row: CatIndexRow) -> Self {
        Self {
            doc_count: row
                .docs_count
                .as_deref()
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(0),
            store_size_raw: row.store_size.unwrap_or_default(),
            health: row.health.unwrap_or_default(),
            status: row.status.unwrap_or_default(),
            name: row.index,
        }
    }
}

/// Filesystem totals of one cluster node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeFsStats {
    pub free_bytes: u64,
    pub total_bytes: u64,
}

/// Unified cluster statistics for the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct StatsSummary {
    pub cluster_health: serde_json::Value,
    pub total_documents: u64,
    pub total_size_bytes: f64,
    pub total_size_gb: f64,
    pub indices_count: usize,
    /// Approximate documents/second; see [`crate::metrics::ingestion_rate`].
    pub ingestion_rate: String,
    pub last_update: String,
    pub aggregations: Option<serde_json::Value>,
}
