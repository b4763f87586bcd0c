// Search cluster client: trait seam + OpenSearch REST implementation via reqwest

use crate::error::{Backend, DashboardError, DashboardResult};
use crate::models::{CatIndexRow, NodeFsStats, SearchResponse};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::instrument;

/// Fields requested from the index catalog.
pub const CATALOG_FIELDS: &str = "index,health,status,docs.count,store.size,creation.date";

/// Read-only query surface of the search cluster. No internal retries.
#[async_trait]
pub trait SearchCluster: Send + Sync {
    /// Raw `_cluster/health` payload.
    async fn cluster_health(&self) -> DashboardResult<serde_json::Value>;

    /// Index catalog rows for indices matching `pattern`.
    async fn list_indices(&self, pattern: &str) -> DashboardResult<Vec<CatIndexRow>>;

    async fn search(
        &self,
        index_pattern: &str,
        query: serde_json::Value,
    ) -> DashboardResult<SearchResponse>;

    /// Filesystem totals, one entry per node.
    async fn node_fs_stats(&self) -> DashboardResult<Vec<NodeFsStats>>;
}

fn unavailable(err: impl std::fmt::Display) -> DashboardError {
    DashboardError::unavailable(Backend::SearchCluster, err)
}

#[derive(Deserialize)]
struct NodesFsResponse {
    #[serde(default)]
    nodes: BTreeMap<String, NodeFsEntry>,
}

#[derive(Deserialize)]
struct NodeFsEntry {
    fs: NodeFs,
}

#[derive(Deserialize)]
struct NodeFs {
    total: NodeFsTotal,
}

#[derive(Deserialize)]
struct NodeFsTotal {
    #[serde(default)]
    free_in_bytes: u64,
    #[serde(default)]
    total_in_bytes: u64,
}

pub struct OpenSearchRepo {
    client: Client,
    base_url: String,
}

impl OpenSearchRepo {
    /// `request_timeout` bounds every call made through this client.
    pub fn new(base_url: &str, request_timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(crate::version::user_agent())
            .timeout(request_timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> DashboardResult<T> {
        self.client
            .get(self.url(path))
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(unavailable)?
            .json::<T>()
            .await
            .map_err(unavailable)
    }
}

#[async_trait]
impl SearchCluster for OpenSearchRepo {
    #[instrument(skip(self), fields(repo = "opensearch", operation = "cluster_health"))]
    async fn cluster_health(&self) -> DashboardResult<serde_json::Value> {
        self.get_json("_cluster/health").await
    }

    #[instrument(skip(self), fields(repo = "opensearch", operation = "list_indices"))]
    async fn list_indices(&self, pattern: &str) -> DashboardResult<Vec<CatIndexRow>> {
        self.get_json(&format!(
            "_cat/indices/{pattern}?format=json&h={CATALOG_FIELDS}"
        ))
        .await
    }

    #[instrument(skip(self, query), fields(repo = "opensearch", operation = "search"))]
    async fn search(
        &self,
        index_pattern: &str,
        query: serde_json::Value,
    ) -> DashboardResult<SearchResponse> {
        self.client
            .post(self.url(&format!("{index_pattern}/_search")))
            .json(&query)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(unavailable)?
            .json::<SearchResponse>()
            .await
            .map_err(unavailable)
    }

    #[instrument(skip(self), fields(repo = "opensearch", operation = "node_fs_stats"))]
    async fn node_fs_stats(&self) -> DashboardResult<Vec<NodeFsStats>> {
        let resp: NodesFsResponse = self.get_json("_nodes/stats/fs").await?;
        Ok(resp
            .nodes
            .into_values()
            .map(|n| NodeFsStats {
                free_bytes: n.fs.total.free_in_bytes,
                total_bytes: n.fs.total.total_in_bytes,
            })
            .collect())
    }
}
