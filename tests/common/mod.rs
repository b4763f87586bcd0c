// Shared test helpers: in-memory fakes for the three backend clients

#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use secstack_dashboard::aggregator::{Dashboard, DashboardSettings};
use secstack_dashboard::dns_repo::DnsFilter;
use secstack_dashboard::docker_repo::ContainerRuntime;
use secstack_dashboard::error::{Backend, DashboardError, DashboardResult};
use secstack_dashboard::models::*;
use secstack_dashboard::search_repo::SearchCluster;
use serde_json::{Value, json};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn settings() -> DashboardSettings {
    DashboardSettings {
        index_pattern: "suricata-*".into(),
        monitored: vec![
            "suricata".into(),
            "logstash".into(),
            "opensearch".into(),
            "admin-dashboard".into(),
            "pihole".into(),
        ],
        sensor: "suricata".into(),
        pipeline: "logstash".into(),
        default_log_lines: 50,
        max_log_lines: 1000,
    }
}

pub fn container(id: &str, name: &str, state: ContainerState) -> ContainerSummary {
    ContainerSummary {
        id: id.into(),
        names: vec![format!("/{name}")],
        state,
        created: 1_700_000_000,
    }
}

pub fn healthy_reading() -> StatsReading {
    StatsReading {
        current: CpuCounters {
            total_usage: 300,
            system_usage: 2_000,
        },
        previous: CpuCounters {
            total_usage: 100,
            system_usage: 1_000,
        },
        online_cpus: 2,
        memory_used_bytes: 64 * 1024 * 1024,
        memory_limit_bytes: 1024 * 1024 * 1024,
        network_rx_bytes: 1_000,
        network_tx_bytes: 2_000,
    }
}

fn runtime_down(msg: &str) -> DashboardError {
    DashboardError::unavailable(Backend::ContainerRuntime, msg)
}

fn search_down(msg: &str) -> DashboardError {
    DashboardError::unavailable(Backend::SearchCluster, msg)
}

#[derive(Default)]
pub struct FakeRuntime {
    pub containers: Vec<ContainerSummary>,
    pub list_error: Option<String>,
    pub failing_stats: HashSet<String>,
    pub failing_inspect: HashSet<String>,
    /// Per-id latency applied to both inspect and stats.
    pub delays: HashMap<String, Duration>,
    pub logs: HashMap<String, Vec<u8>>,
    pub requested_log_lines: Mutex<Vec<usize>>,
}

impl FakeRuntime {
    pub fn with_containers(containers: Vec<ContainerSummary>) -> Self {
        Self {
            containers,
            ..Default::default()
        }
    }

    async fn delay(&self, id: &str) {
        if let Some(d) = self.delays.get(id) {
            tokio::time::sleep(*d).await;
        }
    }
}

#[async_trait]
impl ContainerRuntime for FakeRuntime {
    async fn list_all(&self) -> DashboardResult<Vec<ContainerSummary>> {
        match &self.list_error {
            Some(e) => Err(runtime_down(e)),
            None => Ok(self.containers.clone()),
        }
    }

    async fn inspect(&self, id: &str) -> DashboardResult<ContainerLifecycle> {
        self.delay(id).await;
        if self.failing_inspect.contains(id) {
            return Err(runtime_down("inspect refused"));
        }
        Ok(ContainerLifecycle {
            restart_count: 1,
            started_at: Some("2024-05-01T10:00:00Z".into()),
            exit_code: Some(0),
            error: None,
        })
    }

    async fn stats_once(&self, id: &str) -> DashboardResult<StatsReading> {
        self.delay(id).await;
        if self.failing_stats.contains(id) {
            return Err(runtime_down("stats stream closed"));
        }
        Ok(healthy_reading())
    }

    async fn tail_logs(&self, id: &str, max_lines: usize) -> DashboardResult<Bytes> {
        if let Ok(mut calls) = self.requested_log_lines.lock() {
            calls.push(max_lines);
        }
        Ok(Bytes::from(self.logs.get(id).cloned().unwrap_or_default()))
    }
}

pub struct FakeSearch {
    pub health: Result<Value, String>,
    pub health_delay: Duration,
    pub indices: Result<Vec<CatIndexRow>, String>,
    /// Raw search response body, decoded the way the real client decodes it.
    pub search: Result<Value, String>,
    pub fs: Result<Vec<NodeFsStats>, String>,
}

impl Default for FakeSearch {
    fn default() -> Self {
        Self {
            health: Ok(json!({"cluster_name": "secstack", "status": "green"})),
            health_delay: Duration::ZERO,
            indices: Ok(vec![
                cat_row("suricata-2024.05.01", "1200", "1.5gb"),
                cat_row("suricata-2024.05.02", "300", "512kb"),
            ]),
            search: Ok(json!({
                "hits": {"total": {"value": 1500, "relation": "eq"}},
                "aggregations": {
                    "recent_events": {"buckets": [
                        {"key_as_string": "10:00", "doc_count": 600},
                        {"key_as_string": "10:01", "doc_count": 120}
                    ]}
                }
            })),
            fs: Ok(vec![NodeFsStats {
                free_bytes: 60,
                total_bytes: 100,
            }]),
        }
    }
}

pub fn cat_row(index: &str, docs: &str, size: &str) -> CatIndexRow {
    CatIndexRow {
        index: index.into(),
        health: Some("green".into()),
        status: Some("open".into()),
        docs_count: Some(docs.into()),
        store_size: Some(size.into()),
        creation_date: None,
    }
}

#[async_trait]
impl SearchCluster for FakeSearch {
    async fn cluster_health(&self) -> DashboardResult<Value> {
        if !self.health_delay.is_zero() {
            tokio::time::sleep(self.health_delay).await;
        }
        self.health.clone().map_err(|e| search_down(&e))
    }

    async fn list_indices(&self, _pattern: &str) -> DashboardResult<Vec<CatIndexRow>> {
        self.indices.clone().map_err(|e| search_down(&e))
    }

    async fn search(&self, _index_pattern: &str, _query: Value) -> DashboardResult<SearchResponse> {
        let body = self.search.clone().map_err(|e| search_down(&e))?;
        serde_json::from_value(body).map_err(|e| search_down(&e.to_string()))
    }

    async fn node_fs_stats(&self) -> DashboardResult<Vec<NodeFsStats>> {
        self.fs.clone().map_err(|e| search_down(&e))
    }
}

pub struct FakeDns {
    pub reply: Result<Value, String>,
}

impl Default for FakeDns {
    fn default() -> Self {
        Self {
            reply: Ok(json!({"status": "enabled", "dns_queries_today": 42})),
        }
    }
}

impl FakeDns {
    fn answer(&self) -> DashboardResult<Value> {
        self.reply
            .clone()
            .map_err(|e| DashboardError::unavailable(Backend::DnsFilter, e))
    }
}

#[async_trait]
impl DnsFilter for FakeDns {
    async fn status(&self) -> DashboardResult<Value> {
        self.answer()
    }

    async fn summary(&self) -> DashboardResult<Value> {
        self.answer()
    }

    async fn query_types_over_time(&self) -> DashboardResult<Value> {
        self.answer()
    }
}

pub fn dashboard(runtime: FakeRuntime, search: FakeSearch) -> Dashboard {
    dashboard_with(Arc::new(runtime), search, FakeDns::default())
}

pub fn dashboard_with(runtime: Arc<FakeRuntime>, search: FakeSearch, dns: FakeDns) -> Dashboard {
    Dashboard::new(runtime, Arc::new(search), Arc::new(dns), settings())
}

/// The usual stack, all containers running.
pub fn stack_containers() -> Vec<ContainerSummary> {
    vec![
        container("c1", "suricata", ContainerState::Running),
        container("c2", "logstash", ContainerState::Running),
        container("c3", "opensearch", ContainerState::Running),
        container("c4", "admin-dashboard", ContainerState::Running),
        container("c5", "pihole", ContainerState::Running),
    ]
}
