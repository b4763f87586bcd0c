// Dashboard core: injected backend clients and the read-only operations built on them.

mod cluster;
mod containers;
mod settle;

pub use cluster::stats_query;
pub use containers::assemble_snapshot;
pub use settle::{Settled, settle};

use crate::config::AppConfig;
use crate::dns_repo::DnsFilter;
use crate::docker_repo::{ContainerRuntime, clean_log_text};
use crate::error::{DashboardError, DashboardResult};
use crate::search_repo::SearchCluster;
use std::sync::Arc;

/// Names and limits the core operations need from configuration.
#[derive(Debug, Clone)]
pub struct DashboardSettings {
    pub index_pattern: String,
    pub monitored: Vec<String>,
    pub sensor: String,
    pub pipeline: String,
    pub default_log_lines: usize,
    pub max_log_lines: usize,
}

impl From<&AppConfig> for DashboardSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            index_pattern: config.search.index_pattern.clone(),
            monitored: config.containers.monitored.clone(),
            sensor: config.containers.sensor.clone(),
            pipeline: config.containers.pipeline.clone(),
            default_log_lines: config.logs.default_lines,
            max_log_lines: config.logs.max_lines,
        }
    }
}

impl DashboardSettings {
    /// Requested line count, defaulted and capped.
    pub fn log_lines(&self, requested: Option<usize>) -> usize {
        requested
            .filter(|n| *n > 0)
            .unwrap_or(self.default_log_lines)
            .min(self.max_log_lines)
    }
}

/// Holds no state between calls; every operation polls the backends afresh.
#[derive(Clone)]
pub struct Dashboard {
    pub(crate) runtime: Arc<dyn ContainerRuntime>,
    pub(crate) search: Arc<dyn SearchCluster>,
    pub(crate) dns: Arc<dyn DnsFilter>,
    pub(crate) settings: DashboardSettings,
}

impl Dashboard {
    pub fn new(
        runtime: Arc<dyn ContainerRuntime>,
        search: Arc<dyn SearchCluster>,
        dns: Arc<dyn DnsFilter>,
        settings: DashboardSettings,
    ) -> Self {
        Self {
            runtime,
            search,
            dns,
            settings,
        }
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    /// Plain-text tail of the first container whose name contains `service`.
    pub async fn get_logs(&self, service: &str, max_lines: usize) -> DashboardResult<String> {
        let containers = self.runtime.list_all().await?;
        let container = containers
            .iter()
            .find(|c| c.name_contains(service))
            .ok_or_else(|| DashboardError::NotFound(service.to_string()))?;
        let lines = max_lines.min(self.settings.max_log_lines);
        let raw = self.runtime.tail_logs(&container.id, lines).await?;
        Ok(clean_log_text(&raw))
    }

    pub async fn cluster_health(&self) -> DashboardResult<serde_json::Value> {
        self.search.cluster_health().await
    }

    pub async fn indices(&self) -> DashboardResult<Vec<crate::models::CatIndexRow>> {
        self.search.list_indices(&self.settings.index_pattern).await
    }

    pub async fn dns_status(&self) -> DashboardResult<serde_json::Value> {
        self.dns.status().await
    }

    pub async fn dns_summary(&self) -> DashboardResult<serde_json::Value> {
        self.dns.summary().await
    }

    pub async fn dns_query_types(&self) -> DashboardResult<serde_json::Value> {
        self.dns.query_types_over_time().await
    }
}

/// "suricata" -> "Suricata", for check names and messages.
pub(crate) fn label(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
