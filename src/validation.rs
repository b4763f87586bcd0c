// Validation report: five independent checks assembled in a fixed order.

use crate::aggregator::{Dashboard, Settled, label, settle};
use crate::error::{Backend, DashboardError};
use crate::metrics::{classify_disk_free, disk_free_percent};
use crate::models::{
    CheckResult, CheckStatus, ContainerState, ContainerSummary, NodeFsStats, ValidationReport,
};
use serde_json::json;
use std::time::Duration;
use tokio::time::timeout;

/// Ceiling for the connectivity check. Data queries are bounded separately by the client.
pub const CONNECTIVITY_TIMEOUT: Duration = Duration::from_secs(5);

pub const CONNECTIVITY_CHECK: &str = "OpenSearch Connection";
pub const DATA_FLOW_CHECK: &str = "Data Pipeline";
pub const CAPACITY_CHECK: &str = "Disk Space";

impl Dashboard {
    /// Runs every check exactly once. Checks execute concurrently; the report
    /// order is connectivity, sensor, pipeline, data flow, capacity. A failing
    /// check only affects its own entry.
    pub async fn get_validation_report(&self) -> ValidationReport {
        let (connectivity, listing, data_flow, capacity) = tokio::join!(
            self.check_connectivity(),
            settle("list_all", "validation", self.runtime.list_all()),
            self.check_data_flow(),
            self.check_capacity(),
        );
        let sensor = check_liveness(&listing, &self.settings.sensor, CheckStatus::Fail);
        let pipeline = check_liveness(&listing, &self.settings.pipeline, CheckStatus::Warning);

        ValidationReport {
            checks: vec![connectivity, sensor, pipeline, data_flow, capacity],
        }
    }

    async fn check_connectivity(&self) -> CheckResult {
        let probe = async {
            match timeout(CONNECTIVITY_TIMEOUT, self.search.cluster_health()).await {
                Ok(result) => result,
                Err(_) => Err(DashboardError::unavailable(
                    Backend::SearchCluster,
                    format!("timeout of {}ms exceeded", CONNECTIVITY_TIMEOUT.as_millis()),
                )),
            }
        };
        match settle("cluster_health", "validation", probe).await {
            Settled::Ready(_) => {
                CheckResult::pass(CONNECTIVITY_CHECK, "Successfully connected to OpenSearch")
            }
            Settled::Degraded(reason) => CheckResult::fail(
                CONNECTIVITY_CHECK,
                format!("Cannot connect to OpenSearch: {reason}"),
            ),
        }
    }

    async fn check_data_flow(&self) -> CheckResult {
        let pattern = &self.settings.index_pattern;
        let sensor = label(&self.settings.sensor);
        let query = json!({ "size": 1, "query": { "match_all": {} } });
        match settle("search", pattern, self.search.search(pattern, query)).await {
            Settled::Ready(resp) if resp.total_hits() > 0 => CheckResult::pass(
                DATA_FLOW_CHECK,
                format!("Found {} documents in {sensor} indices", resp.total_hits()),
            ),
            Settled::Ready(_) => CheckResult::warning(
                DATA_FLOW_CHECK,
                format!("No data found in {sensor} indices - check if logs are being generated"),
            ),
            Settled::Degraded(reason) => CheckResult::warning(
                DATA_FLOW_CHECK,
                format!("Cannot verify data pipeline: {reason}"),
            ),
        }
    }

    async fn check_capacity(&self) -> CheckResult {
        match settle("node_fs_stats", "validation", self.search.node_fs_stats()).await {
            Settled::Ready(nodes) => capacity_result(&nodes),
            Settled::Degraded(reason) => CheckResult::warning(
                CAPACITY_CHECK,
                format!("Cannot check disk space: {reason}"),
            ),
        }
    }
}

/// Sensor and pipeline checks share this shape; `not_running` is the status
/// used when the container is missing or in any state other than running.
fn check_liveness(
    listing: &Settled<Vec<ContainerSummary>>,
    needle: &str,
    not_running: CheckStatus,
) -> CheckResult {
    let who = label(needle);
    let name = format!("{who} Status");
    match listing {
        Settled::Degraded(reason) => {
            CheckResult::fail(&name, format!("Cannot check {who} status: {reason}"))
        }
        Settled::Ready(containers) => match containers.iter().find(|c| c.name_contains(needle)) {
            Some(c) if c.state == ContainerState::Running => {
                CheckResult::pass(&name, format!("{who} is running"))
            }
            Some(c) => CheckResult::new(&name, not_running, format!("{who} is {}", c.state)),
            None => CheckResult::new(&name, not_running, format!("{who} container not found")),
        },
    }
}

/// Classifies the most constrained node.
fn capacity_result(nodes: &[NodeFsStats]) -> CheckResult {
    let worst = nodes
        .iter()
        .filter_map(|n| disk_free_percent(n.free_bytes, n.total_bytes))
        .min_by(|a, b| a.total_cmp(b));
    let Some(free) = worst else {
        return CheckResult::warning(
            CAPACITY_CHECK,
            "Cannot check disk space: no filesystem stats reported",
        );
    };
    match classify_disk_free(free) {
        CheckStatus::Pass => {
            CheckResult::pass(CAPACITY_CHECK, format!("{free:.1}% free space available"))
        }
        CheckStatus::Warning => CheckResult::warning(
            CAPACITY_CHECK,
            format!("Only {free:.1}% free space remaining"),
        ),
        CheckStatus::Fail => CheckResult::fail(
            CAPACITY_CHECK,
            format!("Critical: Only {free:.1}% free space remaining"),
        ),
    }
}
