// Per-container fan-out: inspect + stats for every identity, all concurrently.

use super::{Dashboard, Settled, settle};
use crate::error::DashboardResult;
use crate::metrics::cpu_percent;
use crate::models::{
    ContainerLifecycle, ContainerSnapshot, ContainerSummary, ResourceSample, StatsReading,
};
use futures_util::future::join_all;
use tracing::debug;

impl From<&StatsReading> for ResourceSample {
    fn from(r: &StatsReading) -> Self {
        Self {
            cpu_percent: cpu_percent(r.current, r.previous, r.online_cpus),
            memory_used_bytes: r.memory_used_bytes,
            memory_limit_bytes: r.memory_limit_bytes,
            network_rx_bytes: r.network_rx_bytes,
            network_tx_bytes: r.network_tx_bytes,
        }
    }
}

/// Build one snapshot from the settled inspect and stats calls. Backend
/// failures land in `error`; otherwise `error` carries the container's own
/// last error, if any.
pub fn assemble_snapshot(
    container: &ContainerSummary,
    lifecycle: Settled<ContainerLifecycle>,
    reading: Settled<StatsReading>,
) -> ContainerSnapshot {
    let mut problems = Vec::new();
    if let Some(reason) = reading.degraded_reason() {
        problems.push(format!("Stats unavailable: {reason}"));
    }
    if let Some(reason) = lifecycle.degraded_reason() {
        problems.push(format!("Inspect unavailable: {reason}"));
    }

    let lifecycle = lifecycle.ready();
    let error = if problems.is_empty() {
        lifecycle.as_ref().and_then(|l| l.error.clone())
    } else {
        Some(problems.join("; "))
    };

    ContainerSnapshot {
        name: container.display_name(),
        status: container.state,
        created: container.created,
        restart_count: lifecycle.as_ref().map(|l| l.restart_count),
        last_started: lifecycle.as_ref().and_then(|l| l.started_at.clone()),
        exit_code: lifecycle.as_ref().and_then(|l| l.exit_code),
        error,
        resources: reading.ready().as_ref().map(ResourceSample::from),
    }
}

impl Dashboard {
    /// Snapshots of the allowlisted containers. Fails only if the listing itself fails.
    pub async fn get_containers(&self) -> DashboardResult<Vec<ContainerSnapshot>> {
        let containers = self.runtime.list_monitored(&self.settings.monitored).await?;
        Ok(self.snapshot_containers(&containers).await)
    }

    /// One snapshot per input identity, in input order. Never fails: a failed
    /// sub-call only degrades that identity's snapshot.
    pub async fn snapshot_containers(
        &self,
        containers: &[ContainerSummary],
    ) -> Vec<ContainerSnapshot> {
        let snapshots = join_all(containers.iter().map(|c| self.snapshot_one(c))).await;
        debug!(
            operation = "snapshot_containers",
            containers_count = snapshots.len(),
            "container snapshots collected"
        );
        snapshots
    }

    async fn snapshot_one(&self, container: &ContainerSummary) -> ContainerSnapshot {
        let target = container.display_name();
        let (lifecycle, reading) = tokio::join!(
            settle("inspect", &target, self.runtime.inspect(&container.id)),
            settle("stats_once", &target, self.runtime.stats_once(&container.id)),
        );
        assemble_snapshot(container, lifecycle, reading)
    }
}
