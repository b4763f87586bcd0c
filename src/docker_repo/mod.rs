// Container runtime client: trait seam + Docker implementation via bollard

mod logs;
mod stats;

pub use logs::{clean_log_text, demultiplex};

use crate::error::{Backend, DashboardError, DashboardResult};
use crate::models::{ContainerLifecycle, ContainerState, ContainerSummary, StatsReading};
use async_trait::async_trait;
use bollard::Docker;
use bollard::query_parameters::{
    InspectContainerOptions, ListContainersOptions, LogsOptions, StatsOptions,
};
use bytes::{Bytes, BytesMut};
use futures_util::StreamExt;
use tracing::instrument;

/// Read-only query surface of the container runtime. Implementations make a
/// single attempt per call; retry policy belongs to the caller.
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// All containers, running or not.
    async fn list_all(&self) -> DashboardResult<Vec<ContainerSummary>>;

    async fn inspect(&self, id: &str) -> DashboardResult<ContainerLifecycle>;

    /// One non-streaming stats read carrying both current and previous counters.
    async fn stats_once(&self, id: &str) -> DashboardResult<StatsReading>;

    /// Last `max_lines` of stdout+stderr. `DockerRepo` returns demultiplexed
    /// payloads; implementations handing back raw attach bytes may keep the
    /// 8-byte frame headers.
    async fn tail_logs(&self, id: &str, max_lines: usize) -> DashboardResult<Bytes>;

    /// Containers whose name contains any of the allowlisted substrings,
    /// in listing order.
    async fn list_monitored(&self, allowlist: &[String]) -> DashboardResult<Vec<ContainerSummary>> {
        let all = self.list_all().await?;
        Ok(all
            .into_iter()
            .filter(|c| allowlist.iter().any(|needle| c.name_contains(needle)))
            .collect())
    }
}

fn unavailable(err: impl std::fmt::Display) -> DashboardError {
    DashboardError::unavailable(Backend::ContainerRuntime, err)
}

pub struct DockerRepo {
    docker: Docker,
}

impl DockerRepo {
    pub fn connect() -> anyhow::Result<Self> {
        let docker = Docker::connect_with_unix_defaults()?;
        Ok(Self { docker })
    }
}

#[async_trait]
impl ContainerRuntime for DockerRepo {
    #[instrument(skip(self), fields(repo = "docker", operation = "list_all"))]
    async fn list_all(&self) -> DashboardResult<Vec<ContainerSummary>> {
        let options = ListContainersOptions {
            all: true,
            ..Default::default()
        };
        let containers = self
            .docker
            .list_containers(Some(options))
            .await
            .map_err(unavailable)?;

        Ok(containers
            .into_iter()
            .map(|c| {
                let state = c
                    .state
                    .map(|s| ContainerState::from_docker(&s.to_string()))
                    .unwrap_or(ContainerState::Unknown);
                ContainerSummary {
                    id: c.id.unwrap_or_default(),
                    names: c.names.unwrap_or_default(),
                    state,
                    created: c.created.unwrap_or(0),
                }
            })
            .collect())
    }

    #[instrument(skip(self), fields(repo = "docker", operation = "inspect"))]
    async fn inspect(&self, id: &str) -> DashboardResult<ContainerLifecycle> {
        let info = self
            .docker
            .inspect_container(id, None::<InspectContainerOptions>)
            .await
            .map_err(unavailable)?;
        let state = info.state.unwrap_or_default();
        Ok(ContainerLifecycle {
            restart_count: info.restart_count.unwrap_or(0),
            started_at: state.started_at,
            exit_code: state.exit_code,
            error: state.error.filter(|e| !e.is_empty()),
        })
    }

    #[instrument(skip(self), fields(repo = "docker", operation = "stats_once"))]
    async fn stats_once(&self, id: &str) -> DashboardResult<StatsReading> {
        let options = StatsOptions {
            stream: false,
            ..Default::default()
        };
        let mut stream = self.docker.stats(id, Some(options));
        match stream.next().await {
            Some(Ok(s)) => stats::reading_from_response(&s)
                .ok_or_else(|| unavailable("stats response missing cpu counters")),
            Some(Err(e)) => Err(unavailable(e)),
            None => Err(unavailable("stats stream ended without a sample")),
        }
    }

    #[instrument(skip(self), fields(repo = "docker", operation = "tail_logs"))]
    async fn tail_logs(&self, id: &str, max_lines: usize) -> DashboardResult<Bytes> {
        let options = LogsOptions {
            stdout: true,
            stderr: true,
            timestamps: true,
            tail: max_lines.to_string(),
            ..Default::default()
        };
        let mut stream = self.docker.logs(id, Some(options));
        let mut buf = BytesMut::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(unavailable)?;
            buf.extend_from_slice(&chunk.into_bytes());
        }
        Ok(buf.freeze())
    }
}
