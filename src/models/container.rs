// Container runtime models

use serde::{Deserialize, Serialize};
use std::fmt;

/// Docker container state; serializes to lowercase JSON (e.g. "running").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerState {
    Created,
    Running,
    Paused,
    Restarting,
    Removing,
    Exited,
    Dead,
    #[serde(other)]
    Unknown,
}

impl ContainerState {
    /// Parse from Docker API state string (e.g. "running", "exited").
    pub fn from_docker(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "created" => ContainerState::Created,
            "running" => ContainerState::Running,
            "paused" => ContainerState::Paused,
            "restarting" => ContainerState::Restarting,
            "removing" => ContainerState::Removing,
            "exited" => ContainerState::Exited,
            "dead" => ContainerState::Dead,
            _ => ContainerState::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerState::Created => "created",
            ContainerState::Running => "running",
            ContainerState::Paused => "paused",
            ContainerState::Restarting => "restarting",
            ContainerState::Removing => "removing",
            ContainerState::Exited => "exited",
            ContainerState::Dead => "dead",
            ContainerState::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ContainerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the runtime's container listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerSummary {
    pub id: String,
    /// Names as reported by the runtime, usually with a leading '/'.
    pub names: Vec<String>,
    pub state: ContainerState,
    /// Creation time, unix seconds.
    pub created: i64,
}

impl ContainerSummary {
    pub fn display_name(&self) -> String {
        self.names
            .first()
            .map(|n| n.trim_start_matches('/').to_string())
            .unwrap_or_else(|| self.id.clone())
    }

    pub fn name_contains(&self, needle: &str) -> bool {
        self.names.iter().any(|n| n.contains(needle))
    }
}

/// Lifecycle metadata from an inspect call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContainerLifecycle {
    pub restart_count: i64,
    pub started_at: Option<String>,
    pub exit_code: Option<i64>,
    pub error: Option<String>,
}

/// Cumulative CPU counters at one instant (nanoseconds).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuCounters {
    pub total_usage: u64,
    pub system_usage: u64,
}

/// One-shot stats reading: the runtime supplies the current and previous
/// CPU counters together, so the pair is only meaningful as a unit.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatsReading {
    pub current: CpuCounters,
    pub previous: CpuCounters,
    pub online_cpus: u32,
    pub memory_used_bytes: u64,
    pub memory_limit_bytes: u64,
    pub network_rx_bytes: u64,
    pub network_tx_bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourceSample {
    pub cpu_percent: f64,
    pub memory_used_bytes: u64,
    pub memory_limit_bytes: u64,
    pub network_rx_bytes: u64,
    pub network_tx_bytes: u64,
}

/// Per-poll view of one monitored container. Resource fields are flattened
/// into the JSON object and are either all present or all absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerSnapshot {
    pub name: String,
    pub status: ContainerState,
    pub created: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restart_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_started: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub resources: Option<ResourceSample>,
}
