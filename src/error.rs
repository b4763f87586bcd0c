// Error taxonomy shared by backend clients, the aggregator and the routes

use std::fmt;
use thiserror::Error;

/// External collaborator a failure is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    ContainerRuntime,
    SearchCluster,
    DnsFilter,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Backend::ContainerRuntime => "container runtime",
            Backend::SearchCluster => "search cluster",
            Backend::DnsFilter => "DNS filter",
        })
    }
}

/// Whole-call failures. Malformed sizes and counts never reach this type:
/// they are degraded to zero where they are parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    #[error("{backend} unavailable: {message}")]
    BackendUnavailable { backend: Backend, message: String },
    #[error("Container {0} not found")]
    NotFound(String),
}

impl DashboardError {
    pub fn unavailable(backend: Backend, err: impl fmt::Display) -> Self {
        DashboardError::BackendUnavailable {
            backend,
            message: err.to_string(),
        }
    }

    /// Stable classification string used in error payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            DashboardError::BackendUnavailable { .. } => "backend_unavailable",
            DashboardError::NotFound(_) => "not_found",
        }
    }

    /// Underlying backend text without the backend label.
    pub fn detail(&self) -> &str {
        match self {
            DashboardError::BackendUnavailable { message, .. } => message,
            DashboardError::NotFound(name) => name,
        }
    }
}

pub type DashboardResult<T> = Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_message_names_backend() {
        let e = DashboardError::unavailable(Backend::SearchCluster, "connection refused");
        assert_eq!(e.kind(), "backend_unavailable");
        assert_eq!(e.detail(), "connection refused");
        assert_eq!(
            e.to_string(),
            "search cluster unavailable: connection refused"
        );
    }

    #[test]
    fn not_found_kind() {
        let e = DashboardError::NotFound("suricata".into());
        assert_eq!(e.kind(), "not_found");
        assert_eq!(e.to_string(), "Container suricata not found");
    }
}
