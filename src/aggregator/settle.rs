// Settle-independently combinator for fan-out items.

use crate::error::DashboardResult;
use std::future::Future;
use tracing::warn;

/// Outcome of one fan-out call: the value, or the backend text explaining why
/// the dependent field is degraded.
#[derive(Debug, Clone, PartialEq)]
pub enum Settled<T> {
    Ready(T),
    Degraded(String),
}

impl<T> Settled<T> {
    pub fn ready(self) -> Option<T> {
        match self {
            Settled::Ready(v) => Some(v),
            Settled::Degraded(_) => None,
        }
    }

    pub fn degraded_reason(&self) -> Option<&str> {
        match self {
            Settled::Ready(_) => None,
            Settled::Degraded(reason) => Some(reason),
        }
    }
}

/// Await `fut` and convert a failure into [`Settled::Degraded`] instead of
/// propagating it. Every degraded call is logged once here.
pub async fn settle<T, F>(operation: &'static str, item: &str, fut: F) -> Settled<T>
where
    F: Future<Output = DashboardResult<T>>,
{
    match fut.await {
        Ok(v) => Settled::Ready(v),
        Err(e) => {
            warn!(operation, item, error = %e, "backend call degraded");
            Settled::Degraded(e.detail().to_string())
        }
    }
}
