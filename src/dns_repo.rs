// DNS filter (Pi-hole) client: three passthrough GETs

use crate::error::{Backend, DashboardError, DashboardResult};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::instrument;

#[async_trait]
pub trait DnsFilter: Send + Sync {
    async fn status(&self) -> DashboardResult<serde_json::Value>;
    async fn summary(&self) -> DashboardResult<serde_json::Value>;
    async fn query_types_over_time(&self) -> DashboardResult<serde_json::Value>;
}

pub struct PiholeRepo {
    client: Client,
    api_url: String,
}

impl PiholeRepo {
    pub fn new(base_url: &str, request_timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(crate::version::user_agent())
            .timeout(request_timeout)
            .build()?;
        Ok(Self {
            client,
            api_url: format!("{}/admin/api.php", base_url.trim_end_matches('/')),
        })
    }

    async fn get(&self, query: Option<&str>) -> DashboardResult<serde_json::Value> {
        let url = match query {
            Some(q) => format!("{}?{}", self.api_url, q),
            None => self.api_url.clone(),
        };
        self.client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| DashboardError::unavailable(Backend::DnsFilter, e))?
            .json()
            .await
            .map_err(|e| DashboardError::unavailable(Backend::DnsFilter, e))
    }
}

#[async_trait]
impl DnsFilter for PiholeRepo {
    #[instrument(skip(self), fields(repo = "pihole", operation = "status"))]
    async fn status(&self) -> DashboardResult<serde_json::Value> {
        self.get(None).await
    }

    #[instrument(skip(self), fields(repo = "pihole", operation = "summary"))]
    async fn summary(&self) -> DashboardResult<serde_json::Value> {
        self.get(Some("summary")).await
    }

    #[instrument(skip(self), fields(repo = "pihole", operation = "query_types_over_time"))]
    async fn query_types_over_time(&self) -> DashboardResult<serde_json::Value> {
        self.get(Some("queryTypesOverTime")).await
    }
}
