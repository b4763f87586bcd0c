use anyhow::Result;
use secstack_dashboard::*;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(s) => s,
                Err(_) => {
                    let _ = tokio::signal::ctrl_c().await;
                    return;
                }
            };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    tracing::info!("Received shutdown signal");
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let app_config = config::AppConfig::load()?;
    let request_timeout = Duration::from_secs(app_config.search.request_timeout_secs);

    let runtime = Arc::new(docker_repo::DockerRepo::connect()?);
    let search = Arc::new(search_repo::OpenSearchRepo::new(
        &app_config.search.url,
        request_timeout,
    )?);
    let dns = Arc::new(dns_repo::PiholeRepo::new(
        &app_config.dns_filter.url,
        request_timeout,
    )?);
    let dashboard = Arc::new(aggregator::Dashboard::new(
        runtime,
        search,
        dns,
        aggregator::DashboardSettings::from(&app_config),
    ));
    tracing::info!(
        search_url = %app_config.search.url,
        index_pattern = %app_config.search.index_pattern,
        monitored = ?app_config.containers.monitored,
        "backends configured"
    );

    let app = routes::app(dashboard);
    let addr = format!("{}:{}", app_config.server.host, app_config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
