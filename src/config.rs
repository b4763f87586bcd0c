use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub search: SearchConfig,
    pub dns_filter: DnsFilterConfig,
    pub containers: ContainersConfig,
    #[serde(default)]
    pub logs: LogsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    pub url: String,
    /// Index pattern holding sensor events (e.g. "suricata-*").
    pub index_pattern: String,
    /// Upper bound for every data query. The connectivity check keeps its own 5s ceiling.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize)]
pub struct DnsFilterConfig {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContainersConfig {
    /// Name substrings of the containers shown on the dashboard.
    pub monitored: Vec<String>,
    /// Name substring of the IDS sensor container.
    pub sensor: String,
    /// Name substring of the log shipper container.
    pub pipeline: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_lines")]
    pub default_lines: usize,
    #[serde(default = "default_max_log_lines")]
    pub max_lines: usize,
}

fn default_log_lines() -> usize {
    50
}

fn default_max_log_lines() -> usize {
    1000
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            default_lines: default_log_lines(),
            max_lines: default_max_log_lines(),
        }
    }
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        Self::load_from_path(&path)
    }

    pub fn load_from_path(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(!self.search.url.is_empty(), "search.url must be non-empty");
        anyhow::ensure!(
            !self.search.index_pattern.is_empty(),
            "search.index_pattern must be non-empty"
        );
        anyhow::ensure!(
            self.search.request_timeout_secs >= 5,
            "search.request_timeout_secs must be >= 5, got {}",
            self.search.request_timeout_secs
        );
        anyhow::ensure!(
            !self.dns_filter.url.is_empty(),
            "dns_filter.url must be non-empty"
        );
        anyhow::ensure!(
            !self.containers.monitored.is_empty(),
            "containers.monitored must list at least one name"
        );
        anyhow::ensure!(
            self.containers.monitored.iter().all(|n| !n.is_empty()),
            "containers.monitored must not contain empty names"
        );
        anyhow::ensure!(
            !self.containers.sensor.is_empty(),
            "containers.sensor must be non-empty"
        );
        anyhow::ensure!(
            !self.containers.pipeline.is_empty(),
            "containers.pipeline must be non-empty"
        );
        anyhow::ensure!(
            self.logs.max_lines > 0,
            "logs.max_lines must be > 0, got {}",
            self.logs.max_lines
        );
        anyhow::ensure!(
            self.logs.default_lines > 0 && self.logs.default_lines <= self.logs.max_lines,
            "logs.default_lines must be between 1 and logs.max_lines, got {}",
            self.logs.default_lines
        );
        Ok(())
    }
}
