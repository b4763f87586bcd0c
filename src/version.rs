// Build metadata baked in from Cargo.toml

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const NAME: &str = env!("CARGO_PKG_NAME");

/// User-Agent sent to the search cluster and DNS filter.
pub fn user_agent() -> String {
    format!("{NAME}/{VERSION}")
}
