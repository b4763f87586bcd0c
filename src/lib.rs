// Library for tests to access modules

pub mod aggregator;
pub mod config;
pub mod dns_repo;
pub mod docker_repo;
pub mod error;
pub mod metrics;
pub mod models;
pub mod routes;
pub mod search_repo;
pub mod validation;
pub mod version;
