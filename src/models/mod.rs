// Domain models

mod cluster;
mod container;
mod validation;

pub use cluster::{
    CatIndexRow, HistogramBucket, HitsTotal, IndexSummary, NodeFsStats, SearchHits,
    SearchResponse, StatsSummary,
};
pub use container::{
    ContainerLifecycle, ContainerSnapshot, ContainerState, ContainerSummary, CpuCounters,
    ResourceSample, StatsReading,
};
pub use validation::{CheckResult, CheckStatus, ValidationReport};
