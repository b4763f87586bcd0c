// Convert a raw Docker stats API response into a counter pair reading.

use crate::models::{CpuCounters, StatsReading};
use bollard::models::ContainerStatsResponse;

/// Extract the current/previous CPU counters plus memory and network totals.
/// Returns `None` when either CPU block is missing. When the previous block is
/// present but carries no baseline (no usage counters or a zero system
/// counter), the previous counters equal the current ones so the CPU
/// percentage comes out as 0. Exposed for unit tests.
pub(crate) fn reading_from_response(s: &ContainerStatsResponse) -> Option<StatsReading> {
    let cpu_stats = s.cpu_stats.as_ref()?;
    let precpu_stats = s.precpu_stats.as_ref()?;

    let cpu_usage = cpu_stats.cpu_usage.as_ref()?;

    let current = CpuCounters {
        total_usage: cpu_usage.total_usage.unwrap_or(0),
        system_usage: cpu_stats.system_cpu_usage.unwrap_or(0),
    };
    let baseline = precpu_stats
        .cpu_usage
        .as_ref()
        .and_then(|u| u.total_usage)
        .zip(precpu_stats.system_cpu_usage.filter(|n| *n > 0));
    let previous = match baseline {
        Some((total_usage, system_usage)) => CpuCounters {
            total_usage,
            system_usage,
        },
        None => current,
    };
    let online_cpus = cpu_stats
        .online_cpus
        .filter(|n| *n > 0)
        .or_else(|| {
            cpu_usage
                .percpu_usage
                .as_ref()
                .map(|p| p.len() as u32)
                .filter(|n| *n > 0)
        })
        .unwrap_or(1);

    let mem_usage = s.memory_stats.as_ref().and_then(|m| m.usage).unwrap_or(0);
    let mem_limit = s.memory_stats.as_ref().and_then(|m| m.limit).unwrap_or(0);

    let (network_rx, network_tx) = s.networks.as_ref().map_or((0u64, 0u64), |n| {
        n.values().fold((0u64, 0u64), |(rx, tx), v| {
            (rx + v.rx_bytes.unwrap_or(0), tx + v.tx_bytes.unwrap_or(0))
        })
    });

    Some(StatsReading {
        current,
        previous,
        online_cpus,
        memory_used_bytes: mem_usage,
        memory_limit_bytes: mem_limit,
        network_rx_bytes: network_rx,
        network_tx_bytes: network_tx,
    })
}
