// Derived metrics: pure conversions from raw backend values. No I/O.

use crate::models::{CheckStatus, CpuCounters, HistogramBucket};

/// Container CPU utilisation in percent of one core, scaled by online CPUs.
///
/// Returns 0 unless both the container and the system counters advanced,
/// which covers counter resets and a first read without a baseline.
pub fn cpu_percent(current: CpuCounters, previous: CpuCounters, online_cpus: u32) -> f64 {
    let cpu_delta = current.total_usage as i128 - previous.total_usage as i128;
    let sys_delta = current.system_usage as i128 - previous.system_usage as i128;
    if cpu_delta > 0 && sys_delta > 0 {
        (cpu_delta as f64 / sys_delta as f64) * online_cpus as f64 * 100.0
    } else {
        0.0
    }
}

/// Parse a human byte size such as `"1.5gb"`, `"512kb"` or `"230b"` into bytes.
///
/// Units are powers of 1024 and case-insensitive; a bare number is bytes.
/// Anything unparsable yields 0 so that size totals stay best-effort.
pub fn parse_byte_size(raw: &str) -> f64 {
    let s = raw.trim().to_ascii_lowercase();
    let split = s
        .find(|c: char| c.is_ascii_alphabetic())
        .unwrap_or(s.len());
    let (number, unit) = s.split_at(split);
    let multiplier: f64 = match unit {
        "" | "b" => 1.0,
        "k" | "kb" => 1024.0,
        "m" | "mb" => 1024.0 * 1024.0,
        "g" | "gb" => 1024.0 * 1024.0 * 1024.0,
        "t" | "tb" => 1024.0 * 1024.0 * 1024.0 * 1024.0,
        _ => return 0.0,
    };
    match number.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => v * multiplier,
        _ => 0.0,
    }
}

/// Approximate ingestion rate in documents/second, rendered for display.
///
/// Uses the last one-minute bucket divided by 60. That bucket may still be
/// filling, so the figure under-reports during the current minute.
/// Empty input renders as `"0"`, anything else with two decimals.
pub fn ingestion_rate(buckets: &[HistogramBucket]) -> String {
    match buckets.last() {
        Some(last) => format!("{:.2}", last.doc_count as f64 / 60.0),
        None => "0".to_string(),
    }
}

/// Free disk space as a percentage of total; `None` when total is 0.
pub fn disk_free_percent(free_bytes: u64, total_bytes: u64) -> Option<f64> {
    if total_bytes == 0 {
        return None;
    }
    Some(free_bytes as f64 * 100.0 / total_bytes as f64)
}

/// pass above 15%, warning above 5% up to 15%, fail at or below 5%.
pub fn classify_disk_free(free_percent: f64) -> CheckStatus {
    if free_percent > 15.0 {
        CheckStatus::Pass
    } else if free_percent > 5.0 {
        CheckStatus::Warning
    } else {
        CheckStatus::Fail
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counters(total_usage: u64, system_usage: u64) -> CpuCounters {
        CpuCounters {
            total_usage,
            system_usage,
        }
    }

    fn bucket(doc_count: u64) -> HistogramBucket {
        HistogramBucket {
            key_as_string: None,
            doc_count,
        }
    }

    #[test]
    fn cpu_percent_equal_deltas_single_cpu_is_100() {
        let out = cpu_percent(counters(2_000, 20_000), counters(1_000, 19_000), 1);
        assert_eq!(out, 100.0);
    }

    #[test]
    fn cpu_percent_scales_by_online_cpus() {
        let out = cpu_percent(
            counters(100_000_000, 1_000_000_000),
            counters(50_000_000, 500_000_000),
            2,
        );
        assert!((out - 20.0).abs() < 1e-9);
    }

    #[test]
    fn cpu_percent_zero_when_either_delta_not_positive() {
        // no system progress
        assert_eq!(cpu_percent(counters(200, 500), counters(100, 500), 4), 0.0);
        // container idle
        assert_eq!(cpu_percent(counters(100, 900), counters(100, 500), 4), 0.0);
        // counter reset
        assert_eq!(cpu_percent(counters(10, 900), counters(100, 500), 4), 0.0);
        assert_eq!(cpu_percent(counters(200, 100), counters(100, 500), 4), 0.0);
        // identical readings
        assert_eq!(cpu_percent(counters(100, 500), counters(100, 500), 1), 0.0);
    }

    #[test]
    fn parse_byte_size_units() {
        assert_eq!(parse_byte_size("1.5gb"), 1.5 * 1024.0 * 1024.0 * 1024.0);
        assert_eq!(parse_byte_size("512kb"), 512.0 * 1024.0);
        assert_eq!(parse_byte_size("230b"), 230.0);
        assert_eq!(parse_byte_size("2mb"), 2.0 * 1024.0 * 1024.0);
        assert_eq!(parse_byte_size("1tb"), 1024.0 * 1024.0 * 1024.0 * 1024.0);
    }

    #[test]
    fn parse_byte_size_is_case_insensitive() {
        assert_eq!(parse_byte_size("3.2MB"), parse_byte_size("3.2mb"));
        assert_eq!(parse_byte_size(" 10Kb "), 10.0 * 1024.0);
    }

    #[test]
    fn parse_byte_size_garbage_is_zero() {
        assert_eq!(parse_byte_size("???"), 0.0);
        assert_eq!(parse_byte_size(""), 0.0);
        assert_eq!(parse_byte_size("gb"), 0.0);
        assert_eq!(parse_byte_size("12xb"), 0.0);
        assert_eq!(parse_byte_size("-4kb"), 0.0);
        assert_eq!(parse_byte_size("1.5pb"), 0.0);
    }

    #[test]
    fn ingestion_rate_empty_is_zero() {
        assert_eq!(ingestion_rate(&[]), "0");
    }

    #[test]
    fn ingestion_rate_uses_last_bucket() {
        assert_eq!(ingestion_rate(&[bucket(120)]), "2.00");
        assert_eq!(ingestion_rate(&[bucket(6000), bucket(30)]), "0.50");
    }

    #[test]
    fn disk_free_percent_guards_zero_total() {
        assert_eq!(disk_free_percent(0, 0), None);
        assert_eq!(disk_free_percent(25, 100), Some(25.0));
    }

    #[test]
    fn classify_disk_free_boundaries() {
        assert_eq!(classify_disk_free(15.0), CheckStatus::Warning);
        assert_eq!(classify_disk_free(15.1), CheckStatus::Pass);
        assert_eq!(classify_disk_free(5.0), CheckStatus::Fail);
        assert_eq!(classify_disk_free(5.1), CheckStatus::Warning);
        assert_eq!(classify_disk_free(0.0), CheckStatus::Fail);
    }
}
