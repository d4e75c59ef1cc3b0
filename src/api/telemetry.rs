use serde::Serialize;
use std::time::Duration;

/// /performance 响应体
#[derive(Debug, Serialize)]
pub struct PerformanceReport {
    pub time: String,
    pub memory: String,
    pub threads: usize,
}

pub fn snapshot(uptime: Duration) -> PerformanceReport {
    let status = std::fs::read_to_string("/proc/self/status").unwrap_or_default();
    let rss_kb = status_field(&status, "VmRSS:").unwrap_or(0);
    let threads = status_field(&status, "Threads:")
        .map(|n| n as usize)
        .unwrap_or_else(|| std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1));

    PerformanceReport {
        time: format_uptime(uptime),
        memory: format!("{:.2} MB", rss_kb as f64 / 1024.0),
        threads,
    }
}

/// HH:MM:SS.mmm
pub fn format_uptime(uptime: Duration) -> String {
    let secs = uptime.as_secs();
    format!(
        "{:02}:{:02}:{:02}.{:03}",
        secs / 3600,
        (secs / 60) % 60,
        secs % 60,
        uptime.subsec_millis()
    )
}

/// 解析 "VmRSS:\t  12345 kB" 这类行的首个数字
fn status_field(status: &str, name: &str) -> Option<u64> {
    status
        .lines()
        .find_map(|line| line.strip_prefix(name))
        .and_then(|rest| rest.split_whitespace().next())
        .and_then(|value| value.parse().ok())
}
