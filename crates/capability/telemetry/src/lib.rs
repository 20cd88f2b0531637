//! 追踪、请求 ID 与指令计数器。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 单次指令处理的追踪标识。
#[derive(Debug, Clone)]
pub struct RequestIds {
    pub request_id: String,
}

/// 指令处理计数快照。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub directives_received: u64,
    pub directives_dropped: u64,
    pub discovery_responses: u64,
    pub power_control_success: u64,
    pub power_control_failure: u64,
    pub state_reports: u64,
    pub error_responses: u64,
    pub control_latency_ms_total: u64,
    pub control_latency_ms_count: u64,
}

/// 指令处理计数器。
pub struct TelemetryMetrics {
    directives_received: AtomicU64,
    directives_dropped: AtomicU64,
    discovery_responses: AtomicU64,
    power_control_success: AtomicU64,
    power_control_failure: AtomicU64,
    state_reports: AtomicU64,
    error_responses: AtomicU64,
    control_latency_ms_total: AtomicU64,
    control_latency_ms_count: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            directives_received: AtomicU64::new(0),
            directives_dropped: AtomicU64::new(0),
            discovery_responses: AtomicU64::new(0),
            power_control_success: AtomicU64::new(0),
            power_control_failure: AtomicU64::new(0),
            state_reports: AtomicU64::new(0),
            error_responses: AtomicU64::new(0),
            control_latency_ms_total: AtomicU64::new(0),
            control_latency_ms_count: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            directives_received: self.directives_received.load(Ordering::Relaxed),
            directives_dropped: self.directives_dropped.load(Ordering::Relaxed),
            discovery_responses: self.discovery_responses.load(Ordering::Relaxed),
            power_control_success: self.power_control_success.load(Ordering::Relaxed),
            power_control_failure: self.power_control_failure.load(Ordering::Relaxed),
            state_reports: self.state_reports.load(Ordering::Relaxed),
            error_responses: self.error_responses.load(Ordering::Relaxed),
            control_latency_ms_total: self.control_latency_ms_total.load(Ordering::Relaxed),
            control_latency_ms_count: self.control_latency_ms_count.load(Ordering::Relaxed),
        }
    }
}

impl Default for TelemetryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局计数器实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成新的 request_id。
pub fn new_request_ids() -> RequestIds {
    RequestIds {
        request_id: uuid::Uuid::new_v4().to_string(),
    }
}

/// 记录收到指令次数。
pub fn record_directive_received() {
    metrics().directives_received.fetch_add(1, Ordering::Relaxed);
}

/// 记录未知指令丢弃次数。
pub fn record_directive_dropped() {
    metrics().directives_dropped.fetch_add(1, Ordering::Relaxed);
}

pub fn record_discovery_response() {
    metrics().discovery_responses.fetch_add(1, Ordering::Relaxed);
}

/// 记录电源控制成功次数（控制端返回读数）。
pub fn record_power_control_success() {
    metrics()
        .power_control_success
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录电源控制失败次数（含超时与取消）。
pub fn record_power_control_failure() {
    metrics()
        .power_control_failure
        .fetch_add(1, Ordering::Relaxed);
}

pub fn record_state_report() {
    metrics().state_reports.fetch_add(1, Ordering::Relaxed);
}

/// 记录 ErrorResponse 输出次数。
pub fn record_error_response() {
    metrics().error_responses.fetch_add(1, Ordering::Relaxed);
}

/// 记录设备控制调用耗时（毫秒）。
pub fn record_control_latency_ms(latency_ms: u64) {
    let metrics = metrics();
    metrics
        .control_latency_ms_total
        .fetch_add(latency_ms, Ordering::Relaxed);
    metrics
        .control_latency_ms_count
        .fetch_add(1, Ordering::Relaxed);
}
