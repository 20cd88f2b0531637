use crate::{ControlError, DeviceControl};
use bridge_telemetry::record_control_latency_ms;
use domain::{DeviceTarget, PowerAction, PowerReading};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// 带超时与取消的设备控制调用。
#[derive(Clone)]
pub struct GuardedControl {
    inner: Arc<dyn DeviceControl>,
    timeout: Duration,
}

impl GuardedControl {
    /// 超时必须大于零。
    pub fn new(inner: Arc<dyn DeviceControl>, timeout: Duration) -> Self {
        let timeout = if timeout.is_zero() {
            Duration::from_millis(1)
        } else {
            timeout
        };
        Self { inner, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn set_power(
        &self,
        target: &DeviceTarget,
        action: PowerAction,
        cancel: &CancellationToken,
    ) -> Result<PowerReading, ControlError> {
        self.run(target, "set_power", cancel, self.inner.set_power(target, action))
            .await
    }

    pub async fn get_power(
        &self,
        target: &DeviceTarget,
        cancel: &CancellationToken,
    ) -> Result<PowerReading, ControlError> {
        self.run(target, "get_power", cancel, self.inner.get_power(target))
            .await
    }

    async fn run<F>(
        &self,
        target: &DeviceTarget,
        operation: &'static str,
        cancel: &CancellationToken,
        call: F,
    ) -> Result<PowerReading, ControlError>
    where
        F: Future<Output = Result<PowerReading, ControlError>>,
    {
        let started_at = Instant::now();
        let timeout_ms = self.timeout.as_millis() as u64;
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ControlError::Cancelled),
            outcome = tokio::time::timeout(self.timeout, call) => match outcome {
                Ok(result) => result,
                Err(_) => Err(ControlError::Timeout(timeout_ms)),
            },
        };
        record_control_latency_ms(started_at.elapsed().as_millis() as u64);
        if let Err(err) = &result {
            warn!(
                target: "bridge.control",
                endpoint_id = %target.endpoint_id,
                operation = operation,
                error = %err,
                "control_call_failed"
            );
        }
        result
    }
}
