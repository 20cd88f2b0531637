//! 设备控制能力：后端设备云的窄接口与调用守卫。
//!
//! - [`DeviceControl`]：设备云协作方接口（设置/查询电源状态）
//! - [`GuardedControl`]：为协作方调用加上超时与取消
//! - [`InMemoryDeviceControl`]：内存实现（测试与演示）

mod guard;
mod in_memory;

pub use guard::GuardedControl;
pub use in_memory::{DEMO_ENDPOINT_ID, InMemoryDeviceControl};

use async_trait::async_trait;
use domain::{DeviceTarget, PowerAction, PowerReading};

/// 设备控制错误。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControlError {
    #[error("endpoint unreachable: {0}")]
    Unreachable(String),
    #[error("invalid authorization credential: {0}")]
    InvalidCredential(String),
    #[error("control call timed out after {0} ms")]
    Timeout(u64),
    #[error("control call cancelled")]
    Cancelled,
    #[error("control internal error: {0}")]
    Internal(String),
}

/// 设备云协作方接口。
///
/// 返回的读数是设备的实际状态，可能与请求的动作不一致。
#[async_trait]
pub trait DeviceControl: Send + Sync {
    /// 执行电源动作并返回执行后的实际状态。
    async fn set_power(
        &self,
        target: &DeviceTarget,
        action: PowerAction,
    ) -> Result<PowerReading, ControlError>;

    /// 只读查询当前电源状态。
    async fn get_power(&self, target: &DeviceTarget) -> Result<PowerReading, ControlError>;
}
