pub mod power;

pub use power::{PowerAction, PowerReading, PowerState};

/// 设备目标：一次控制调用作用的端点与用户凭据。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceTarget {
    pub endpoint_id: String,
    pub token: String,
}

impl DeviceTarget {
    /// 构造显式端点与凭据的设备目标。
    pub fn new(endpoint_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            endpoint_id: endpoint_id.into(),
            token: token.into(),
        }
    }
}
