//! 设备控制内存实现
//!
//! 仅用于本地演示和测试：按端点保存电源状态，可选地限制可用令牌。

use crate::{ControlError, DeviceControl};
use async_trait::async_trait;
use domain::{DeviceTarget, PowerAction, PowerReading, PowerState};
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;
use tracing::info;

/// 演示端点 ID。
pub const DEMO_ENDPOINT_ID: &str = "demo_id";

/// 设备控制内存实现
///
/// 使用 RwLock + HashMap 提供线程安全的内存存储。
pub struct InMemoryDeviceControl {
    states: RwLock<HashMap<String, PowerState>>,
    accepted_tokens: Option<HashSet<String>>,
}

impl InMemoryDeviceControl {
    /// 创建空的控制端（所有端点不可达）。
    pub fn new() -> Self {
        Self {
            states: RwLock::new(HashMap::new()),
            accepted_tokens: None,
        }
    }

    /// 创建包含演示端点（初始为 OFF）的控制端。
    pub fn with_demo_endpoint() -> Self {
        Self::new().with_endpoint(DEMO_ENDPOINT_ID, PowerState::Off)
    }

    /// 注册端点及其初始状态。
    pub fn with_endpoint(self, endpoint_id: impl Into<String>, state: PowerState) -> Self {
        if let Ok(mut map) = self.states.write() {
            map.insert(endpoint_id.into(), state);
        }
        self
    }

    /// 限制可用令牌；未设置时接受任意令牌。
    pub fn with_accepted_token(mut self, token: impl Into<String>) -> Self {
        self.accepted_tokens
            .get_or_insert_with(HashSet::new)
            .insert(token.into());
        self
    }

    fn authorize(&self, target: &DeviceTarget) -> Result<(), ControlError> {
        match &self.accepted_tokens {
            Some(tokens) if !tokens.contains(&target.token) => Err(
                ControlError::InvalidCredential(format!("token rejected for {}", target.endpoint_id)),
            ),
            _ => Ok(()),
        }
    }
}

impl Default for InMemoryDeviceControl {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeviceControl for InMemoryDeviceControl {
    async fn set_power(
        &self,
        target: &DeviceTarget,
        action: PowerAction,
    ) -> Result<PowerReading, ControlError> {
        self.authorize(target)?;
        let mut map = self
            .states
            .write()
            .map_err(|_| ControlError::Internal("lock failed".to_string()))?;
        let state = map
            .get_mut(&target.endpoint_id)
            .ok_or_else(|| ControlError::Unreachable(target.endpoint_id.clone()))?;
        let next = action.requested_state();
        *state = next;
        info!(
            target: "bridge.control",
            endpoint_id = %target.endpoint_id,
            action = action.directive_name(),
            power_state = %next,
            "in_memory_power_set"
        );
        Ok(PowerReading::now(next))
    }

    async fn get_power(&self, target: &DeviceTarget) -> Result<PowerReading, ControlError> {
        self.authorize(target)?;
        let map = self
            .states
            .read()
            .map_err(|_| ControlError::Internal("lock failed".to_string()))?;
        let state = map
            .get(&target.endpoint_id)
            .copied()
            .ok_or_else(|| ControlError::Unreachable(target.endpoint_id.clone()))?;
        Ok(PowerReading::now(state))
    }
}
