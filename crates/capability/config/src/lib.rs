//! 桥接服务运行配置加载。

use std::env;
use std::path::PathBuf;

/// 设备控制调用默认超时（毫秒）。
pub const DEFAULT_CONTROL_TIMEOUT_MS: u64 = 3000;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 未知指令的处理策略。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownDirectivePolicy {
    /// 记录日志后静默丢弃（不返回事件）。
    #[default]
    Drop,
    /// 返回 `INVALID_DIRECTIVE` 错误响应。
    Reject,
}

impl UnknownDirectivePolicy {
    fn parse(key: &str, value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "drop" | "silent" => Ok(Self::Drop),
            "reject" | "error" => Ok(Self::Reject),
            _ => Err(ConfigError::Invalid(key.to_string(), value.to_string())),
        }
    }
}

/// 桥接服务运行配置。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    pub control_timeout_ms: u64,
    pub unknown_directive: UnknownDirectivePolicy,
    /// 设备目录 JSON 文件；未配置时使用内置演示目录。
    pub catalog_path: Option<PathBuf>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            control_timeout_ms: DEFAULT_CONTROL_TIMEOUT_MS,
            unknown_directive: UnknownDirectivePolicy::Drop,
            catalog_path: None,
        }
    }
}

impl BridgeConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        let control_timeout_ms =
            read_u64_with_default("BRIDGE_CONTROL_TIMEOUT_MS", DEFAULT_CONTROL_TIMEOUT_MS)?;
        if control_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "BRIDGE_CONTROL_TIMEOUT_MS".to_string(),
                "0".to_string(),
            ));
        }
        let unknown_directive = match read_optional("BRIDGE_UNKNOWN_DIRECTIVE") {
            Some(value) => UnknownDirectivePolicy::parse("BRIDGE_UNKNOWN_DIRECTIVE", &value)?,
            None => UnknownDirectivePolicy::default(),
        };
        let catalog_path = read_optional("BRIDGE_CATALOG_PATH").map(PathBuf::from);

        Ok(Self {
            control_timeout_ms,
            unknown_directive,
            catalog_path,
        })
    }
}

fn read_u64_with_default(key: &str, default: u64) -> Result<u64, ConfigError> {
    let value = match env::var(key) {
        Ok(value) if !value.is_empty() => value,
        _ => return Ok(default),
    };
    value
        .parse::<u64>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_optional(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}
