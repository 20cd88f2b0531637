//! 设备目录能力
//!
//! 发现指令返回的端点目录来自 [`DeviceCatalog`]：
//! - [`StaticDeviceCatalog::demo`]：内置单端点演示目录
//! - [`StaticDeviceCatalog::from_json_file`]：配置提供的 JSON 目录
//!
//! 目录中的 cookie 仅供引用，不代表设备当前状态。

use api_contract::{Capability, EndpointDescriptor};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use tracing::info;

/// 目录加载错误。
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("catalog io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog parse error: {0}")]
    Parse(String),
    #[error("catalog invalid: {0}")]
    Invalid(String),
}

/// 设备目录接口。
#[async_trait]
pub trait DeviceCatalog: Send + Sync {
    /// 列出可被发现的全部端点。
    async fn list(&self) -> Vec<EndpointDescriptor>;
}

/// 静态设备目录。
#[derive(Debug, Clone)]
pub struct StaticDeviceCatalog {
    endpoints: Vec<EndpointDescriptor>,
}

/// 目录文件格式：`{"endpoints": [...]}` 或直接为数组。
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Wrapped { endpoints: Vec<EndpointDescriptor> },
    Bare(Vec<EndpointDescriptor>),
}

impl StaticDeviceCatalog {
    /// 创建目录，端点 ID 必须非空且唯一。
    pub fn new(endpoints: Vec<EndpointDescriptor>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        for endpoint in &endpoints {
            if endpoint.endpoint_id.trim().is_empty() {
                return Err(RegistryError::Invalid("empty endpointId".to_string()));
            }
            if !seen.insert(endpoint.endpoint_id.as_str()) {
                return Err(RegistryError::Invalid(format!(
                    "duplicate endpointId: {}",
                    endpoint.endpoint_id
                )));
            }
        }
        Ok(Self { endpoints })
    }

    /// 内置演示目录：一个卧室插座，声明 `Alexa` 与 `Alexa.PowerController`。
    pub fn demo() -> Self {
        Self {
            endpoints: vec![demo_endpoint()],
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self, RegistryError> {
        let file: CatalogFile =
            serde_json::from_str(text).map_err(|err| RegistryError::Parse(err.to_string()))?;
        let endpoints = match file {
            CatalogFile::Wrapped { endpoints } => endpoints,
            CatalogFile::Bare(endpoints) => endpoints,
        };
        Self::new(endpoints)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&text)?;
        info!(
            target: "bridge.registry",
            path = %path.display(),
            endpoints = catalog.endpoints.len(),
            "catalog_loaded"
        );
        Ok(catalog)
    }

    pub fn endpoints(&self) -> &[EndpointDescriptor] {
        &self.endpoints
    }
}

impl Default for StaticDeviceCatalog {
    fn default() -> Self {
        Self::demo()
    }
}

#[async_trait]
impl DeviceCatalog for StaticDeviceCatalog {
    async fn list(&self) -> Vec<EndpointDescriptor> {
        self.endpoints.clone()
    }
}

fn demo_endpoint() -> EndpointDescriptor {
    let cookie = BTreeMap::from([
        (
            "key1".to_string(),
            "arbitrary key/value pairs for skill to reference this endpoint.".to_string(),
        ),
        (
            "key2".to_string(),
            "There can be multiple entries".to_string(),
        ),
        (
            "key3".to_string(),
            "but they should only be used for reference purposes.".to_string(),
        ),
        (
            "key4".to_string(),
            "This is not a suitable place to maintain current endpoint state.".to_string(),
        ),
    ]);
    EndpointDescriptor {
        endpoint_id: "demo_id".to_string(),
        manufacturer_name: "Smart Device Company".to_string(),
        friendly_name: "Bedroom Outlet".to_string(),
        description: "Smart Device Switch".to_string(),
        display_categories: vec!["SWITCH".to_string()],
        cookie,
        capabilities: vec![Capability::alexa(), Capability::power_controller()],
    }
}
