//! Smart Home v3 指令与事件报文契约。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 协议载荷版本。
pub const PAYLOAD_VERSION: &str = "3";

pub const NAMESPACE_ALEXA: &str = "Alexa";
pub const NAMESPACE_DISCOVERY: &str = "Alexa.Discovery";
pub const NAMESPACE_POWER_CONTROLLER: &str = "Alexa.PowerController";

pub const NAME_DISCOVER: &str = "Discover";
pub const NAME_DISCOVER_RESPONSE: &str = "Discover.Response";
pub const NAME_REPORT_STATE: &str = "ReportState";
pub const NAME_STATE_REPORT: &str = "StateReport";
pub const NAME_RESPONSE: &str = "Response";
pub const NAME_ERROR_RESPONSE: &str = "ErrorResponse";

pub const PROPERTY_POWER_STATE: &str = "powerState";

/// 入站指令外层封装：`{ "directive": { ... } }`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectiveEnvelope {
    pub directive: Directive,
}

/// 入站指令。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Directive {
    pub header: Header,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<Endpoint>,
    #[serde(default = "empty_object")]
    pub payload: serde_json::Value,
}

/// 指令/事件头。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub namespace: String,
    pub name: String,
    pub message_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_token: Option<String>,
    #[serde(default = "default_payload_version")]
    pub payload_version: String,
}

impl Header {
    /// 构造响应头（payloadVersion 固定为 3）。
    pub fn new(
        namespace: impl Into<String>,
        name: impl Into<String>,
        message_id: impl Into<String>,
        correlation_token: Option<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            message_id: message_id.into(),
            correlation_token,
            payload_version: PAYLOAD_VERSION.to_string(),
        }
    }
}

/// 指令作用的端点。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub endpoint_id: String,
    pub scope: Scope,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie: Option<BTreeMap<String, String>>,
}

/// 用户凭据范围。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    #[serde(rename = "type", default = "default_scope_type")]
    pub scope_type: String,
    pub token: String,
}

/// 出站事件外层封装：`{ "context"?: {...}, "event": {...} }`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<EventContext>,
    pub event: Event,
}

impl EventEnvelope {
    pub fn header(&self) -> &Header {
        &self.event.header
    }

    /// ErrorResponse 的错误类型（非错误事件返回 None）。
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match &self.event.payload {
            EventPayload::Error(payload) => Some(payload.kind),
            _ => None,
        }
    }
}

/// 出站事件。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub header: Header,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<Endpoint>,
    pub payload: EventPayload,
}

/// 事件载荷：发现响应、错误响应，其余为空对象。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventPayload {
    Discovery(DiscoveryPayload),
    Error(ErrorPayload),
    Empty(EmptyPayload),
}

/// 空载荷，序列化为 `{}`。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyPayload {}

/// 发现响应载荷。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryPayload {
    pub endpoints: Vec<EndpointDescriptor>,
}

/// 错误响应载荷。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    pub message: String,
}

/// ErrorResponse 错误类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    InvalidDirective,
    EndpointUnreachable,
    InvalidAuthorizationCredential,
    InternalError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidDirective => "INVALID_DIRECTIVE",
            ErrorKind::EndpointUnreachable => "ENDPOINT_UNREACHABLE",
            ErrorKind::InvalidAuthorizationCredential => "INVALID_AUTHORIZATION_CREDENTIAL",
            ErrorKind::InternalError => "INTERNAL_ERROR",
        }
    }
}

/// 事件上下文（属性快照）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventContext {
    pub properties: Vec<ContextProperty>,
}

/// 上下文属性。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextProperty {
    pub namespace: String,
    pub name: String,
    pub value: String,
    /// RFC 3339 UTC 时间戳。
    pub time_of_sample: String,
    pub uncertainty_in_milliseconds: u64,
}

/// 发现目录中的端点描述。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointDescriptor {
    pub endpoint_id: String,
    pub manufacturer_name: String,
    pub friendly_name: String,
    pub description: String,
    pub display_categories: Vec<String>,
    /// 仅供技能引用，不承载设备当前状态。
    #[serde(default)]
    pub cookie: BTreeMap<String, String>,
    pub capabilities: Vec<Capability>,
}

/// 端点声明的能力接口。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capability {
    #[serde(rename = "type", default = "default_capability_type")]
    pub capability_type: String,
    pub interface: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<CapabilityProperties>,
}

impl Capability {
    /// 基础 `Alexa` 接口。
    pub fn alexa() -> Self {
        Self {
            capability_type: default_capability_type(),
            interface: NAMESPACE_ALEXA.to_string(),
            version: PAYLOAD_VERSION.to_string(),
            properties: None,
        }
    }

    /// `Alexa.PowerController` 接口，支持并可查询 powerState。
    pub fn power_controller() -> Self {
        Self {
            capability_type: default_capability_type(),
            interface: NAMESPACE_POWER_CONTROLLER.to_string(),
            version: PAYLOAD_VERSION.to_string(),
            properties: Some(CapabilityProperties {
                supported: vec![SupportedProperty {
                    name: PROPERTY_POWER_STATE.to_string(),
                }],
                retrievable: true,
            }),
        }
    }
}

/// 能力属性声明。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityProperties {
    pub supported: Vec<SupportedProperty>,
    #[serde(default)]
    pub retrievable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedProperty {
    pub name: String,
}

fn default_payload_version() -> String {
    PAYLOAD_VERSION.to_string()
}

fn default_scope_type() -> String {
    "BearerToken".to_string()
}

fn default_capability_type() -> String {
    "AlexaInterface".to_string()
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}
