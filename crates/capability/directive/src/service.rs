//! 指令服务（路由 + 处理 + 事件构造）。
//!
//! 每次调用的状态流转：`Idle → Routing → Handling → Responded`，
//! 未知指令在默认策略下为 `Idle → Routing → Dropped`。
//! 服务本身无可变状态，可在多个任务间共享并发调用。

use crate::error::DirectiveError;
use crate::response::{
    discovery_response, error_response, power_control_response, state_report,
};
use crate::router::{Route, route};
use api_contract::{Directive, DirectiveEnvelope, Endpoint, EventEnvelope, Header, NAMESPACE_ALEXA};
use bridge_config::{BridgeConfig, UnknownDirectivePolicy};
use bridge_control::{DeviceControl, GuardedControl};
use bridge_registry::{DeviceCatalog, RegistryError, StaticDeviceCatalog};
use bridge_telemetry::{
    new_request_ids, record_directive_dropped, record_directive_received,
    record_discovery_response, record_error_response, record_power_control_failure,
    record_power_control_success, record_state_report,
};
use domain::{DeviceTarget, PowerAction, power::now_epoch_ms};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, warn};

/// 无法取得 messageId 时使用的占位值。
const UNKNOWN_MESSAGE_ID: &str = "unknown";

/// 指令服务。
#[derive(Clone)]
pub struct DirectiveService {
    control: GuardedControl,
    catalog: Arc<dyn DeviceCatalog>,
    unknown_directive: UnknownDirectivePolicy,
}

impl DirectiveService {
    pub fn new(
        control: Arc<dyn DeviceControl>,
        catalog: Arc<dyn DeviceCatalog>,
        config: &BridgeConfig,
    ) -> Self {
        Self {
            control: GuardedControl::new(control, Duration::from_millis(config.control_timeout_ms)),
            catalog,
            unknown_directive: config.unknown_directive,
        }
    }

    /// 按配置装配：配置了目录文件则加载，否则使用内置演示目录。
    pub fn from_config(
        config: &BridgeConfig,
        control: Arc<dyn DeviceControl>,
    ) -> Result<Self, RegistryError> {
        let catalog = match &config.catalog_path {
            Some(path) => StaticDeviceCatalog::from_json_file(path)?,
            None => StaticDeviceCatalog::demo(),
        };
        Ok(Self::new(control, Arc::new(catalog), config))
    }

    /// 处理已解析的指令；未知指令在默认策略下返回 None。
    pub async fn handle(&self, directive: &Directive) -> Option<EventEnvelope> {
        self.handle_with_cancel(directive, &CancellationToken::new())
            .await
    }

    /// 同 [`handle`](Self::handle)，`cancel` 触发时中止进行中的设备调用并返回错误响应。
    pub async fn handle_with_cancel(
        &self,
        directive: &Directive,
        cancel: &CancellationToken,
    ) -> Option<EventEnvelope> {
        let ids = new_request_ids();
        let span = tracing::info_span!(
            "directive",
            request_id = %ids.request_id,
            namespace = %directive.header.namespace,
            name = %directive.header.name,
            message_id = %directive.header.message_id
        );
        self.dispatch(directive, cancel).instrument(span).await
    }

    /// 处理原始 JSON；缺少 `directive`/`header` 等结构时返回 `INVALID_DIRECTIVE`。
    pub async fn handle_json(&self, value: &serde_json::Value) -> Option<EventEnvelope> {
        self.handle_json_with_cancel(value, &CancellationToken::new())
            .await
    }

    pub async fn handle_json_with_cancel(
        &self,
        value: &serde_json::Value,
        cancel: &CancellationToken,
    ) -> Option<EventEnvelope> {
        match serde_json::from_value::<DirectiveEnvelope>(value.clone()) {
            Ok(envelope) => self.handle_with_cancel(&envelope.directive, cancel).await,
            Err(err) => {
                record_directive_received();
                let error = DirectiveError::Malformed(err.to_string());
                warn!(target: "bridge.directive", error = %error, "directive_malformed");
                let (header, endpoint) = salvage_header(value);
                record_error_response();
                Some(error_response(&header, endpoint.as_ref(), error.kind(), error.to_string()))
            }
        }
    }

    async fn dispatch(
        &self,
        directive: &Directive,
        cancel: &CancellationToken,
    ) -> Option<EventEnvelope> {
        record_directive_received();
        let route = route(&directive.header);
        debug!(
            target: "bridge.directive",
            route = route.label(),
            raw = %serde_json::to_string(directive).unwrap_or_default(),
            "directive_received"
        );

        let result = match route {
            Route::Discover => Ok(self.handle_discovery(directive).await),
            Route::PowerControl(action) => self.handle_power_control(directive, action, cancel).await,
            Route::ReportState => self.handle_report_state(directive, cancel).await,
            Route::Unknown => match self.unknown_directive {
                UnknownDirectivePolicy::Drop => {
                    record_directive_dropped();
                    info!(target: "bridge.directive", route = route.label(), "directive_dropped");
                    return None;
                }
                UnknownDirectivePolicy::Reject => Err(DirectiveError::Unsupported(format!(
                    "{}.{}",
                    directive.header.namespace, directive.header.name
                ))),
            },
        };

        let event = match result {
            Ok(event) => event,
            Err(err) => {
                record_error_response();
                warn!(
                    target: "bridge.directive",
                    route = route.label(),
                    kind = err.kind().as_str(),
                    error = %err,
                    "directive_failed"
                );
                error_response(
                    &directive.header,
                    directive.endpoint.as_ref(),
                    err.kind(),
                    err.to_string(),
                )
            }
        };
        debug!(
            target: "bridge.directive",
            route = route.label(),
            response = %serde_json::to_string(&event).unwrap_or_default(),
            "directive_responded"
        );
        Some(event)
    }

    async fn handle_discovery(&self, directive: &Directive) -> EventEnvelope {
        let endpoints = self.catalog.list().await;
        record_discovery_response();
        info!(
            target: "bridge.directive",
            endpoints = endpoints.len(),
            "discovery_responded"
        );
        discovery_response(&directive.header, endpoints)
    }

    async fn handle_power_control(
        &self,
        directive: &Directive,
        action: PowerAction,
        cancel: &CancellationToken,
    ) -> Result<EventEnvelope, DirectiveError> {
        let target = device_target(directive)?;
        let reading = match self.control.set_power(&target, action, cancel).await {
            Ok(reading) => reading,
            Err(err) => {
                record_power_control_failure();
                return Err(err.into());
            }
        };
        record_power_control_success();
        if reading.state != action.requested_state() {
            warn!(
                target: "bridge.directive",
                endpoint_id = %target.endpoint_id,
                requested = %action.requested_state(),
                actual = %reading.state,
                "power_state_diverged"
            );
        }
        info!(
            target: "bridge.directive",
            endpoint_id = %target.endpoint_id,
            action = action.directive_name(),
            power_state = %reading.state,
            "power_control_responded"
        );
        power_control_response(directive, reading)
    }

    async fn handle_report_state(
        &self,
        directive: &Directive,
        cancel: &CancellationToken,
    ) -> Result<EventEnvelope, DirectiveError> {
        let target = device_target(directive)?;
        let reading = self.control.get_power(&target, cancel).await?;
        record_state_report();
        info!(
            target: "bridge.directive",
            endpoint_id = %target.endpoint_id,
            power_state = %reading.state,
            "state_reported"
        );
        state_report(directive, reading.state, now_epoch_ms())
    }
}

fn device_target(directive: &Directive) -> Result<DeviceTarget, DirectiveError> {
    let endpoint = directive
        .endpoint
        .as_ref()
        .ok_or_else(|| DirectiveError::MissingEndpoint(directive.header.name.clone()))?;
    Ok(DeviceTarget::new(
        endpoint.endpoint_id.clone(),
        endpoint.scope.token.clone(),
    ))
}

/// 从无法完整解析的指令中尽量取回 messageId、correlationToken 与 endpoint。
fn salvage_header(value: &serde_json::Value) -> (Header, Option<Endpoint>) {
    let text = |pointer: &str| {
        value
            .pointer(pointer)
            .and_then(|field| field.as_str())
            .map(str::to_string)
    };
    let header = Header::new(
        NAMESPACE_ALEXA,
        "",
        text("/directive/header/messageId").unwrap_or_else(|| UNKNOWN_MESSAGE_ID.to_string()),
        text("/directive/header/correlationToken"),
    );
    let endpoint = value
        .pointer("/directive/endpoint")
        .and_then(|field| serde_json::from_value::<Endpoint>(field.clone()).ok());
    (header, endpoint)
}
