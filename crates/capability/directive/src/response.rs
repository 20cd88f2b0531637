//! 事件构造
//!
//! 四种出站事件：
//! - 发现响应：复用请求头，name 改为 `Discover.Response`，载荷为端点目录
//! - 控制响应：`Alexa.Response`，messageId 追加 `-R`，上下文带实际电源状态
//! - 状态报告：`Alexa.StateReport`，messageId 追加 `-S`
//! - 错误响应：`Alexa.ErrorResponse`，messageId 追加 `-E`
//!
//! 除发现外，correlationToken 原样透传，endpoint 原样回显。

use crate::error::DirectiveError;
use api_contract::{
    ContextProperty, Directive, DiscoveryPayload, EmptyPayload, Endpoint, EndpointDescriptor,
    ErrorKind, ErrorPayload, Event, EventContext, EventEnvelope, EventPayload, Header,
    NAME_DISCOVER_RESPONSE, NAME_ERROR_RESPONSE, NAME_RESPONSE, NAME_STATE_REPORT,
    NAMESPACE_ALEXA, NAMESPACE_POWER_CONTROLLER, PROPERTY_POWER_STATE,
};
use chrono::{DateTime, SecondsFormat, Utc};
use domain::{PowerReading, PowerState};

/// 控制响应中 powerState 的不确定度（毫秒）。
pub const CONTROL_UNCERTAINTY_MS: u64 = 50;
/// 状态报告中 powerState 的不确定度（毫秒）。
pub const STATE_REPORT_UNCERTAINTY_MS: u64 = 500;

pub const RESPONSE_SUFFIX: &str = "-R";
pub const STATE_REPORT_SUFFIX: &str = "-S";
pub const ERROR_SUFFIX: &str = "-E";

/// 发现响应。
pub fn discovery_response(header: &Header, endpoints: Vec<EndpointDescriptor>) -> EventEnvelope {
    let mut header = header.clone();
    header.name = NAME_DISCOVER_RESPONSE.to_string();
    EventEnvelope {
        context: None,
        event: Event {
            header,
            endpoint: None,
            payload: EventPayload::Discovery(DiscoveryPayload { endpoints }),
        },
    }
}

/// 电源控制响应，状态取自控制端返回的读数。
pub fn power_control_response(
    directive: &Directive,
    reading: PowerReading,
) -> Result<EventEnvelope, DirectiveError> {
    Ok(EventEnvelope {
        context: Some(power_state_context(
            reading.state,
            reading.ts_ms,
            CONTROL_UNCERTAINTY_MS,
        )?),
        event: Event {
            header: reply_header(&directive.header, NAME_RESPONSE, RESPONSE_SUFFIX),
            endpoint: directive.endpoint.clone(),
            payload: EventPayload::Empty(EmptyPayload {}),
        },
    })
}

/// 状态报告，`sampled_at_ms` 为构造时刻。
pub fn state_report(
    directive: &Directive,
    state: PowerState,
    sampled_at_ms: i64,
) -> Result<EventEnvelope, DirectiveError> {
    Ok(EventEnvelope {
        context: Some(power_state_context(
            state,
            sampled_at_ms,
            STATE_REPORT_UNCERTAINTY_MS,
        )?),
        event: Event {
            header: reply_header(&directive.header, NAME_STATE_REPORT, STATE_REPORT_SUFFIX),
            endpoint: directive.endpoint.clone(),
            payload: EventPayload::Empty(EmptyPayload {}),
        },
    })
}

/// 错误响应。
pub fn error_response(
    header: &Header,
    endpoint: Option<&Endpoint>,
    kind: ErrorKind,
    message: impl Into<String>,
) -> EventEnvelope {
    EventEnvelope {
        context: None,
        event: Event {
            header: reply_header(header, NAME_ERROR_RESPONSE, ERROR_SUFFIX),
            endpoint: endpoint.cloned(),
            payload: EventPayload::Error(ErrorPayload {
                kind,
                message: message.into(),
            }),
        },
    }
}

/// RFC 3339 UTC 毫秒精度，如 `2017-09-03T16:20:50.520Z`；超出可表示范围时报错。
pub fn format_time_of_sample(ts_ms: i64) -> Result<String, DirectiveError> {
    DateTime::<Utc>::from_timestamp_millis(ts_ms)
        .map(|time| time.to_rfc3339_opts(SecondsFormat::Millis, true))
        .ok_or(DirectiveError::InvalidTimestamp(ts_ms))
}

fn reply_header(request: &Header, name: &str, suffix: &str) -> Header {
    Header::new(
        NAMESPACE_ALEXA,
        name,
        format!("{}{}", request.message_id, suffix),
        request.correlation_token.clone(),
    )
}

fn power_state_context(
    state: PowerState,
    ts_ms: i64,
    uncertainty_ms: u64,
) -> Result<EventContext, DirectiveError> {
    Ok(EventContext {
        properties: vec![ContextProperty {
            namespace: NAMESPACE_POWER_CONTROLLER.to_string(),
            name: PROPERTY_POWER_STATE.to_string(),
            value: state.as_str().to_string(),
            time_of_sample: format_time_of_sample(ts_ms)?,
            uncertainty_in_milliseconds: uncertainty_ms,
        }],
    })
}
