use api_contract::ErrorKind;
use bridge_control::ControlError;

/// 处理器级错误，最终转换为 ErrorResponse 事件。
#[derive(Debug, thiserror::Error)]
pub enum DirectiveError {
    #[error("malformed directive: {0}")]
    Malformed(String),
    #[error("directive {0} requires an endpoint")]
    MissingEndpoint(String),
    #[error("unsupported directive: {0}")]
    Unsupported(String),
    #[error("sample timestamp out of range: {0} ms")]
    InvalidTimestamp(i64),
    #[error(transparent)]
    Control(#[from] ControlError),
}

impl DirectiveError {
    /// 映射到协议错误类型。
    pub fn kind(&self) -> ErrorKind {
        match self {
            DirectiveError::Malformed(_)
            | DirectiveError::MissingEndpoint(_)
            | DirectiveError::Unsupported(_) => ErrorKind::InvalidDirective,
            DirectiveError::InvalidTimestamp(_) => ErrorKind::InternalError,
            DirectiveError::Control(err) => control_error_kind(err),
        }
    }
}

fn control_error_kind(err: &ControlError) -> ErrorKind {
    match err {
        ControlError::Unreachable(_) | ControlError::Timeout(_) => ErrorKind::EndpointUnreachable,
        ControlError::InvalidCredential(_) => ErrorKind::InvalidAuthorizationCredential,
        ControlError::Cancelled | ControlError::Internal(_) => ErrorKind::InternalError,
    }
}
