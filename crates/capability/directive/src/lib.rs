//! 指令分发：把 Smart Home 指令路由到处理器并构造协议事件。
//!
//! 处理流程：
//!
//! 1. [`route`] 按 `(namespace, name)` 对指令分类（纯函数，无状态）
//! 2. [`DirectiveService`] 调用对应处理器；电源控制与状态查询经
//!    [`bridge_control::GuardedControl`] 访问设备云（超时 + 取消）
//! 3. [`response`] 中的构造函数生成发现/控制/状态/错误四种事件
//!
//! 未知指令默认记录后丢弃（返回 `None`），可通过
//! [`bridge_config::UnknownDirectivePolicy::Reject`] 改为返回 `INVALID_DIRECTIVE`。
//! 处理器失败一律转换为 ErrorResponse 事件正常返回。

pub mod error;
pub mod response;
pub mod router;
pub mod service;

pub use error::DirectiveError;
pub use router::{Route, route};
pub use service::DirectiveService;
