use std::fmt;

/// 设备电源状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerState {
    On,
    Off,
}

impl PowerState {
    /// 协议中的取值（`ON` / `OFF`）。
    pub fn as_str(&self) -> &'static str {
        match self {
            PowerState::On => "ON",
            PowerState::Off => "OFF",
        }
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 电源控制动作（指令名 `TurnOn` / `TurnOff`）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerAction {
    TurnOn,
    TurnOff,
}

impl PowerAction {
    /// 从指令名解析动作，未知名称返回 None。
    pub fn from_directive_name(name: &str) -> Option<Self> {
        match name {
            "TurnOn" => Some(PowerAction::TurnOn),
            "TurnOff" => Some(PowerAction::TurnOff),
            _ => None,
        }
    }

    pub fn directive_name(&self) -> &'static str {
        match self {
            PowerAction::TurnOn => "TurnOn",
            PowerAction::TurnOff => "TurnOff",
        }
    }

    /// 动作期望达到的状态（实际状态以控制端返回为准）。
    pub fn requested_state(&self) -> PowerState {
        match self {
            PowerAction::TurnOn => PowerState::On,
            PowerAction::TurnOff => PowerState::Off,
        }
    }
}

/// 控制端返回的电源读数。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerReading {
    pub state: PowerState,
    /// 采样时间（Unix 毫秒）。
    pub ts_ms: i64,
}

impl PowerReading {
    pub fn new(state: PowerState, ts_ms: i64) -> Self {
        Self { state, ts_ms }
    }

    /// 以当前时间采样。
    pub fn now(state: PowerState) -> Self {
        Self::new(state, now_epoch_ms())
    }
}

pub fn now_epoch_ms() -> i64 {
    let now = std::time::SystemTime::now();
    let duration = now
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    duration.as_millis() as i64
}
