use api_contract::{
    Header, NAME_DISCOVER, NAME_REPORT_STATE, NAMESPACE_ALEXA, NAMESPACE_DISCOVERY,
    NAMESPACE_POWER_CONTROLLER,
};
use domain::PowerAction;

/// 指令分类结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Discover,
    PowerControl(PowerAction),
    ReportState,
    Unknown,
}

impl Route {
    /// 日志用的路由标签。
    pub fn label(&self) -> &'static str {
        match self {
            Route::Discover => "discover",
            Route::PowerControl(PowerAction::TurnOn) => "turn_on",
            Route::PowerControl(PowerAction::TurnOff) => "turn_off",
            Route::ReportState => "report_state",
            Route::Unknown => "unknown",
        }
    }
}

/// 按 `(namespace, name)` 选择处理器，按顺序首个匹配生效。
pub fn route(header: &Header) -> Route {
    match header.namespace.as_str() {
        NAMESPACE_DISCOVERY if header.name == NAME_DISCOVER => Route::Discover,
        NAMESPACE_POWER_CONTROLLER => PowerAction::from_directive_name(&header.name)
            .map(Route::PowerControl)
            .unwrap_or(Route::Unknown),
        NAMESPACE_ALEXA if header.name == NAME_REPORT_STATE => Route::ReportState,
        _ => Route::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(namespace: &str, name: &str) -> Header {
        Header::new(namespace, name, "msg-1", None)
    }

    #[test]
    fn routes_known_pairs() {
        assert_eq!(route(&header("Alexa.Discovery", "Discover")), Route::Discover);
        assert_eq!(
            route(&header("Alexa.PowerController", "TurnOn")),
            Route::PowerControl(PowerAction::TurnOn)
        );
        assert_eq!(
            route(&header("Alexa.PowerController", "TurnOff")),
            Route::PowerControl(PowerAction::TurnOff)
        );
        assert_eq!(route(&header("Alexa", "ReportState")), Route::ReportState);
    }

    #[test]
    fn unmatched_names_fall_through() {
        assert_eq!(route(&header("Alexa.Discovery", "Discover.Response")), Route::Unknown);
        assert_eq!(route(&header("Alexa.PowerController", "Toggle")), Route::Unknown);
        assert_eq!(route(&header("Alexa", "Discover")), Route::Unknown);
        assert_eq!(route(&header("Alexa.BrightnessController", "SetBrightness")), Route::Unknown);
        assert_eq!(route(&header("alexa.discovery", "Discover")), Route::Unknown);
    }
}
