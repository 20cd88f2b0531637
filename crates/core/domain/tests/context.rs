use domain::{DeviceTarget, PowerAction, PowerReading, PowerState};

#[test]
fn device_target_builds() {
    let target = DeviceTarget::new("demo_id", "token-1");

    assert_eq!(target.endpoint_id, "demo_id");
    assert_eq!(target.token, "token-1");
}

#[test]
fn power_action_maps_directive_names() {
    assert_eq!(
        PowerAction::from_directive_name("TurnOn"),
        Some(PowerAction::TurnOn)
    );
    assert_eq!(
        PowerAction::from_directive_name("TurnOff"),
        Some(PowerAction::TurnOff)
    );
    assert_eq!(PowerAction::from_directive_name("SetBrightness"), None);
    assert_eq!(PowerAction::TurnOn.requested_state(), PowerState::On);
    assert_eq!(PowerAction::TurnOff.requested_state(), PowerState::Off);
}

#[test]
fn power_state_displays_protocol_values() {
    assert_eq!(PowerState::On.to_string(), "ON");
    assert_eq!(PowerState::Off.as_str(), "OFF");
}

#[test]
fn power_reading_now_is_recent() {
    let reading = PowerReading::now(PowerState::Off);
    assert_eq!(reading.state, PowerState::Off);
    assert!(reading.ts_ms > 1_600_000_000_000);
}
