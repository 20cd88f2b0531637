use bridge_control::{ControlError, DeviceControl, InMemoryDeviceControl};
use domain::{DeviceTarget, PowerAction, PowerState};

#[tokio::test]
async fn demo_endpoint_starts_off() {
    let control = InMemoryDeviceControl::with_demo_endpoint();
    let reading = control
        .get_power(&DeviceTarget::new("demo_id", "any"))
        .await
        .expect("reading");
    assert_eq!(reading.state, PowerState::Off);
}

#[tokio::test]
async fn set_power_updates_state() {
    let control = InMemoryDeviceControl::with_demo_endpoint();
    let target = DeviceTarget::new("demo_id", "any");
    let reading = control
        .set_power(&target, PowerAction::TurnOn)
        .await
        .expect("turn on");
    assert_eq!(reading.state, PowerState::On);

    let reading = control.get_power(&target).await.expect("reading");
    assert_eq!(reading.state, PowerState::On);
}

#[tokio::test]
async fn unknown_endpoint_is_unreachable() {
    let control = InMemoryDeviceControl::new();
    let err = control
        .set_power(&DeviceTarget::new("missing", "any"), PowerAction::TurnOff)
        .await
        .expect_err("unreachable");
    assert_eq!(err, ControlError::Unreachable("missing".to_string()));
}

#[tokio::test]
async fn default_has_no_endpoints() {
    let control = InMemoryDeviceControl::default();
    let err = control
        .get_power(&DeviceTarget::new("demo_id", "any"))
        .await
        .expect_err("unreachable");
    assert_eq!(err, ControlError::Unreachable("demo_id".to_string()));
}

#[tokio::test]
async fn rejected_token_is_invalid_credential() {
    let control = InMemoryDeviceControl::with_demo_endpoint().with_accepted_token("good");
    let err = control
        .get_power(&DeviceTarget::new("demo_id", "bad"))
        .await
        .expect_err("rejected");
    assert!(matches!(err, ControlError::InvalidCredential(_)));

    control
        .get_power(&DeviceTarget::new("demo_id", "good"))
        .await
        .expect("accepted");
}
