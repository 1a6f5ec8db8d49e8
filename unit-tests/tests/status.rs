//! Local status documents over live state.

use myrtio_registry::{
    Activation,
    DeviceStatus,
    LightSwitch,
    RegistrationReport,
    RegistrationSnapshot,
    RegistrationState,
    RequestStatus,
    Uptime,
};
use tests::{recording_light, to_json};

#[test]
fn status_after_ticks_without_toggles() {
    let uptime = Uptime::new();
    let (light, _log) = recording_light();
    for _ in 0..12 {
        uptime.tick();
    }

    let status = DeviceStatus::read(&uptime, &light);

    assert_eq!(to_json(&status), r#"{"uptime":12,"is_light_on":false}"#);
}

#[test]
fn light_toggle_is_self_inverse() {
    let uptime = Uptime::new();
    let (light, log) = recording_light();

    let first = DeviceStatus::toggle(&uptime, &light);
    let second = DeviceStatus::toggle(&uptime, &light);

    assert!(first.is_light_on);
    assert!(!second.is_light_on);
    assert_eq!(log.levels(), [true, false]);
    assert_eq!(DeviceStatus::read(&uptime, &light), second);
}

#[test]
fn toggle_reports_current_uptime() {
    let uptime = Uptime::new();
    let (light, _log) = recording_light();
    uptime.tick();
    uptime.tick();

    let status = DeviceStatus::toggle(&uptime, &light);

    assert_eq!(to_json(&status), r#"{"uptime":2,"is_light_on":true}"#);
    assert!(light.is_light_on());
}

#[test]
fn registration_report_reads_published_state() {
    let state = RegistrationState::new();
    assert_eq!(
        to_json(&RegistrationReport::from(state.snapshot())),
        r#"{"activated":false,"pending":false,"error":false}"#
    );

    state.publish(&RegistrationSnapshot {
        activation: Activation::Activated,
        status: RequestStatus::Pending,
        error: true,
    });

    assert_eq!(
        to_json(&RegistrationReport::from(state.snapshot())),
        r#"{"activated":true,"pending":true,"error":true}"#
    );
}
