//! Local status documents
//!
//! Everything the status server reports is rebuilt from live state on each
//! request; nothing here caches.

use core::sync::atomic::{AtomicU32, Ordering};

use serde::Serialize;

use crate::{coordinator::RegistrationSnapshot, light::LightSwitch};

/// Seconds-since-boot counter driven by the main loop.
#[derive(Debug)]
pub struct Uptime(AtomicU32);

impl Uptime {
    pub const fn new() -> Self {
        Self(AtomicU32::new(0))
    }

    /// Advance by one tick and return the new value.
    pub fn tick(&self) -> u32 {
        self.0.fetch_add(1, Ordering::Relaxed).wrapping_add(1)
    }

    pub fn ticks(&self) -> u32 {
        self.0.load(Ordering::Relaxed)
    }
}

impl Default for Uptime {
    fn default() -> Self {
        Self::new()
    }
}

/// Body of `GET /status` and `POST /light`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeviceStatus {
    pub uptime: u32,
    pub is_light_on: bool,
}

impl DeviceStatus {
    pub fn read<L: LightSwitch + ?Sized>(uptime: &Uptime, light: &L) -> Self {
        Self {
            uptime: uptime.ticks(),
            is_light_on: light.is_light_on(),
        }
    }

    /// Flip the light, then report the resulting state.
    pub fn toggle<L: LightSwitch + ?Sized>(uptime: &Uptime, light: &L) -> Self {
        let is_light_on = light.toggle_light();
        Self {
            uptime: uptime.ticks(),
            is_light_on,
        }
    }
}

/// Body of `GET /registration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegistrationReport {
    pub activated: bool,
    pub pending: bool,
    pub error: bool,
}

impl From<RegistrationSnapshot> for RegistrationReport {
    fn from(snapshot: RegistrationSnapshot) -> Self {
        Self {
            activated: snapshot.activation.is_activated(),
            pending: snapshot.is_pending(),
            error: snapshot.error,
        }
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use super::*;
    use crate::coordinator::{Activation, RequestStatus};

    #[derive(Default)]
    struct FlagLight(Cell<bool>);

    impl LightSwitch for FlagLight {
        fn is_light_on(&self) -> bool {
            self.0.get()
        }

        fn set_light(&self, on: bool) {
            self.0.set(on);
        }

        fn toggle_light(&self) -> bool {
            self.0.set(!self.0.get());
            self.0.get()
        }
    }

    fn to_json<T: Serialize>(value: &T) -> String {
        let mut buf = [0u8; 128];
        let len = serde_json_core::to_slice(value, &mut buf).unwrap();
        String::from_utf8(buf[..len].to_vec()).unwrap()
    }

    #[test]
    fn uptime_counts_ticks() {
        let uptime = Uptime::new();

        for expected in 1..=5 {
            assert_eq!(uptime.tick(), expected);
        }
        assert_eq!(uptime.ticks(), 5);
    }

    #[test]
    fn status_after_ticks_serializes() {
        let uptime = Uptime::new();
        let light = FlagLight::default();
        for _ in 0..7 {
            uptime.tick();
        }

        let status = DeviceStatus::read(&uptime, &light);

        assert_eq!(to_json(&status), r#"{"uptime":7,"is_light_on":false}"#);
    }

    #[test]
    fn toggle_twice_restores_light() {
        let uptime = Uptime::new();
        let light = FlagLight::default();

        assert!(DeviceStatus::toggle(&uptime, &light).is_light_on);
        assert!(!DeviceStatus::toggle(&uptime, &light).is_light_on);
        assert!(!light.is_light_on());
    }

    #[test]
    fn registration_report_mirrors_snapshot() {
        let report = RegistrationReport::from(RegistrationSnapshot {
            activation: Activation::Activated,
            status: RequestStatus::Idle,
            error: false,
        });

        assert_eq!(
            to_json(&report),
            r#"{"activated":true,"pending":false,"error":false}"#
        );
    }
}
