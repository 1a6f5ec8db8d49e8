use myrtio_registry::{DeviceStatus, LightSwitch, RegistrationReport, RegistrationState, Uptime};

use crate::domain::ports::{
    DeviceStatusReader,
    LightToggler,
    RegistrationReader,
    StatusUsecasesPort,
};

/// Read paths into the live device state for the local server.
pub struct StatusUsecases<L: LightSwitch + Sync + 'static> {
    uptime: &'static Uptime,
    light: &'static L,
    registration: &'static RegistrationState,
}

impl<L: LightSwitch + Sync + 'static> StatusUsecases<L> {
    pub fn new(
        uptime: &'static Uptime,
        light: &'static L,
        registration: &'static RegistrationState,
    ) -> Self {
        Self {
            uptime,
            light,
            registration,
        }
    }
}

impl<L: LightSwitch + Sync + 'static> DeviceStatusReader for StatusUsecases<L> {
    fn device_status(&self) -> DeviceStatus {
        DeviceStatus::read(self.uptime, self.light)
    }
}

impl<L: LightSwitch + Sync + 'static> RegistrationReader for StatusUsecases<L> {
    fn registration(&self) -> RegistrationReport {
        RegistrationReport::from(self.registration.snapshot())
    }
}

impl<L: LightSwitch + Sync + 'static> LightToggler for StatusUsecases<L> {
    fn toggle_light(&self) -> DeviceStatus {
        let status = DeviceStatus::toggle(self.uptime, self.light);
        log::info!("status: light toggled, is_light_on={}", status.is_light_on);
        status
    }
}

impl<L: LightSwitch + Sync + 'static> StatusUsecasesPort for StatusUsecases<L> {}
