use myrtio_registry::{DeviceStatus, RegistrationReport};

/// Reader interface for the local device status
pub trait DeviceStatusReader {
    /// Get the current uptime and light state
    fn device_status(&self) -> DeviceStatus;
}

/// Reader interface for the registry activation state
pub trait RegistrationReader {
    /// Get the last published coordinator snapshot
    fn registration(&self) -> RegistrationReport;
}

/// Manual control of the indicator light
pub trait LightToggler {
    /// Flip the light and return the resulting status
    fn toggle_light(&self) -> DeviceStatus;
}

/// Port interface for the status usecases
pub trait StatusUsecasesPort:
    DeviceStatusReader + RegistrationReader + LightToggler + Sync + Send
{
}
