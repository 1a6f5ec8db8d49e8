use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use esp_hal::gpio::Output;
use myrtio_registry::{Coordinator, SharedLight};

use crate::{app::StatusUsecases, infrastructure::services::TaskSpawner};

pub type IndicatorLight = SharedLight<CriticalSectionRawMutex, Output<'static>>;

pub type StatusUsecasesImpl = StatusUsecases<IndicatorLight>;

pub type RegistrationCoordinator = Coordinator<TaskSpawner>;
