use core::cell::RefCell;

use embassy_sync::blocking_mutex::{Mutex, raw::CriticalSectionRawMutex};

use crate::domain::types::StatusUsecasesPortRef;

pub(super) static STATUS_USECASES: Mutex<
    CriticalSectionRawMutex,
    RefCell<Option<StatusUsecasesPortRef>>,
> = Mutex::new(RefCell::new(None));

/// Get the status usecases, if the controllers were initialized
pub(super) fn status_usecases() -> Option<StatusUsecasesPortRef> {
    STATUS_USECASES.lock(|cell| *cell.borrow())
}
