mod dependencies;
mod status;

use dependencies::STATUS_USECASES;
pub use status::StatusHttpController;

use crate::domain::types::StatusUsecasesPortRef;

/// Initialize the controllers with their dependencies
pub fn init_controllers(usecases: StatusUsecasesPortRef) -> StatusHttpController {
    STATUS_USECASES.lock(|cell| {
        cell.borrow_mut().replace(usecases);
    });

    StatusHttpController
}
