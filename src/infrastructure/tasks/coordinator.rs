use log::{info, warn};
use myrtio_registry::{RegistrationState, Resolution};

use crate::infrastructure::{
    services::{RegistrationEvent, registration_event_receiver, send_feedback},
    types::RegistrationCoordinator,
};

/// Sole owner of the registration state.
///
/// Events are handled strictly in arrival order; the snapshot is republished
/// after each one.
#[embassy_executor::task]
pub async fn coordinator_task(
    mut coordinator: RegistrationCoordinator,
    state: &'static RegistrationState,
) {
    let events = registration_event_receiver();
    state.publish(&coordinator.snapshot());

    loop {
        match events.receive().await {
            RegistrationEvent::ToggleRequested => {
                if let Err(e) = coordinator.request_toggle() {
                    warn!(
                        "coordinator: toggle rejected: {} (retryable: {})",
                        e,
                        e.is_retryable()
                    );
                }
            }
            RegistrationEvent::RequestCompleted(result) => {
                match coordinator.handle_result(result) {
                    Resolution::Settled(profile) => {
                        info!("coordinator: settled {:?}", coordinator.snapshot());
                        send_feedback(profile);
                    }
                    Resolution::RetryFailed(e, profile) => {
                        warn!(
                            "coordinator: compensating call lost: {} (retryable: {})",
                            e,
                            e.is_retryable()
                        );
                        send_feedback(profile);
                    }
                    Resolution::Retrying(_) | Resolution::Unrecognized(_) | Resolution::Stale => {}
                }
            }
        }
        state.publish(&coordinator.snapshot());
    }
}
