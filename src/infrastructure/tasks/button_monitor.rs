use embassy_net::Stack;
use embassy_time::{Duration, Ticker};
use esp_hal::gpio::Input;
use log::{debug, info};
use myrtio_registry::{ButtonConfig, ButtonMonitor, PollGate, PollOutcome, RegistrationState};

use crate::infrastructure::{
    drivers::is_link_established,
    services::{RegistrationEvent, registration_event_sender},
};

/// Sample the button at a fixed cadence and request an activation toggle
/// every time the click cap is reached.
///
/// The button is active-low.
#[embassy_executor::task]
pub async fn button_monitor_task(
    button: Input<'static>,
    stack: Stack<'static>,
    state: &'static RegistrationState,
    config: ButtonConfig,
    poll_interval_ms: u64,
) {
    let mut monitor = ButtonMonitor::new(config);
    let mut ticker = Ticker::every(Duration::from_millis(poll_interval_ms));
    let events = registration_event_sender();

    loop {
        ticker.next().await;

        let gate = PollGate {
            link_established: is_link_established(stack),
            pending: state.is_pending(),
        };
        match monitor.poll(button.is_low(), gate) {
            PollOutcome::Ignored => {}
            PollOutcome::Counted(count) => {
                debug!("button: click {}/{}", count, monitor.cap());
            }
            PollOutcome::CapReached => {
                info!("button: click cap reached, requesting toggle");
                events.send(RegistrationEvent::ToggleRequested).await;
            }
        }
    }
}
