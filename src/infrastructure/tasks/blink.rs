use embassy_time::Delay;
use myrtio_registry::BlinkSequencer;

use crate::infrastructure::{services::feedback_receiver, types::IndicatorLight};

/// Play queued feedback patterns one after another.
#[embassy_executor::task]
pub async fn blink_task(light: &'static IndicatorLight) {
    let feedback = feedback_receiver();
    let mut sequencer = BlinkSequencer::new(light, Delay);

    loop {
        let profile = feedback.receive().await;
        log::debug!("blink: playing {:?}", profile);
        sequencer.play(profile).await;
    }
}
