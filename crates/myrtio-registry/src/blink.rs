//! Outcome feedback as blink patterns
//!
//! The pattern is always recomputed from the coordinator's current state:
//! one slow blink for an active registration, three fast blinks for an
//! inactive one and five fast blinks after a transport failure.

use embedded_hal_async::delay::DelayNs;

use crate::{coordinator::Activation, light::LightSwitch};

const ACTIVATED_REPEATS: u8 = 1;
const DEACTIVATED_REPEATS: u8 = 3;
const ERROR_REPEATS: u8 = 5;

const DEFAULT_ACTIVATE_INTERVAL_MS: u32 = 1000;
const DEFAULT_DEACTIVATE_INTERVAL_MS: u32 = 250;

/// Inter-toggle delays for the two pattern families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkTimings {
    pub activate_ms: u32,
    pub deactivate_ms: u32,
}

impl BlinkTimings {
    pub const fn new(activate_ms: u32, deactivate_ms: u32) -> Self {
        Self {
            activate_ms,
            deactivate_ms,
        }
    }
}

impl Default for BlinkTimings {
    fn default() -> Self {
        Self::new(DEFAULT_ACTIVATE_INTERVAL_MS, DEFAULT_DEACTIVATE_INTERVAL_MS)
    }
}

/// A (repetition count, inter-toggle delay) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkProfile {
    pub repeat_count: u8,
    pub interval_ms: u32,
}

impl BlinkProfile {
    pub const fn new(repeat_count: u8, interval_ms: u32) -> Self {
        Self {
            repeat_count,
            interval_ms,
        }
    }

    /// Select the feedback pattern for the given state.
    ///
    /// Activation wins over the error flag.
    pub const fn select(activation: Activation, error: bool, timings: &BlinkTimings) -> Self {
        match (activation, error) {
            (Activation::Activated, _) => Self::new(ACTIVATED_REPEATS, timings.activate_ms),
            (Activation::Deactivated, true) => Self::new(ERROR_REPEATS, timings.deactivate_ms),
            (Activation::Deactivated, false) => {
                Self::new(DEACTIVATED_REPEATS, timings.deactivate_ms)
            }
        }
    }
}

/// Plays [`BlinkProfile`]s on a light.
///
/// `play` borrows the sequencer mutably, so one sequencer never runs two
/// patterns at once. The light is left off when a pattern completes.
pub struct BlinkSequencer<'a, L: LightSwitch + ?Sized, D: DelayNs> {
    light: &'a L,
    delay: D,
}

impl<'a, L: LightSwitch + ?Sized, D: DelayNs> BlinkSequencer<'a, L, D> {
    pub fn new(light: &'a L, delay: D) -> Self {
        Self { light, delay }
    }

    pub async fn play(&mut self, profile: BlinkProfile) {
        for _ in 0..profile.repeat_count {
            self.light.set_light(true);
            self.delay.delay_ms(profile.interval_ms).await;
            self.light.set_light(false);
            self.delay.delay_ms(profile.interval_ms).await;
        }
    }
}
