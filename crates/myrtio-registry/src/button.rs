//! Button click counting
//!
//! The monitor is sampled at a fixed cadence. A sample only counts when the
//! network link is up and no registry call is in flight; after `cap`
//! counted samples the monitor reports [`PollOutcome::CapReached`] and starts
//! over from zero.

const DEFAULT_CLICK_CAP: u16 = 20;

/// How pressed samples are turned into clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountingMode {
    /// Every pressed sample counts, so holding the button counts too.
    Level,
    /// Only a released-to-pressed transition counts.
    Edge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonConfig {
    pub cap: u16,
    pub mode: CountingMode,
}

impl ButtonConfig {
    pub const fn new(cap: u16, mode: CountingMode) -> Self {
        Self { cap, mode }
    }
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CLICK_CAP, CountingMode::Edge)
    }
}

/// Conditions outside the button that decide whether a sample may count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollGate {
    pub link_established: bool,
    pub pending: bool,
}

impl PollGate {
    pub const fn is_open(self) -> bool {
        self.link_established && !self.pending
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The sample did not qualify.
    Ignored,
    /// The sample counted; carries the new counter value.
    Counted(u16),
    /// The sample completed a full series; the counter is back at zero.
    CapReached,
}

#[derive(Debug)]
pub struct ButtonMonitor {
    cap: u16,
    mode: CountingMode,
    counter: u16,
    was_pressed: bool,
}

impl ButtonMonitor {
    /// Create a monitor. A cap of zero is treated as one.
    pub const fn new(config: ButtonConfig) -> Self {
        let cap = if config.cap == 0 { 1 } else { config.cap };
        Self {
            cap,
            mode: config.mode,
            counter: 0,
            was_pressed: false,
        }
    }

    /// Feed one sample. `pressed` is the logical button state, already
    /// corrected for the input's polarity.
    pub fn poll(&mut self, pressed: bool, gate: PollGate) -> PollOutcome {
        let is_click = match self.mode {
            CountingMode::Level => pressed,
            CountingMode::Edge => pressed && !self.was_pressed,
        };
        self.was_pressed = pressed;

        if !is_click || !gate.is_open() {
            return PollOutcome::Ignored;
        }

        self.counter += 1;
        if self.counter >= self.cap {
            self.counter = 0;
            return PollOutcome::CapReached;
        }

        PollOutcome::Counted(self.counter)
    }

    pub const fn counter(&self) -> u16 {
        self.counter
    }

    pub const fn cap(&self) -> u16 {
        self.cap
    }
}
