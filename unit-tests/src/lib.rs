//! Host-side doubles for the registry crate
//!
//! The harness wires a [`ButtonMonitor`] and a [`Coordinator`] together the
//! same way the firmware tasks do, minus the channels.

use std::{cell::RefCell, collections::VecDeque, convert::Infallible, rc::Rc};

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embedded_hal::digital::{ErrorType, OutputPin};
use embedded_hal_async::delay::DelayNs;
use embedded_io_async::{ErrorKind, Read};
use myrtio_registry::{
    BlinkProfile,
    ButtonConfig,
    ButtonMonitor,
    Coordinator,
    CoordinatorConfig,
    ExecutorSpawner,
    LightController,
    Operation,
    PollGate,
    PollOutcome,
    RegistrationError,
    RegistrationSnapshot,
    RegistrationState,
    RequestResult,
    Resolution,
    SharedLight,
    SpawnError,
};

/// Every level written to a [`RecordingPin`], oldest first.
#[derive(Debug, Clone, Default)]
pub struct PinLog(Rc<RefCell<Vec<bool>>>);

impl PinLog {
    pub fn levels(&self) -> Vec<bool> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// Output pin that records each write into a shared [`PinLog`].
#[derive(Debug)]
pub struct RecordingPin {
    log: PinLog,
}

impl RecordingPin {
    pub fn new() -> (Self, PinLog) {
        let log = PinLog::default();
        (Self { log: log.clone() }, log)
    }
}

impl ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.log.0.borrow_mut().push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.log.0.borrow_mut().push(true);
        Ok(())
    }
}

pub type TestLight = SharedLight<NoopRawMutex, RecordingPin>;

/// A light backed by a [`RecordingPin`]. The initial low write is cleared.
pub fn recording_light() -> (TestLight, PinLog) {
    let (pin, log) = RecordingPin::new();
    let light = SharedLight::new(LightController::new(pin));
    log.clear();
    (light, log)
}

/// Delay that returns immediately and records the requested duration.
#[derive(Debug, Default)]
pub struct RecordingDelay {
    pub waits_ms: Vec<u32>,
}

impl DelayNs for RecordingDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.waits_ms.push(ns / 1_000_000);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.waits_ms.push(ms);
    }
}

/// Reader that replays a fixed sequence of chunks, then reports end of stream.
///
/// A chunk larger than the caller's buffer is handed out over several reads.
#[derive(Debug, Default)]
pub struct ScriptedReader {
    chunks: VecDeque<Result<Vec<u8>, ErrorKind>>,
    /// Number of `read` calls made so far
    pub reads: usize,
}

impl ScriptedReader {
    pub fn new<I, C>(chunks: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: AsRef<[u8]>,
    {
        Self {
            chunks: chunks.into_iter().map(|c| Ok(c.as_ref().to_vec())).collect(),
            reads: 0,
        }
    }

    /// Queue a read error after the chunks already scripted.
    #[must_use]
    pub fn then_fail(mut self, error: ErrorKind) -> Self {
        self.chunks.push_back(Err(error));
        self
    }
}

impl embedded_io_async::ErrorType for ScriptedReader {
    type Error = ErrorKind;
}

impl Read for ScriptedReader {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.reads += 1;
        let Some(chunk) = self.chunks.pop_front() else {
            return Ok(0);
        };
        let mut chunk = chunk?;
        let n = chunk.len().min(buf.len());
        buf[..n].copy_from_slice(&chunk[..n]);
        if n < chunk.len() {
            self.chunks.push_front(Ok(chunk.split_off(n)));
        }
        Ok(n)
    }
}

/// Reader whose reads never complete.
#[derive(Debug, Default)]
pub struct StalledReader;

impl embedded_io_async::ErrorType for StalledReader {
    type Error = ErrorKind;
}

impl Read for StalledReader {
    async fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> {
        core::future::pending().await
    }
}

/// Spawner that records operations instead of starting them.
#[derive(Debug, Default)]
pub struct RecordingSpawner {
    pub spawned: Vec<Operation>,
    /// Number of upcoming spawns that fail
    pub failures: usize,
}

impl ExecutorSpawner for RecordingSpawner {
    fn spawn(&mut self, operation: Operation) -> Result<(), SpawnError> {
        if self.failures > 0 {
            self.failures -= 1;
            return Err(SpawnError);
        }
        self.spawned.push(operation);
        Ok(())
    }
}

/// Button monitor, coordinator and published state in one place.
pub struct Harness {
    pub monitor: ButtonMonitor,
    pub coordinator: Coordinator<RecordingSpawner>,
    pub state: RegistrationState,
    pub link_established: bool,
    /// Errors returned by toggle requests, oldest first
    pub rejected: Vec<RegistrationError>,
}

impl Harness {
    pub fn new(button: ButtonConfig, config: CoordinatorConfig) -> Self {
        Self {
            monitor: ButtonMonitor::new(button),
            coordinator: Coordinator::new(RecordingSpawner::default(), config),
            state: RegistrationState::new(),
            link_established: true,
            rejected: Vec::new(),
        }
    }

    /// Feed one button sample; a reached cap requests a toggle.
    pub fn poll(&mut self, pressed: bool) -> PollOutcome {
        let gate = PollGate {
            link_established: self.link_established,
            pending: self.state.is_pending(),
        };
        let outcome = self.monitor.poll(pressed, gate);
        if outcome == PollOutcome::CapReached {
            if let Err(e) = self.coordinator.request_toggle() {
                self.rejected.push(e);
            }
            self.publish();
        }
        outcome
    }

    /// Press and release `count` times.
    pub fn click(&mut self, count: usize) {
        for _ in 0..count {
            self.poll(true);
            self.poll(false);
        }
    }

    /// Report the result of the call in flight.
    pub fn complete(&mut self, result: RequestResult) -> Resolution {
        let resolution = self.coordinator.handle_result(result);
        self.publish();
        resolution
    }

    pub fn snapshot(&self) -> RegistrationSnapshot {
        self.state.snapshot()
    }

    pub fn spawned(&self) -> &[Operation] {
        &self.coordinator.spawner().spawned
    }

    fn publish(&self) {
        self.state.publish(&self.coordinator.snapshot());
    }
}

/// Settled feedback of a resolution, if any.
pub fn feedback(resolution: Resolution) -> Option<BlinkProfile> {
    match resolution {
        Resolution::Settled(profile) | Resolution::RetryFailed(_, profile) => Some(profile),
        _ => None,
    }
}

/// Serialize into a fresh string.
pub fn to_json<T: serde::Serialize>(value: &T) -> String {
    let mut buf = [0u8; 256];
    let len = serde_json_core::to_slice(value, &mut buf).expect("json fits");
    String::from_utf8(buf[..len].to_vec()).expect("json is utf-8")
}
