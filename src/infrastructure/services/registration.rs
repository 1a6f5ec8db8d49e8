//! Channels and spawner connecting the registration tasks
//!
//! The button monitor and every registry call report into one event
//! channel drained by the coordinator task; settled outcomes go out through
//! the feedback channel to the blink task.

use embassy_executor::Spawner;
use embassy_net::Stack;
use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    channel::{Channel, Receiver, Sender},
};
use log::warn;
use myrtio_registry::{
    BlinkProfile,
    ExecutorSpawner,
    Operation,
    RegistryAddress,
    RequestResult,
    SpawnError,
    Uptime,
};

use crate::infrastructure::{tasks::registry_request_task, types::IndicatorLight};

const EVENT_QUEUE_SIZE: usize = 4;
const FEEDBACK_QUEUE_SIZE: usize = 2;

#[derive(Debug, Clone, Copy)]
pub(crate) enum RegistrationEvent {
    /// The click cap was reached
    ToggleRequested,
    /// A registry call finished
    RequestCompleted(RequestResult),
}

type EventChannel = Channel<CriticalSectionRawMutex, RegistrationEvent, EVENT_QUEUE_SIZE>;
type FeedbackChannel = Channel<CriticalSectionRawMutex, BlinkProfile, FEEDBACK_QUEUE_SIZE>;

static EVENTS: EventChannel = Channel::new();
static FEEDBACK: FeedbackChannel = Channel::new();

pub(crate) fn registration_event_sender()
-> Sender<'static, CriticalSectionRawMutex, RegistrationEvent, EVENT_QUEUE_SIZE> {
    EVENTS.sender()
}

pub(crate) fn registration_event_receiver()
-> Receiver<'static, CriticalSectionRawMutex, RegistrationEvent, EVENT_QUEUE_SIZE> {
    EVENTS.receiver()
}

pub(crate) fn feedback_receiver()
-> Receiver<'static, CriticalSectionRawMutex, BlinkProfile, FEEDBACK_QUEUE_SIZE> {
    FEEDBACK.receiver()
}

/// Queue a blink pattern. Dropped with a warning when the queue is full.
pub(crate) fn send_feedback(profile: BlinkProfile) {
    if FEEDBACK.try_send(profile).is_err() {
        warn!("registration: feedback queue full, dropping {:?}", profile);
    }
}

/// Everything a registry call needs besides the operation.
pub struct RequestContext {
    pub stack: Stack<'static>,
    pub address: RegistryAddress<'static>,
    pub device_name: &'static str,
    pub timeout_secs: u64,
    pub light: &'static IndicatorLight,
    pub uptime: &'static Uptime,
}

/// Starts each registry call as its own embassy task.
pub struct TaskSpawner {
    spawner: Spawner,
    context: &'static RequestContext,
}

impl TaskSpawner {
    pub fn new(spawner: Spawner, context: &'static RequestContext) -> Self {
        Self { spawner, context }
    }
}

impl ExecutorSpawner for TaskSpawner {
    fn spawn(&mut self, operation: Operation) -> Result<(), SpawnError> {
        self.spawner
            .spawn(registry_request_task(operation, self.context))
            .map_err(|e| {
                warn!("registration: executor spawn failed: {:?}", e);
                SpawnError
            })
    }
}
