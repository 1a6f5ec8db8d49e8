//! Registration state machine
//!
//! The coordinator is the only writer of activation, in-flight and error
//! state. It starts at most one registry call at a time through an
//! [`ExecutorSpawner`], interprets the reported [`RequestResult`] and tells
//! the caller which feedback to show.
//!
//! | Response class        | Activation    | Error flag | Follow-up                 |
//! |-----------------------|---------------|------------|---------------------------|
//! | activated             | Activated     | cleared    | feedback                  |
//! | already activated     | Activated     | cleared    | feedback                  |
//! | deactivated           | Deactivated   | cleared    | feedback                  |
//! | already deactivated   | Deactivated   | cleared    | one compensating activate |
//! | transport failure     | unchanged     | set        | feedback                  |
//! | unrecognized          | unchanged     | unchanged  | none                      |

use core::fmt;

use log::{debug, info, warn};

use crate::{
    blink::{BlinkProfile, BlinkTimings},
    protocol::{Operation, RequestResult, ResponseClass, ResponseCodes},
};

const DEFAULT_COMPENSATING_RETRIES: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activation {
    #[default]
    Deactivated,
    Activated,
}

impl Activation {
    /// The operation that flips this state.
    pub const fn toggle_operation(self) -> Operation {
        match self {
            Activation::Deactivated => Operation::Activate,
            Activation::Activated => Operation::Deactivate,
        }
    }

    pub const fn is_activated(self) -> bool {
        matches!(self, Activation::Activated)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    Pending,
}

/// Point-in-time view of the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegistrationSnapshot {
    pub activation: Activation,
    pub status: RequestStatus,
    pub error: bool,
}

impl RegistrationSnapshot {
    pub const fn is_pending(&self) -> bool {
        matches!(self.status, RequestStatus::Pending)
    }
}

/// The executor could not be started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnError;

/// Starts one registry call in its own execution context.
pub trait ExecutorSpawner {
    fn spawn(&mut self, operation: Operation) -> Result<(), SpawnError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationError {
    /// A registry call is already in flight
    Busy,
    /// The executor could not be started; nothing was sent
    SpawnFailed(Operation),
}

impl RegistrationError {
    /// Whether nothing was sent, so the same toggle can simply be requested
    /// again. A busy rejection is not: the call in flight decides the next
    /// operation.
    pub const fn is_retryable(&self) -> bool {
        match self {
            RegistrationError::Busy => false,
            RegistrationError::SpawnFailed(_) => true,
        }
    }
}

impl fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrationError::Busy => write!(f, "registry call already in flight"),
            RegistrationError::SpawnFailed(op) => {
                write!(f, "unable to start {} call", op.as_str())
            }
        }
    }
}

/// What the caller should do after a result was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// State settled; show this feedback.
    Settled(BlinkProfile),
    /// A compensating call was started; feedback waits for its result.
    Retrying(Operation),
    /// The code was not recognized; state untouched, no feedback.
    Unrecognized(u16),
    /// The compensating call could not be started; state settled anyway.
    RetryFailed(RegistrationError, BlinkProfile),
    /// No call was in flight, the result was dropped.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinatorConfig {
    pub codes: ResponseCodes,
    pub timings: BlinkTimings,
    /// Compensating activate calls allowed per user request.
    pub max_compensating_retries: u8,
}

impl CoordinatorConfig {
    pub const fn new(codes: ResponseCodes, timings: BlinkTimings) -> Self {
        Self {
            codes,
            timings,
            max_compensating_retries: DEFAULT_COMPENSATING_RETRIES,
        }
    }

    #[must_use]
    pub const fn with_max_compensating_retries(mut self, retries: u8) -> Self {
        self.max_compensating_retries = retries;
        self
    }
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self::new(ResponseCodes::new(), BlinkTimings::default())
    }
}

pub struct Coordinator<S: ExecutorSpawner> {
    spawner: S,
    config: CoordinatorConfig,
    activation: Activation,
    status: RequestStatus,
    error: bool,
    retries_left: u8,
}

impl<S: ExecutorSpawner> Coordinator<S> {
    pub const fn new(spawner: S, config: CoordinatorConfig) -> Self {
        Self {
            spawner,
            config,
            activation: Activation::Deactivated,
            status: RequestStatus::Idle,
            error: false,
            retries_left: 0,
        }
    }

    pub const fn snapshot(&self) -> RegistrationSnapshot {
        RegistrationSnapshot {
            activation: self.activation,
            status: self.status,
            error: self.error,
        }
    }

    pub fn spawner(&self) -> &S {
        &self.spawner
    }

    pub fn spawner_mut(&mut self) -> &mut S {
        &mut self.spawner
    }

    /// Start the call that flips the current activation.
    ///
    /// Fails with [`RegistrationError::Busy`] while a call is in flight.
    pub fn request_toggle(&mut self) -> Result<Operation, RegistrationError> {
        if self.status == RequestStatus::Pending {
            return Err(RegistrationError::Busy);
        }
        self.retries_left = self.config.max_compensating_retries;
        let operation = self.activation.toggle_operation();
        self.begin(operation)?;
        Ok(operation)
    }

    /// Apply the result of the call in flight.
    pub fn handle_result(&mut self, result: RequestResult) -> Resolution {
        if self.status != RequestStatus::Pending {
            warn!("coordinator: dropping result without a call in flight: {:?}", result);
            return Resolution::Stale;
        }

        let class = match result {
            RequestResult::Status(code) => self.config.codes.classify(code),
            RequestResult::TransportFailure => {
                warn!("coordinator: registry unreachable");
                self.error = true;
                return self.settle();
            }
        };
        debug!("coordinator: registry answered {:?}", class);

        match class {
            ResponseClass::Activated | ResponseClass::AlreadyActivated => {
                self.activation = Activation::Activated;
                self.error = false;
            }
            ResponseClass::Deactivated => {
                self.activation = Activation::Deactivated;
                self.error = false;
            }
            ResponseClass::AlreadyDeactivated => {
                self.activation = Activation::Deactivated;
                self.error = false;
                match self.compensate() {
                    Ok(Some(operation)) => return Resolution::Retrying(operation),
                    Ok(None) => {}
                    Err(error) => return Resolution::RetryFailed(error, self.settle_profile()),
                }
            }
            ResponseClass::Unrecognized(code) => {
                warn!("coordinator: unrecognized registry response code {}", code);
                self.status = RequestStatus::Idle;
                return Resolution::Unrecognized(code);
            }
        }

        self.settle()
    }

    /// Start the compensating activate call if the budget allows it.
    fn compensate(&mut self) -> Result<Option<Operation>, RegistrationError> {
        if self.retries_left == 0 {
            warn!("coordinator: compensating retry budget exhausted");
            return Ok(None);
        }
        self.retries_left -= 1;

        let operation = Operation::Activate;
        self.begin(operation)?;
        info!("coordinator: device was already deactivated, activating");
        Ok(Some(operation))
    }

    fn begin(&mut self, operation: Operation) -> Result<(), RegistrationError> {
        self.status = RequestStatus::Pending;
        if self.spawner.spawn(operation).is_err() {
            self.status = RequestStatus::Idle;
            warn!("coordinator: failed to start {} call", operation.as_str());
            return Err(RegistrationError::SpawnFailed(operation));
        }
        info!("coordinator: {} call started", operation.as_str());
        Ok(())
    }

    fn settle(&mut self) -> Resolution {
        Resolution::Settled(self.settle_profile())
    }

    fn settle_profile(&mut self) -> BlinkProfile {
        self.status = RequestStatus::Idle;
        BlinkProfile::select(self.activation, self.error, &self.config.timings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMINGS: BlinkTimings = BlinkTimings::new(1000, 250);

    #[derive(Default)]
    struct FakeSpawner {
        spawned: Vec<Operation>,
        fail: bool,
    }

    impl ExecutorSpawner for FakeSpawner {
        fn spawn(&mut self, operation: Operation) -> Result<(), SpawnError> {
            if self.fail {
                return Err(SpawnError);
            }
            self.spawned.push(operation);
            Ok(())
        }
    }

    fn coordinator() -> Coordinator<FakeSpawner> {
        Coordinator::new(
            FakeSpawner::default(),
            CoordinatorConfig::new(ResponseCodes::new(), TIMINGS),
        )
    }

    #[test]
    fn starts_deactivated_and_idle() {
        assert_eq!(coordinator().snapshot(), RegistrationSnapshot::default());
    }

    #[test]
    fn toggle_from_deactivated_activates() {
        let mut coordinator = coordinator();

        assert_eq!(coordinator.request_toggle(), Ok(Operation::Activate));
        assert!(coordinator.snapshot().is_pending());
        assert_eq!(coordinator.spawner().spawned, [Operation::Activate]);
    }

    #[test]
    fn second_toggle_while_pending_is_busy() {
        let mut coordinator = coordinator();
        coordinator.request_toggle().unwrap();

        assert_eq!(coordinator.request_toggle(), Err(RegistrationError::Busy));
        assert_eq!(coordinator.spawner().spawned.len(), 1);
    }

    #[test]
    fn activate_success_settles_activated() {
        let mut coordinator = coordinator();
        coordinator.request_toggle().unwrap();

        let resolution = coordinator.handle_result(RequestResult::Status(201));

        assert_eq!(resolution, Resolution::Settled(BlinkProfile::new(1, 1000)));
        assert_eq!(
            coordinator.snapshot(),
            RegistrationSnapshot {
                activation: Activation::Activated,
                status: RequestStatus::Idle,
                error: false,
            }
        );
    }

    #[test]
    fn already_activated_counts_as_success() {
        let mut coordinator = coordinator();
        coordinator.request_toggle().unwrap();

        coordinator.handle_result(RequestResult::Status(409));

        assert_eq!(coordinator.snapshot().activation, Activation::Activated);
    }

    #[test]
    fn deactivate_after_activation() {
        let mut coordinator = coordinator();
        coordinator.request_toggle().unwrap();
        coordinator.handle_result(RequestResult::Status(201));

        assert_eq!(coordinator.request_toggle(), Ok(Operation::Deactivate));
        let resolution = coordinator.handle_result(RequestResult::Status(204));

        assert_eq!(resolution, Resolution::Settled(BlinkProfile::new(3, 250)));
        assert_eq!(coordinator.snapshot().activation, Activation::Deactivated);
    }

    #[test]
    fn transport_failure_sets_error_and_keeps_activation() {
        let mut coordinator = coordinator();
        coordinator.request_toggle().unwrap();

        let resolution = coordinator.handle_result(RequestResult::TransportFailure);

        assert_eq!(resolution, Resolution::Settled(BlinkProfile::new(5, 250)));
        assert_eq!(
            coordinator.snapshot(),
            RegistrationSnapshot {
                activation: Activation::Deactivated,
                status: RequestStatus::Idle,
                error: true,
            }
        );
    }

    #[test]
    fn success_clears_error() {
        let mut coordinator = coordinator();
        coordinator.request_toggle().unwrap();
        coordinator.handle_result(RequestResult::TransportFailure);

        coordinator.request_toggle().unwrap();
        coordinator.handle_result(RequestResult::Status(201));

        assert!(!coordinator.snapshot().error);
    }

    #[test]
    fn unrecognized_code_changes_nothing() {
        let mut coordinator = coordinator();
        coordinator.request_toggle().unwrap();
        coordinator.handle_result(RequestResult::TransportFailure);
        coordinator.request_toggle().unwrap();

        let resolution = coordinator.handle_result(RequestResult::Status(500));

        assert_eq!(resolution, Resolution::Unrecognized(500));
        assert_eq!(
            coordinator.snapshot(),
            RegistrationSnapshot {
                activation: Activation::Deactivated,
                status: RequestStatus::Idle,
                error: true,
            }
        );
    }

    #[test]
    fn already_deactivated_triggers_one_compensating_activate() {
        let mut coordinator = coordinator();
        coordinator.request_toggle().unwrap();
        coordinator.handle_result(RequestResult::Status(201));
        coordinator.request_toggle().unwrap();

        let resolution = coordinator.handle_result(RequestResult::Status(404));

        assert_eq!(resolution, Resolution::Retrying(Operation::Activate));
        assert_eq!(coordinator.snapshot().activation, Activation::Deactivated);
        assert!(coordinator.snapshot().is_pending());
        assert_eq!(
            coordinator.spawner().spawned,
            [Operation::Activate, Operation::Deactivate, Operation::Activate]
        );

        let resolution = coordinator.handle_result(RequestResult::Status(201));
        assert_eq!(resolution, Resolution::Settled(BlinkProfile::new(1, 1000)));
        assert_eq!(coordinator.snapshot().activation, Activation::Activated);
    }

    #[test]
    fn compensating_retry_is_bounded() {
        let mut coordinator = coordinator();
        coordinator.request_toggle().unwrap();

        assert_eq!(
            coordinator.handle_result(RequestResult::Status(404)),
            Resolution::Retrying(Operation::Activate)
        );
        assert_eq!(
            coordinator.handle_result(RequestResult::Status(404)),
            Resolution::Settled(BlinkProfile::new(3, 250))
        );
        assert!(!coordinator.snapshot().is_pending());
        assert_eq!(coordinator.spawner().spawned.len(), 2);
    }

    #[test]
    fn retry_budget_resets_per_request() {
        let mut coordinator = coordinator();
        for _ in 0..2 {
            coordinator.request_toggle().unwrap();
            coordinator.handle_result(RequestResult::Status(404));
            coordinator.handle_result(RequestResult::Status(404));
        }

        assert_eq!(coordinator.spawner().spawned.len(), 4);
    }

    #[test]
    fn retries_can_be_disabled() {
        let mut coordinator = Coordinator::new(
            FakeSpawner::default(),
            CoordinatorConfig::new(ResponseCodes::new(), TIMINGS).with_max_compensating_retries(0),
        );
        coordinator.request_toggle().unwrap();

        assert_eq!(
            coordinator.handle_result(RequestResult::Status(404)),
            Resolution::Settled(BlinkProfile::new(3, 250))
        );
    }

    #[test]
    fn spawn_failure_rolls_back_to_idle() {
        let mut coordinator = Coordinator::new(
            FakeSpawner {
                fail: true,
                ..FakeSpawner::default()
            },
            CoordinatorConfig::new(ResponseCodes::new(), TIMINGS),
        );

        let error = coordinator.request_toggle().unwrap_err();

        assert_eq!(error, RegistrationError::SpawnFailed(Operation::Activate));
        assert!(error.is_retryable());
        assert_eq!(coordinator.snapshot(), RegistrationSnapshot::default());
    }

    #[test]
    fn busy_is_not_retryable() {
        let mut coordinator = coordinator();
        coordinator.request_toggle().unwrap();

        let error = coordinator.request_toggle().unwrap_err();

        assert_eq!(error, RegistrationError::Busy);
        assert!(!error.is_retryable());
    }

    #[test]
    fn failed_compensating_spawn_is_reported() {
        let mut coordinator = coordinator();
        coordinator.request_toggle().unwrap();
        coordinator.spawner_mut().fail = true;

        let resolution = coordinator.handle_result(RequestResult::Status(404));

        assert_eq!(
            resolution,
            Resolution::RetryFailed(
                RegistrationError::SpawnFailed(Operation::Activate),
                BlinkProfile::new(3, 250)
            )
        );
        assert_eq!(coordinator.snapshot(), RegistrationSnapshot::default());
        assert_eq!(coordinator.spawner().spawned, [Operation::Activate]);
    }

    #[test]
    fn stale_result_is_dropped() {
        let mut coordinator = coordinator();

        assert_eq!(
            coordinator.handle_result(RequestResult::Status(201)),
            Resolution::Stale
        );
        assert_eq!(coordinator.snapshot(), RegistrationSnapshot::default());
    }
}
