#![cfg_attr(not(test), no_std)]

//! Device registry coordination
//!
//! Architecture layers:
//! - `light` - indicator output ([`LightController`] + shared [`SharedLight`])
//! - `blink` - outcome feedback patterns ([`BlinkProfile`], [`BlinkSequencer`])
//! - `button` - click counting with link and in-flight gates ([`ButtonMonitor`])
//! - `protocol` - registry wire format: address, request, response codes
//! - `coordinator` - activation state machine ([`Coordinator`])
//! - `state` - lock-free snapshot of the coordinator for other tasks
//! - `status` - local status document and uptime counter
//!
//! Everything here is hardware-agnostic: pins and delays come in through
//! `embedded-hal` traits, outbound calls through [`ExecutorSpawner`].

pub mod blink;
pub mod button;
pub mod coordinator;
pub mod light;
pub mod protocol;
pub mod state;
pub mod status;

pub use blink::{BlinkProfile, BlinkSequencer, BlinkTimings};
pub use button::{ButtonConfig, ButtonMonitor, CountingMode, PollGate, PollOutcome};
pub use coordinator::{
    Activation,
    Coordinator,
    CoordinatorConfig,
    ExecutorSpawner,
    RegistrationError,
    RegistrationSnapshot,
    RequestStatus,
    Resolution,
    SpawnError,
};
pub use light::{LightController, LightSwitch, SharedLight};
pub use protocol::{
    AddressError,
    Elapsed,
    Operation,
    RegistrationBody,
    RegistryAddress,
    RegistryRequest,
    RequestError,
    RequestResult,
    ResponseClass,
    ResponseCodes,
    ResponseError,
    read_status_code,
    within,
};
pub use state::RegistrationState;
pub use status::{DeviceStatus, RegistrationReport, Uptime};
