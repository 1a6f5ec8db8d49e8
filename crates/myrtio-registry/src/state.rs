//! Shared registration state for external observation
//!
//! The coordinator publishes every change here; the button monitor and the
//! HTTP server read it without going through the coordinator. All three
//! fields live in one byte so a reader never sees a torn snapshot.

use core::sync::atomic::{AtomicU8, Ordering};

use crate::coordinator::{Activation, RegistrationSnapshot, RequestStatus};

const ACTIVATED_BIT: u8 = 1 << 0;
const PENDING_BIT: u8 = 1 << 1;
const ERROR_BIT: u8 = 1 << 2;

pub struct RegistrationState {
    bits: AtomicU8,
}

impl RegistrationState {
    /// Deactivated, idle, no error
    pub const fn new() -> Self {
        Self {
            bits: AtomicU8::new(0),
        }
    }

    pub fn publish(&self, snapshot: &RegistrationSnapshot) {
        self.bits.store(encode(snapshot), Ordering::Release);
    }

    pub fn snapshot(&self) -> RegistrationSnapshot {
        decode(self.bits.load(Ordering::Acquire))
    }

    pub fn is_pending(&self) -> bool {
        self.snapshot().is_pending()
    }
}

impl Default for RegistrationState {
    fn default() -> Self {
        Self::new()
    }
}

const fn encode(snapshot: &RegistrationSnapshot) -> u8 {
    let mut bits = 0;
    if snapshot.activation.is_activated() {
        bits |= ACTIVATED_BIT;
    }
    if snapshot.is_pending() {
        bits |= PENDING_BIT;
    }
    if snapshot.error {
        bits |= ERROR_BIT;
    }
    bits
}

const fn decode(bits: u8) -> RegistrationSnapshot {
    RegistrationSnapshot {
        activation: if bits & ACTIVATED_BIT == 0 {
            Activation::Deactivated
        } else {
            Activation::Activated
        },
        status: if bits & PENDING_BIT == 0 {
            RequestStatus::Idle
        } else {
            RequestStatus::Pending
        },
        error: bits & ERROR_BIT != 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        assert_eq!(RegistrationState::new().snapshot(), RegistrationSnapshot::default());
    }

    #[test]
    fn publish_is_visible_to_readers() {
        let state = RegistrationState::new();
        let snapshot = RegistrationSnapshot {
            activation: Activation::Activated,
            status: RequestStatus::Pending,
            error: true,
        };

        state.publish(&snapshot);

        assert_eq!(state.snapshot(), snapshot);
        assert!(state.is_pending());
    }

    #[test]
    fn publish_replaces_every_field() {
        let state = RegistrationState::new();
        state.publish(&RegistrationSnapshot {
            activation: Activation::Activated,
            status: RequestStatus::Pending,
            error: true,
        });

        state.publish(&RegistrationSnapshot::default());

        assert_eq!(state.snapshot(), RegistrationSnapshot::default());
    }
}
