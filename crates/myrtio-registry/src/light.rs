//! Indicator light
//!
//! [`LightController`] owns the on/off flag and the output pin. It is not
//! shareable on its own; tasks reach it through [`SharedLight`], which wraps
//! it in a blocking mutex so a blink pattern and an HTTP toggle never
//! interleave inside a single write.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::{Mutex, raw::RawMutex};
use embedded_hal::digital::OutputPin;
use log::warn;

/// Read/write access to the indicator light.
pub trait LightSwitch {
    /// Get the current light state
    fn is_light_on(&self) -> bool;

    /// Drive the light to the given state
    fn set_light(&self, on: bool);

    /// Flip the light and return the new state
    fn toggle_light(&self) -> bool;
}

/// Single on/off output with a mirrored boolean.
pub struct LightController<P: OutputPin> {
    pin: P,
    is_on: bool,
}

impl<P: OutputPin> LightController<P> {
    /// Take ownership of the pin and drive it low.
    pub fn new(pin: P) -> Self {
        let mut controller = Self { pin, is_on: false };
        controller.write();
        controller
    }

    pub fn is_on(&self) -> bool {
        self.is_on
    }

    pub fn set(&mut self, on: bool) {
        self.is_on = on;
        self.write();
    }

    pub fn toggle(&mut self) -> bool {
        self.set(!self.is_on);
        self.is_on
    }

    fn write(&mut self) {
        let result = if self.is_on {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        if let Err(e) = result {
            warn!("light: failed to drive output: {:?}", e);
        }
    }
}

/// [`LightController`] behind a blocking mutex.
pub struct SharedLight<M: RawMutex, P: OutputPin> {
    inner: Mutex<M, RefCell<LightController<P>>>,
}

impl<M: RawMutex, P: OutputPin> SharedLight<M, P> {
    pub fn new(controller: LightController<P>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(controller)),
        }
    }
}

impl<M: RawMutex, P: OutputPin> LightSwitch for SharedLight<M, P> {
    fn is_light_on(&self) -> bool {
        self.inner.lock(|cell| cell.borrow().is_on())
    }

    fn set_light(&self, on: bool) {
        self.inner.lock(|cell| cell.borrow_mut().set(on));
    }

    fn toggle_light(&self) -> bool {
        self.inner.lock(|cell| cell.borrow_mut().toggle())
    }
}

#[cfg(test)]
mod tests {
    use core::convert::Infallible;

    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use embedded_hal::digital::ErrorType;

    use super::*;

    #[derive(Default)]
    struct LevelPin {
        high: bool,
        writes: usize,
    }

    impl ErrorType for LevelPin {
        type Error = Infallible;
    }

    impl OutputPin for LevelPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            self.writes += 1;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            self.writes += 1;
            Ok(())
        }
    }

    #[test]
    fn starts_off_and_drives_pin_low() {
        let controller = LightController::new(LevelPin::default());

        assert!(!controller.is_on());
        assert!(!controller.pin.high);
        assert_eq!(controller.pin.writes, 1);
    }

    #[test]
    fn toggle_mirrors_pin_level() {
        let mut controller = LightController::new(LevelPin::default());

        assert!(controller.toggle());
        assert!(controller.pin.high);
        assert!(!controller.toggle());
        assert!(!controller.pin.high);
    }

    #[test]
    fn shared_light_toggles_through_mutex() {
        let light: SharedLight<NoopRawMutex, _> =
            SharedLight::new(LightController::new(LevelPin::default()));

        light.set_light(true);
        assert!(light.is_light_on());
        assert!(!light.toggle_light());
        assert!(!light.is_light_on());
    }
}
