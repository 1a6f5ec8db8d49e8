//! Infrastructure layer - Port implementations
//!
//! Concrete implementations of the application layer ports using the
//! ESP32 radio, GPIO and embassy runtime.

pub(crate) mod adapters;
pub mod drivers;
pub mod services;
pub mod tasks;
pub mod types;
