#![cfg_attr(not(test), no_std)]

//! Transport-agnostic building blocks shared by the firmware crates.
//!
//! - `http` - HTTP/1.1 head formatting and parsing for the local status
//!   server and the outbound registry client.

pub mod http;
