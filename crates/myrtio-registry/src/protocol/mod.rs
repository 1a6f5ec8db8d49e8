//! Registry wire protocol
//!
//! Two calls exist: `POST {base}/activate` and `DELETE {base}/deactivate/ip`,
//! both carrying a [`RegistrationBody`]. The registry answers with a status
//! code only; [`ResponseCodes`] maps those codes to outcomes and is part of
//! the device configuration rather than an assumption about HTTP semantics.

mod address;
mod request;
mod response;

pub use address::{AddressError, RegistryAddress};
pub use request::{RegistrationBody, RegistryRequest, RequestError};
pub use response::{Elapsed, ResponseError, STATUS_LINE_BUFFER_SIZE, read_status_code, within};

use myrtio_core::http::{HttpMethod, StatusCode};

/// Outbound registry operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Activate,
    Deactivate,
}

impl Operation {
    pub const fn method(self) -> HttpMethod {
        match self {
            Operation::Activate => HttpMethod::Post,
            Operation::Deactivate => HttpMethod::Delete,
        }
    }

    /// Path suffix appended to the registry base address.
    pub const fn path(self) -> &'static str {
        match self {
            Operation::Activate => "/activate",
            Operation::Deactivate => "/deactivate/ip",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Operation::Activate => "activate",
            Operation::Deactivate => "deactivate",
        }
    }
}

/// What the executor reports back after one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestResult {
    /// The registry answered with this status code.
    Status(StatusCode),
    /// No status code could be obtained.
    TransportFailure,
}

/// Meaning of a registry status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseClass {
    Activated,
    AlreadyActivated,
    Deactivated,
    AlreadyDeactivated,
    Unrecognized(StatusCode),
}

/// Status codes the registry uses for each outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseCodes {
    pub activated: StatusCode,
    pub already_activated: StatusCode,
    pub deactivated: StatusCode,
    pub already_deactivated: StatusCode,
}

impl ResponseCodes {
    pub const fn new() -> Self {
        Self {
            activated: 201,
            already_activated: 409,
            deactivated: 204,
            already_deactivated: 404,
        }
    }

    #[must_use]
    pub const fn with_activated(mut self, code: StatusCode) -> Self {
        self.activated = code;
        self
    }

    #[must_use]
    pub const fn with_already_activated(mut self, code: StatusCode) -> Self {
        self.already_activated = code;
        self
    }

    #[must_use]
    pub const fn with_deactivated(mut self, code: StatusCode) -> Self {
        self.deactivated = code;
        self
    }

    #[must_use]
    pub const fn with_already_deactivated(mut self, code: StatusCode) -> Self {
        self.already_deactivated = code;
        self
    }

    /// Classify a status code. The first matching field wins.
    pub const fn classify(&self, code: StatusCode) -> ResponseClass {
        if code == self.activated {
            ResponseClass::Activated
        } else if code == self.already_activated {
            ResponseClass::AlreadyActivated
        } else if code == self.deactivated {
            ResponseClass::Deactivated
        } else if code == self.already_deactivated {
            ResponseClass::AlreadyDeactivated
        } else {
            ResponseClass::Unrecognized(code)
        }
    }
}

impl Default for ResponseCodes {
    fn default() -> Self {
        Self::new()
    }
}
