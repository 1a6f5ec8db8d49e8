use super::ports::StatusUsecasesPort;

/// Type alias for the status usecases port reference
pub type StatusUsecasesPortRef = &'static dyn StatusUsecasesPort;
