mod status;

pub use status::StatusUsecases;
