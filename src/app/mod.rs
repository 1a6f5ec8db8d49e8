pub mod usecases;

pub use usecases::StatusUsecases;
