pub(crate) mod http;
mod registration;
mod registry_client;

pub(crate) use registration::{
    RegistrationEvent,
    feedback_receiver,
    registration_event_receiver,
    registration_event_sender,
    send_feedback,
};
pub use registration::{RequestContext, TaskSpawner};
pub(crate) use registry_client::{TransportError, send_registry_request};
