mod blink;
mod button_monitor;
mod coordinator;
mod http_server;
mod registry_request;

pub use blink::blink_task;
pub use button_monitor::button_monitor_task;
pub use coordinator::coordinator_task;
pub use http_server::http_server_task;
pub(crate) use registry_request::registry_request_task;
