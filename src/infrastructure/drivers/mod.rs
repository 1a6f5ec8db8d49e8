mod network;
mod random;
pub mod wifi_sta;

pub(crate) use network::{is_link_established, resolve_host, wait_for_connection};
pub use wifi_sta::{Hostname, hostname_from_name, start_wifi_sta};
