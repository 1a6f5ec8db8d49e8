use embassy_net::Stack;
use log::info;

use crate::{
    controllers::StatusHttpController,
    infrastructure::{adapters::run_http_server, drivers::wait_for_connection},
};

#[embassy_executor::task]
pub async fn http_server_task(
    stack: Stack<'static>,
    port: u16,
    handler: &'static StatusHttpController,
) {
    let network = wait_for_connection(stack).await;
    info!("http_server: network ready, address {}", network.address);

    run_http_server(stack, port, handler).await;
}
