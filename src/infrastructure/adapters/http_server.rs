//! Generic HTTP Server Adapter
//!
//! Allocates the socket buffers on the calling task's stack and runs the
//! `listen_and_serve` loop with the given handler. Not a task itself.

use embassy_net::Stack;
use log::info;

use crate::infrastructure::services::http::{HttpHandler, HttpServer};

const RX_BUFFER_SIZE: usize = 1024;
const TX_BUFFER_SIZE: usize = 1024;

/// Run the HTTP server with the given handler.
pub(crate) async fn run_http_server<H: HttpHandler>(
    stack: Stack<'static>,
    port: u16,
    handler: &H,
) -> ! {
    let server = HttpServer::new(handler);
    let mut rx_buffer = [0u8; RX_BUFFER_SIZE];
    let mut tx_buffer = [0u8; TX_BUFFER_SIZE];

    info!("http_server: listening on port {}", port);
    server
        .listen_and_serve(stack, port, &mut rx_buffer, &mut tx_buffer)
        .await
}
