use embassy_net::{Stack, tcp::TcpSocket};
use embassy_time::Duration;
use log::warn;

use super::{HttpResult, connection::HttpConnection};

const SOCKET_TIMEOUT_SECS: u64 = 30;

pub(crate) trait HttpHandler {
    async fn handle_request(&self, conn: &mut HttpConnection<'_>) -> HttpResult;
}

pub(crate) struct HttpServer<'a, T: HttpHandler> {
    handler: &'a T,
}

impl<'a, T: HttpHandler> HttpServer<'a, T> {
    pub(crate) fn new(handler: &'a T) -> Self {
        Self { handler }
    }
}

impl<T: HttpHandler> HttpServer<'_, T> {
    /// Accept and serve connections one at a time, forever.
    pub(crate) async fn listen_and_serve(
        &self,
        stack: Stack<'static>,
        port: u16,
        rx_buffer: &mut [u8],
        tx_buffer: &mut [u8],
    ) -> ! {
        loop {
            let mut socket = TcpSocket::new(stack, rx_buffer, tx_buffer);
            socket.set_timeout(Some(Duration::from_secs(SOCKET_TIMEOUT_SECS)));

            if socket.accept(port).await.is_err() {
                continue;
            }

            let mut conn = match HttpConnection::from_socket(socket).await {
                Ok(connection) => connection,
                Err(e) => {
                    warn!("http_server: connection startup error: {:?}", e);
                    continue;
                }
            };

            if let Err(e) = self.handler.handle_request(&mut conn).await {
                warn!("http_server: connection error: {}", e);
            }
            conn.close().await;
        }
    }
}
