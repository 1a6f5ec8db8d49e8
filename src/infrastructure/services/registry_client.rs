use core::fmt;

use embassy_net::{
    Stack,
    tcp::{ConnectError, Error as TcpError, TcpSocket},
};
use embassy_time::{Duration, Timer};
use embedded_io_async::Write as _;
use log::debug;
use myrtio_core::http::StatusCode;
use myrtio_registry::{
    Operation,
    RegistrationBody,
    RegistryAddress,
    RegistryRequest,
    RequestError,
    ResponseError,
    read_status_code,
    within,
};

use crate::infrastructure::drivers::resolve_host;

const REQUEST_BUFFER_SIZE: usize = 512;
const RX_BUFFER_SIZE: usize = 512;
const TX_BUFFER_SIZE: usize = 512;

/// Why no status code was obtained.
#[derive(Debug)]
pub(crate) enum TransportError {
    Request(RequestError),
    Dns,
    Connect(ConnectError),
    Io(TcpError),
    /// The peer closed the connection before a status line arrived
    Closed,
    /// The response does not start with a valid status line
    Malformed,
    Timeout,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Request(e) => write!(f, "request: {}", e),
            TransportError::Dns => write!(f, "host lookup failed"),
            TransportError::Connect(e) => write!(f, "connect: {:?}", e),
            TransportError::Io(e) => write!(f, "socket: {:?}", e),
            TransportError::Closed => write!(f, "connection closed early"),
            TransportError::Malformed => write!(f, "malformed status line"),
            TransportError::Timeout => write!(f, "timed out"),
        }
    }
}

impl From<RequestError> for TransportError {
    fn from(error: RequestError) -> Self {
        TransportError::Request(error)
    }
}

impl From<ConnectError> for TransportError {
    fn from(error: ConnectError) -> Self {
        TransportError::Connect(error)
    }
}

impl From<ResponseError<TcpError>> for TransportError {
    fn from(error: ResponseError<TcpError>) -> Self {
        match error {
            ResponseError::Io(e) => TransportError::Io(e),
            ResponseError::Closed => TransportError::Closed,
            ResponseError::Malformed => TransportError::Malformed,
        }
    }
}

impl From<TcpError> for TransportError {
    fn from(error: TcpError) -> Self {
        TransportError::Io(error)
    }
}

/// Perform one registry call and return the response status code.
///
/// The whole exchange, lookup included, is bounded by `timeout`.
pub(crate) async fn send_registry_request(
    stack: Stack<'_>,
    address: &RegistryAddress<'_>,
    operation: Operation,
    body: &RegistrationBody<'_>,
    timeout: Duration,
) -> Result<StatusCode, TransportError> {
    let request = RegistryRequest::<REQUEST_BUFFER_SIZE>::build(address, operation, body)?;

    within(
        exchange(stack, address, request.as_bytes()),
        Timer::after(timeout),
    )
    .await
    .map_err(|_| TransportError::Timeout)?
}

async fn exchange(
    stack: Stack<'_>,
    address: &RegistryAddress<'_>,
    request: &[u8],
) -> Result<StatusCode, TransportError> {
    let ip = resolve_host(stack, address.host())
        .await
        .map_err(|()| TransportError::Dns)?;
    debug!("registry: {} resolved to {}", address.host(), ip);

    let mut rx_buffer = [0u8; RX_BUFFER_SIZE];
    let mut tx_buffer = [0u8; TX_BUFFER_SIZE];
    let mut socket = TcpSocket::new(stack, &mut rx_buffer, &mut tx_buffer);

    socket.connect((ip, address.port())).await?;
    socket.write_all(request).await?;
    socket.flush().await?;

    let code = read_status_code(&mut socket).await;
    socket.close();
    code.map_err(TransportError::from)
}
