use core::{fmt, future::Future};

use embassy_futures::select::{Either, select};
use embedded_io_async::Read;
use myrtio_core::http::{StatusCode, parse_status_line};

/// Bytes read while looking for the end of the status line.
pub const STATUS_LINE_BUFFER_SIZE: usize = 64;

/// Why a response did not yield a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseError<E> {
    Io(E),
    /// The peer closed the connection before sending anything
    Closed,
    /// The response does not start with a valid status line
    Malformed,
}

impl<E: fmt::Debug> fmt::Display for ResponseError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseError::Io(e) => write!(f, "read: {:?}", e),
            ResponseError::Closed => write!(f, "connection closed early"),
            ResponseError::Malformed => write!(f, "malformed status line"),
        }
    }
}

/// The deadline passed before the call finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elapsed;

/// Read until the end of the status line and parse its code.
///
/// Stops at the first CRLF, at end of stream or once the buffer is full.
pub async fn read_status_code<R: Read>(
    reader: &mut R,
) -> Result<StatusCode, ResponseError<R::Error>> {
    let mut buf = [0u8; STATUS_LINE_BUFFER_SIZE];
    let mut len = 0;
    while len < buf.len() {
        let n = reader.read(&mut buf[len..]).await.map_err(ResponseError::Io)?;
        if n == 0 {
            break;
        }
        len += n;
        if buf[..len].windows(2).any(|w| w == b"\r\n") {
            break;
        }
    }
    if len == 0 {
        return Err(ResponseError::Closed);
    }

    // A cut inside a multi-byte reason phrase still leaves the code intact
    let head = match core::str::from_utf8(&buf[..len]) {
        Ok(head) => head,
        Err(e) => core::str::from_utf8(&buf[..e.valid_up_to()])
            .map_err(|_| ResponseError::Malformed)?,
    };
    parse_status_line(head).ok_or(ResponseError::Malformed)
}

/// Run `call` until it completes or `deadline` resolves, whichever is first.
pub async fn within<F, D>(call: F, deadline: D) -> Result<F::Output, Elapsed>
where
    F: Future,
    D: Future<Output = ()>,
{
    match select(call, deadline).await {
        Either::First(output) => Ok(output),
        Either::Second(()) => Err(Elapsed),
    }
}
