use embassy_net::tcp::TcpSocket;
use embedded_io_async::Write as _;
use heapless::{String, Vec};
use log::debug;
use myrtio_core::http::{
    ContentHeaders,
    ContentType,
    HttpMethod,
    ResponseHeaders,
    TargetWriter as _,
    TextEncoding,
    find_header_end,
    parse_request_line,
};
use serde::Serialize;

use super::{Error, HttpResult};

const HEADER_BUFFER_SIZE: usize = 512;
const BODY_BUFFER_SIZE: usize = 256;
const PATH_SIZE: usize = 64;

/// HTTP connection context
///
/// Requests handled here never carry a body, so only the head is read.
pub(crate) struct HttpConnection<'a> {
    pub method: HttpMethod,
    pub path: String<PATH_SIZE>,

    socket: TcpSocket<'a>,
}

impl<'a> HttpConnection<'a> {
    /// Create a new HTTP connection from a socket.
    pub(crate) async fn from_socket(mut socket: TcpSocket<'a>) -> Result<Self, Error> {
        let mut header_buf = [0u8; HEADER_BUFFER_SIZE];
        let header_end = read_heading(&mut header_buf, &mut socket).await?;

        let header_str =
            core::str::from_utf8(&header_buf[..header_end]).map_err(|_| Error::Parse)?;
        let (method, raw_path, _headers) = parse_request_line(header_str).ok_or(Error::Parse)?;

        // Query strings are not routed on
        let raw_path = raw_path.split('?').next().unwrap_or(raw_path);
        let mut path = String::new();
        path.push_str(raw_path).map_err(|()| Error::Parse)?;

        Ok(Self {
            method,
            path,
            socket,
        })
    }

    /// Get request method and path
    pub(crate) fn route(&self) -> (HttpMethod, &'_ str) {
        (self.method, self.path.as_str())
    }

    /// Write the headers to the connection
    pub(crate) async fn write_headers(&mut self, headers: &ResponseHeaders) -> HttpResult {
        let mut head = String::<HEADER_BUFFER_SIZE>::new();
        headers.write_to(&mut head)?;
        self.write_all(head.as_bytes()).await
    }

    /// Write a plain text response
    pub(crate) async fn write_text(&mut self, headers: ResponseHeaders, text: &str) -> HttpResult {
        let content = ContentHeaders::new(ContentType::TextPlain)
            .with_text_encoding(TextEncoding::Utf8)
            .with_length(text.len());
        self.write_headers(&headers.with_content(content)).await?;
        self.write_all(text.as_bytes()).await
    }

    /// Write JSON to the connection
    ///
    /// Writes both headers and body.
    pub(crate) async fn write_json<T: Serialize>(&mut self, data: &T) -> HttpResult {
        let mut body = Vec::<u8, BODY_BUFFER_SIZE>::new();
        body.resize_default(BODY_BUFFER_SIZE)
            .map_err(|()| Error::Serialize)?;
        let n = serde_json_core::to_slice(data, body.as_mut_slice())
            .map_err(|_| Error::Serialize)?;
        body.truncate(n);

        let headers = ResponseHeaders::success()
            .with_content(ContentHeaders::new(ContentType::Json).with_length(n));
        self.write_headers(&headers).await?;
        self.write_all(body.as_slice()).await
    }

    /// Send FIN and wait for the queued response to go out.
    pub(crate) async fn close(mut self) {
        self.socket.close();
        if let Err(e) = self.socket.flush().await {
            debug!("http: flush on close failed: {:?}", e);
        }
    }

    async fn write_all(&mut self, buf: &[u8]) -> HttpResult {
        self.socket.write_all(buf).await?;
        self.socket.flush().await?;
        Ok(())
    }
}

/// Read from the socket until the end of the request head.
///
/// Returns the head length including the blank line. A head that fills the
/// whole buffer is returned as-is.
async fn read_heading(buf: &mut [u8], socket: &mut TcpSocket<'_>) -> Result<usize, Error> {
    let mut len = 0;
    loop {
        let n = socket.read(&mut buf[len..]).await?;
        if n == 0 {
            return Err(Error::NoData);
        }
        len += n;
        if let Some(end) = find_header_end(&buf[..len]) {
            return Ok(end);
        }
        if len >= buf.len() {
            return Ok(len);
        }
    }
}
