pub(crate) mod connection;
pub(crate) mod server;

use core::fmt;

pub(crate) use connection::HttpConnection;
pub(crate) use server::{HttpHandler, HttpServer};

#[derive(Debug)]
pub enum Error {
    Closed,
    Parse,
    NoData,
    FormatHeaders,
    Serialize,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Closed => write!(f, "connection closed"),
            Error::Parse => write!(f, "malformed request"),
            Error::NoData => write!(f, "empty request"),
            Error::FormatHeaders => write!(f, "headers do not fit the buffer"),
            Error::Serialize => write!(f, "response body does not fit the buffer"),
        }
    }
}

impl From<fmt::Error> for Error {
    fn from(_error: fmt::Error) -> Self {
        Error::FormatHeaders
    }
}

impl From<embassy_net::tcp::Error> for Error {
    fn from(err: embassy_net::tcp::Error) -> Self {
        match err {
            embassy_net::tcp::Error::ConnectionReset => Error::Closed,
        }
    }
}

pub(crate) type HttpResult = Result<(), Error>;
