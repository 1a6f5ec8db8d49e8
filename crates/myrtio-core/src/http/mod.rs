mod headers;
mod parse;

pub use headers::{
    ContentHeaders,
    ContentType,
    HttpMethod,
    RequestHeaders,
    ResponseHeaders,
    StatusCode,
    TargetWriter,
    TextEncoding,
};
pub use parse::{find_header_end, parse_request_line, parse_status_line};
