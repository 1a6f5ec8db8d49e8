use super::headers::{HttpMethod, StatusCode};

const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Parse the request line from the header string.
///
/// Returns the method, path, and rest of the header string.
pub fn parse_request_line(header_str: &str) -> Option<(HttpMethod, &str, &str)> {
    let line_end = header_str.find("\r\n").unwrap_or(header_str.len());
    let first_line = &header_str[..line_end];
    let mut parts = first_line.split_whitespace();
    let method = parts.next().and_then(HttpMethod::parse)?;
    let path = parts.next()?;
    let rest = header_str.get(line_end + 2..).unwrap_or("");

    Some((method, path, rest))
}

/// Parse the status code from the first line of a response head.
///
/// Accepts `HTTP/1.0` and `HTTP/1.1` status lines. The reason phrase is
/// optional and ignored.
pub fn parse_status_line(head: &str) -> Option<StatusCode> {
    let line_end = head.find("\r\n").unwrap_or(head.len());
    let mut parts = head[..line_end].split_whitespace();
    let version = parts.next()?;
    if !version.starts_with("HTTP/1.") {
        return None;
    }
    let code = parts.next()?;
    if code.len() != 3 {
        return None;
    }

    code.parse::<StatusCode>().ok()
}

/// Find the position right after the blank line that ends an HTTP head.
pub fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(HEADER_TERMINATOR.len())
        .position(|w| w == HEADER_TERMINATOR)
        .map(|pos| pos + HEADER_TERMINATOR.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_line_splits_method_path_and_rest() {
        let head = "POST /light HTTP/1.1\r\nHost: beacon\r\n\r\n";
        let (method, path, rest) = parse_request_line(head).unwrap();

        assert_eq!(method, HttpMethod::Post);
        assert_eq!(path, "/light");
        assert_eq!(rest, "Host: beacon\r\n\r\n");
    }

    #[test]
    fn request_line_without_headers() {
        let (method, path, rest) = parse_request_line("GET /status HTTP/1.1").unwrap();

        assert_eq!(method, HttpMethod::Get);
        assert_eq!(path, "/status");
        assert_eq!(rest, "");
    }

    #[test]
    fn request_line_rejects_unknown_method() {
        assert!(parse_request_line("FETCH /status HTTP/1.1\r\n").is_none());
        assert!(parse_request_line("GET\r\n").is_none());
    }

    #[test]
    fn status_line_extracts_code() {
        assert_eq!(parse_status_line("HTTP/1.1 201 Created\r\nServer: x\r\n"), Some(201));
        assert_eq!(parse_status_line("HTTP/1.0 404 Not Found"), Some(404));
        assert_eq!(parse_status_line("HTTP/1.1 204\r\n"), Some(204));
    }

    #[test]
    fn status_line_rejects_garbage() {
        assert_eq!(parse_status_line(""), None);
        assert_eq!(parse_status_line("SSH-2.0-OpenSSH\r\n"), None);
        assert_eq!(parse_status_line("HTTP/1.1 20x OK\r\n"), None);
        assert_eq!(parse_status_line("HTTP/1.1 2000 OK\r\n"), None);
    }

    #[test]
    fn header_end_is_after_blank_line() {
        let head = b"HTTP/1.1 200 OK\r\nA: b\r\n\r\n{}";
        assert_eq!(find_header_end(head), Some(head.len() - 2));
        assert_eq!(find_header_end(b"HTTP/1.1 200 OK\r\n"), None);
    }
}
