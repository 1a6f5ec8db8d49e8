use core::fmt;

use heapless::{String, Vec};
use myrtio_core::http::{ContentHeaders, ContentType, RequestHeaders, TargetWriter as _};
use serde::Serialize;

use super::{Operation, RegistryAddress};

const BODY_BUFFER_SIZE: usize = 128;
const HEAD_BUFFER_SIZE: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestError {
    /// The body could not be serialized into its buffer
    Serialize,
    /// The request does not fit into the output buffer
    Overflow,
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::Serialize => write!(f, "JSON serialization error"),
            RequestError::Overflow => write!(f, "request buffer too small"),
        }
    }
}

impl From<fmt::Error> for RequestError {
    fn from(_error: fmt::Error) -> Self {
        RequestError::Overflow
    }
}

/// JSON body sent with both registry operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegistrationBody<'a> {
    pub name: &'a str,
    pub is_light_on: bool,
    pub uptime: u32,
}

/// A complete registry request (head and body) ready to be written to a
/// socket.
#[derive(Debug)]
pub struct RegistryRequest<const N: usize> {
    bytes: Vec<u8, N>,
}

impl<const N: usize> RegistryRequest<N> {
    pub fn build(
        address: &RegistryAddress<'_>,
        operation: Operation,
        body: &RegistrationBody<'_>,
    ) -> Result<Self, RequestError> {
        let mut json = [0u8; BODY_BUFFER_SIZE];
        let body_len =
            serde_json_core::to_slice(body, &mut json).map_err(|_| RequestError::Serialize)?;

        let headers = RequestHeaders::new(operation.method(), address.host(), operation.path())
            .with_port(address.port())
            .with_path_prefix(address.prefix())
            .with_content(ContentHeaders::new(ContentType::Json).with_length(body_len));
        let mut head = String::<HEAD_BUFFER_SIZE>::new();
        headers.write_to(&mut head)?;

        let mut bytes = Vec::new();
        bytes
            .extend_from_slice(head.as_bytes())
            .map_err(|()| RequestError::Overflow)?;
        bytes
            .extend_from_slice(&json[..body_len])
            .map_err(|()| RequestError::Overflow)?;

        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: RegistrationBody<'static> = RegistrationBody {
        name: "beacon-01",
        is_light_on: true,
        uptime: 42,
    };

    fn text<const N: usize>(request: &RegistryRequest<N>) -> &str {
        core::str::from_utf8(request.as_bytes()).unwrap()
    }

    #[test]
    fn activate_request_is_post_with_json_body() {
        let address = RegistryAddress::parse("http://10.0.0.5:8000").unwrap();
        let request = RegistryRequest::<512>::build(&address, Operation::Activate, &BODY).unwrap();

        assert_eq!(
            text(&request),
            "POST /activate HTTP/1.1\r\n\
             Host: 10.0.0.5:8000\r\n\
             Content-Type: application/json\r\n\
             Content-Length: 51\r\n\
             Connection: close\r\n\
             \r\n\
             {\"name\":\"beacon-01\",\"is_light_on\":true,\"uptime\":42}"
        );
    }

    #[test]
    fn deactivate_request_is_delete_under_prefix() {
        let address = RegistryAddress::parse("http://registry.local/v1/").unwrap();
        let request =
            RegistryRequest::<512>::build(&address, Operation::Deactivate, &BODY).unwrap();

        assert!(text(&request).starts_with("DELETE /v1/deactivate/ip HTTP/1.1\r\nHost: registry.local\r\n"));
    }

    #[test]
    fn small_buffer_overflows() {
        let address = RegistryAddress::parse("registry.local").unwrap();

        assert_eq!(
            RegistryRequest::<64>::build(&address, Operation::Activate, &BODY).unwrap_err(),
            RequestError::Overflow
        );
    }

    #[test]
    fn oversized_name_fails_serialization() {
        let address = RegistryAddress::parse("registry.local").unwrap();
        let name = "x".repeat(BODY_BUFFER_SIZE);
        let body = RegistrationBody {
            name: &name,
            ..BODY
        };

        assert_eq!(
            RegistryRequest::<1024>::build(&address, Operation::Activate, &body).unwrap_err(),
            RequestError::Serialize
        );
    }
}
