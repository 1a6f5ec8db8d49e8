use core::fmt;

const HTTP_SCHEME: &str = "http://";
const DEFAULT_PORT: u16 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressError {
    /// Only plain `http://` addresses are supported
    UnsupportedScheme,
    MissingHost,
    InvalidPort,
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressError::UnsupportedScheme => write!(f, "unsupported URL scheme"),
            AddressError::MissingHost => write!(f, "missing host"),
            AddressError::InvalidPort => write!(f, "invalid port"),
        }
    }
}

/// Registry base address split into the parts a request head needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryAddress<'a> {
    host: &'a str,
    port: u16,
    prefix: &'a str,
}

impl<'a> RegistryAddress<'a> {
    /// Parse `[http://]host[:port][/prefix]`.
    ///
    /// A trailing slash on the prefix is dropped so that operation paths can
    /// be appended directly.
    pub fn parse(url: &'a str) -> Result<Self, AddressError> {
        let rest = match url.strip_prefix(HTTP_SCHEME) {
            Some(rest) => rest,
            None if url.contains("://") => return Err(AddressError::UnsupportedScheme),
            None => url,
        };

        let (authority, prefix) = match rest.find('/') {
            Some(pos) => rest.split_at(pos),
            None => (rest, ""),
        };
        let prefix = prefix.trim_end_matches('/');

        let (host, port) = match authority.rsplit_once(':') {
            Some((host, port)) => {
                let port = port.parse::<u16>().map_err(|_| AddressError::InvalidPort)?;
                (host, port)
            }
            None => (authority, DEFAULT_PORT),
        };
        if host.is_empty() {
            return Err(AddressError::MissingHost);
        }

        Ok(Self { host, port, prefix })
    }

    pub const fn host(&self) -> &'a str {
        self.host
    }

    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Path prefix without a trailing slash; empty for the root.
    pub const fn prefix(&self) -> &'a str {
        self.prefix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_address() {
        let address = RegistryAddress::parse("http://192.168.1.20:8000/api/devices/").unwrap();

        assert_eq!(address.host(), "192.168.1.20");
        assert_eq!(address.port(), 8000);
        assert_eq!(address.prefix(), "/api/devices");
    }

    #[test]
    fn defaults_port_and_prefix() {
        let address = RegistryAddress::parse("registry.local").unwrap();

        assert_eq!(address.host(), "registry.local");
        assert_eq!(address.port(), 80);
        assert_eq!(address.prefix(), "");
    }

    #[test]
    fn root_slash_is_empty_prefix() {
        let address = RegistryAddress::parse("http://registry.local/").unwrap();

        assert_eq!(address.prefix(), "");
    }

    #[test]
    fn rejects_bad_addresses() {
        assert_eq!(
            RegistryAddress::parse("https://registry.local"),
            Err(AddressError::UnsupportedScheme)
        );
        assert_eq!(RegistryAddress::parse("http://:8000/"), Err(AddressError::MissingHost));
        assert_eq!(RegistryAddress::parse("http:///activate"), Err(AddressError::MissingHost));
        assert_eq!(
            RegistryAddress::parse("http://registry.local:http"),
            Err(AddressError::InvalidPort)
        );
        assert_eq!(
            RegistryAddress::parse("http://registry.local:70000"),
            Err(AddressError::InvalidPort)
        );
    }
}
