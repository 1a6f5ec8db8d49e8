use embassy_net::{IpAddress, Stack, dns::DnsQueryType};
use embassy_time::{Duration, Timer};

const POLL_INTERVAL_MS: u64 = 100;

/// Whether the station is associated and holds an IPv4 address.
pub(crate) fn is_link_established(stack: Stack<'_>) -> bool {
    stack.is_link_up() && stack.config_v4().is_some()
}

/// Wait for the network link to become active
async fn wait_for_link(stack: Stack<'_>) {
    while !stack.is_link_up() {
        Timer::after(Duration::from_millis(POLL_INTERVAL_MS)).await;
    }
}

/// Wait for the network stack to obtain an IPv4 address via DHCP
async fn wait_for_ip(stack: Stack<'_>) -> embassy_net::StaticConfigV4 {
    loop {
        if let Some(config) = stack.config_v4() {
            return config;
        }
        Timer::after(Duration::from_millis(POLL_INTERVAL_MS)).await;
    }
}

/// Wait for full network connectivity (link + IP address)
/// Returns the obtained IPv4 configuration
pub(crate) async fn wait_for_connection(stack: Stack<'_>) -> embassy_net::StaticConfigV4 {
    wait_for_link(stack).await;
    wait_for_ip(stack).await
}

/// Resolves a hostname to an IP address
pub(crate) async fn resolve_host(stack: Stack<'_>, host: &str) -> Result<IpAddress, ()> {
    if let Ok(ip) = host.parse::<embassy_net::Ipv4Address>() {
        return Ok(IpAddress::Ipv4(ip));
    }

    let Ok(addresses) = stack.dns_query(host, DnsQueryType::A).await else {
        return Err(());
    };

    addresses.first().copied().ok_or(())
}
