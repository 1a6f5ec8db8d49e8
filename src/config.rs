#![allow(clippy::unreadable_literal)]

use myrtio_registry::{BlinkTimings, ButtonConfig, CountingMode, ResponseCodes};

pub const BUILD_VERSION: &str = env!("BUILD_VERSION");

pub struct WifiConfig {
    pub ssid: &'static str,
    pub password: &'static str,
}

pub struct DeviceConfig {
    /// Name reported to the registry, also the base of the DHCP hostname
    pub name: &'static str,
}

pub struct RegistryConfig {
    /// Base address, `http://host[:port][/prefix]`
    pub url: &'static str,
    pub codes: ResponseCodes,
    pub timeout_secs: u64,
    pub max_compensating_retries: u8,
}

pub struct TimingConfig {
    pub uptime_tick_ms: u64,
    pub button_poll_ms: u64,
}

pub struct ServerConfig {
    pub port: u16,
}

pub const WIFI: WifiConfig = WifiConfig {
    ssid: env!("WIFI_SSID"),
    password: env!("WIFI_PASSWORD"),
};

pub const DEVICE: DeviceConfig = DeviceConfig {
    name: env!("DEVICE_NAME"),
};

pub const REGISTRY: RegistryConfig = RegistryConfig {
    url: env!("REGISTRY_URL"),
    codes: ResponseCodes::new(),
    timeout_secs: 10,
    max_compensating_retries: 1,
};

pub const BUTTON: ButtonConfig = ButtonConfig::new(20, CountingMode::Edge);

pub const BLINK: BlinkTimings = BlinkTimings::new(1000, 250);

pub const TIMING: TimingConfig = TimingConfig {
    uptime_tick_ms: 1000,
    button_poll_ms: 100,
};

pub const SERVER: ServerConfig = ServerConfig { port: 80 };
