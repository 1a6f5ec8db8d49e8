use embassy_executor::Spawner;
use embassy_net::{DhcpConfig, Runner, Stack, StackResources};
use embassy_time::{Duration, Timer};
use esp_hal::peripherals::WIFI;
use esp_radio::wifi::{
    AuthMethod,
    ClientConfig,
    Config,
    ModeConfig,
    WifiController,
    WifiDevice,
    WifiEvent,
    WifiStaState,
};
use log::{info, warn};

use super::random::get_seed;

/// Maximum length of the hostname
const MAX_HOSTNAME_LEN: usize = 32;

const MAX_NETWORK_CONNECTIONS: usize = 6;
const RECONNECT_DELAY_MS: u64 = 2000;
const RETRY_DELAY_MS: u64 = 5000;

/// Type alias for the hostname
pub type Hostname = heapless::String<MAX_HOSTNAME_LEN>;

#[derive(Debug)]
pub enum WifiError {
    Radio(esp_radio::InitializationError),
    Driver(esp_radio::wifi::WifiError),
    Spawn(embassy_executor::SpawnError),
}

/// Derive a DHCP hostname from a free-form device name.
///
/// Keeps ASCII alphanumerics, maps everything else to `-` and lowercases the
/// result. Names longer than the hostname limit are cut.
pub fn hostname_from_name(name: &str) -> Hostname {
    let mut hostname = Hostname::new();
    for c in name.chars() {
        let c = if c.is_ascii_alphanumeric() {
            c.to_ascii_lowercase()
        } else {
            '-'
        };
        if hostname.push(c).is_err() {
            break;
        }
    }
    hostname
}

/// Start the Wi-Fi STA (Station) mode
///
/// Spawns the connection and stack runner tasks and returns the network
/// stack right away; use [`super::wait_for_connection`] to wait for an
/// address. A lost connection is re-established in the background.
pub fn start_wifi_sta(
    spawner: Spawner,
    wifi_device: WIFI<'static>,
    ssid: &'static str,
    password: &'static str,
    hostname: Hostname,
) -> Result<Stack<'static>, WifiError> {
    let esp_radio_ctrl = &*crate::mk_static!(
        esp_radio::Controller<'static>,
        esp_radio::init().map_err(WifiError::Radio)?
    );
    let (controller, interfaces) =
        esp_radio::wifi::new(esp_radio_ctrl, wifi_device, Config::default())
            .map_err(WifiError::Driver)?;
    let mut dhcp_config = DhcpConfig::default();
    dhcp_config.hostname = Some(hostname);

    let net_config = embassy_net::Config::dhcpv4(dhcp_config);

    let network_resources = crate::mk_static!(
        StackResources<MAX_NETWORK_CONNECTIONS>,
        StackResources::<MAX_NETWORK_CONNECTIONS>::new()
    );
    let (stack, runner) =
        embassy_net::new(interfaces.sta, net_config, network_resources, get_seed());

    spawner
        .spawn(wifi_connection_task(controller, ssid, password))
        .map_err(WifiError::Spawn)?;
    spawner
        .spawn(network_runner_task(runner))
        .map_err(WifiError::Spawn)?;

    Ok(stack)
}

/// Background task for connecting to the `WiFi` network and reconnecting if needed
#[embassy_executor::task]
async fn wifi_connection_task(
    mut controller: WifiController<'static>,
    ssid: &'static str,
    password: &'static str,
) {
    loop {
        // Wait until we're no longer connected
        if esp_radio::wifi::sta_state() == WifiStaState::Connected {
            controller.wait_for_event(WifiEvent::StaDisconnected).await;
            warn!("network: disconnected");
            Timer::after(Duration::from_millis(RECONNECT_DELAY_MS)).await;
        }
        if !matches!(controller.is_started(), Ok(true)) {
            let client_config = if password.is_empty() {
                ClientConfig::default()
                    .with_ssid(ssid.into())
                    .with_auth_method(AuthMethod::None)
            } else {
                ClientConfig::default()
                    .with_ssid(ssid.into())
                    .with_password(password.into())
            };
            let mode_config = ModeConfig::Client(client_config);
            if let Err(e) = controller.set_config(&mode_config) {
                warn!("network: invalid client config: {:?}", e);
                Timer::after(Duration::from_millis(RETRY_DELAY_MS)).await;
                continue;
            }
            if let Err(e) = controller.start_async().await {
                warn!("network: unable to start radio: {:?}", e);
                Timer::after(Duration::from_millis(RETRY_DELAY_MS)).await;
                continue;
            }
        }

        info!("network: connecting to {}", ssid);
        match controller.connect_async().await {
            Ok(()) => info!("network: connected"),
            Err(e) => {
                warn!("network: error connecting: {:?}", e);
                Timer::after(Duration::from_millis(RETRY_DELAY_MS)).await;
            }
        }
    }
}

/// Background task for running the network stack
#[embassy_executor::task]
async fn network_runner_task(mut runner: Runner<'static, WifiDevice<'static>>) {
    runner.run().await;
}
