#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_time::{Duration, Ticker};

use esp_alloc as _;
use esp_backtrace as _;
use esp_hal::{
    clock::CpuClock,
    gpio::{Input, InputConfig, Level, Output, OutputConfig, Pull},
    timer::timg::TimerGroup,
};
use log::{debug, error, info};

use myrtio_esp_beacon::app::StatusUsecases;
use myrtio_esp_beacon::config;
use myrtio_esp_beacon::controllers::{StatusHttpController, init_controllers};
use myrtio_esp_beacon::infrastructure::drivers::{hostname_from_name, start_wifi_sta};
use myrtio_esp_beacon::infrastructure::services::{RequestContext, TaskSpawner};
use myrtio_esp_beacon::infrastructure::tasks::{
    blink_task,
    button_monitor_task,
    coordinator_task,
    http_server_task,
};
use myrtio_esp_beacon::infrastructure::types::{
    IndicatorLight,
    RegistrationCoordinator,
    StatusUsecasesImpl,
};
use myrtio_esp_beacon::mk_static;
use myrtio_registry::{
    CoordinatorConfig,
    LightController,
    RegistrationState,
    RegistryAddress,
    SharedLight,
    Uptime,
};

esp_bootloader_esp_idf::esp_app_desc!();

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    esp_println::logger::init_logger_from_env();
    info!("main: {} build {}", config::DEVICE.name, config::BUILD_VERSION);

    // Initialize hardware
    let hal_config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(hal_config);

    // Allocate heap memory (64 + 32 KB)
    esp_alloc::heap_allocator!(
        #[unsafe(link_section = ".dram2_uninit")] size: 64 * 1024
    );
    esp_alloc::heap_allocator!(size: 32 * 1024);

    // Start rtos
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    // Shared state
    let output = Output::new(peripherals.GPIO2, Level::Low, OutputConfig::default());
    let light: &'static IndicatorLight = mk_static!(
        IndicatorLight,
        SharedLight::new(LightController::new(output))
    );
    let uptime: &'static Uptime = mk_static!(Uptime, Uptime::new());
    let registration: &'static RegistrationState =
        mk_static!(RegistrationState, RegistrationState::new());
    let button = Input::new(
        peripherals.GPIO0,
        InputConfig::default().with_pull(Pull::Up),
    );

    // Network
    let stack = start_wifi_sta(
        spawner,
        peripherals.WIFI,
        config::WIFI.ssid,
        config::WIFI.password,
        hostname_from_name(config::DEVICE.name),
    )
    .expect("wifi: unable to start station");

    // Local status server
    let usecases = mk_static!(
        StatusUsecasesImpl,
        StatusUsecases::new(uptime, light, registration)
    );
    let controller = mk_static!(StatusHttpController, init_controllers(usecases));
    spawner
        .spawn(http_server_task(stack, config::SERVER.port, controller))
        .expect("http_server_task spawn");
    spawner.spawn(blink_task(light)).expect("blink_task spawn");

    // Registration
    match RegistryAddress::parse(config::REGISTRY.url) {
        Ok(address) => {
            let context = mk_static!(
                RequestContext,
                RequestContext {
                    stack,
                    address,
                    device_name: config::DEVICE.name,
                    timeout_secs: config::REGISTRY.timeout_secs,
                    light,
                    uptime,
                }
            );
            let coordinator_config = CoordinatorConfig::new(config::REGISTRY.codes, config::BLINK)
                .with_max_compensating_retries(config::REGISTRY.max_compensating_retries);
            let coordinator =
                RegistrationCoordinator::new(TaskSpawner::new(spawner, context), coordinator_config);

            spawner
                .spawn(coordinator_task(coordinator, registration))
                .expect("coordinator_task spawn");
            spawner
                .spawn(button_monitor_task(
                    button,
                    stack,
                    registration,
                    config::BUTTON,
                    config::TIMING.button_poll_ms,
                ))
                .expect("button_monitor_task spawn");
        }
        Err(e) => error!("main: invalid registry address {}: {}", config::REGISTRY.url, e),
    }

    let mut ticker = Ticker::every(Duration::from_millis(config::TIMING.uptime_tick_ms));
    loop {
        ticker.next().await;
        let ticks = uptime.tick();
        debug!("main: uptime {}", ticks);
    }
}
