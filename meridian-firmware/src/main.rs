//! Meridian - Wearable Watchface Firmware
//!
//! Main firmware binary for RP2040-based wearables. Renders a digital
//! clock and a weather line on a local SH1106 OLED, refreshes the clock
//! once per minute, and exchanges key-value messages with the paired phone
//! application over the radio bridge UART.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{I2C0, UART0};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use portable_atomic::Ordering;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use crate::channels::CLOCK_24H;
use crate::config::{parse_config, WatchConfig};
use crate::display::Sh1106;

mod channels;
mod clock;
mod config;
mod display;
mod tasks;

/// Embedded configuration (compiled into firmware)
/// Edit watch.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../watch.toml");

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

// Static cell for configuration (must live forever for task references)
static WATCH_CONFIG: StaticCell<WatchConfig> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Meridian firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Parse the embedded configuration. watch.toml is validated at build
    // time, so a parse failure here means defaults are the best we can do
    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration");
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {:?}", defmt::Debug2Format(&e));
            error!("Using default configuration");
            WatchConfig::default()
        }
    };

    let config: &'static WatchConfig = WATCH_CONFIG.init(config);
    CLOCK_24H.store(config.face.clock_24h, Ordering::Relaxed);
    info!(
        "Configuration loaded: clock_24h={}, refresh={}min",
        config.face.clock_24h, config.weather.refresh_minutes
    );

    // UART0 carries the phone link through the radio bridge module
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = config.link.baud_rate;

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized for phone link");

    // I2C0 drives the SH1106 OLED (GPIO5=SCL, GPIO4=SDA)
    let i2c = I2c::new_async(p.I2C0, p.PIN_5, p.PIN_4, Irqs, i2c::Config::default());

    let mut oled = Sh1106::new(i2c);
    if let Err(e) = oled.init().await {
        error!("Failed to initialize OLED: {:?}", e);
    } else {
        info!("OLED initialized");
    }

    // Spawn tasks
    spawner.spawn(tasks::tick_task()).unwrap();
    spawner.spawn(tasks::link_rx_task(rx, &config.link)).unwrap();
    spawner.spawn(tasks::link_tx_task(tx, &config.link)).unwrap();
    spawner.spawn(tasks::display_task(oled)).unwrap();
    spawner.spawn(tasks::face_task(config)).unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
