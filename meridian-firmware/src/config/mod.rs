//! Watch configuration
//!
//! Configuration is embedded at build time (`watch.toml`) and parsed once
//! at boot. There is no flash persistence: everything the face shows is
//! reconstructed from this config and the clock on every start.

mod toml;

pub use toml::{parse_config, ParseError};

use meridian_core::clock::TimeOfDay;
use meridian_core::face::WEATHER_TEXT_CAP;
use meridian_link::MAX_PAYLOAD_SIZE;

use heapless::String;

/// Clock display settings
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FaceConfig {
    /// 24-hour display preference
    pub clock_24h: bool,
    /// Wall time seeded at power-on
    pub boot_time: TimeOfDay,
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            clock_24h: true,
            boot_time: TimeOfDay::from_minutes(0),
        }
    }
}

/// Weather line settings
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WeatherConfig {
    /// Text shown until real weather data arrives
    pub placeholder: String<WEATHER_TEXT_CAP>,
    /// Minutes between weather requests to the phone
    pub refresh_minutes: u16,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        let mut placeholder = String::new();
        let _ = placeholder.push_str("Loading...");
        Self {
            placeholder,
            refresh_minutes: 30,
        }
    }
}

/// Phone link settings
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkConfig {
    /// Baud rate of the radio bridge UART
    pub baud_rate: u32,
    /// Maximum accepted inbound payload size in bytes
    pub max_inbound: usize,
    /// Maximum outbound payload size in bytes
    pub max_outbound: usize,
    /// How long to wait for a peer ack before reporting failure
    pub ack_timeout_ms: u32,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            baud_rate: 115_200,
            max_inbound: MAX_PAYLOAD_SIZE,
            max_outbound: MAX_PAYLOAD_SIZE,
            ack_timeout_ms: 1_000,
        }
    }
}

/// Complete watch configuration
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WatchConfig {
    pub face: FaceConfig,
    pub weather: WeatherConfig,
    pub link: LinkConfig,
}

impl WatchConfig {
    /// Pull out-of-range values back inside hard limits
    ///
    /// The payload ceilings cannot exceed what a frame can carry, and a
    /// zero refresh interval would re-request weather on every tick.
    pub fn clamp_to_limits(&mut self) {
        self.link.max_inbound = self.link.max_inbound.min(MAX_PAYLOAD_SIZE);
        self.link.max_outbound = self.link.max_outbound.min(MAX_PAYLOAD_SIZE);
        self.weather.refresh_minutes = self.weather.refresh_minutes.max(1);
    }
}
