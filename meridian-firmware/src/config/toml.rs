//! Simple TOML parser for the watch configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! the embedded watch.toml. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - Key = value pairs (string, integer, boolean)
//! - [section] headers
//! - Comments (# ...)
//!
//! Full-TOML syntax validation happens in build.rs on the host; this
//! parser only has to agree with it on the keys the firmware reads.

use meridian_core::clock::TimeOfDay;

use super::WatchConfig;

use heapless::String;

/// Parse error
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid section header
    InvalidSection,
    /// Invalid value type
    InvalidValue,
    /// Malformed HH:MM time value
    InvalidTime,
    /// String value exceeds its field capacity
    ValueTooLong,
}

/// Current parsing context
#[derive(Debug, Clone, Copy)]
enum Section {
    Root,
    Face,
    Weather,
    Link,
}

/// Parse TOML configuration into WatchConfig
pub fn parse_config(input: &str) -> Result<WatchConfig, ParseError> {
    let mut config = WatchConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Check for section header
        if line.starts_with('[') && line.ends_with(']') {
            section = match line[1..line.len() - 1].trim() {
                "face" => Section::Face,
                "weather" => Section::Weather,
                "link" => Section::Link,
                _ => return Err(ParseError::InvalidSection),
            };
            continue;
        }

        // Parse key = value
        if let Some((key, value)) = parse_key_value(line) {
            apply_value(section, key, value, &mut config)?;
        }
    }

    config.clamp_to_limits();
    Ok(config)
}

/// Apply a parsed value to the appropriate config field
fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut WatchConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Face => match key {
            "clock_24h" => config.face.clock_24h = parse_bool(value)?,
            "boot_time" => config.face.boot_time = parse_time(value)?,
            _ => {} // Ignore unknown keys
        },
        Section::Weather => match key {
            "placeholder" => {
                let text = parse_string(value)?;
                config.weather.placeholder =
                    String::try_from(text).map_err(|_| ParseError::ValueTooLong)?;
            }
            "refresh_minutes" => config.weather.refresh_minutes = parse_int(value)?,
            _ => {}
        },
        Section::Link => match key {
            "baud_rate" => config.link.baud_rate = parse_int(value)?,
            "max_inbound" => config.link.max_inbound = parse_int(value)?,
            "max_outbound" => config.link.max_outbound = parse_int(value)?,
            "ack_timeout_ms" => config.link.ack_timeout_ms = parse_int(value)?,
            _ => {}
        },
        Section::Root => {
            // No root-level keys are defined
        }
    }

    Ok(())
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = if let Some(hash_pos) = value.find('#') {
        // Make sure # is not inside a string
        let quote_count = value[..hash_pos].matches('"').count();
        if quote_count % 2 == 0 {
            value[..hash_pos].trim()
        } else {
            value
        }
    } else {
        value
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> Result<&str, ParseError> {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        Ok(&value[1..value.len() - 1])
    } else {
        // Allow unquoted strings for simple values
        Ok(value)
    }
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse an "HH:MM" time value
fn parse_time(value: &str) -> Result<TimeOfDay, ParseError> {
    let value = parse_string(value)?;
    let (hour_str, minute_str) = value.split_once(':').ok_or(ParseError::InvalidTime)?;

    let hour: u8 = hour_str.parse().map_err(|_| ParseError::InvalidTime)?;
    let minute: u8 = minute_str.parse().map_err(|_| ParseError::InvalidTime)?;

    TimeOfDay::new(hour, minute).ok_or(ParseError::InvalidTime)
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_link::MAX_PAYLOAD_SIZE;

    #[test]
    fn test_parse_time() {
        let t = parse_time("\"09:58\"").unwrap();
        assert_eq!((t.hour(), t.minute()), (9, 58));

        let t = parse_time("23:59").unwrap();
        assert_eq!((t.hour(), t.minute()), (23, 59));

        assert!(parse_time("24:00").is_err());
        assert!(parse_time("12-30").is_err());
        assert!(parse_time("noon").is_err());
    }

    #[test]
    fn test_parse_full_config() {
        let config_str = r#"
# A comment
[face]
clock_24h = false
boot_time = "13:07"

[weather]
placeholder = "Loading..."
refresh_minutes = 15

[link]
baud_rate = 57600   # inline comment
max_inbound = 64
max_outbound = 64
ack_timeout_ms = 500
"#;

        let config = parse_config(config_str).unwrap();
        assert!(!config.face.clock_24h);
        assert_eq!(config.face.boot_time.hour(), 13);
        assert_eq!(config.weather.placeholder.as_str(), "Loading...");
        assert_eq!(config.weather.refresh_minutes, 15);
        assert_eq!(config.link.baud_rate, 57_600);
        assert_eq!(config.link.max_inbound, 64);
        assert_eq!(config.link.ack_timeout_ms, 500);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = parse_config("[face]\nclock_24h = true\n").unwrap();
        assert_eq!(config.weather.placeholder.as_str(), "Loading...");
        assert_eq!(config.link.baud_rate, 115_200);
    }

    #[test]
    fn test_unknown_section_rejected() {
        assert!(matches!(
            parse_config("[haptics]\nstrength = 3\n"),
            Err(ParseError::InvalidSection)
        ));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let config = parse_config("[face]\nfuture_option = 3\n").unwrap();
        assert!(config.face.clock_24h);
    }

    #[test]
    fn test_payload_ceilings_clamped() {
        let config = parse_config("[link]\nmax_inbound = 9999\n").unwrap();
        assert_eq!(config.link.max_inbound, MAX_PAYLOAD_SIZE);
    }

    #[test]
    fn test_zero_refresh_clamped() {
        let config = parse_config("[weather]\nrefresh_minutes = 0\n").unwrap();
        assert_eq!(config.weather.refresh_minutes, 1);
    }

    #[test]
    fn test_oversize_placeholder_rejected() {
        let result = parse_config("[weather]\nplaceholder = \"a string much longer than a display row\"\n");
        assert!(matches!(result, Err(ParseError::ValueTooLong)));
    }
}
