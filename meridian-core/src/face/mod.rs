//! Watchface state
//!
//! `FaceState` is the explicit context that owns what the face displays:
//! the formatted time line and the weather line. The host reads these
//! strings when it redraws; only the face logic writes them. Keeping the
//! state in one struct (rather than file-scope statics) makes ownership
//! and lifetime explicit.

use crate::clock::{format_time, TimeText};
use crate::traits::ClockSource;

use heapless::String;

/// Capacity of the weather line (one display row)
pub const WEATHER_TEXT_CAP: usize = 21;

/// Weather line text
pub type WeatherText = String<WEATHER_TEXT_CAP>;

/// The strings shown on the watchface
#[derive(Debug, Default)]
pub struct FaceState {
    time_text: TimeText,
    weather_text: WeatherText,
}

impl FaceState {
    /// Create a face showing the given weather placeholder and no time yet
    ///
    /// The time line stays empty until the first [`refresh_time`] call -
    /// the cold display happens at task startup, not at construction.
    ///
    /// [`refresh_time`]: FaceState::refresh_time
    pub fn new(weather_placeholder: &str) -> Self {
        let mut weather_text = WeatherText::new();
        let _ = weather_text
            .push_str(&weather_placeholder[..weather_placeholder.len().min(WEATHER_TEXT_CAP)]);
        Self {
            time_text: TimeText::new(),
            weather_text,
        }
    }

    /// Re-format the time line from the host clock
    ///
    /// Reads the current time and the display preference fresh from the
    /// source. Returns true if the displayed text changed, so the caller
    /// knows whether a redraw is needed. Repeated calls within the same
    /// minute are no-ops.
    pub fn refresh_time<C: ClockSource>(&mut self, clock: &C) -> bool {
        let text = format_time(clock.now(), clock.style());
        if text == self.time_text {
            return false;
        }
        self.time_text = text;
        true
    }

    /// The formatted time line
    pub fn time_text(&self) -> &str {
        &self.time_text
    }

    /// The weather line
    pub fn weather_text(&self) -> &str {
        &self.weather_text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{ClockStyle, TimeOfDay};

    /// Clock source returning a settable fixed time
    struct FixedClock {
        now: TimeOfDay,
        style: ClockStyle,
    }

    impl ClockSource for FixedClock {
        fn now(&self) -> TimeOfDay {
            self.now
        }

        fn style(&self) -> ClockStyle {
            self.style
        }
    }

    fn clock(hour: u8, minute: u8) -> FixedClock {
        FixedClock {
            now: TimeOfDay::new(hour, minute).unwrap(),
            style: ClockStyle::TwentyFourHour,
        }
    }

    #[test]
    fn test_cold_display() {
        let mut face = FaceState::new("Loading...");
        assert_eq!(face.time_text(), "");

        assert!(face.refresh_time(&clock(9, 58)));
        assert_eq!(face.time_text(), "09:58");
        assert_eq!(face.weather_text(), "Loading...");
    }

    #[test]
    fn test_refresh_within_same_minute_is_noop() {
        let mut face = FaceState::new("Loading...");
        assert!(face.refresh_time(&clock(9, 58)));
        assert!(!face.refresh_time(&clock(9, 58)));
        assert_eq!(face.time_text(), "09:58");
    }

    #[test]
    fn test_three_tick_sequence() {
        let mut face = FaceState::new("Loading...");
        let mut shown = heapless::Vec::<TimeText, 3>::new();

        for (hour, minute) in [(9, 58), (9, 59), (10, 0)] {
            assert!(face.refresh_time(&clock(hour, minute)));
            let _ = shown.push(TimeText::try_from(face.time_text()).unwrap());
        }

        assert_eq!(shown[0], "09:58");
        assert_eq!(shown[1], "09:59");
        assert_eq!(shown[2], "10:00");
    }

    #[test]
    fn test_style_change_refreshes_text() {
        let mut face = FaceState::new("Loading...");
        let mut source = clock(13, 7);
        assert!(face.refresh_time(&source));
        assert_eq!(face.time_text(), "13:07");

        source.style = ClockStyle::TwelveHour;
        assert!(face.refresh_time(&source));
        assert_eq!(face.time_text(), "1:07");
    }

    #[test]
    fn test_weather_placeholder_truncated_to_row() {
        let face = FaceState::new("a placeholder far too long for one row");
        assert_eq!(face.weather_text().len(), WEATHER_TEXT_CAP);
    }

    #[test]
    fn test_refresh_never_touches_weather() {
        let mut face = FaceState::new("Loading...");
        face.refresh_time(&clock(1, 2));
        face.refresh_time(&clock(3, 4));
        assert_eq!(face.weather_text(), "Loading...");
    }
}
