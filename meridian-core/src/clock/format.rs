//! Time string formatting
//!
//! Produces the short human-readable string the face displays. The output
//! is a caller-owned fixed-capacity string, freshly built per call: the
//! same (time, style) pair always yields byte-identical text.

use super::time::{ClockStyle, TimeOfDay};

use heapless::String;

/// Capacity of the formatted time text
pub const TIME_TEXT_CAP: usize = 8;

/// Formatted time string
pub type TimeText = String<TIME_TEXT_CAP>;

/// Format a time of day for display
///
/// 24-hour style renders `HH:MM`, zero-padded. 12-hour style renders
/// `H:MM` with hour-of-12 (`hour % 12`, midnight and noon both show `0`),
/// unpadded and without an AM/PM marker.
pub fn format_time(time: TimeOfDay, style: ClockStyle) -> TimeText {
    let mut text = TimeText::new();
    let _ = match style {
        ClockStyle::TwentyFourHour => {
            write_to_string(&mut text, format_args!("{:02}:{:02}", time.hour(), time.minute()))
        }
        ClockStyle::TwelveHour => {
            write_to_string(&mut text, format_args!("{}:{:02}", time.hour() % 12, time.minute()))
        }
    };
    text
}

/// Helper to write formatted output to a heapless String
fn write_to_string(s: &mut TimeText, args: core::fmt::Arguments<'_>) -> core::fmt::Result {
    use core::fmt::Write;
    s.write_fmt(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u8, minute: u8) -> TimeOfDay {
        TimeOfDay::new(hour, minute).unwrap()
    }

    #[test]
    fn test_twenty_four_hour_literals() {
        assert_eq!(format_time(at(13, 7), ClockStyle::TwentyFourHour), "13:07");
        assert_eq!(format_time(at(0, 5), ClockStyle::TwentyFourHour), "00:05");
    }

    #[test]
    fn test_twelve_hour_literals() {
        assert_eq!(format_time(at(13, 7), ClockStyle::TwelveHour), "1:07");
        assert_eq!(format_time(at(0, 5), ClockStyle::TwelveHour), "0:05");
        assert_eq!(format_time(at(12, 0), ClockStyle::TwelveHour), "0:00");
        assert_eq!(format_time(at(23, 59), ClockStyle::TwelveHour), "11:59");
    }

    #[test]
    fn test_idempotent_within_minute() {
        let first = format_time(at(9, 41), ClockStyle::TwentyFourHour);
        let second = format_time(at(9, 41), ClockStyle::TwentyFourHour);
        assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[test]
    fn test_midnight_rollover() {
        let before = at(23, 59);
        assert_eq!(format_time(before, ClockStyle::TwentyFourHour), "23:59");
        assert_eq!(
            format_time(before.next_minute(), ClockStyle::TwentyFourHour),
            "00:00"
        );
    }

    #[test]
    fn test_all_times_fit_and_are_well_formed() {
        // Exhaustive over the whole domain - it is small enough
        for hour in 0..24u8 {
            for minute in 0..60u8 {
                let t = at(hour, minute);

                let s24 = format_time(t, ClockStyle::TwentyFourHour);
                assert_eq!(s24.len(), 5);
                assert_eq!(&s24[2..3], ":");

                let s12 = format_time(t, ClockStyle::TwelveHour);
                assert!(s12.len() == 4 || s12.len() == 5);
                // Minute field is always zero-padded and agrees across styles
                assert_eq!(&s24[3..], &s12[s12.len() - 2..]);
            }
        }
    }
}
