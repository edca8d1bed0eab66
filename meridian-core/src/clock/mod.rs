//! Wall-clock time and display formatting

mod format;
mod time;

pub use format::{format_time, TimeText, TIME_TEXT_CAP};
pub use time::{ClockStyle, TimeOfDay, MINUTES_PER_DAY};
