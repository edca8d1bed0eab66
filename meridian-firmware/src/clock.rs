//! Wall clock
//!
//! There is no RTC on the board: wall time is seeded from the embedded
//! configuration at power-on and free-runs on the monotonic timer. The
//! phone app owns real time sync; until that exists the seed is what the
//! face shows.

use embassy_time::Instant;
use portable_atomic::Ordering;

use meridian_core::clock::{ClockStyle, TimeOfDay, MINUTES_PER_DAY};
use meridian_core::traits::ClockSource;

use crate::channels::CLOCK_24H;

/// Wall-clock time derived from the boot seed plus monotonic uptime
pub struct WallClock {
    base_minutes: u16,
    started: Instant,
}

impl WallClock {
    /// Create a clock reading `boot_time` now
    pub fn new(boot_time: TimeOfDay) -> Self {
        Self {
            base_minutes: boot_time.total_minutes(),
            started: Instant::now(),
        }
    }
}

impl ClockSource for WallClock {
    fn now(&self) -> TimeOfDay {
        let elapsed_minutes = self.started.elapsed().as_secs() / 60;
        let minutes = (self.base_minutes as u64 + elapsed_minutes) % MINUTES_PER_DAY as u64;
        TimeOfDay::from_minutes(minutes as u16)
    }

    fn style(&self) -> ClockStyle {
        if CLOCK_24H.load(Ordering::Relaxed) {
            ClockStyle::TwentyFourHour
        } else {
            ClockStyle::TwelveHour
        }
    }
}
