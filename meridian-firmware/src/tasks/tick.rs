//! Minute tick task
//!
//! The face refreshes once per elapsed minute; this task provides the
//! beat. Ticks are fire-and-forget: a tick that arrives while the face is
//! busy coalesces into the pending signal, and missed minutes are never
//! replayed.

use defmt::*;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Ticker};

/// Tick interval
const TICK_INTERVAL_SECS: u64 = 60;

/// Signal to notify the face of an elapsed minute
pub static MINUTE_TICK: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Tick task - signals the face at minute boundaries
#[embassy_executor::task]
pub async fn tick_task() {
    info!("Tick task started");

    let mut ticker = Ticker::every(Duration::from_secs(TICK_INTERVAL_SECS));

    loop {
        ticker.next().await;
        MINUTE_TICK.signal(());
    }
}
