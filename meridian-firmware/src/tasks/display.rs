//! OLED display task
//!
//! Owns the panel. The face task renders rows into the shared screen
//! buffer and signals; this task copies the rows into the frame buffer and
//! flushes them over I2C. Single writer, single reader - the mutex only
//! arbitrates between the two tasks.

use defmt::*;
use embassy_rp::i2c::{self, I2c};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;

use crate::channels::SCREEN_REFRESH;
use crate::display::renderer::DISPLAY_ROWS;
use crate::display::{Screen, Sh1106};

/// Shared screen buffer: written by the face task, flushed here
pub static SCREEN: Mutex<CriticalSectionRawMutex, Screen> = Mutex::new(Screen::new());

/// Display task - flushes the screen buffer to the OLED on request
#[embassy_executor::task]
pub async fn display_task(mut oled: Sh1106<I2c<'static, i2c::Async>>) {
    info!("Display task started");

    loop {
        SCREEN_REFRESH.wait().await;

        // Copy rows into the frame buffer under the lock, then release it
        // before the (slow) I2C flush
        {
            let screen = SCREEN.lock().await;
            oled.clear();
            for row in 0..DISPLAY_ROWS as u8 {
                let line = screen.get_line(row);
                if !line.is_empty() {
                    oled.draw_text(row, 0, line);
                }
            }
        }

        if let Err(e) = oled.flush().await {
            warn!("OLED flush failed: {:?}", e);
        } else {
            trace!("Display updated");
        }
    }
}
