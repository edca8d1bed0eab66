//! Watchface application task
//!
//! The application proper: refreshes the time line on minute ticks,
//! requests weather from the phone on an interval, and receives every
//! transport notification through the production message sink.

use defmt::*;
use embassy_futures::select::{select3, Either3};

use meridian_core::face::FaceState;
use meridian_core::traits::{dispatch_outcome, MessageSink};
use meridian_link::{Dictionary, MessageId, ReasonCode, Value};

use crate::channels::{DELIVERY_CHANNEL, INBOUND_CHANNEL, OUTBOUND_CHANNEL, SCREEN_REFRESH};
use crate::clock::WallClock;
use crate::config::WatchConfig;
use crate::display::Renderer;
use crate::tasks::display::SCREEN;
use crate::tasks::tick::MINUTE_TICK;

/// Dictionary key for a weather request
///
/// Shared with the phone application; the reply schema is not defined yet.
const KEY_WEATHER_REQUEST: u32 = 0;

/// Production message sink: records transport outcomes in the log
///
/// Inbound payloads are accepted and discarded, so the weather line keeps
/// its placeholder - including after drops and failures. None of the hooks
/// blocks, retries, or touches the displayed text.
struct WatchSink;

impl MessageSink for WatchSink {
    fn inbound_received(&mut self, message: &Dictionary) {
        // TODO: agree the weather payload schema with the phone app, then
        // parse temperature/conditions here and update the weather line
        info!("Inbound message received ({} entries)", message.len());
    }

    fn inbound_dropped(&mut self, reason: ReasonCode) {
        warn!("Inbound message dropped: {}", reason.describe());
    }

    fn outbound_sent(&mut self, id: MessageId) {
        info!("Outbound message {} delivered", id.0);
    }

    fn outbound_failed(&mut self, id: MessageId, reason: ReasonCode) {
        warn!("Outbound message {} failed: {}", id.0, reason.describe());
    }
}

/// Face task - the watchface main loop
#[embassy_executor::task]
pub async fn face_task(config: &'static WatchConfig) {
    info!("Face task started");

    let clock = WallClock::new(config.face.boot_time);
    let mut face = FaceState::new(config.weather.placeholder.as_str());
    let mut sink = WatchSink;
    let mut renderer = Renderer::new();

    // Boot screen while the link comes up
    renderer.render_boot();
    update_screen(&renderer).await;

    // Cold display: show the time immediately rather than waiting for the
    // first minute boundary
    face.refresh_time(&clock);
    renderer.render_face(face.time_text(), face.weather_text());
    update_screen(&renderer).await;

    // First weather request, then one every refresh interval
    request_weather();
    let mut minutes_until_request = config.weather.refresh_minutes;

    loop {
        match select3(
            MINUTE_TICK.wait(),
            INBOUND_CHANNEL.receive(),
            DELIVERY_CHANNEL.receive(),
        )
        .await
        {
            Either3::First(()) => {
                if face.refresh_time(&clock) {
                    renderer.render_face(face.time_text(), face.weather_text());
                    update_screen(&renderer).await;
                }

                minutes_until_request = minutes_until_request.saturating_sub(1);
                if minutes_until_request == 0 {
                    request_weather();
                    minutes_until_request = config.weather.refresh_minutes;
                }
            }
            Either3::Second(dict) => {
                sink.inbound_received(&dict);
            }
            Either3::Third((id, outcome)) => {
                dispatch_outcome(&mut sink, id, outcome);
            }
        }
    }
}

/// Queue a weather request for the phone
///
/// The request dictionary carries only the request key; its value is
/// ignored by the phone.
fn request_weather() {
    let mut dict = Dictionary::new();
    if dict.insert(KEY_WEATHER_REQUEST, Value::Uint(1)).is_err() {
        return;
    }

    if OUTBOUND_CHANNEL.try_send(dict).is_err() {
        // No retry: the next interval will ask again
        warn!("Outbound queue full, weather request skipped");
    }
}

/// Copy the rendered screen into the shared buffer and request a flush
async fn update_screen(renderer: &Renderer) {
    let mut screen = SCREEN.lock().await;
    screen.copy_from(renderer.screen());
    SCREEN_REFRESH.signal(());
}
