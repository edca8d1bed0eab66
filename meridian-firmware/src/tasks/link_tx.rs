//! Phone link transmit task
//!
//! Sends outbound data, transport replies and heartbeat responses to the
//! phone, and resolves each submitted message to its terminal outcome
//! through the outbound tracker (peer ack, peer nack, or timeout).

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embassy_time::{Duration, Instant, Ticker};
use embedded_io_async::Write;

use meridian_link::frame::MAX_FRAME_SIZE;
use meridian_link::{Envelope, LinkMessage, OutboundTracker, ReasonCode};

use crate::channels::{
    LinkReply, PeerEvent, DELIVERY_CHANNEL, OUTBOUND_CHANNEL, PEER_EVENT_CHANNEL, REPLY_CHANNEL,
};
use crate::config::LinkConfig;

/// Maximum messages awaiting a peer acknowledgement
const MAX_IN_FLIGHT: usize = 4;

/// Transmit pacing interval
const TX_POLL_MS: u64 = 50;

/// Link TX task - sends frames to the phone
#[embassy_executor::task]
pub async fn link_tx_task(mut tx: BufferedUartTx<'static>, link: &'static LinkConfig) {
    info!("Link TX task started");

    let mut tracker: OutboundTracker<MAX_IN_FLIGHT> = OutboundTracker::new(link.ack_timeout_ms);
    let mut ticker = Ticker::every(Duration::from_millis(TX_POLL_MS));
    let started = Instant::now();

    loop {
        // Transport replies first: acks, nacks and pongs answer the peer
        while let Ok(reply) = REPLY_CHANNEL.try_receive() {
            let envelope = match reply {
                LinkReply::Ack(id) => Envelope::new(id, LinkMessage::Ack),
                LinkReply::Nack(id, reason) => Envelope::new(id, LinkMessage::Nack(reason)),
                LinkReply::Pong(id) => Envelope::new(id, LinkMessage::Pong),
            };
            send_envelope(&mut tx, &envelope).await;
        }

        // Peer confirmations resolve in-flight messages; a confirmation
        // for an already-resolved id is ignored
        while let Ok(event) = PEER_EVENT_CHANNEL.try_receive() {
            let resolved = match event {
                PeerEvent::Ack(id) => tracker.acknowledge(id).map(|outcome| (id, outcome)),
                PeerEvent::Nack(id, reason) => {
                    tracker.reject(id, reason).map(|outcome| (id, outcome))
                }
            };
            match resolved {
                Some((id, outcome)) => DELIVERY_CHANNEL.send((id, outcome)).await,
                None => trace!("Stale peer confirmation ignored"),
            }
        }

        // New outbound submissions, while the pending table has room
        if tracker.has_capacity() {
            if let Ok(dict) = OUTBOUND_CHANNEL.try_receive() {
                let now_ms = started.elapsed().as_millis() as u32;
                if let Ok(id) = tracker.submit(now_ms) {
                    let envelope = Envelope::new(id, LinkMessage::Data(dict));
                    let failure = match encode_checked(&envelope, link.max_outbound) {
                        Ok((buf, len)) => match tx.write_all(&buf[..len]).await {
                            Ok(()) => {
                                trace!("Data {} sent, awaiting ack", id.0);
                                None
                            }
                            Err(e) => {
                                warn!("Link write failed: {:?}", e);
                                Some(ReasonCode::LINK_DOWN)
                            }
                        },
                        Err(reason) => {
                            warn!("Outbound message {} not sent: {}", id.0, reason.describe());
                            Some(reason)
                        }
                    };

                    if let Some(reason) = failure {
                        if let Some(outcome) = tracker.reject(id, reason) {
                            DELIVERY_CHANNEL.send((id, outcome)).await;
                        }
                    }
                }
            }
        }

        // Ack timeouts
        let now_ms = started.elapsed().as_millis() as u32;
        while let Some((id, outcome)) = tracker.poll_expired(now_ms) {
            warn!("Message {} timed out waiting for ack", id.0);
            DELIVERY_CHANNEL.send((id, outcome)).await;
        }

        ticker.next().await;
    }
}

/// Encode an envelope, enforcing the configured outbound payload ceiling
fn encode_checked(
    envelope: &Envelope,
    max_outbound: usize,
) -> Result<([u8; MAX_FRAME_SIZE], usize), ReasonCode> {
    let frame = envelope.to_frame().map_err(|_| ReasonCode::OVERSIZE)?;
    if frame.payload.len() > max_outbound {
        return Err(ReasonCode::OVERSIZE);
    }

    let mut buf = [0u8; MAX_FRAME_SIZE];
    let len = frame.encode(&mut buf).map_err(|_| ReasonCode::OVERSIZE)?;
    Ok((buf, len))
}

/// Send a reply envelope, logging (not retrying) on failure
async fn send_envelope(tx: &mut BufferedUartTx<'static>, envelope: &Envelope) {
    let frame = match envelope.to_frame() {
        Ok(frame) => frame,
        Err(e) => {
            warn!("Failed to encode link reply: {:?}", e);
            return;
        }
    };

    let mut buf = [0u8; MAX_FRAME_SIZE];
    if let Ok(len) = frame.encode(&mut buf) {
        if let Err(e) = tx.write_all(&buf[..len]).await {
            warn!("Failed to send link reply: {:?}", e);
        }
    }
}
