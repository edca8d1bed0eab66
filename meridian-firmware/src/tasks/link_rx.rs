//! Phone link receive task
//!
//! Receives frames from the radio bridge UART, decides each inbound
//! message's fate (delivered to the face, or dropped with a reason), and
//! forwards peer confirmations to the transmit side.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use meridian_link::{
    DeliveryOutcome, Envelope, Frame, FrameParser, LinkMessage, MessageId, ReasonCode,
};

use crate::channels::{
    LinkReply, PeerEvent, DELIVERY_CHANNEL, INBOUND_CHANNEL, PEER_EVENT_CHANNEL, REPLY_CHANNEL,
};
use crate::config::LinkConfig;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Link RX task - receives and parses frames from the phone
#[embassy_executor::task]
pub async fn link_rx_task(mut rx: BufferedUartRx<'static>, link: &'static LinkConfig) {
    info!("Link RX task started");

    let mut parser = FrameParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(frame)) => handle_frame(&frame, link).await,
                        Ok(None) => {
                            // Need more bytes
                        }
                        Err(e) => {
                            // Below the message layer there is no seq to
                            // answer; the parser has already resynced
                            warn!("Frame parse error: {:?}", e);
                        }
                    }
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

/// Handle a parsed frame
async fn handle_frame(frame: &Frame, link: &LinkConfig) {
    let id = MessageId(frame.seq);

    // Admission check before decoding: the configured inbound ceiling can
    // be tighter than what a frame can physically carry
    if frame.payload.len() > link.max_inbound {
        warn!("Inbound frame oversize: {} bytes", frame.payload.len());
        drop_inbound(id, ReasonCode::OVERSIZE).await;
        return;
    }

    let envelope = match Envelope::from_frame(frame) {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!("Malformed inbound frame: {:?}", e);
            drop_inbound(id, ReasonCode::MALFORMED).await;
            return;
        }
    };

    match envelope.message {
        LinkMessage::Data(dict) => {
            // Deliver to the face, dropping (with a nack) if the queue is
            // full - the sender owns any retry policy
            match INBOUND_CHANNEL.try_send(dict) {
                Ok(()) => REPLY_CHANNEL.send(LinkReply::Ack(id)).await,
                Err(_) => {
                    warn!("Inbound queue full, dropping message {}", id.0);
                    drop_inbound(id, ReasonCode::QUEUE_FULL).await;
                }
            }
        }
        LinkMessage::Ack => PEER_EVENT_CHANNEL.send(PeerEvent::Ack(id)).await,
        LinkMessage::Nack(reason) => {
            PEER_EVENT_CHANNEL.send(PeerEvent::Nack(id, reason)).await
        }
        LinkMessage::Ping => {
            trace!("PING received");
            REPLY_CHANNEL.send(LinkReply::Pong(id)).await;
        }
        LinkMessage::Pong => {
            trace!("PONG received");
        }
    }
}

/// Nack the peer and report the terminal Dropped outcome
async fn drop_inbound(id: MessageId, reason: ReasonCode) {
    REPLY_CHANNEL.send(LinkReply::Nack(id, reason)).await;
    DELIVERY_CHANNEL
        .send((id, DeliveryOutcome::Dropped(reason)))
        .await;
}
