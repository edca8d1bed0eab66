//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy
//! tasks. Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use portable_atomic::AtomicBool;

use meridian_link::{DeliveryOutcome, Dictionary, MessageId, ReasonCode};

/// Channel capacity for inbound application payloads
const INBOUND_CHANNEL_SIZE: usize = 4;

/// Channel capacity for outbound requests
const OUTBOUND_CHANNEL_SIZE: usize = 4;

/// Channel capacity for transport replies and peer confirmations
const LINK_CHANNEL_SIZE: usize = 8;

/// Transport replies the receive side asks the transmit side to send
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkReply {
    /// Confirm delivery of the peer's Data frame
    Ack(MessageId),
    /// Refuse the peer's Data frame with a reason
    Nack(MessageId, ReasonCode),
    /// Answer a link health probe
    Pong(MessageId),
}

/// Peer confirmations for our own outbound messages
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PeerEvent {
    Ack(MessageId),
    Nack(MessageId, ReasonCode),
}

/// Validated inbound payloads awaiting the face task
pub static INBOUND_CHANNEL: Channel<CriticalSectionRawMutex, Dictionary, INBOUND_CHANNEL_SIZE> =
    Channel::new();

/// Outbound payloads awaiting submission to the link
pub static OUTBOUND_CHANNEL: Channel<CriticalSectionRawMutex, Dictionary, OUTBOUND_CHANNEL_SIZE> =
    Channel::new();

/// Replies (ack/nack/pong) the RX side hands to the TX side
pub static REPLY_CHANNEL: Channel<CriticalSectionRawMutex, LinkReply, LINK_CHANNEL_SIZE> =
    Channel::new();

/// Peer ack/nack events resolving our in-flight messages
pub static PEER_EVENT_CHANNEL: Channel<CriticalSectionRawMutex, PeerEvent, LINK_CHANNEL_SIZE> =
    Channel::new();

/// Terminal delivery outcomes reported to the face task
pub static DELIVERY_CHANNEL: Channel<
    CriticalSectionRawMutex,
    (MessageId, DeliveryOutcome),
    LINK_CHANNEL_SIZE,
> = Channel::new();

/// Signal that the screen buffer changed and needs a flush
pub static SCREEN_REFRESH: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Current 12/24-hour display preference
///
/// Read fresh at each formatting call so a future settings path can flip
/// it at runtime without restarting the face.
pub static CLOCK_24H: AtomicBool = AtomicBool::new(true);
