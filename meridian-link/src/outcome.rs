//! Per-message delivery outcomes
//!
//! Every message attempt ends in exactly one terminal outcome: outbound
//! messages resolve to `Sent` or `Failed`, inbound messages are either
//! handed to the application or reported as `Dropped`. Reason codes are
//! opaque on the wire; the named constants cover what this transport
//! itself can produce.

/// Identity of a message on the link (the frame SEQ)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MessageId(pub u8);

impl MessageId {
    /// The id following this one, wrapping at 255
    pub fn next(self) -> Self {
        MessageId(self.0.wrapping_add(1))
    }
}

/// Opaque transport reason code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReasonCode(pub u8);

impl ReasonCode {
    /// No acknowledgement arrived within the ack timeout
    pub const TIMEOUT: ReasonCode = ReasonCode(0x01);
    /// Too many messages already in flight
    pub const BUSY: ReasonCode = ReasonCode(0x02);
    /// Inbound queue had no room for the message
    pub const QUEUE_FULL: ReasonCode = ReasonCode(0x03);
    /// Payload could not be decoded
    pub const MALFORMED: ReasonCode = ReasonCode(0x04);
    /// Payload exceeds the configured size ceiling
    pub const OVERSIZE: ReasonCode = ReasonCode(0x05);
    /// The link transport failed to carry the bytes
    pub const LINK_DOWN: ReasonCode = ReasonCode(0x06);
    /// The peer rejected the message
    pub const REMOTE_REJECTED: ReasonCode = ReasonCode(0x07);

    /// Human-readable name for logging
    pub fn describe(self) -> &'static str {
        match self {
            ReasonCode::TIMEOUT => "ack timeout",
            ReasonCode::BUSY => "transport busy",
            ReasonCode::QUEUE_FULL => "inbound queue full",
            ReasonCode::MALFORMED => "malformed payload",
            ReasonCode::OVERSIZE => "payload oversize",
            ReasonCode::LINK_DOWN => "link down",
            ReasonCode::REMOTE_REJECTED => "rejected by peer",
            _ => "unknown reason",
        }
    }
}

/// Terminal state of a message attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeliveryOutcome {
    /// Outbound message confirmed delivered
    Sent,
    /// Outbound message failed in transit
    Failed(ReasonCode),
    /// Inbound message could not be delivered to the application
    Dropped(ReasonCode),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_id_wraps() {
        assert_eq!(MessageId(0).next(), MessageId(1));
        assert_eq!(MessageId(255).next(), MessageId(0));
    }

    #[test]
    fn test_describe_known_and_unknown() {
        assert_eq!(ReasonCode::TIMEOUT.describe(), "ack timeout");
        assert_eq!(ReasonCode(0xEE).describe(), "unknown reason");
    }
}
