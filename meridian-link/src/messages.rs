//! Message types for the phone link
//!
//! Both directions use the same message set: `Data` carries a dictionary
//! payload, `Ack`/`Nack` resolve a previously seen `Data` frame by its
//! sequence number, and `Ping`/`Pong` keep the link health visible.

use crate::dict::{DictError, Dictionary};
use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};
use crate::outcome::{MessageId, ReasonCode};

use heapless::Vec;

// Message type IDs
pub const MSG_ACK: u8 = 0x01;
pub const MSG_NACK: u8 = 0x02;
pub const MSG_PING: u8 = 0x03;
pub const MSG_PONG: u8 = 0x04;
pub const MSG_DATA: u8 = 0x10;

/// Errors that can occur translating between frames and messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MessageError {
    /// Frame-level encoding failure
    Frame(FrameError),
    /// Dictionary payload could not be encoded or decoded
    Dict(DictError),
    /// Unrecognized message type id
    UnknownType,
    /// Payload is missing required bytes for its type
    TruncatedPayload,
}

impl From<FrameError> for MessageError {
    fn from(e: FrameError) -> Self {
        MessageError::Frame(e)
    }
}

impl From<DictError> for MessageError {
    fn from(e: DictError) -> Self {
        MessageError::Dict(e)
    }
}

/// A message on the phone link
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkMessage {
    /// Application payload
    Data(Dictionary),
    /// Positive delivery confirmation for the enclosing sequence number
    Ack,
    /// Negative delivery confirmation with a reason code
    Nack(ReasonCode),
    /// Link health probe
    Ping,
    /// Link health response
    Pong,
}

/// A message together with its wire identity
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Envelope {
    pub id: MessageId,
    pub message: LinkMessage,
}

impl Envelope {
    pub fn new(id: MessageId, message: LinkMessage) -> Self {
        Self { id, message }
    }

    /// Encode this envelope into a frame
    pub fn to_frame(&self) -> Result<Frame, MessageError> {
        let seq = self.id.0;
        let frame = match &self.message {
            LinkMessage::Data(dict) => {
                let mut payload = Vec::<u8, MAX_PAYLOAD_SIZE>::new();
                dict.encode(&mut payload)?;
                Frame::new(seq, MSG_DATA, &payload)?
            }
            LinkMessage::Ack => Frame::empty(seq, MSG_ACK),
            LinkMessage::Nack(reason) => Frame::new(seq, MSG_NACK, &[reason.0])?,
            LinkMessage::Ping => Frame::empty(seq, MSG_PING),
            LinkMessage::Pong => Frame::empty(seq, MSG_PONG),
        };
        Ok(frame)
    }

    /// Parse an envelope from a frame
    pub fn from_frame(frame: &Frame) -> Result<Self, MessageError> {
        let id = MessageId(frame.seq);
        let message = match frame.msg_type {
            MSG_DATA => LinkMessage::Data(Dictionary::decode(&frame.payload)?),
            MSG_ACK => LinkMessage::Ack,
            MSG_NACK => {
                let &code = frame.payload.first().ok_or(MessageError::TruncatedPayload)?;
                LinkMessage::Nack(ReasonCode(code))
            }
            MSG_PING => LinkMessage::Ping,
            MSG_PONG => LinkMessage::Pong,
            _ => return Err(MessageError::UnknownType),
        };
        Ok(Envelope { id, message })
    }
}
