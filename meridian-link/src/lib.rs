//! Phone Link Protocol
//!
//! This crate defines the message protocol between the watch and the paired
//! phone application. The physical transport is the UART side of the radio
//! bridge module; this crate only deals in bytes.
//!
//! # Protocol Overview
//!
//! All messages use a simple binary frame format:
//! ```text
//! ┌───────┬─────┬────────┬──────┬─────────────┬──────────┐
//! │ START │ SEQ │ LENGTH │ TYPE │ PAYLOAD     │ CHECKSUM │
//! │ 1B    │ 1B  │ 1B     │ 1B   │ 0–128B      │ 1B       │
//! └───────┴─────┴────────┴──────┴─────────────┴──────────┘
//! ```
//!
//! SEQ is the per-message identity: `Ack`/`Nack` frames answer the SEQ of
//! the `Data` frame they resolve, which is how each message reaches a
//! terminal delivery outcome. Payloads of `Data` frames are key-value
//! dictionaries (see [`Dictionary`]); their schema is owned by the
//! applications on both ends, not by this crate.

#![no_std]
#![deny(unsafe_code)]

pub mod dict;
pub mod frame;
pub mod messages;
pub mod outbound;
pub mod outcome;

pub use dict::{DictError, Dictionary, Entry, Value};
pub use frame::{Frame, FrameError, FrameParser, FRAME_START, MAX_PAYLOAD_SIZE};
pub use messages::{Envelope, LinkMessage, MessageError};
pub use outbound::{OutboundTracker, SubmitError};
pub use outcome::{DeliveryOutcome, MessageId, ReasonCode};
