//! Message sink trait
//!
//! The four-way notification contract of the phone link. The transport
//! invokes these hooks from its own event context, so every hook must
//! complete promptly, must not block, and must not panic. None of the
//! hooks retries anything: the sender owns retry policy, and a dropped
//! inbound message is terminal at the point of notification.

use meridian_link::{DeliveryOutcome, Dictionary, MessageId, ReasonCode};

/// Receiver of per-message transport notifications
pub trait MessageSink {
    /// A message from the peer was fully received and validated
    ///
    /// The payload arrives as an unopened dictionary; implementations that
    /// interpret it must catch their own failures locally rather than let
    /// them escape the hook.
    fn inbound_received(&mut self, message: &Dictionary);

    /// An inbound message could not be delivered to the application
    fn inbound_dropped(&mut self, reason: ReasonCode);

    /// A previously submitted message was confirmed delivered
    ///
    /// Must tolerate being invoked more than once for the same id without
    /// corrupting state.
    fn outbound_sent(&mut self, id: MessageId);

    /// A previously submitted message failed in transit
    fn outbound_failed(&mut self, id: MessageId, reason: ReasonCode);
}

/// Route a terminal delivery outcome to exactly one sink hook
pub fn dispatch_outcome<S: MessageSink>(sink: &mut S, id: MessageId, outcome: DeliveryOutcome) {
    match outcome {
        DeliveryOutcome::Sent => sink.outbound_sent(id),
        DeliveryOutcome::Failed(reason) => sink.outbound_failed(id, reason),
        DeliveryOutcome::Dropped(reason) => sink.inbound_dropped(reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_link::Value;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Call {
        Received(usize),
        Dropped(ReasonCode),
        Sent(MessageId),
        Failed(MessageId, ReasonCode),
    }

    /// Mock sink recording every invocation
    #[derive(Default)]
    struct RecordingSink {
        calls: heapless::Vec<Call, 16>,
    }

    impl MessageSink for RecordingSink {
        fn inbound_received(&mut self, message: &Dictionary) {
            let _ = self.calls.push(Call::Received(message.len()));
        }

        fn inbound_dropped(&mut self, reason: ReasonCode) {
            let _ = self.calls.push(Call::Dropped(reason));
        }

        fn outbound_sent(&mut self, id: MessageId) {
            let _ = self.calls.push(Call::Sent(id));
        }

        fn outbound_failed(&mut self, id: MessageId, reason: ReasonCode) {
            let _ = self.calls.push(Call::Failed(id, reason));
        }
    }

    #[test]
    fn test_each_outcome_reaches_exactly_one_hook() {
        let mut sink = RecordingSink::default();
        let id = MessageId(4);

        dispatch_outcome(&mut sink, id, DeliveryOutcome::Sent);
        dispatch_outcome(&mut sink, id, DeliveryOutcome::Failed(ReasonCode::TIMEOUT));
        dispatch_outcome(&mut sink, id, DeliveryOutcome::Dropped(ReasonCode::QUEUE_FULL));

        assert_eq!(
            sink.calls.as_slice(),
            &[
                Call::Sent(id),
                Call::Failed(id, ReasonCode::TIMEOUT),
                Call::Dropped(ReasonCode::QUEUE_FULL),
            ]
        );
    }

    #[test]
    fn test_arbitrary_reason_codes_are_accepted() {
        let mut sink = RecordingSink::default();
        for raw in [0u8, 0x42, 0xFF] {
            dispatch_outcome(&mut sink, MessageId(0), DeliveryOutcome::Dropped(ReasonCode(raw)));
            dispatch_outcome(
                &mut sink,
                MessageId(0),
                DeliveryOutcome::Failed(ReasonCode(raw)),
            );
        }
        assert_eq!(sink.calls.len(), 6);
    }

    #[test]
    fn test_inbound_received_with_empty_payload() {
        let mut sink = RecordingSink::default();
        sink.inbound_received(&Dictionary::new());
        assert_eq!(sink.calls.as_slice(), &[Call::Received(0)]);
    }

    #[test]
    fn test_inbound_received_with_unknown_schema() {
        // Keys the face has never heard of must be accepted and ignored
        let mut dict = Dictionary::new();
        dict.insert(0xDEAD, Value::Uint(42)).unwrap();
        dict.insert(0xBEEF, Value::text("??").unwrap()).unwrap();

        let mut sink = RecordingSink::default();
        sink.inbound_received(&dict);
        assert_eq!(sink.calls.as_slice(), &[Call::Received(2)]);
    }
}
