//! Outbound delivery tracking
//!
//! Each submitted message moves `Submitted -> Sent` on a peer `Ack`,
//! `Submitted -> Failed` on a peer `Nack` or when the ack timeout expires.
//! The tracker is fed milliseconds by the caller so it stays free of any
//! clock dependency and host-testable.

use crate::outcome::{DeliveryOutcome, MessageId, ReasonCode};

use heapless::Vec;

/// Default time to wait for a peer acknowledgement
pub const DEFAULT_ACK_TIMEOUT_MS: u32 = 1_000;

/// Errors returned by [`OutboundTracker::submit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SubmitError {
    /// The pending table is full
    Busy,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    id: MessageId,
    deadline_ms: u32,
}

/// Tracks in-flight outbound messages until they reach a terminal outcome
#[derive(Debug)]
pub struct OutboundTracker<const N: usize> {
    pending: Vec<Pending, N>,
    next_id: MessageId,
    ack_timeout_ms: u32,
}

impl<const N: usize> OutboundTracker<N> {
    /// Create a tracker with the given ack timeout
    pub fn new(ack_timeout_ms: u32) -> Self {
        Self {
            pending: Vec::new(),
            next_id: MessageId(0),
            ack_timeout_ms,
        }
    }

    /// True if another message can be submitted
    pub fn has_capacity(&self) -> bool {
        self.pending.len() < N
    }

    /// Number of messages awaiting an outcome
    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    /// Register a new outbound message, assigning its wire id
    pub fn submit(&mut self, now_ms: u32) -> Result<MessageId, SubmitError> {
        let id = self.next_id;
        let entry = Pending {
            id,
            deadline_ms: now_ms.wrapping_add(self.ack_timeout_ms),
        };
        self.pending.push(entry).map_err(|_| SubmitError::Busy)?;
        self.next_id = id.next();
        Ok(id)
    }

    /// Resolve a message as delivered
    ///
    /// Returns `None` if the id is unknown or already resolved, so a
    /// duplicate ack from the peer is a harmless no-op.
    pub fn acknowledge(&mut self, id: MessageId) -> Option<DeliveryOutcome> {
        self.take(id).map(|_| DeliveryOutcome::Sent)
    }

    /// Resolve a message as failed with the peer-supplied reason
    pub fn reject(&mut self, id: MessageId, reason: ReasonCode) -> Option<DeliveryOutcome> {
        self.take(id).map(|_| DeliveryOutcome::Failed(reason))
    }

    /// Resolve the next message whose ack deadline has passed, if any
    ///
    /// Call repeatedly until it returns `None` to drain all expirations.
    pub fn poll_expired(&mut self, now_ms: u32) -> Option<(MessageId, DeliveryOutcome)> {
        let idx = self
            .pending
            .iter()
            .position(|p| deadline_passed(now_ms, p.deadline_ms))?;
        let entry = self.pending.swap_remove(idx);
        Some((entry.id, DeliveryOutcome::Failed(ReasonCode::TIMEOUT)))
    }

    fn take(&mut self, id: MessageId) -> Option<Pending> {
        let idx = self.pending.iter().position(|p| p.id == id)?;
        Some(self.pending.swap_remove(idx))
    }
}

impl<const N: usize> Default for OutboundTracker<N> {
    fn default() -> Self {
        Self::new(DEFAULT_ACK_TIMEOUT_MS)
    }
}

// Wrap-safe deadline comparison (millisecond counters wrap after ~49 days)
fn deadline_passed(now_ms: u32, deadline_ms: u32) -> bool {
    now_ms.wrapping_sub(deadline_ms) as i32 >= 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_then_acknowledge() {
        let mut tracker: OutboundTracker<4> = OutboundTracker::new(500);
        let id = tracker.submit(0).unwrap();

        assert_eq!(tracker.in_flight(), 1);
        assert_eq!(tracker.acknowledge(id), Some(DeliveryOutcome::Sent));
        assert_eq!(tracker.in_flight(), 0);
    }

    #[test]
    fn test_duplicate_ack_is_ignored() {
        let mut tracker: OutboundTracker<4> = OutboundTracker::new(500);
        let id = tracker.submit(0).unwrap();

        assert_eq!(tracker.acknowledge(id), Some(DeliveryOutcome::Sent));
        assert_eq!(tracker.acknowledge(id), None);
    }

    #[test]
    fn test_reject_carries_reason() {
        let mut tracker: OutboundTracker<4> = OutboundTracker::new(500);
        let id = tracker.submit(0).unwrap();

        assert_eq!(
            tracker.reject(id, ReasonCode::REMOTE_REJECTED),
            Some(DeliveryOutcome::Failed(ReasonCode::REMOTE_REJECTED))
        );
        // Already resolved
        assert_eq!(tracker.reject(id, ReasonCode::TIMEOUT), None);
    }

    #[test]
    fn test_timeout_expiry() {
        let mut tracker: OutboundTracker<4> = OutboundTracker::new(500);
        let id = tracker.submit(1_000).unwrap();

        assert_eq!(tracker.poll_expired(1_499), None);
        assert_eq!(
            tracker.poll_expired(1_500),
            Some((id, DeliveryOutcome::Failed(ReasonCode::TIMEOUT)))
        );
        assert_eq!(tracker.poll_expired(1_500), None);

        // A late ack after expiry is a no-op
        assert_eq!(tracker.acknowledge(id), None);
    }

    #[test]
    fn test_capacity() {
        let mut tracker: OutboundTracker<2> = OutboundTracker::new(500);
        tracker.submit(0).unwrap();
        tracker.submit(0).unwrap();

        assert!(!tracker.has_capacity());
        assert_eq!(tracker.submit(0), Err(SubmitError::Busy));
    }

    #[test]
    fn test_ids_increment_and_wrap() {
        let mut tracker: OutboundTracker<4> = OutboundTracker::new(500);
        let a = tracker.submit(0).unwrap();
        let _ = tracker.acknowledge(a);

        let b = tracker.submit(0).unwrap();
        assert_eq!(b, a.next());
    }

    #[test]
    fn test_deadline_wraparound() {
        let mut tracker: OutboundTracker<4> = OutboundTracker::new(500);
        // Submit just before the u32 millisecond counter wraps
        let id = tracker.submit(u32::MAX - 100).unwrap();

        // Deadline is past the wrap point; shortly after the wrap nothing
        // has expired yet, 500ms later it has
        assert_eq!(tracker.poll_expired(100), None);
        assert_eq!(
            tracker.poll_expired(500),
            Some((id, DeliveryOutcome::Failed(ReasonCode::TIMEOUT)))
        );
    }
}
