//! Clock source trait

use crate::clock::{ClockStyle, TimeOfDay};

/// Source of the current wall-clock time and display preference
///
/// Both queries are answered fresh on every call: the face does not cache
/// the style, so a host-level preference change is picked up on the next
/// refresh.
pub trait ClockSource {
    /// The current local time
    fn now(&self) -> TimeOfDay;

    /// The user's 12/24-hour display preference
    fn style(&self) -> ClockStyle;
}
