//! Host-service abstraction traits
//!
//! The face never talks to hardware or to the executor directly; it reads
//! the clock and reports message outcomes through these seams, which the
//! firmware implements and tests mock.

pub mod clock;
pub mod sink;

pub use clock::ClockSource;
pub use sink::{dispatch_outcome, MessageSink};
