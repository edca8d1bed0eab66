//! Board-agnostic logic for the Meridian watchface
//!
//! This crate contains all application logic that does not depend on
//! specific hardware or on the executor:
//!
//! - Wall-clock time types and display formatting
//! - Watchface state (the time line and the weather line)
//! - Host-service abstraction traits (clock source, message sink)
//!
//! The firmware crate provides the concrete clock, transport and display
//! behind these seams.

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod face;
pub mod traits;
