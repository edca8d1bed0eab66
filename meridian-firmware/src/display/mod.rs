//! Local OLED display
//!
//! The watch drives a 128x64 SH1106 OLED over async I2C. Text is laid out
//! as 8 rows of 21 characters; the face task renders rows into a shared
//! `Screen` buffer and the display task flushes it to the panel. The panel
//! is a host-owned surface as far as the face logic is concerned: it only
//! ever supplies row strings.

pub mod font;
pub mod renderer;
pub mod sh1106;

pub use renderer::{Renderer, Screen};
pub use sh1106::Sh1106;
