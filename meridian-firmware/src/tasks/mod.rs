//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod display;
pub mod face;
pub mod link_rx;
pub mod link_tx;
pub mod tick;

pub use display::display_task;
pub use face::face_task;
pub use link_rx::link_rx_task;
pub use link_tx::link_tx_task;
pub use tick::tick_task;
