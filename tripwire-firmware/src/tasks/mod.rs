//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod accel;
pub mod controller;
pub mod panel_rx;
pub mod panel_tx;
pub mod timers;
pub mod vibration;

pub use accel::accel_task;
pub use controller::controller_task;
pub use panel_rx::panel_rx_task;
pub use panel_tx::panel_tx_task;
pub use timers::timer_task;
pub use vibration::vibration_task;
