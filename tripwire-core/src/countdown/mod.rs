//! Arming countdown
//!
//! Tracks the grace period after arming and the settle window that follows
//! it, and hands out timer generations so stale callbacks can be dropped.

pub mod generation;
pub mod grace;

pub use generation::Generation;
pub use grace::{Countdown, CountdownPhase, CountdownStep};
