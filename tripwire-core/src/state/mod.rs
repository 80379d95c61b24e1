//! Guard state
//!
//! `GuardState` is the single source of truth for what the device is doing.
//! Every transition goes through [`crate::guard::GuardMachine`].

pub mod events;
pub mod machine;

pub use events::{Event, Lifecycle, TimerKind};
pub use machine::GuardState;
