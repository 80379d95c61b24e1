//! Guard logic
//!
//! - [`GuardMachine`]: pure state machine producing [`Effect`]s
//! - [`AlarmActuator`]: siren and vibrator driven as one alarm
//! - [`GuardController`]: owns the machine and the collaborators, applies
//!   effects, one command at a time

pub mod alarm;
pub mod controller;
pub mod machine;

pub use alarm::{AlarmActuator, AlarmReport};
pub use controller::{Command, GuardController, Outcome, TransitionReport};
pub use machine::{Effect, Effects, GuardMachine, Transition, TriggerCause};
