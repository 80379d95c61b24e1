//! Motion sensor, timer and presentation hooks

use core::future::Future;

use crate::countdown::Generation;
use crate::state::TimerKind;

/// Errors from the motion sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Sensor did not answer on the bus
    NotResponding,
    /// Sensor answered with an unexpected identity
    WrongDevice,
    /// Bus error during a transfer
    Bus,
}

/// Source of periodic acceleration samples
///
/// While subscribed, samples are delivered out of band (on the firmware
/// they arrive through the controller mailbox).
pub trait MotionSensor {
    /// Start sampling every `interval_ms`
    fn subscribe(&mut self, interval_ms: u32) -> impl Future<Output = Result<(), SensorError>>;

    /// Stop sampling; no-op when not subscribed
    fn unsubscribe(&mut self) -> impl Future<Output = ()>;
}

/// One-shot timers tagged with a generation
pub trait TimerService {
    /// Fire a `kind` timer at `deadline_ms`, stamped with `generation`
    ///
    /// Deadlines are absolute, on the clock the guard was armed with. A
    /// deadline already in the past fires immediately.
    fn schedule(
        &mut self,
        kind: TimerKind,
        generation: Generation,
        deadline_ms: u64,
    ) -> impl Future<Output = ()>;

    /// Drop every pending timer
    fn cancel_all(&mut self) -> impl Future<Output = ()>;
}

/// Screen orientation lock, fire-and-forget
pub trait OrientationLock {
    fn lock_portrait(&mut self) -> impl Future<Output = ()>;
}
