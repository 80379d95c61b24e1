//! Inter-task communication channels
//!
//! Every event that can move the guard goes through [`COMMANDS`], the one
//! mailbox the controller task consumes. The other channels carry requests
//! from the controller out to the tasks that own the hardware.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use tripwire_core::countdown::Generation;
use tripwire_core::guard::Command;
use tripwire_core::state::TimerKind;
use tripwire_core::traits::SensorError;
use tripwire_drivers::vibration::VibrationPattern;
use tripwire_protocol::ControllerMessage;

/// Mailbox capacity
const COMMAND_CHANNEL_SIZE: usize = 8;

/// Outgoing panel messages
const PANEL_TX_CHANNEL_SIZE: usize = 8;

/// Guard mailbox: panel commands, timer expiries, samples, lifecycle changes
pub static COMMANDS: Channel<CriticalSectionRawMutex, Command, COMMAND_CHANNEL_SIZE> =
    Channel::new();

/// Requests for the timer task
///
/// The guard has at most one live timer, so a request replaces whatever the
/// timer task was holding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerRequest {
    Schedule {
        kind: TimerKind,
        generation: Generation,
        deadline_ms: u64,
    },
    CancelAll,
}

/// Latest timer request; signalling never waits on the timer task
pub static TIMER_REQUEST: Signal<CriticalSectionRawMutex, TimerRequest> = Signal::new();

/// Requests for the accelerometer task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelRequest {
    Subscribe { interval_ms: u32 },
    Unsubscribe,
}

pub static ACCEL_REQUEST: Signal<CriticalSectionRawMutex, AccelRequest> = Signal::new();

/// Answer to `AccelRequest::Subscribe`
pub static ACCEL_SUBSCRIBED: Signal<CriticalSectionRawMutex, Result<(), SensorError>> =
    Signal::new();

/// Requests for the vibration task
#[derive(Debug, Clone)]
pub enum VibrationRequest {
    Play(VibrationPattern),
    Stop,
}

pub static VIBRATION_REQUEST: Signal<CriticalSectionRawMutex, VibrationRequest> = Signal::new();

/// Messages queued for the panel
pub static PANEL_TX: Channel<CriticalSectionRawMutex, ControllerMessage, PANEL_TX_CHANNEL_SIZE> =
    Channel::new();
