//! Guard controller
//!
//! Owns the state machine and every collaborator. Commands are processed one
//! at a time, each to completion (all external calls awaited) before the
//! next one is looked at. On the firmware a single task feeds it from the
//! mailbox, so at most one transition is ever in flight.

use crate::error::GuardError;
use crate::secret::Secret;
use crate::state::{Event, GuardState};
use crate::traits::{MotionSensor, OrientationLock, SecretStore, Siren, TimerService, Vibrator};

use super::alarm::{AlarmActuator, AlarmReport};
use super::machine::{Effect, GuardMachine, Transition};

/// Requests handled by the controller
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Start (or restart) the countdown
    Arm { now_ms: u64 },
    /// Set or replace the secret (idle only)
    SetSecret { first: Secret, confirm: Secret },
    /// Silence the alarm with the secret
    Disarm { candidate: Secret },
    /// Navigation "back" request from the panel
    Back,
    /// Timer, sensor or lifecycle event
    Event(Event),
}

/// Summary of an applied transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransitionReport {
    pub from: GuardState,
    pub to: GuardState,
    /// Outcome of starting or stopping the alarm, if this transition did
    pub alarm: Option<AlarmReport>,
}

impl TransitionReport {
    /// Check if the state changed kind (countdown ticks do not)
    pub fn changed_state(&self) -> bool {
        core::mem::discriminant(&self.from) != core::mem::discriminant(&self.to)
    }
}

/// Successful command outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// State machine moved (or ticked)
    Transition(TransitionReport),
    /// Event not relevant in the current state
    Ignored,
    /// New secret written
    SecretSaved,
    /// Back request evaluated
    Back { swallowed: bool },
}

impl Outcome {
    /// Alarm report carried by this outcome
    pub fn alarm_report(&self) -> Option<AlarmReport> {
        match self {
            Outcome::Transition(report) => report.alarm,
            _ => None,
        }
    }
}

/// Serialized owner of the guard machine and its collaborators
pub struct GuardController<St, S, V, M, T, O> {
    machine: GuardMachine,
    store: St,
    alarm: AlarmActuator<S, V>,
    sensor: M,
    timers: T,
    orientation: O,
}

impl<St, S, V, M, T, O> GuardController<St, S, V, M, T, O>
where
    St: SecretStore,
    S: Siren,
    V: Vibrator,
    M: MotionSensor,
    T: TimerService,
    O: OrientationLock,
{
    pub fn new(store: St, alarm: AlarmActuator<S, V>, sensor: M, timers: T, orientation: O) -> Self {
        Self {
            machine: GuardMachine::new(),
            store,
            alarm,
            sensor,
            timers,
            orientation,
        }
    }

    /// Check the store for a secret left by a previous run
    ///
    /// Returns whether a secret is set. A store that cannot be read leaves
    /// the guard without a secret (arming will be refused).
    pub async fn boot(&mut self) -> Result<bool, GuardError> {
        let secret_set = match self.store.load().await {
            Ok(secret) => secret.is_some(),
            Err(_) => {
                self.machine.restore_secret_flag(false);
                return Err(GuardError::Storage);
            }
        };
        self.machine.restore_secret_flag(secret_set);
        Ok(secret_set)
    }

    pub fn machine(&self) -> &GuardMachine {
        &self.machine
    }

    pub fn state(&self) -> GuardState {
        self.machine.state()
    }

    pub fn alarm(&self) -> &AlarmActuator<S, V> {
        &self.alarm
    }

    /// Process one command to completion
    pub async fn dispatch(&mut self, command: Command) -> Result<Outcome, GuardError> {
        match command {
            Command::Arm { now_ms } => {
                let transition = self.machine.arm(now_ms)?;
                Ok(Outcome::Transition(self.apply(transition).await))
            }
            Command::SetSecret { first, confirm } => {
                let secret = self.machine.prepare_secret(&first, &confirm)?;
                self.store
                    .save(&secret)
                    .await
                    .map_err(|_| GuardError::Storage)?;
                self.machine.secret_saved();
                Ok(Outcome::SecretSaved)
            }
            Command::Disarm { candidate } => {
                if !self.machine.state().alarm_active() {
                    return Err(GuardError::InvalidState);
                }
                // A store that cannot be read is treated like a missing secret
                let stored = self.store.load().await.ok().flatten();
                let transition = self.machine.disarm(&candidate, stored.as_deref())?;
                Ok(Outcome::Transition(self.apply(transition).await))
            }
            Command::Back => Ok(Outcome::Back {
                swallowed: self.machine.swallows_back(),
            }),
            Command::Event(event) => match self.machine.handle(event) {
                Some(transition) => Ok(Outcome::Transition(self.apply(transition).await)),
                None => Ok(Outcome::Ignored),
            },
        }
    }

    /// Apply the effects of a transition, in order
    ///
    /// A failed motion subscription is fed back as a sensor fault, and the
    /// resulting transition is applied as part of the same command.
    async fn apply(&mut self, transition: Transition) -> TransitionReport {
        let mut report = TransitionReport {
            from: transition.from,
            to: transition.to,
            alarm: None,
        };

        let mut pending = Some(transition);
        while let Some(transition) = pending.take() {
            report.to = transition.to;

            for effect in transition.effects {
                match effect {
                    Effect::ScheduleTimer {
                        kind,
                        generation,
                        deadline_ms,
                    } => self.timers.schedule(kind, generation, deadline_ms).await,
                    Effect::CancelTimers => self.timers.cancel_all().await,
                    Effect::SubscribeMotion { interval_ms } => {
                        if self.sensor.subscribe(interval_ms).await.is_err() {
                            pending = self.machine.handle(Event::SensorFault);
                        }
                    }
                    Effect::UnsubscribeMotion => self.sensor.unsubscribe().await,
                    Effect::StartAlarm => report.alarm = Some(self.alarm.start().await),
                    Effect::StopAlarm => report.alarm = Some(self.alarm.stop().await),
                    Effect::LockOrientation => self.orientation.lock_portrait().await,
                }
            }
        }

        report
    }
}
