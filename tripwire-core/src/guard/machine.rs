//! Guard state machine
//!
//! `GuardMachine` decides every transition and describes the side effects
//! as a list of [`Effect`]s. It never talks to hardware itself, which keeps
//! it synchronous and fully testable; [`super::GuardController`] applies
//! the effects in order.

use heapless::Vec;

use crate::config::{GRACE_PERIOD_S, SAMPLE_INTERVAL_MS};
use crate::countdown::{Countdown, CountdownPhase, CountdownStep, Generation};
use crate::error::GuardError;
use crate::motion::{Axis, MotionDetector, MotionStatus};
use crate::secret::{secrets_match, validate_new_secret, Secret};
use crate::state::{Event, GuardState, Lifecycle, TimerKind};

/// Largest number of effects a single transition produces
pub const MAX_EFFECTS: usize = 4;

/// Side effect requested by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Effect {
    /// Schedule a one-shot timer at `deadline_ms` (same clock as `arm`)
    ScheduleTimer {
        kind: TimerKind,
        generation: Generation,
        deadline_ms: u64,
    },
    /// Drop all pending timers
    CancelTimers,
    /// Start motion sampling
    SubscribeMotion { interval_ms: u32 },
    /// Stop motion sampling
    UnsubscribeMotion,
    /// Start siren and vibration
    StartAlarm,
    /// Stop siren and vibration
    StopAlarm,
    /// Lock the panel to portrait
    LockOrientation,
}

/// Effect list for one transition
pub type Effects = Vec<Effect, MAX_EFFECTS>;

/// What caused the alarm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TriggerCause {
    /// Sample exceeded the threshold on this axis
    Motion(Axis),
    /// Panel left the foreground
    Lifecycle(Lifecycle),
    /// Motion sensor lost
    SensorFault,
}

/// A state change and the effects that go with it
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    pub from: GuardState,
    pub to: GuardState,
    pub effects: Effects,
}

impl Transition {
    fn new(from: GuardState, to: GuardState, effects: &[Effect]) -> Self {
        let mut list = Effects::new();
        for effect in effects {
            // MAX_EFFECTS covers the largest transition below
            let _ = list.push(*effect);
        }
        Self {
            from,
            to,
            effects: list,
        }
    }
}

/// The guard state machine
#[derive(Debug, Clone)]
pub struct GuardMachine {
    state: GuardState,
    generation: Generation,
    secret_set: bool,
    motion_subscribed: bool,
    detector: MotionDetector,
    last_trigger: Option<TriggerCause>,
}

impl Default for GuardMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl GuardMachine {
    /// Machine in `Idle` with no secret
    pub fn new() -> Self {
        Self {
            state: GuardState::Idle,
            generation: Generation::new(),
            secret_set: false,
            motion_subscribed: false,
            detector: MotionDetector::new(),
            last_trigger: None,
        }
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    /// Generation current timers must carry
    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn has_secret(&self) -> bool {
        self.secret_set
    }

    pub fn motion_subscribed(&self) -> bool {
        self.motion_subscribed
    }

    /// Cause of the current (or most recent) alarm
    pub fn last_trigger(&self) -> Option<TriggerCause> {
        self.last_trigger
    }

    /// Samples evaluated since monitoring started
    pub fn samples_evaluated(&self) -> u32 {
        self.detector.samples_evaluated()
    }

    /// Seconds shown on the countdown display
    ///
    /// Outside a countdown this is the full grace period while idle and zero
    /// once the grace period is over.
    pub fn remaining_s(&self) -> u8 {
        match self.state {
            GuardState::Idle => GRACE_PERIOD_S,
            GuardState::Countdown(countdown) => countdown.remaining_s(),
            GuardState::Monitoring | GuardState::Triggered => 0,
        }
    }

    /// Whether a "go back" request must be swallowed
    pub fn swallows_back(&self) -> bool {
        self.state.swallows_back()
    }

    /// Record whether the store already holds a secret (at boot)
    pub fn restore_secret_flag(&mut self, secret_set: bool) {
        self.secret_set = secret_set;
    }

    /// Validate a new secret before it is written
    ///
    /// Only allowed while idle.
    pub fn prepare_secret(&self, first: &str, confirm: &str) -> Result<Secret, GuardError> {
        if self.state != GuardState::Idle {
            return Err(GuardError::InvalidState);
        }
        Ok(validate_new_secret(first, confirm)?)
    }

    /// The secret was written successfully
    pub fn secret_saved(&mut self) {
        self.secret_set = true;
    }

    /// Arm request
    ///
    /// From `Idle` this starts the countdown. During a countdown it restarts
    /// at the full grace period; timers from the previous run become stale.
    pub fn arm(&mut self, now_ms: u64) -> Result<Transition, GuardError> {
        match self.state {
            GuardState::Idle if !self.secret_set => Err(GuardError::SecretUnavailable),
            GuardState::Idle | GuardState::Countdown(_) => {
                let from = self.state;
                let countdown = Countdown::start(now_ms);
                self.generation = self.generation.next();
                self.state = GuardState::Countdown(countdown);
                Ok(Transition::new(
                    from,
                    self.state,
                    &[
                        Effect::CancelTimers,
                        Effect::ScheduleTimer {
                            kind: TimerKind::Tick,
                            generation: self.generation,
                            deadline_ms: countdown.next_deadline_ms(),
                        },
                    ],
                ))
            }
            GuardState::Monitoring | GuardState::Triggered => Err(GuardError::InvalidState),
        }
    }

    /// Disarm request
    ///
    /// `stored` is the secret read from the store at the time of the
    /// request, `None` if it could not be read.
    pub fn disarm(&mut self, candidate: &str, stored: Option<&str>) -> Result<Transition, GuardError> {
        if self.state != GuardState::Triggered {
            return Err(GuardError::InvalidState);
        }
        let stored = stored.ok_or(GuardError::SecretUnavailable)?;
        if !secrets_match(candidate, stored) {
            return Err(GuardError::AuthMismatch);
        }

        let from = self.state;
        self.generation = self.generation.next();
        self.state = GuardState::Idle;

        let mut transition = Transition::new(from, self.state, &[Effect::StopAlarm, Effect::CancelTimers]);
        if self.motion_subscribed {
            self.motion_subscribed = false;
            let _ = transition.effects.push(Effect::UnsubscribeMotion);
        }
        Ok(transition)
    }

    /// Process an event, `None` if it is ignored in the current state
    pub fn handle(&mut self, event: Event) -> Option<Transition> {
        match event {
            Event::TimerFired { kind, generation } => self.on_timer(kind, generation),
            Event::MotionSample(sample) => {
                if self.state != GuardState::Monitoring {
                    return None;
                }
                match self.detector.evaluate(sample) {
                    MotionStatus::Still => None,
                    MotionStatus::Moved(axis) => Some(self.trigger(TriggerCause::Motion(axis))),
                }
            }
            Event::LifecycleChanged(lifecycle) => {
                if lifecycle.is_active() || !self.state.is_armed() {
                    return None;
                }
                Some(self.trigger(TriggerCause::Lifecycle(lifecycle)))
            }
            Event::SensorFault => {
                if self.state != GuardState::Monitoring {
                    return None;
                }
                Some(self.trigger(TriggerCause::SensorFault))
            }
        }
    }

    fn on_timer(&mut self, kind: TimerKind, generation: Generation) -> Option<Transition> {
        if generation != self.generation {
            return None;
        }

        let GuardState::Countdown(mut countdown) = self.state else {
            return None;
        };
        let from = self.state;

        match (kind, countdown.phase()) {
            (TimerKind::Tick, CountdownPhase::Ticking) => {
                let step = countdown.tick();
                self.state = GuardState::Countdown(countdown);
                match step {
                    CountdownStep::Ticked(_) => Some(Transition::new(
                        from,
                        self.state,
                        &[Effect::ScheduleTimer {
                            kind: TimerKind::Tick,
                            generation: self.generation,
                            deadline_ms: countdown.next_deadline_ms(),
                        }],
                    )),
                    CountdownStep::SettleStarted => Some(Transition::new(
                        from,
                        self.state,
                        &[
                            Effect::ScheduleTimer {
                                kind: TimerKind::Settle,
                                generation: self.generation,
                                deadline_ms: countdown.monitoring_at_ms(),
                            },
                            Effect::LockOrientation,
                        ],
                    )),
                    CountdownStep::Ignored => None,
                }
            }
            (TimerKind::Settle, CountdownPhase::Settling) => {
                self.state = GuardState::Monitoring;
                self.motion_subscribed = true;
                self.detector.reset();
                Some(Transition::new(
                    from,
                    self.state,
                    &[Effect::SubscribeMotion {
                        interval_ms: SAMPLE_INTERVAL_MS,
                    }],
                ))
            }
            _ => None,
        }
    }

    fn trigger(&mut self, cause: TriggerCause) -> Transition {
        let from = self.state;
        self.generation = self.generation.next();
        self.state = GuardState::Triggered;
        self.last_trigger = Some(cause);

        match cause {
            // Lifecycle loss leaves the motion subscription alone; disarm
            // takes care of it.
            TriggerCause::Lifecycle(_) => Transition::new(
                from,
                self.state,
                &[Effect::StartAlarm, Effect::CancelTimers, Effect::LockOrientation],
            ),
            TriggerCause::Motion(_) | TriggerCause::SensorFault => {
                self.motion_subscribed = false;
                Transition::new(
                    from,
                    self.state,
                    &[
                        Effect::StartAlarm,
                        Effect::UnsubscribeMotion,
                        Effect::LockOrientation,
                    ],
                )
            }
        }
    }
}
