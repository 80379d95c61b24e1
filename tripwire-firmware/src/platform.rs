//! Collaborators owned by the controller task
//!
//! The siren and the secret store are driven in place. Everything else
//! forwards a request to the task that owns the hardware, so the
//! controller never blocks on a sensor read or a vibration step.

use defmt::*;
use embassy_rp::pwm::PwmOutput;
use embassy_time::{with_timeout, Duration};

use tripwire_core::countdown::Generation;
use tripwire_core::guard::GuardController;
use tripwire_core::state::TimerKind;
use tripwire_core::traits::{
    ActuatorError, MotionSensor, OrientationLock, SensorError, TimerService, Vibrator,
};
use tripwire_drivers::siren::PwmSiren;
use tripwire_drivers::storage::FlashSecretStore;
use tripwire_drivers::vibration::VibrationPattern;
use tripwire_hal_rp2040::flash::Rp2040FlashStorage;
use tripwire_protocol::ControllerMessage;

use crate::channels::{
    AccelRequest, TimerRequest, VibrationRequest, ACCEL_REQUEST, ACCEL_SUBSCRIBED, PANEL_TX,
    TIMER_REQUEST, VIBRATION_REQUEST,
};

/// How long a subscribe waits for the accelerometer to come up
const SUBSCRIBE_TIMEOUT_MS: u64 = 250;

/// The guard as wired on this board
pub type Guard = GuardController<
    FlashSecretStore<Rp2040FlashStorage<'static>>,
    PwmSiren<PwmOutput<'static>>,
    TaskVibrator,
    TaskMotionSensor,
    TaskTimers,
    PanelOrientation,
>;

/// Timers run by `timer_task`
pub struct TaskTimers;

impl TimerService for TaskTimers {
    async fn schedule(&mut self, kind: TimerKind, generation: Generation, deadline_ms: u64) {
        TIMER_REQUEST.signal(TimerRequest::Schedule {
            kind,
            generation,
            deadline_ms,
        });
    }

    async fn cancel_all(&mut self) {
        TIMER_REQUEST.signal(TimerRequest::CancelAll);
    }
}

/// Accelerometer sampled by `accel_task`
pub struct TaskMotionSensor;

impl MotionSensor for TaskMotionSensor {
    async fn subscribe(&mut self, interval_ms: u32) -> Result<(), SensorError> {
        ACCEL_SUBSCRIBED.reset();
        ACCEL_REQUEST.signal(AccelRequest::Subscribe { interval_ms });

        match with_timeout(
            Duration::from_millis(SUBSCRIBE_TIMEOUT_MS),
            ACCEL_SUBSCRIBED.wait(),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => {
                warn!("Accelerometer did not answer subscribe");
                Err(SensorError::NotResponding)
            }
        }
    }

    async fn unsubscribe(&mut self) {
        ACCEL_REQUEST.signal(AccelRequest::Unsubscribe);
    }
}

/// Vibration motor played by `vibration_task`
pub struct TaskVibrator;

impl Vibrator for TaskVibrator {
    async fn vibrate(&mut self, pattern_ms: &[u16], repeat: bool) -> Result<(), ActuatorError> {
        let pattern = VibrationPattern::new(pattern_ms, repeat)?;
        VIBRATION_REQUEST.signal(VibrationRequest::Play(pattern));
        Ok(())
    }

    async fn cancel(&mut self) -> Result<(), ActuatorError> {
        VIBRATION_REQUEST.signal(VibrationRequest::Stop);
        Ok(())
    }
}

/// Orientation is enforced by the panel
pub struct PanelOrientation;

impl OrientationLock for PanelOrientation {
    async fn lock_portrait(&mut self) {
        PANEL_TX.send(ControllerMessage::LockPortrait).await;
    }
}
