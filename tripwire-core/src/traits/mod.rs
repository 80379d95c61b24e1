//! Collaborator traits
//!
//! These traits define the interface between the guard logic and the
//! board-specific implementations of storage, alarm outputs, the motion
//! sensor, timers and the panel.
//!
//! All methods are async so that implementations are free to talk to a
//! bus, a flash controller or another task.

pub mod alarm;
pub mod sensor;
pub mod store;

pub use alarm::{ActuatorError, Siren, Vibrator};
pub use sensor::{MotionSensor, OrientationLock, SensorError, TimerService};
pub use store::{SecretStore, StoreError};
