//! Motion detection
//!
//! Threshold evaluation of accelerometer samples, and the read-failure
//! counter that decides when the sensor itself is broken.

pub mod detector;
pub mod fault;

pub use detector::{AccelSample, Axis, MotionDetector, MotionStatus};
pub use fault::ReadFailureCounter;
