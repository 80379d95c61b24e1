//! Siren drivers

pub mod pwm;

pub use pwm::PwmSiren;
