//! Threshold motion detector
//!
//! The device is expected to lie flat while guarded, so the rest vector is
//! (0, 0, 1 g). Any axis deviating from rest by more than the threshold is
//! motion. There is no debounce: one offending sample is enough.

use crate::config::{MOTION_THRESHOLD_MG, REST_Z_MG};

/// Accelerometer sample in milli-g
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelSample {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl AccelSample {
    /// Device lying flat and still
    pub const REST: Self = Self {
        x: 0,
        y: 0,
        z: REST_Z_MG,
    };

    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }
}

/// Accelerometer axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Detector verdict for one sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionStatus {
    /// Within threshold on every axis
    Still,
    /// First axis (in x, y, z order) beyond the threshold
    Moved(Axis),
}

impl MotionStatus {
    pub fn is_motion(&self) -> bool {
        matches!(self, MotionStatus::Moved(_))
    }
}

/// Threshold detector
#[derive(Debug, Clone)]
pub struct MotionDetector {
    /// Samples evaluated since the last reset
    samples: u32,
}

impl Default for MotionDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl MotionDetector {
    pub fn new() -> Self {
        Self { samples: 0 }
    }

    /// Evaluate one sample
    pub fn evaluate(&mut self, sample: AccelSample) -> MotionStatus {
        self.samples = self.samples.saturating_add(1);

        // i32 so |i16::MIN| and z - rest cannot overflow
        let threshold = MOTION_THRESHOLD_MG as i32;
        let deviations = [
            (Axis::X, sample.x as i32),
            (Axis::Y, sample.y as i32),
            (Axis::Z, sample.z as i32 - REST_Z_MG as i32),
        ];

        deviations
            .into_iter()
            .find(|(_, deviation)| deviation.abs() > threshold)
            .map_or(MotionStatus::Still, |(axis, _)| MotionStatus::Moved(axis))
    }

    /// Samples evaluated since the last reset
    pub fn samples_evaluated(&self) -> u32 {
        self.samples
    }

    /// Reset the sample counter (on entering monitoring)
    pub fn reset(&mut self) {
        self.samples = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rest_is_still() {
        let mut detector = MotionDetector::new();
        assert_eq!(detector.evaluate(AccelSample::REST), MotionStatus::Still);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let mut detector = MotionDetector::new();
        assert_eq!(detector.evaluate(AccelSample::new(150, -150, 1150)), MotionStatus::Still);
        assert_eq!(detector.evaluate(AccelSample::new(0, 0, 850)), MotionStatus::Still);
        assert_eq!(
            detector.evaluate(AccelSample::new(151, 0, 1000)),
            MotionStatus::Moved(Axis::X)
        );
        assert_eq!(
            detector.evaluate(AccelSample::new(0, -151, 1000)),
            MotionStatus::Moved(Axis::Y)
        );
        assert_eq!(
            detector.evaluate(AccelSample::new(0, 0, 849)),
            MotionStatus::Moved(Axis::Z)
        );
    }

    #[test]
    fn test_first_axis_reported() {
        let mut detector = MotionDetector::new();
        assert_eq!(
            detector.evaluate(AccelSample::new(0, 400, 0)),
            MotionStatus::Moved(Axis::Y)
        );
        assert_eq!(
            detector.evaluate(AccelSample::new(-400, 400, 0)),
            MotionStatus::Moved(Axis::X)
        );
    }

    #[test]
    fn test_extremes_do_not_overflow() {
        let mut detector = MotionDetector::new();
        assert!(detector
            .evaluate(AccelSample::new(i16::MIN, i16::MIN, i16::MIN))
            .is_motion());
        assert!(detector
            .evaluate(AccelSample::new(0, 0, i16::MAX))
            .is_motion());
    }

    #[test]
    fn test_sample_counter() {
        let mut detector = MotionDetector::new();
        detector.evaluate(AccelSample::REST);
        detector.evaluate(AccelSample::new(500, 0, 1000));
        assert_eq!(detector.samples_evaluated(), 2);
        detector.reset();
        assert_eq!(detector.samples_evaluated(), 0);
    }

    proptest! {
        #[test]
        fn prop_within_threshold_is_still(
            x in -150i16..=150,
            y in -150i16..=150,
            z in 850i16..=1150,
        ) {
            let mut detector = MotionDetector::new();
            prop_assert_eq!(detector.evaluate(AccelSample::new(x, y, z)), MotionStatus::Still);
        }

        #[test]
        fn prop_x_beyond_threshold_moves(
            x in prop_oneof![i16::MIN..-150, 151i16..=i16::MAX],
            y in any::<i16>(),
            z in any::<i16>(),
        ) {
            let mut detector = MotionDetector::new();
            prop_assert_eq!(detector.evaluate(AccelSample::new(x, y, z)), MotionStatus::Moved(Axis::X));
        }

        #[test]
        fn prop_z_deviation_moves(
            z in prop_oneof![i16::MIN..850, 1151i16..=i16::MAX],
        ) {
            let mut detector = MotionDetector::new();
            prop_assert_eq!(detector.evaluate(AccelSample::new(0, 0, z)), MotionStatus::Moved(Axis::Z));
        }

        #[test]
        fn prop_verdict_matches_policy(x in any::<i16>(), y in any::<i16>(), z in any::<i16>()) {
            let mut detector = MotionDetector::new();
            let expected = (x as i32).abs() > 150
                || (y as i32).abs() > 150
                || (z as i32 - 1000).abs() > 150;
            prop_assert_eq!(detector.evaluate(AccelSample::new(x, y, z)).is_motion(), expected);
        }
    }
}
