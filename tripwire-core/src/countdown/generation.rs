//! Timer generations

/// State machine epoch stamped on every scheduled timer
///
/// The machine bumps its generation whenever pending timers become
/// meaningless (re-arm, trigger, disarm). A timer that fires with an older
/// generation is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Generation(u32);

impl Generation {
    /// First generation
    pub const fn new() -> Self {
        Self(0)
    }

    /// The following generation
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Raw value
    pub fn value(self) -> u32 {
        self.0
    }
}
