//! Sensor read-failure tracking

/// Counts consecutive failed sensor reads
///
/// A single bad read is tolerated; `limit` in a row means the sensor is
/// gone and the guard has to fail secure.
#[derive(Debug, Clone)]
pub struct ReadFailureCounter {
    consecutive: u8,
    limit: u8,
}

impl ReadFailureCounter {
    pub fn new(limit: u8) -> Self {
        Self {
            consecutive: 0,
            limit: limit.max(1),
        }
    }

    /// Record a successful read
    pub fn record_success(&mut self) {
        self.consecutive = 0;
    }

    /// Record a failed read, returns true once the limit is reached
    pub fn record_failure(&mut self) -> bool {
        self.consecutive = self.consecutive.saturating_add(1);
        self.consecutive >= self.limit
    }

    pub fn consecutive(&self) -> u8 {
        self.consecutive
    }

    pub fn reset(&mut self) {
        self.consecutive = 0;
    }
}
