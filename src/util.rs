use std::time::Duration;

pub const ONE_SECOND: Duration = Duration::from_secs(1);

/// Folds uneven tick durations into whole periods, keeping the remainder
/// for the next call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pulse {
    period: Duration,
    carry: Duration,
}

impl Pulse {
    pub fn new(period: Duration) -> Self {
        debug_assert!(!period.is_zero(), "pulse period must be non-zero");
        Self {
            period,
            carry: Duration::ZERO,
        }
    }

    /// Adds `dt` and returns how many full periods have now elapsed.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        self.carry += dt;
        let mut whole = 0;
        while self.carry >= self.period {
            self.carry -= self.period;
            whole += 1;
        }
        whole
    }

    pub fn reset(&mut self) {
        self.carry = Duration::ZERO;
    }

    pub fn carry(&self) -> Duration {
        self.carry
    }
}

impl Default for Pulse {
    fn default() -> Self {
        Self::new(ONE_SECOND)
    }
}

/// `MM:SS`, zero padded. Minutes keep counting past 59.
pub fn format_elapsed(total_secs: u64) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}
