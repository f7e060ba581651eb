use std::time::Duration;

use crate::util::{format_elapsed, Pulse};

/// Total play time for the session, in whole seconds.
#[derive(Debug, Clone, Default)]
pub struct SessionClock {
    elapsed: u64,
    running: bool,
    pulse: Pulse,
}

impl SessionClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// No-op if already running.
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.pulse.reset();
        }
    }

    /// Stops and zeroes the clock. Does not start it again.
    pub fn reset(&mut self) {
        self.running = false;
        self.elapsed = 0;
        self.pulse.reset();
    }

    pub fn tick(&mut self) {
        if self.running {
            self.elapsed += 1;
        }
    }

    pub fn advance(&mut self, dt: Duration) {
        if self.running {
            self.elapsed += u64::from(self.pulse.advance(dt));
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed
    }

    pub fn formatted(&self) -> String {
        format_elapsed(self.elapsed)
    }
}
