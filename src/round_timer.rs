use std::time::Duration;

use crate::util::Pulse;

pub const DEFAULT_ROUND_SECS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
    Expired,
}

/// What a tick did to the countdown.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    /// Timer was not running; nothing changed.
    Stopped,
    Counting(u32),
    /// Reached zero on this tick. Reported once per arm.
    Expired,
}

/// Per-round countdown that forces a move when it runs out.
#[derive(Debug, Clone)]
pub struct RoundTimer {
    round_secs: u32,
    remaining: u32,
    state: TimerState,
    pulse: Pulse,
}

impl RoundTimer {
    pub fn new(round_secs: u32) -> Self {
        debug_assert!(round_secs > 0, "round timer needs at least one second");
        Self {
            round_secs,
            remaining: round_secs,
            state: TimerState::Idle,
            pulse: Pulse::default(),
        }
    }

    /// Starts a fresh countdown. Re-arming a running timer restarts it in
    /// place, so there is never more than one count in progress.
    pub fn arm(&mut self) {
        if self.state == TimerState::Running {
            log::debug!("round timer re-armed with {}s left", self.remaining);
        }
        self.remaining = self.round_secs;
        self.state = TimerState::Running;
        self.pulse.reset();
    }

    pub fn cancel(&mut self) {
        if self.state == TimerState::Running {
            self.state = TimerState::Idle;
            self.pulse.reset();
        }
    }

    /// One second of countdown.
    pub fn tick(&mut self) -> Countdown {
        if self.state != TimerState::Running {
            return Countdown::Stopped;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.state = TimerState::Expired;
            self.pulse.reset();
            Countdown::Expired
        } else {
            Countdown::Counting(self.remaining)
        }
    }

    /// Feeds elapsed wall time through the timer, ticking once per whole
    /// second. Stops at expiry even if `dt` covers more seconds.
    pub fn advance(&mut self, dt: Duration) -> Countdown {
        if self.state != TimerState::Running {
            return Countdown::Stopped;
        }
        let mut last = Countdown::Counting(self.remaining);
        for _ in 0..self.pulse.advance(dt) {
            last = self.tick();
            if last == Countdown::Expired {
                break;
            }
        }
        last
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn round_secs(&self) -> u32 {
        self.round_secs
    }

    /// Remaining time as a fraction of the full round, for the timer bar.
    pub fn fill_ratio(&self) -> f64 {
        f64::from(self.remaining) / f64::from(self.round_secs)
    }
}

impl Default for RoundTimer {
    fn default() -> Self {
        Self::new(DEFAULT_ROUND_SECS)
    }
}
