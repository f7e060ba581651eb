use std::time::Duration;

use crate::choice::{Choice, ChoiceSource};
use crate::cues::SoundCue;
use crate::outcome::{evaluate, Outcome};
use crate::round_timer::{Countdown, RoundTimer, DEFAULT_ROUND_SECS};
use crate::session_clock::SessionClock;

pub const DEFAULT_REVEAL_DELAY: Duration = Duration::from_millis(1500);
/// How long after submission the two hands meet in the arena.
pub const CLASH_AT: Duration = Duration::from_millis(500);
/// How long the winner/loser highlight stays up after a result.
pub const HIGHLIGHT_FOR: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchConfig {
    pub round_secs: u32,
    pub reveal_delay: Duration,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            round_secs: DEFAULT_ROUND_SECS,
            reveal_delay: DEFAULT_REVEAL_DELAY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    pub player: u32,
    pub computer: u32,
}

impl Score {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::PlayerWin => self.player += 1,
            Outcome::ComputerWin => self.computer += 1,
            Outcome::Draw => {}
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No session started yet.
    Idle,
    /// Waiting for the player (or the round timer).
    Choosing,
    /// Both hands thrown, result held back for the reveal delay.
    Revealing,
    /// Result shown, waiting for play again.
    Resolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundReport {
    pub round: u64,
    pub player: Choice,
    pub computer: Choice,
    pub outcome: Outcome,
    /// The player's hand was picked by the round timer.
    pub forced: bool,
}

impl RoundReport {
    pub fn message(&self) -> String {
        match self.outcome {
            Outcome::Draw => "It's a draw!".to_string(),
            Outcome::PlayerWin => format!(
                "You win! {} beats {}",
                self.player.emoji(),
                self.computer.emoji()
            ),
            Outcome::ComputerWin => format!(
                "You lose! {} beats {}",
                self.computer.emoji(),
                self.player.emoji()
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArenaStage {
    Hidden,
    /// Hands are on screen, sliding in from the sides.
    Entering,
    /// Hands have met in the middle.
    Clashed,
    Highlighted(Outcome),
}

/// What the battle display should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arena {
    pub player: Option<Choice>,
    pub computer: Option<Choice>,
    pub stage: ArenaStage,
}

impl Arena {
    fn hidden() -> Self {
        Self {
            player: None,
            computer: None,
            stage: ArenaStage::Hidden,
        }
    }
}

/// Outputs for the host to react to, in the order they happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    PlayChosen { player: Choice, computer: Choice },
    RoundResolving,
    RoundResolved(RoundReport),
    ArenaCleared,
    TimerExpired,
    Cue(SoundCue),
}

#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Accepted { round: u64 },
    /// Not in the choosing phase; nothing changed.
    Ignored,
}

#[derive(Debug, Clone, Copy)]
struct Reveal {
    round: u64,
    player: Choice,
    computer: Choice,
    outcome: Outcome,
    forced: bool,
    elapsed: Duration,
    clashed: bool,
}

/// Owns one session: score, round timer, session clock and the round in
/// flight. Time only moves when the host calls [`MatchController::advance`].
#[derive(Debug)]
pub struct MatchController<S: ChoiceSource> {
    source: S,
    config: MatchConfig,
    score: Score,
    round_timer: RoundTimer,
    session_clock: SessionClock,
    phase: Phase,
    round: u64,
    reveal: Option<Reveal>,
    highlight_left: Option<Duration>,
    arena: Arena,
    last_report: Option<RoundReport>,
    play_again_visible: bool,
    signals: Vec<Signal>,
}

impl<S: ChoiceSource> MatchController<S> {
    pub fn new(source: S, config: MatchConfig) -> Self {
        Self {
            source,
            config,
            score: Score::default(),
            round_timer: RoundTimer::new(config.round_secs),
            session_clock: SessionClock::new(),
            phase: Phase::Idle,
            round: 0,
            reveal: None,
            highlight_left: None,
            arena: Arena::hidden(),
            last_report: None,
            play_again_visible: false,
            signals: Vec::new(),
        }
    }

    pub fn new_session(&mut self) {
        self.score = Score::default();
        self.last_report = None;
        self.play_again_visible = false;
        if self.reveal.take().is_some() {
            log::debug!("dropped pending reveal for round {}", self.round);
        }
        self.clear_arena();
        self.session_clock.start();
        self.open_round();
        log::info!("new session started");
    }

    /// Throws the player's hand for the current round. `None` means the
    /// round timer ran out and a random hand is drawn instead.
    pub fn submit_move(&mut self, selection: Option<Choice>) -> Submission {
        if self.phase != Phase::Choosing {
            log::debug!("ignored move {selection:?} during {:?}", self.phase);
            return Submission::Ignored;
        }

        let forced = selection.is_none();
        let player = match selection {
            Some(choice) => {
                self.signals.push(Signal::Cue(SoundCue::Click));
                choice
            }
            None => self.source.next_choice(),
        };
        self.round_timer.cancel();
        let computer = self.source.next_choice();
        let outcome = evaluate(player, computer);

        self.reveal = Some(Reveal {
            round: self.round,
            player,
            computer,
            outcome,
            forced,
            elapsed: Duration::ZERO,
            clashed: false,
        });
        self.highlight_left = None;
        self.arena = Arena {
            player: Some(player),
            computer: Some(computer),
            stage: ArenaStage::Entering,
        };
        self.phase = Phase::Revealing;
        self.signals.push(Signal::PlayChosen { player, computer });
        log::debug!(
            "round {}: player {player}{} vs computer {computer}",
            self.round,
            if forced { " (forced)" } else { "" }
        );

        Submission::Accepted { round: self.round }
    }

    /// Moves session time forward by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.session_clock.advance(dt);
        // highlight first, so one started by this call's reveal keeps its full span
        self.advance_highlight(dt);
        self.advance_reveal(dt);

        if self.round_timer.advance(dt) == Countdown::Expired {
            log::debug!("round {} timed out", self.round);
            self.signals.push(Signal::TimerExpired);
            let _ = self.submit_move(None);
        }
    }

    /// Starts the next round after a result. Returns false if there is no
    /// result to move on from.
    pub fn play_again(&mut self) -> bool {
        if self.phase != Phase::Resolved {
            log::debug!("ignored play again during {:?}", self.phase);
            return false;
        }
        self.last_report = None;
        self.play_again_visible = false;
        self.clear_arena();
        self.open_round();
        true
    }

    pub fn restart(&mut self) {
        self.round_timer.cancel();
        self.session_clock.reset();
        log::info!(
            "restart after {} rounds at {}-{}",
            self.round,
            self.score.player,
            self.score.computer
        );
        self.new_session();
    }

    /// Takes every signal emitted since the last call.
    pub fn drain_signals(&mut self) -> Vec<Signal> {
        std::mem::take(&mut self.signals)
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn result_text(&self) -> String {
        self.last_report
            .map(|report| report.message())
            .unwrap_or_default()
    }

    pub fn last_report(&self) -> Option<RoundReport> {
        self.last_report
    }

    pub fn play_again_visible(&self) -> bool {
        self.play_again_visible
    }

    pub fn round_timer(&self) -> &RoundTimer {
        &self.round_timer
    }

    pub fn session_clock(&self) -> &SessionClock {
        &self.session_clock
    }

    pub fn arena(&self) -> Arena {
        self.arena
    }

    pub fn config(&self) -> MatchConfig {
        self.config
    }

    fn open_round(&mut self) {
        self.round += 1;
        self.round_timer.arm();
        self.phase = Phase::Choosing;
    }

    fn clear_arena(&mut self) {
        self.highlight_left = None;
        if self.arena.stage != ArenaStage::Hidden {
            self.signals.push(Signal::ArenaCleared);
        }
        self.arena = Arena::hidden();
    }

    fn advance_reveal(&mut self, dt: Duration) {
        let Some(reveal) = self.reveal.as_mut() else {
            return;
        };
        reveal.elapsed += dt;

        if !reveal.clashed && reveal.elapsed >= CLASH_AT.min(self.config.reveal_delay) {
            reveal.clashed = true;
            self.arena.stage = ArenaStage::Clashed;
            self.signals.push(Signal::RoundResolving);
        }

        if reveal.elapsed >= self.config.reveal_delay {
            if let Some(reveal) = self.reveal.take() {
                self.resolve(reveal);
            }
        }
    }

    fn advance_highlight(&mut self, dt: Duration) {
        let Some(left) = self.highlight_left else {
            return;
        };
        match left.checked_sub(dt) {
            Some(rest) if !rest.is_zero() => self.highlight_left = Some(rest),
            _ => {
                self.highlight_left = None;
                self.arena = Arena::hidden();
                self.signals.push(Signal::ArenaCleared);
            }
        }
    }

    fn resolve(&mut self, reveal: Reveal) {
        debug_assert_eq!(reveal.round, self.round, "reveal outlived its round");
        debug_assert_eq!(self.phase, Phase::Revealing);
        if reveal.round != self.round || self.phase != Phase::Revealing {
            return;
        }

        let report = RoundReport {
            round: reveal.round,
            player: reveal.player,
            computer: reveal.computer,
            outcome: reveal.outcome,
            forced: reveal.forced,
        };
        self.score.record(report.outcome);
        self.round_timer.cancel();
        self.last_report = Some(report);
        self.play_again_visible = true;
        self.arena.stage = ArenaStage::Highlighted(report.outcome);
        self.highlight_left = Some(HIGHLIGHT_FOR);
        self.phase = Phase::Resolved;

        self.signals.push(Signal::Cue(report.outcome.cue()));
        self.signals.push(Signal::RoundResolved(report));
        log::info!(
            "round {}: {} ({}-{})",
            report.round,
            report.message(),
            self.score.player,
            self.score.computer
        );
    }
}
