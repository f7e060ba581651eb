use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Named sound events. The game only says which one fired; playing it is
/// up to whoever hosts the game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum SoundCue {
    Click,
    Win,
    Lose,
    Draw,
}

#[derive(Debug, thiserror::Error)]
pub enum CueError {
    #[error("failed to play {cue} cue: {source}")]
    Output {
        cue: SoundCue,
        #[source]
        source: io::Error,
    },
}

pub trait CuePlayer {
    fn play(&mut self, cue: SoundCue) -> Result<(), CueError>;
}

/// Plays nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentCues;

impl CuePlayer for SilentCues {
    fn play(&mut self, _cue: SoundCue) -> Result<(), CueError> {
        Ok(())
    }
}

/// Rings the terminal bell for round results. Clicks stay quiet since
/// they would ring on every key press.
pub struct BellCues<W: Write> {
    out: W,
}

impl<W: Write> BellCues<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl BellCues<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> CuePlayer for BellCues<W> {
    fn play(&mut self, cue: SoundCue) -> Result<(), CueError> {
        if cue == SoundCue::Click {
            return Ok(());
        }
        self.out
            .write_all(b"\x07")
            .and_then(|_| self.out.flush())
            .map_err(|source| CueError::Output { cue, source })
    }
}

/// Plays `cue`. Failures are logged and otherwise ignored.
pub fn play_or_log(player: &mut dyn CuePlayer, cue: SoundCue) {
    if let Err(e) = player.play(cue) {
        log::warn!("{e}");
    }
}
