use serde::{Deserialize, Serialize};

use crate::choice::Choice;
use crate::cues::SoundCue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    PlayerWin,
    ComputerWin,
    Draw,
}

impl Outcome {
    pub fn cue(self) -> SoundCue {
        match self {
            Outcome::PlayerWin => SoundCue::Win,
            Outcome::ComputerWin => SoundCue::Lose,
            Outcome::Draw => SoundCue::Draw,
        }
    }
}

/// Scores one throw from the player's side.
pub fn evaluate(player: Choice, computer: Choice) -> Outcome {
    if player == computer {
        Outcome::Draw
    } else if player.beats() == computer {
        Outcome::PlayerWin
    } else {
        Outcome::ComputerWin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Choice::*;

    #[test]
    fn evaluate_matches_the_beats_table() {
        let table = [
            (Rock, Rock, Outcome::Draw),
            (Rock, Paper, Outcome::ComputerWin),
            (Rock, Scissors, Outcome::PlayerWin),
            (Paper, Rock, Outcome::PlayerWin),
            (Paper, Paper, Outcome::Draw),
            (Paper, Scissors, Outcome::ComputerWin),
            (Scissors, Rock, Outcome::ComputerWin),
            (Scissors, Paper, Outcome::PlayerWin),
            (Scissors, Scissors, Outcome::Draw),
        ];

        for (player, computer, expected) in table {
            assert_eq!(
                evaluate(player, computer),
                expected,
                "{player} vs {computer}"
            );
        }
    }

    #[test]
    fn swapping_sides_flips_the_winner() {
        for player in Choice::ALL {
            for computer in Choice::ALL {
                let flipped = match evaluate(player, computer) {
                    Outcome::PlayerWin => Outcome::ComputerWin,
                    Outcome::ComputerWin => Outcome::PlayerWin,
                    Outcome::Draw => Outcome::Draw,
                };
                assert_eq!(evaluate(computer, player), flipped);
            }
        }
    }

    #[test]
    fn outcome_cues() {
        assert_eq!(Outcome::PlayerWin.cue(), SoundCue::Win);
        assert_eq!(Outcome::ComputerWin.cue(), SoundCue::Lose);
        assert_eq!(Outcome::Draw.cue(), SoundCue::Draw);
    }
}
