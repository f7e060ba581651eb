use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One of the three hands a side can throw.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Choice {
    Rock,
    Paper,
    Scissors,
}

impl Choice {
    pub const ALL: [Choice; 3] = [Choice::Rock, Choice::Paper, Choice::Scissors];

    pub fn emoji(self) -> &'static str {
        match self {
            Choice::Rock => "🪨",
            Choice::Paper => "📄",
            Choice::Scissors => "✂️",
        }
    }

    /// The choice this one defeats.
    pub fn beats(self) -> Choice {
        match self {
            Choice::Rock => Choice::Scissors,
            Choice::Scissors => Choice::Paper,
            Choice::Paper => Choice::Rock,
        }
    }

    pub fn hotkey(self) -> char {
        match self {
            Choice::Rock => 'r',
            Choice::Paper => 'p',
            Choice::Scissors => 's',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{0}` is not rock, paper or scissors")]
pub struct ParseChoiceError(pub String);

impl FromStr for Choice {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rock" | "r" => Ok(Choice::Rock),
            "paper" | "p" => Ok(Choice::Paper),
            "scissors" | "s" => Ok(Choice::Scissors),
            _ => Err(ParseChoiceError(s.to_string())),
        }
    }
}

/// Anything that can hand out the next choice for a side.
pub trait ChoiceSource {
    fn next_choice(&mut self) -> Choice;
}

/// Uniform draws over [`Choice::ALL`].
#[derive(Debug, Clone)]
pub struct RandomChoices<R: Rng = StdRng> {
    rng: R,
}

impl RandomChoices<StdRng> {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence of draws for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RandomChoices<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl Default for RandomChoices<StdRng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl<R: Rng> ChoiceSource for RandomChoices<R> {
    fn next_choice(&mut self) -> Choice {
        Choice::ALL[self.rng.gen_range(0..Choice::ALL.len())]
    }
}

/// Replays a fixed script of choices, wrapping around at the end.
/// An empty script always yields [`Choice::Rock`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedChoices {
    script: Vec<Choice>,
    cursor: usize,
}

impl ScriptedChoices {
    pub fn new(script: impl IntoIterator<Item = Choice>) -> Self {
        Self {
            script: script.into_iter().collect(),
            cursor: 0,
        }
    }

    /// How many choices have been handed out so far.
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl ChoiceSource for ScriptedChoices {
    fn next_choice(&mut self) -> Choice {
        if self.script.is_empty() {
            return Choice::Rock;
        }
        let choice = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        choice
    }
}
