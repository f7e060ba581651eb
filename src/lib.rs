// Library surface for headless/integration tests and the terminal front end.
// Nothing here draws; rendering lives in the binary.
pub mod choice;
pub mod config;
pub mod cues;
pub mod game;
pub mod logging;
pub mod outcome;
pub mod round_timer;
pub mod runtime;
pub mod session_clock;
pub mod util;

pub use choice::{Choice, ChoiceSource, RandomChoices, ScriptedChoices};
pub use game::{MatchConfig, MatchController, Phase, Score, Signal, Submission};
pub use outcome::{evaluate, Outcome};
