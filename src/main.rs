mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use log::LevelFilter;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use roshambo::{
    config::{Config, ConfigStore, FileConfigStore},
    cues::{play_or_log, BellCues, CuePlayer, SilentCues},
    game::{MatchController, Phase, Signal},
    logging,
    runtime::{CrosstermEventSource, FixedTicker, GameEvent, Runner},
    Choice, RandomChoices,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};

use crate::ui::Theme;

/// rock paper scissors against the computer, with a round countdown
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Rock paper scissors in the terminal. Pick a hand before the round timer runs out or one is picked for you; a session clock tracks how long you have been playing."
)]
pub struct Cli {
    /// seconds per round before a random hand is thrown for you
    #[clap(short = 'r', long, value_parser = clap::value_parser!(u32).range(1..=99))]
    round_secs: Option<u32>,

    /// milliseconds between throwing and seeing the result
    #[clap(long)]
    reveal_ms: Option<u64>,

    /// milliseconds between screen updates
    #[clap(long, value_parser = clap::value_parser!(u64).range(10..=1000))]
    tick_ms: Option<u64>,

    /// seed the computer's hands for a reproducible session
    #[clap(long)]
    seed: Option<u64>,

    /// never ring the terminal bell
    #[clap(short = 'm', long)]
    mute: bool,

    /// start in dark mode
    #[clap(short = 'd', long)]
    dark: bool,

    /// settings file to read instead of the default location
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// write debug logs to this file
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Command line flags win over the settings file.
    fn apply(&self, mut cfg: Config) -> Config {
        if let Some(secs) = self.round_secs {
            cfg.round_secs = secs;
        }
        if let Some(ms) = self.reveal_ms {
            cfg.reveal_delay_ms = ms;
        }
        if let Some(ms) = self.tick_ms {
            cfg.tick_rate_ms = ms;
        }
        if self.seed.is_some() {
            cfg.seed = self.seed;
        }
        if self.mute {
            cfg.sound = false;
        }
        if self.dark {
            cfg.dark_theme = true;
        }
        cfg
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppState {
    Playing,
    ConfirmRestart,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Flow {
    Continue,
    Quit,
}

pub struct App {
    pub game: MatchController<RandomChoices>,
    pub state: AppState,
    pub theme: Theme,
    cues: Box<dyn CuePlayer>,
}

impl App {
    pub fn new(cfg: &Config) -> Self {
        let source = cfg
            .seed
            .map(RandomChoices::seeded)
            .unwrap_or_default();
        let cues: Box<dyn CuePlayer> = if cfg.sound {
            Box::new(BellCues::stdout())
        } else {
            Box::new(SilentCues)
        };

        let mut game = MatchController::new(source, cfg.match_config());
        game.new_session();

        Self {
            game,
            state: AppState::Playing,
            theme: if cfg.dark_theme {
                Theme::Dark
            } else {
                Theme::Light
            },
            cues,
        }
    }

    pub fn on_tick(&mut self, dt: Duration) {
        self.game.advance(dt);
        self.dispatch_signals();
    }

    fn on_key(&mut self, key: KeyEvent) -> Flow {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Flow::Quit;
        }

        match self.state {
            AppState::Playing => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => return Flow::Quit,
                KeyCode::Char(' ') | KeyCode::Enter => {
                    self.game.play_again();
                }
                KeyCode::Char('n') | KeyCode::Backspace => {
                    self.state = AppState::ConfirmRestart;
                }
                KeyCode::Char('t') => {
                    self.theme = self.theme.toggled();
                }
                KeyCode::Char(c) => {
                    // hands only count while the round is open
                    if let Some(choice) = choice_for_key(c) {
                        if self.game.phase() == Phase::Choosing {
                            let _ = self.game.submit_move(Some(choice));
                        }
                    }
                }
                _ => {}
            },
            AppState::ConfirmRestart => match key.code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    self.game.restart();
                    self.state = AppState::Playing;
                }
                KeyCode::Char('n') | KeyCode::Esc => {
                    self.state = AppState::Playing;
                }
                _ => {}
            },
        }

        self.dispatch_signals();
        Flow::Continue
    }

    fn dispatch_signals(&mut self) {
        for signal in self.game.drain_signals() {
            match signal {
                Signal::Cue(cue) => play_or_log(self.cues.as_mut(), cue),
                other => log::trace!("{other:?}"),
            }
        }
    }
}

fn choice_for_key(c: char) -> Option<Choice> {
    match c {
        '1' => Some(Choice::Rock),
        '2' => Some(Choice::Paper),
        '3' => Some(Choice::Scissors),
        c => c.to_string().parse().ok(),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        logging::init_file_logger(path, LevelFilter::Debug)?;
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = cli
        .config
        .as_ref()
        .map(FileConfigStore::with_path)
        .unwrap_or_default();
    let config = cli.apply(store.load());
    log::debug!("settings: {config:?}");

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&config);
    let res = start_tui(&mut terminal, &mut app, config.tick_rate());

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    tick_rate: Duration,
) -> Result<(), Box<dyn Error>> {
    let mut runner = Runner::new(CrosstermEventSource::new(), FixedTicker::new(tick_rate));

    loop {
        terminal.draw(|f| ui::draw(app, f))?;

        match runner.step() {
            GameEvent::Tick(dt) => app.on_tick(dt),
            GameEvent::Resize => {}
            GameEvent::Key(key) => {
                if app.on_key(key) == Flow::Quit {
                    break;
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use roshambo::game::Score;

    fn quiet_config() -> Config {
        Config {
            sound: false,
            seed: Some(11),
            ..Config::default()
        }
    }

    fn press(app: &mut App, code: KeyCode) -> Flow {
        app.on_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["roshambo"]);

        assert_eq!(cli.round_secs, None);
        assert_eq!(cli.reveal_ms, None);
        assert_eq!(cli.seed, None);
        assert!(!cli.mute);
        assert!(!cli.dark);
        assert_eq!(cli.config, None);
    }

    #[test]
    fn test_cli_round_secs() {
        let cli = Cli::parse_from(["roshambo", "-r", "5"]);
        assert_eq!(cli.round_secs, Some(5));

        let cli = Cli::parse_from(["roshambo", "--round-secs", "30"]);
        assert_eq!(cli.round_secs, Some(30));
    }

    #[test]
    fn test_cli_rejects_out_of_range_round() {
        assert!(Cli::try_parse_from(["roshambo", "-r", "0"]).is_err());
        assert!(Cli::try_parse_from(["roshambo", "-r", "100"]).is_err());
        assert!(Cli::try_parse_from(["roshambo", "--tick-ms", "5"]).is_err());
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from([
            "roshambo",
            "--mute",
            "--dark",
            "--seed",
            "7",
            "--reveal-ms",
            "400",
            "--config",
            "/tmp/rps.json",
            "--log-file",
            "/tmp/rps.log",
        ]);
        assert!(cli.mute);
        assert!(cli.dark);
        assert_eq!(cli.seed, Some(7));
        assert_eq!(cli.reveal_ms, Some(400));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/rps.json")));
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/rps.log")));
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from(["roshambo", "-r", "4", "-m", "--tick-ms", "50"]);
        let file = Config {
            round_secs: 20,
            dark_theme: true,
            seed: Some(1),
            ..Config::default()
        };

        let cfg = cli.apply(file);
        assert_eq!(cfg.round_secs, 4);
        assert_eq!(cfg.tick_rate_ms, 50);
        assert!(!cfg.sound);
        // untouched flags leave file values alone
        assert!(cfg.dark_theme);
        assert_eq!(cfg.seed, Some(1));
    }

    #[test]
    fn test_choice_for_key() {
        assert_eq!(choice_for_key('r'), Some(Choice::Rock));
        assert_eq!(choice_for_key('2'), Some(Choice::Paper));
        assert_eq!(choice_for_key('s'), Some(Choice::Scissors));
        assert_eq!(choice_for_key('x'), None);
        assert_eq!(choice_for_key('t'), None);
    }

    #[test]
    fn test_app_new_starts_a_session() {
        let app = App::new(&quiet_config());
        assert_eq!(app.state, AppState::Playing);
        assert_eq!(app.theme, Theme::Light);
        assert_eq!(app.game.phase(), Phase::Choosing);
        assert!(app.game.session_clock().is_running());
    }

    #[test]
    fn test_app_dark_theme_from_config() {
        let cfg = Config {
            dark_theme: true,
            ..quiet_config()
        };
        assert_eq!(App::new(&cfg).theme, Theme::Dark);
    }

    #[test]
    fn test_choice_key_plays_a_round() {
        let mut app = App::new(&quiet_config());
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.game.phase(), Phase::Revealing);
        assert_eq!(app.game.arena().player, Some(Choice::Paper));

        // another hand during the reveal does nothing
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.game.arena().player, Some(Choice::Paper));

        app.on_tick(Duration::from_millis(1500));
        assert_eq!(app.game.phase(), Phase::Resolved);
        assert!(app.game.play_again_visible());

        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.game.phase(), Phase::Choosing);
    }

    #[test]
    fn test_restart_needs_confirmation() {
        let mut app = App::new(&quiet_config());
        app.on_tick(Duration::from_secs(3));
        press(&mut app, KeyCode::Char('1'));
        app.on_tick(Duration::from_secs(2));

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.state, AppState::ConfirmRestart);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state, AppState::Playing);
        assert!(app.game.session_clock().elapsed_secs() > 0);

        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.state, AppState::Playing);
        assert_eq!(app.game.score(), Score::default());
        assert_eq!(app.game.session_clock().elapsed_secs(), 0);
        assert_eq!(app.game.phase(), Phase::Choosing);
    }

    #[test]
    fn test_confirm_modal_swallows_hands() {
        let mut app = App::new(&quiet_config());
        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.game.phase(), Phase::Choosing);
    }

    #[test]
    fn test_theme_toggle() {
        let mut app = App::new(&quiet_config());
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.theme, Theme::Dark);
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.theme, Theme::Light);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new(&quiet_config());
        assert_eq!(press(&mut app, KeyCode::Char('q')), Flow::Quit);
        assert_eq!(press(&mut app, KeyCode::Esc), Flow::Quit);
        assert_eq!(
            app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Flow::Quit
        );
    }
}
