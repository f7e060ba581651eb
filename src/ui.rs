mod theme;

pub use theme::{Palette, Theme};

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Widget},
    Frame,
};
use roshambo::{
    game::{ArenaStage, Phase},
    Outcome,
};
use unicode_width::UnicodeWidthStr;

use crate::{App, AppState};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;
/// Gap between the hands once they meet.
const CLASH_GAP: usize = 4;
/// Extra distance each hand starts out while sliding in.
const ENTRY_OFFSET: usize = 6;

const RESTART_PROMPT: &str = "Start over? Score and time go back to zero.";

pub fn draw(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());

    if app.state == AppState::ConfirmRestart {
        render_confirm_restart(app, f);
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let palette = self.theme.palette();
        let game = &self.game;

        Block::default().style(palette.base).render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // title
                Constraint::Length(1), // score
                Constraint::Length(1), // padding
                Constraint::Length(1), // round timer
                Constraint::Min(3),    // arena
                Constraint::Length(1), // result
                Constraint::Length(1), // play again hint
                Constraint::Length(1), // padding
                Constraint::Length(1), // session time
                Constraint::Length(1), // key legend
            ])
            .split(area);

        Paragraph::new(Span::styled(
            format!("rock · paper · scissors  ─  round {}", game.round()),
            palette.title,
        ))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

        let score = game.score();
        Paragraph::new(Line::from(vec![
            Span::styled("you ", palette.dim),
            Span::styled(score.player.to_string(), palette.accent),
            Span::raw("  :  "),
            Span::styled(score.computer.to_string(), palette.accent),
            Span::styled(" computer", palette.dim),
        ]))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

        let timer = game.round_timer();
        let fill = timer.fill_ratio().clamp(0.0, 1.0);
        Gauge::default()
            .ratio(fill)
            .label(format!("{}s", timer.remaining()))
            .gauge_style(Style::default().fg(self.theme.timer_color(fill)))
            .render(chunks[3], buf);

        render_arena(self, &palette, chunks[4], buf);

        let result_style = match game.last_report().map(|r| r.outcome) {
            Some(Outcome::PlayerWin) => palette.winner,
            Some(Outcome::ComputerWin) => palette.accent,
            Some(Outcome::Draw) => palette.draw,
            None => palette.base,
        };
        Paragraph::new(Span::styled(game.result_text(), result_style))
            .alignment(Alignment::Center)
            .render(chunks[5], buf);

        if game.play_again_visible() {
            Paragraph::new(Span::styled("press space to play again", palette.dim))
                .alignment(Alignment::Center)
                .render(chunks[6], buf);
        }

        Paragraph::new(Span::styled(
            format!("time {}", game.session_clock().formatted()),
            palette.dim,
        ))
        .alignment(Alignment::Center)
        .render(chunks[8], buf);

        Paragraph::new(Span::styled(
            format!(
                "(r)ock (p)aper (s)cissors | (n)ew game | (t) {} | (q)uit",
                self.theme.toggle_label()
            ),
            palette.dim,
        ))
        .alignment(Alignment::Center)
        .render(chunks[9], buf);
    }
}

fn render_arena(app: &App, palette: &Palette, area: Rect, buf: &mut Buffer) {
    let arena = app.game.arena();

    let line = match (arena.player, arena.computer) {
        (Some(player), Some(computer)) => {
            let (player_style, computer_style) = match arena.stage {
                ArenaStage::Highlighted(Outcome::PlayerWin) => (palette.winner, palette.loser),
                ArenaStage::Highlighted(Outcome::ComputerWin) => (palette.loser, palette.winner),
                ArenaStage::Highlighted(Outcome::Draw) => (palette.draw, palette.draw),
                _ => (palette.hand, palette.hand),
            };
            let gap = match arena.stage {
                ArenaStage::Entering => CLASH_GAP + 2 * ENTRY_OFFSET,
                _ => CLASH_GAP,
            };
            Line::from(vec![
                Span::styled(player.emoji(), player_style),
                Span::raw(" ".repeat(gap)),
                Span::styled(computer.emoji(), computer_style),
            ])
        }
        _ if app.game.phase() == Phase::Choosing => {
            Line::from(Span::styled("make your move", palette.dim))
        }
        _ => Line::default(),
    };

    // centre the hands vertically inside the arena
    let top = area.height.saturating_sub(1) / 2;
    let row = Rect {
        y: area.y + top,
        height: area.height.min(1),
        ..area
    };
    Paragraph::new(line)
        .alignment(Alignment::Center)
        .render(row, buf);
}

fn render_confirm_restart(app: &App, f: &mut Frame) {
    let palette = app.theme.palette();
    let width = RESTART_PROMPT.width() as u16 + 4;
    let area = centered(f.area(), width, 5);

    let body = Paragraph::new(vec![
        Line::from(Span::styled(RESTART_PROMPT, palette.base)),
        Line::from(Span::styled("(y)es / (n)o", palette.dim)),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Restart")
            .style(palette.base),
    );

    f.render_widget(Clear, area);
    f.render_widget(body, area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
