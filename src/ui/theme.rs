use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Styles for every part of the screen under one theme.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub base: Style,
    pub title: Style,
    pub dim: Style,
    pub hand: Style,
    pub winner: Style,
    pub loser: Style,
    pub draw: Style,
    pub accent: Style,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Label for the toggle, naming the theme it switches to.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Light => "dark mode",
            Theme::Dark => "light mode",
        }
    }

    pub fn palette(self) -> Palette {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        match self {
            Theme::Light => Palette {
                base: Style::default().fg(Color::Black).bg(Color::White),
                title: bold.fg(Color::Blue),
                dim: Style::default().fg(Color::DarkGray),
                hand: bold,
                winner: bold.fg(Color::Green).add_modifier(Modifier::REVERSED),
                loser: Style::default().add_modifier(Modifier::DIM | Modifier::CROSSED_OUT),
                draw: bold.fg(Color::Rgb(200, 140, 0)),
                accent: bold.fg(Color::Magenta),
            },
            Theme::Dark => Palette {
                base: Style::default().fg(Color::Gray).bg(Color::Black),
                title: bold.fg(Color::Cyan),
                dim: Style::default().fg(Color::DarkGray),
                hand: bold.fg(Color::White),
                winner: bold.fg(Color::LightGreen).add_modifier(Modifier::REVERSED),
                loser: Style::default().add_modifier(Modifier::DIM | Modifier::CROSSED_OUT),
                draw: bold.fg(Color::Yellow),
                accent: bold.fg(Color::LightMagenta),
            },
        }
    }

    /// Timer bar colour, going from calm to urgent as the round runs out.
    pub fn timer_color(self, fill: f64) -> Color {
        match (self, fill) {
            (_, f) if f > 0.5 => Color::Green,
            (_, f) if f > 0.2 => Color::Yellow,
            (Theme::Light, _) => Color::Red,
            (Theme::Dark, _) => Color::LightRed,
        }
    }
}
