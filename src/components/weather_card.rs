//! The main weather card.
//!
//! Renders the selected city, today's date, and the last weather snapshot
//! in the active language. A fetch failure adds an error line below the
//! (possibly stale) snapshot instead of replacing it.

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{Component, HelpBar, HelpBarProps};
use crate::action::Action;
use crate::i18n;
use crate::state::AppState;

pub const SPINNERS: [&str; 4] = ["◐", "◓", "◑", "◒"];
const ERROR_ICON: &str = "⚠";

pub struct WeatherCardProps<'a> {
    pub state: &'a AppState,
}

#[derive(Default)]
pub struct WeatherCard;

impl Component for WeatherCard {
    type Props<'a> = WeatherCardProps<'a>;

    fn handle_key(&mut self, key: &KeyEvent, _props: WeatherCardProps<'_>) -> Vec<Action> {
        match key.code {
            KeyCode::Char('c') | KeyCode::Enter => vec![Action::CityPickerOpen],
            KeyCode::Char('l') => vec![Action::LanguageToggle],
            KeyCode::Char('r') | KeyCode::F(5) => vec![Action::WeatherFetch],
            KeyCode::Char('q') | KeyCode::Esc => vec![Action::Quit],
            _ => vec![],
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: WeatherCardProps<'_>) {
        let state = props.state;
        let lang = state.language;

        let spinner = if state.is_loading || state.auto_locating {
            format!(
                " {} ",
                SPINNERS[(state.tick_count as usize / 2) % SPINNERS.len()]
            )
        } else {
            String::new()
        };

        let outer = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
            .title(format!(" ☁ {}{}", i18n::tr(lang, "app-title"), spinner))
            .title_style(Style::default().fg(Color::Cyan).bold())
            .title_alignment(Alignment::Center);
        frame.render_widget(outer.clone(), area);
        let inner = outer.inner(area);

        let chunks = Layout::vertical([
            Constraint::Min(1),    // card content, vertically centered
            Constraint::Length(1), // help bar
        ])
        .split(inner);

        let lines = card_lines(state);
        let [content] = Layout::vertical([Constraint::Length(lines.len() as u16)])
            .flex(Flex::Center)
            .areas(chunks[0]);
        frame.render_widget(Paragraph::new(lines), content);

        let mut help = HelpBar;
        help.render(frame, chunks[1], HelpBarProps { language: lang });
    }
}

fn card_lines(state: &AppState) -> Vec<Line<'static>> {
    let lang = state.language;
    let mut lines = Vec::new();

    if state.auto_locating {
        lines.push(
            Line::from(Span::styled(
                format!("{}…", i18n::tr(lang, "using-location")),
                Style::default().fg(Color::DarkGray),
            ))
            .centered(),
        );
        lines.push(Line::from("").centered());
    }

    if let Some(city_id) = state.selected_city {
        lines.push(
            Line::from(Span::styled(
                i18n::tr(lang, city_id),
                Style::default().fg(Color::White).bold(),
            ))
            .centered(),
        );
        lines.push(
            Line::from(Span::styled(
                i18n::localized_date(lang, Local::now().date_naive()),
                Style::default().fg(Color::DarkGray),
            ))
            .centered(),
        );
        lines.push(Line::from("").centered());
    }

    if let Some(snapshot) = &state.snapshot {
        lines.push(
            Line::from(Span::styled(
                format!("{}°C {}", snapshot.temperature_c, icon_glyph(&snapshot.icon)),
                Style::default()
                    .fg(temp_to_color(snapshot.temperature_c))
                    .bold(),
            ))
            .centered(),
        );
        lines.push(
            Line::from(Span::styled(
                i18n::tr(lang, &snapshot.description),
                Style::default().fg(Color::Gray),
            ))
            .centered(),
        );
        lines.push(
            Line::from(Span::styled(
                format!(
                    "{}: {}°C | {}: {}°C",
                    i18n::tr(lang, "min"),
                    snapshot.min_c,
                    i18n::tr(lang, "max"),
                    snapshot.max_c
                ),
                Style::default().fg(Color::Gray),
            ))
            .centered(),
        );
        lines.push(
            Line::from(Span::styled(
                format!("{}: {}°C", i18n::tr(lang, "feels-like"), snapshot.feels_like_c),
                Style::default().fg(Color::Gray),
            ))
            .centered(),
        );
        lines.push(
            Line::from(Span::styled(
                format!("{}: {}%", i18n::tr(lang, "humidity"), snapshot.humidity_pct),
                Style::default().fg(Color::Gray),
            ))
            .centered(),
        );
        if let Some(speed) = snapshot.wind_speed {
            lines.push(
                Line::from(Span::styled(
                    format!(
                        "{}: {:.1} {}",
                        i18n::tr(lang, "wind"),
                        speed,
                        i18n::tr(lang, "wind-unit")
                    ),
                    Style::default().fg(Color::Gray),
                ))
                .centered(),
            );
        }
    } else if state.is_loading {
        lines.push(
            Line::from(vec![
                Span::styled(
                    SPINNERS[(state.tick_count as usize / 2) % SPINNERS.len()],
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(
                    format!(" {}…", i18n::tr(lang, "loading")),
                    Style::default().fg(Color::Gray),
                ),
            ])
            .centered(),
        );
    }

    if let Some(key) = state.error {
        lines.push(Line::from("").centered());
        lines.push(
            Line::from(Span::styled(
                format!("{} {}", ERROR_ICON, i18n::tr(lang, key)),
                Style::default().fg(Color::Red),
            ))
            .centered(),
        );
    }

    lines
}

/// Map the provider's opaque icon key to a display glyph.
fn icon_glyph(icon: &str) -> &'static str {
    match icon.get(..2) {
        Some("01") => "☀",
        Some("02") => "⛅",
        Some("03") | Some("04") => "☁",
        Some("09") | Some("10") => "🌧",
        Some("11") => "🌩",
        Some("13") => "❄",
        Some("50") => "🌫",
        _ => "☁",
    }
}

fn temp_to_color(celsius: i32) -> Color {
    match celsius {
        ..=-10 => Color::Rgb(150, 200, 255),
        -9..=0 => Color::Rgb(100, 180, 255),
        1..=10 => Color::Rgb(100, 220, 200),
        11..=20 => Color::Rgb(150, 230, 150),
        21..=30 => Color::Rgb(255, 220, 100),
        31..=40 => Color::Rgb(255, 150, 80),
        _ => Color::Rgb(255, 100, 100),
    }
}
