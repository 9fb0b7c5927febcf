//! Modal city picker.
//!
//! A centered overlay listing the catalog in its fixed order, with the
//! names localized for the active language.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

use super::Component;
use crate::action::Action;
use crate::catalog::CITIES;
use crate::i18n::{self, Lang};

pub struct CityPickerProps {
    pub language: Lang,
    /// Index of the highlighted catalog entry.
    pub selected: usize,
}

/// Keyboard-driven selection list over the city catalog.
#[derive(Default)]
pub struct CityPicker {
    /// Scroll offset for small terminals.
    scroll_offset: usize,
}

impl CityPicker {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_visible(&mut self, selected: usize, viewport_height: usize) {
        if viewport_height == 0 {
            return;
        }
        if selected < self.scroll_offset {
            self.scroll_offset = selected;
        } else if selected >= self.scroll_offset + viewport_height {
            self.scroll_offset = selected.saturating_sub(viewport_height - 1);
        }
    }
}

impl Component for CityPicker {
    type Props<'a> = CityPickerProps;

    fn handle_key(&mut self, key: &KeyEvent, props: CityPickerProps) -> Vec<Action> {
        let last = CITIES.len() - 1;

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                let next = (props.selected + 1).min(last);
                if next != props.selected {
                    vec![Action::CityPickerMove(next)]
                } else {
                    vec![]
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                let next = props.selected.saturating_sub(1);
                if next != props.selected {
                    vec![Action::CityPickerMove(next)]
                } else {
                    vec![]
                }
            }
            KeyCode::Char('g') | KeyCode::Home => {
                if props.selected != 0 {
                    vec![Action::CityPickerMove(0)]
                } else {
                    vec![]
                }
            }
            KeyCode::Char('G') | KeyCode::End => {
                if props.selected != last {
                    vec![Action::CityPickerMove(last)]
                } else {
                    vec![]
                }
            }
            KeyCode::Enter => vec![Action::CityPickerConfirm],
            KeyCode::Esc => vec![Action::CityPickerClose],
            _ => vec![],
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: CityPickerProps) {
        if area.width < 20 || area.height < 6 {
            return;
        }

        let modal_area = centered_rect(36, CITIES.len() as u16 + 2, area);
        frame.render_widget(Clear, modal_area);

        let viewport_height = modal_area.height.saturating_sub(2) as usize;
        self.ensure_visible(props.selected, viewport_height);

        let items: Vec<ListItem> = CITIES
            .iter()
            .map(|city| ListItem::new(Line::raw(i18n::tr(props.language, city.id)).centered()))
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
                    .title(format!(" {} ", i18n::tr(props.language, "pick-city"))),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::White)
                    .add_modifier(Modifier::BOLD),
            );

        let mut state = ListState::default().with_selected(Some(props.selected));
        *state.offset_mut() = self.scroll_offset;

        frame.render_stateful_widget(list, modal_area, &mut state);
    }
}

/// Calculate a centered rectangle within an area.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
