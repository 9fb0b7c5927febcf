//! Localized key hints.

use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::Component;
use crate::i18n::{self, Lang};

pub struct HelpBar;

pub struct HelpBarProps {
    pub language: Lang,
}

impl Component for HelpBar {
    type Props<'a> = HelpBarProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: HelpBarProps) {
        let lang = props.language;
        let hint = |text: String| Span::styled(text, Style::default().fg(Color::DarkGray));
        let key = |text: &'static str| Span::styled(text, Style::default().fg(Color::Cyan).bold());

        let help = Line::from(vec![
            key(" c"),
            hint(format!(" {}  ", i18n::tr(lang, "help-city"))),
            key("l"),
            hint(format!(" {}  ", i18n::tr(lang, "other-language"))),
            key("r"),
            hint(format!(" {}  ", i18n::tr(lang, "help-refresh"))),
            key("q"),
            hint(format!(" {} ", i18n::tr(lang, "help-quit"))),
        ])
        .centered();

        frame.render_widget(Paragraph::new(help), area);
    }
}
