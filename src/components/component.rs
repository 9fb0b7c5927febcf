//! Component trait for pure UI elements.

use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

use crate::action::Action;

/// A pure UI component.
///
/// Rules:
/// 1. Props carry all read-only data needed for rendering.
/// 2. `handle_key` returns actions and never mutates external state.
/// 3. `render` is a function of props; `&mut self` is only for internal UI
///    state such as scroll offsets.
pub trait Component {
    /// Read-only data required to render the component.
    type Props<'a>;

    /// Handle a key press and return actions to dispatch.
    ///
    /// The default implementation is for render-only components.
    #[allow(unused_variables)]
    fn handle_key(&mut self, key: &KeyEvent, props: Self::Props<'_>) -> Vec<Action> {
        Vec::new()
    }

    /// Render the component to the frame.
    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
