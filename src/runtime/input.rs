use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::geometry::Size;

use super::power::PowerAction;

/// What a terminal event asks the dashboard to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Power(PowerAction),
    /// Repaint now at the new frame size.
    Redraw(Size),
    Ignore,
}

pub fn classify(event: &Event) -> Action {
    match event {
        Event::Key(key) => classify_key(key),
        Event::Resize(width, height) => Action::Redraw(Size::new(*width, *height)),
        _ => Action::Ignore,
    }
}

fn classify_key(key: &KeyEvent) -> Action {
    if key.kind == KeyEventKind::Release {
        return Action::Ignore;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => Action::Quit,
        // Raw mode turns ^C into a key press instead of SIGINT.
        KeyCode::Char('c') if ctrl => Action::Quit,
        KeyCode::Char(_) if ctrl => Action::Ignore,
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('r') => Action::Power(PowerAction::Reboot),
        KeyCode::Char('s') => Action::Power(PowerAction::Shutdown),
        _ => Action::Ignore,
    }
}
