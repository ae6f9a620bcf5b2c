/// Terminal input → `Action`s.
///
/// Every key press (and auto-repeat) becomes at most one action; releases
/// are ignored. Left mouse clicks are kept as raw cells so the renderer,
/// which knows the layout, can hit-test them.

use std::time::Duration;

use crossterm::event::{
    self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};

use crate::nav::event::Action;

pub struct InputState {
    /// Actions decoded this frame, in arrival order.
    pub actions: Vec<Action>,

    /// Left clicks this frame as (column, row).
    pub clicks: Vec<(u16, u16)>,

    /// Ctrl+C seen this frame.
    pub interrupted: bool,
}

impl InputState {
    pub fn new() -> Self {
        InputState {
            actions: Vec::with_capacity(8),
            clicks: Vec::with_capacity(2),
            interrupted: false,
        }
    }

    /// Drain all pending terminal events. Call once per frame.
    pub fn drain_events(&mut self) {
        self.actions.clear();
        self.clicks.clear();
        self.interrupted = false;

        // Read all available events without blocking
        while poll(Duration::ZERO).unwrap_or(false) {
            match event::read() {
                Ok(Event::Key(key)) => self.on_key(key),
                Ok(Event::Mouse(m)) => {
                    if m.kind == MouseEventKind::Down(MouseButton::Left) {
                        self.clicks.push((m.column, m.row));
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "input read failed");
                    break;
                }
            }
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        if is_ctrl_c(&key) {
            self.interrupted = true;
            return;
        }
        if let Some(action) = key_action(&key) {
            self.actions.push(action);
        }
    }
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
}

/// Keyboard layout. Letters are matched case-insensitively.
pub fn key_action(key: &KeyEvent) -> Option<Action> {
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return None;
    }
    let action = match key.code {
        KeyCode::Up => Action::Up,
        KeyCode::Down => Action::Down,
        KeyCode::Left => Action::Left,
        KeyCode::Right => Action::Right,
        KeyCode::Enter => Action::Confirm,
        KeyCode::Esc | KeyCode::Backspace => Action::Back,
        KeyCode::Home => Action::Home,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => Action::Up,
            's' => Action::Down,
            'a' => Action::Left,
            'd' => Action::Right,
            ' ' => Action::Confirm,
            'm' => Action::Mute,
            'h' => Action::Home,
            'q' => Action::Quit,
            d @ '1'..='9' => Action::Pick(d as u8 - b'0'),
            _ => return None,
        },
        _ => return None,
    };
    Some(action)
}
