use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Quit,
    Up,
    Down,
    Left,
    Right,
    Enter,
    Space,
    Q,
}

impl Command {
    pub(crate) fn from_key_event(ev: KeyEvent) -> Option<Command> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if (ev.modifiers, ev.code) == (KeyModifiers::CONTROL, KeyCode::Char('c')) {
            return Some(Command::Quit);
        }
        if !normal_modifiers.contains(ev.modifiers) {
            return None;
        }
        match ev.code {
            KeyCode::Char('w' | 'k' | 'W' | 'K') | KeyCode::Up => Some(Command::Up),
            KeyCode::Char('s' | 'j' | 'S' | 'J') | KeyCode::Down => Some(Command::Down),
            KeyCode::Char('a' | 'h' | 'A' | 'H') | KeyCode::Left => Some(Command::Left),
            KeyCode::Char('d' | 'l' | 'D' | 'L') | KeyCode::Right => Some(Command::Right),
            KeyCode::Enter => Some(Command::Enter),
            KeyCode::Char(' ') => Some(Command::Space),
            KeyCode::Char('q' | 'Q') => Some(Command::Q),
            _ => None,
        }
    }
}
