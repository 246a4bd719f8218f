use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    None,
}

pub fn handle_key(key: KeyEvent) -> Action {
    if key.kind == KeyEventKind::Release {
        return Action::None;
    }
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _)
        | (KeyCode::Esc, _)
        | (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_keys() {
        assert_eq!(handle_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)), Action::Quit);
        assert_eq!(handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)), Action::Quit);
        assert_eq!(handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)), Action::Quit);
    }

    #[test]
    fn other_keys_are_ignored() {
        assert_eq!(handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)), Action::None);
        assert_eq!(handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)), Action::None);
    }
}
