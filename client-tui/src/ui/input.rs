use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What the main loop should do after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Continue,
    Quit,
    /// Leave this game and join a freshly allocated one.
    NewGame,
}

/// Keyboard commands understood by the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Quit,
    ClearAnnotations,
    FlipBoard,
    ToggleTheme,
    NewGame,
}

pub fn key_command(key: KeyEvent) -> Option<KeyCommand> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(KeyCommand::Quit)
        }
        KeyCode::Char('q') => Some(KeyCommand::Quit),
        KeyCode::Esc => Some(KeyCommand::ClearAnnotations),
        KeyCode::Char('f') => Some(KeyCommand::FlipBoard),
        KeyCode::Char('t') => Some(KeyCommand::ToggleTheme),
        KeyCode::Char('n') => Some(KeyCommand::NewGame),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(key_command(key(KeyCode::Esc)), Some(KeyCommand::ClearAnnotations));
        assert_eq!(key_command(key(KeyCode::Char('q'))), Some(KeyCommand::Quit));
        assert_eq!(key_command(key(KeyCode::Char('c'))), None);
        assert_eq!(
            key_command(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(KeyCommand::Quit)
        );
        assert_eq!(key_command(key(KeyCode::Char('x'))), None);
    }
}
