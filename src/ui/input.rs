use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    InputChar(char),
    InputBackspace,
    Submit,
    FocusInput,
    FocusList,
    ScrollUp,
    ScrollDown,
    Select,
    Back,
    Help,
    Quit,
    None,
}

/// Which part of the screen receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyContext {
    Editing,
    Browsing,
    Details,
}

pub fn map_key(key: KeyEvent, context: KeyContext) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    match context {
        KeyContext::Editing => match key.code {
            KeyCode::Enter => Action::Submit,
            KeyCode::Backspace => Action::InputBackspace,
            KeyCode::Tab | KeyCode::Esc | KeyCode::Down => Action::FocusList,
            KeyCode::Char(c) => Action::InputChar(c),
            _ => Action::None,
        },
        KeyContext::Browsing => match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('j') | KeyCode::Down => Action::ScrollDown,
            KeyCode::Char('k') | KeyCode::Up => Action::ScrollUp,
            KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => Action::Select,
            KeyCode::Tab | KeyCode::Char('/') | KeyCode::Char('i') => Action::FocusInput,
            KeyCode::Char('?') => Action::Help,
            KeyCode::Esc => Action::Back,
            _ => Action::None,
        },
        KeyContext::Details => match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('h') | KeyCode::Left => Action::Back,
            KeyCode::Char('j') | KeyCode::Down => Action::ScrollDown,
            KeyCode::Char('k') | KeyCode::Up => Action::ScrollUp,
            KeyCode::Char('?') => Action::Help,
            _ => Action::None,
        },
    }
}
