use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub struct KeyHandler;

impl KeyHandler {
    pub fn handle_normal_mode_key(key_event: KeyEvent) -> NormalModeAction {
        let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
        let shift = key_event.modifiers.contains(KeyModifiers::SHIFT);

        match key_event.code {
            KeyCode::Char('c') if ctrl => NormalModeAction::Quit,
            KeyCode::Char('z') if ctrl && shift => NormalModeAction::Redo,
            KeyCode::Char('Z') if ctrl => NormalModeAction::Redo,
            KeyCode::Char('z') if ctrl => NormalModeAction::Undo,
            KeyCode::Char('y') if ctrl => NormalModeAction::Redo,
            _ if ctrl => NormalModeAction::None,
            KeyCode::Char('q') => NormalModeAction::Quit,
            KeyCode::Up | KeyCode::Char('k') => NormalModeAction::FocusPrevious,
            KeyCode::Down | KeyCode::Char('j') => NormalModeAction::FocusNext,
            KeyCode::Left | KeyCode::Char('h') => NormalModeAction::Decrease { coarse: shift },
            KeyCode::Char('H') => NormalModeAction::Decrease { coarse: true },
            KeyCode::Right | KeyCode::Char('l') => NormalModeAction::Increase { coarse: shift },
            KeyCode::Char('L') => NormalModeAction::Increase { coarse: true },
            KeyCode::Enter | KeyCode::Char('=') => NormalModeAction::OpenValueEntry,
            KeyCode::Char('o') => NormalModeAction::OpenImageEntry,
            KeyCode::Char('u') => NormalModeAction::Undo,
            KeyCode::Char('r') => NormalModeAction::Redo,
            KeyCode::Char('R') => NormalModeAction::Reset,
            KeyCode::Char('a') => NormalModeAction::AutoPrep,
            KeyCode::Char('?') => NormalModeAction::ToggleHelpMode,
            _ => NormalModeAction::None,
        }
    }

    pub fn handle_help_mode_key(key_event: KeyEvent) -> HelpModeAction {
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc | KeyCode::Char('?') => {
                HelpModeAction::ExitHelpMode
            }
            _ => HelpModeAction::None,
        }
    }

    /// Free-text entry gets every printable key, including the ones bound to
    /// undo and redo in normal mode.
    pub fn handle_entry_mode_key(key_event: KeyEvent) -> EntryModeAction {
        let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);

        match key_event.code {
            KeyCode::Char('w') if ctrl => EntryModeAction::DeleteWordBackward,
            _ if ctrl => EntryModeAction::None,
            KeyCode::Esc => EntryModeAction::Cancel,
            KeyCode::Enter => EntryModeAction::Confirm,
            KeyCode::Backspace => EntryModeAction::Backspace,
            KeyCode::Delete => EntryModeAction::Delete,
            KeyCode::Left => EntryModeAction::MoveCursorLeft,
            KeyCode::Right => EntryModeAction::MoveCursorRight,
            KeyCode::Home => EntryModeAction::MoveCursorHome,
            KeyCode::End => EntryModeAction::MoveCursorEnd,
            KeyCode::Char(c) => EntryModeAction::InsertChar(c),
            _ => EntryModeAction::None,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum NormalModeAction {
    None,
    Quit,
    FocusPrevious,
    FocusNext,
    Decrease { coarse: bool },
    Increase { coarse: bool },
    OpenValueEntry,
    OpenImageEntry,
    Undo,
    Redo,
    Reset,
    AutoPrep,
    ToggleHelpMode,
}

#[derive(Debug, PartialEq)]
pub enum HelpModeAction {
    None,
    ExitHelpMode,
}

#[derive(Debug, PartialEq)]
pub enum EntryModeAction {
    None,
    Cancel,
    Confirm,
    Backspace,
    Delete,
    DeleteWordBackward,
    MoveCursorLeft,
    MoveCursorRight,
    MoveCursorHome,
    MoveCursorEnd,
    InsertChar(char),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_modifiers(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        let mut key_event = KeyEvent::from(code);
        key_event.modifiers = modifiers;
        key_event
    }

    #[test]
    fn test_normal_mode_basic_keys() {
        let key_event = KeyEvent::from(KeyCode::Char('q'));
        assert_eq!(KeyHandler::handle_normal_mode_key(key_event), NormalModeAction::Quit);

        let key_event = KeyEvent::from(KeyCode::Enter);
        assert_eq!(KeyHandler::handle_normal_mode_key(key_event), NormalModeAction::OpenValueEntry);

        let key_event = KeyEvent::from(KeyCode::Char('o'));
        assert_eq!(KeyHandler::handle_normal_mode_key(key_event), NormalModeAction::OpenImageEntry);

        let key_event = KeyEvent::from(KeyCode::Char('?'));
        assert_eq!(KeyHandler::handle_normal_mode_key(key_event), NormalModeAction::ToggleHelpMode);
    }

    #[test]
    fn test_normal_mode_focus_and_adjust_keys() {
        let key_event = KeyEvent::from(KeyCode::Up);
        assert_eq!(KeyHandler::handle_normal_mode_key(key_event), NormalModeAction::FocusPrevious);

        let key_event = KeyEvent::from(KeyCode::Char('j'));
        assert_eq!(KeyHandler::handle_normal_mode_key(key_event), NormalModeAction::FocusNext);

        let key_event = KeyEvent::from(KeyCode::Left);
        assert_eq!(
            KeyHandler::handle_normal_mode_key(key_event),
            NormalModeAction::Decrease { coarse: false }
        );

        let key_event = with_modifiers(KeyCode::Right, KeyModifiers::SHIFT);
        assert_eq!(
            KeyHandler::handle_normal_mode_key(key_event),
            NormalModeAction::Increase { coarse: true }
        );

        let key_event = with_modifiers(KeyCode::Char('H'), KeyModifiers::SHIFT);
        assert_eq!(
            KeyHandler::handle_normal_mode_key(key_event),
            NormalModeAction::Decrease { coarse: true }
        );
    }

    #[test]
    fn test_normal_mode_history_keys() {
        let key_event = KeyEvent::from(KeyCode::Char('u'));
        assert_eq!(KeyHandler::handle_normal_mode_key(key_event), NormalModeAction::Undo);

        let key_event = KeyEvent::from(KeyCode::Char('r'));
        assert_eq!(KeyHandler::handle_normal_mode_key(key_event), NormalModeAction::Redo);

        let key_event = with_modifiers(KeyCode::Char('R'), KeyModifiers::SHIFT);
        assert_eq!(KeyHandler::handle_normal_mode_key(key_event), NormalModeAction::Reset);

        let key_event = KeyEvent::from(KeyCode::Char('a'));
        assert_eq!(KeyHandler::handle_normal_mode_key(key_event), NormalModeAction::AutoPrep);
    }

    #[test]
    fn test_normal_mode_ctrl_keys() {
        let key_event = with_modifiers(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(KeyHandler::handle_normal_mode_key(key_event), NormalModeAction::Quit);

        let key_event = with_modifiers(KeyCode::Char('z'), KeyModifiers::CONTROL);
        assert_eq!(KeyHandler::handle_normal_mode_key(key_event), NormalModeAction::Undo);

        let key_event = with_modifiers(KeyCode::Char('y'), KeyModifiers::CONTROL);
        assert_eq!(KeyHandler::handle_normal_mode_key(key_event), NormalModeAction::Redo);

        let key_event = with_modifiers(
            KeyCode::Char('Z'),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT,
        );
        assert_eq!(KeyHandler::handle_normal_mode_key(key_event), NormalModeAction::Redo);

        let key_event = with_modifiers(KeyCode::Char('r'), KeyModifiers::CONTROL);
        assert_eq!(KeyHandler::handle_normal_mode_key(key_event), NormalModeAction::None);
    }

    #[test]
    fn test_help_mode_keys() {
        let key_event = KeyEvent::from(KeyCode::Esc);
        assert_eq!(KeyHandler::handle_help_mode_key(key_event), HelpModeAction::ExitHelpMode);

        let key_event = KeyEvent::from(KeyCode::Char('?'));
        assert_eq!(KeyHandler::handle_help_mode_key(key_event), HelpModeAction::ExitHelpMode);

        let key_event = KeyEvent::from(KeyCode::Char('u'));
        assert_eq!(KeyHandler::handle_help_mode_key(key_event), HelpModeAction::None);
    }

    #[test]
    fn test_entry_mode_types_shortcut_letters() {
        let key_event = KeyEvent::from(KeyCode::Char('u'));
        assert_eq!(KeyHandler::handle_entry_mode_key(key_event), EntryModeAction::InsertChar('u'));

        let key_event = KeyEvent::from(KeyCode::Char('r'));
        assert_eq!(KeyHandler::handle_entry_mode_key(key_event), EntryModeAction::InsertChar('r'));

        let key_event = with_modifiers(KeyCode::Char('z'), KeyModifiers::CONTROL);
        assert_eq!(KeyHandler::handle_entry_mode_key(key_event), EntryModeAction::None);
    }

    #[test]
    fn test_entry_mode_editing_keys() {
        let key_event = KeyEvent::from(KeyCode::Esc);
        assert_eq!(KeyHandler::handle_entry_mode_key(key_event), EntryModeAction::Cancel);

        let key_event = KeyEvent::from(KeyCode::Enter);
        assert_eq!(KeyHandler::handle_entry_mode_key(key_event), EntryModeAction::Confirm);

        let key_event = KeyEvent::from(KeyCode::Backspace);
        assert_eq!(KeyHandler::handle_entry_mode_key(key_event), EntryModeAction::Backspace);

        let key_event = KeyEvent::from(KeyCode::Home);
        assert_eq!(KeyHandler::handle_entry_mode_key(key_event), EntryModeAction::MoveCursorHome);

        let key_event = with_modifiers(KeyCode::Char('w'), KeyModifiers::CONTROL);
        assert_eq!(
            KeyHandler::handle_entry_mode_key(key_event),
            EntryModeAction::DeleteWordBackward
        );
    }
}
