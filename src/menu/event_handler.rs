use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::menu::{
    action::MenuAction,
    state::{MenuMode, MenuState},
};
use crate::picker::PickerKey;

pub trait EventHandler {
    fn handle_event(&self, event: Event, state: &MenuState) -> MenuAction;
}

pub struct DefaultEventHandler;

impl EventHandler for DefaultEventHandler {
    fn handle_event(&self, event: Event, state: &MenuState) -> MenuAction {
        let Event::Key(key) = event else {
            return MenuAction::Nop;
        };

        if key.kind != KeyEventKind::Press {
            return MenuAction::Nop;
        }

        if state.mode == MenuMode::HelpPopup {
            return handle_help_popup_key(key);
        }

        handle_normal_mode_key(key, state)
    }
}

fn handle_help_popup_key(key: KeyEvent) -> MenuAction {
    match (key.modifiers.contains(KeyModifiers::CONTROL), key.code) {
        (true, KeyCode::Char('h' | 'c')) => MenuAction::ToggleHelp,
        (false, KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter) => {
            MenuAction::ToggleHelp
        }
        _ => MenuAction::Nop,
    }
}

fn handle_normal_mode_key(key: KeyEvent, state: &MenuState) -> MenuAction {
    match (key.modifiers.contains(KeyModifiers::CONTROL), key.code) {
        (true, KeyCode::Char('p')) => MenuAction::MoveSelection(-1),
        (true, KeyCode::Char('n')) => MenuAction::MoveSelection(1),
        (true, KeyCode::Char('x')) => {
            accept_if_expected(PickerKey::CtrlX, state)
        }
        (true, KeyCode::Char('r')) => {
            accept_if_expected(PickerKey::CtrlR, state)
        }
        (true, KeyCode::Char('c')) => MenuAction::Exit,
        (true, KeyCode::Char('t')) => MenuAction::TogglePreview,
        (true, KeyCode::Char('h')) => MenuAction::ToggleHelp,
        (true, KeyCode::Char('w')) => MenuAction::RemoveLastWord,

        (false, KeyCode::Tab) if state.ui_flags.multi_select => {
            MenuAction::ToggleMark
        }
        (false, KeyCode::Char(c)) => MenuAction::AppendToInput(c),
        (false, KeyCode::Backspace) => MenuAction::DeleteFromInput,
        (false, KeyCode::Up) => MenuAction::MoveSelection(-1),
        (false, KeyCode::Down) => MenuAction::MoveSelection(1),
        (false, KeyCode::Enter) => MenuAction::Accept(PickerKey::Enter),
        (false, KeyCode::Esc) => MenuAction::Exit,

        _ => MenuAction::Nop,
    }
}

fn accept_if_expected(key: PickerKey, state: &MenuState) -> MenuAction {
    if state.config.expect.contains(&key) {
        MenuAction::Accept(key)
    } else {
        MenuAction::Nop
    }
}
