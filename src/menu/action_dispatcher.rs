use crate::menu::action::MenuAction;
use crate::menu::state::{MenuMode, MenuState};
use crate::picker::{PickerKey, Selection};

pub trait ActionDispatcher {
    fn dispatch(&self, action: MenuAction, state: &mut MenuState);
}

pub struct DefaultActionDispatcher;

impl ActionDispatcher for DefaultActionDispatcher {
    fn dispatch(&self, action: MenuAction, state: &mut MenuState) {
        match action {
            MenuAction::Accept(key) => handle_accept(key, state),
            MenuAction::ToggleMark => state.items.toggle_mark(),
            MenuAction::MoveSelection(delta) => {
                state.items.move_selection(delta)
            }
            MenuAction::AppendToInput(c) => {
                state.handle_filter_input(|t| t.insert_char(c))
            }
            MenuAction::DeleteFromInput => state.handle_filter_input(|t| {
                t.delete_char();
            }),
            MenuAction::RemoveLastWord => state.handle_filter_input(|t| {
                t.delete_word();
            }),
            MenuAction::TogglePreview => {
                state.ui_flags.show_preview = !state.ui_flags.show_preview
                    && state.config.preview.is_some();
            }
            MenuAction::ToggleHelp => {
                state.mode = match state.mode {
                    MenuMode::HelpPopup => MenuMode::Normal,
                    MenuMode::Normal => MenuMode::HelpPopup,
                };
            }
            MenuAction::Exit => state.should_exit = true,
            MenuAction::Nop => {}
        }
    }
}

fn handle_accept(key: PickerKey, state: &mut MenuState) {
    let lines = state.items.picked();
    if lines.is_empty() {
        return;
    }

    state.outcome = Some(Selection { key, lines });
    state.should_exit = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::{PickerConfig, Preview};

    fn state() -> MenuState<'static> {
        MenuState::new(
            vec!["work:0.0".into(), "work:0.1".into(), "notes:0.0".into()],
            PickerConfig {
                multi: true,
                preview: Some(Preview::Pane),
                expect: vec![PickerKey::CtrlX],
                ..PickerConfig::default()
            },
        )
    }

    #[test]
    fn accept_returns_marked_lines() {
        let mut state = state();
        let dispatcher = DefaultActionDispatcher;

        dispatcher.dispatch(MenuAction::ToggleMark, &mut state);
        dispatcher.dispatch(MenuAction::MoveSelection(1), &mut state);
        dispatcher.dispatch(MenuAction::ToggleMark, &mut state);
        dispatcher.dispatch(MenuAction::Accept(PickerKey::CtrlX), &mut state);

        assert!(state.should_exit);
        assert_eq!(
            state.outcome,
            Some(Selection {
                key: PickerKey::CtrlX,
                lines: vec!["work:0.0".into(), "notes:0.0".into()],
            })
        );
    }

    #[test]
    fn accept_with_nothing_matching_keeps_menu_open() {
        let mut state = state();
        let dispatcher = DefaultActionDispatcher;

        for c in "zzz".chars() {
            dispatcher.dispatch(MenuAction::AppendToInput(c), &mut state);
        }
        dispatcher.dispatch(MenuAction::Accept(PickerKey::Enter), &mut state);

        assert!(!state.should_exit);
        assert_eq!(state.outcome, None);
    }

    #[test]
    fn typing_filters_and_backspace_widens() {
        let mut state = state();
        let dispatcher = DefaultActionDispatcher;

        for c in "notes".chars() {
            dispatcher.dispatch(MenuAction::AppendToInput(c), &mut state);
        }
        assert_eq!(state.filter_text(), "notes");
        assert_eq!(state.items.selected_item(), Some("notes:0.0"));

        dispatcher.dispatch(MenuAction::RemoveLastWord, &mut state);
        assert_eq!(state.filter_text(), "");
        assert_eq!(state.items.filtered_items.len(), 3);
    }

    #[test]
    fn exit_leaves_no_outcome() {
        let mut state = state();
        DefaultActionDispatcher.dispatch(MenuAction::Exit, &mut state);

        assert!(state.should_exit);
        assert_eq!(state.outcome, None);
    }

    #[test]
    fn toggles_help_and_preview() {
        let mut state = state();
        let dispatcher = DefaultActionDispatcher;

        dispatcher.dispatch(MenuAction::ToggleHelp, &mut state);
        assert_eq!(state.mode, MenuMode::HelpPopup);
        dispatcher.dispatch(MenuAction::ToggleHelp, &mut state);
        assert_eq!(state.mode, MenuMode::Normal);

        assert!(state.ui_flags.show_preview);
        dispatcher.dispatch(MenuAction::TogglePreview, &mut state);
        assert!(!state.ui_flags.show_preview);
    }
}
