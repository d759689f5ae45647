use ratatui::style::Style;
use tui_textarea::TextArea;

use crate::menu::{items_state::ItemsState, ui_flags::UiFlags};
use crate::picker::{PickerConfig, Selection};

#[derive(Debug, PartialEq, Eq)]
pub enum MenuMode {
    Normal,
    HelpPopup,
}

pub struct MenuState<'a> {
    pub filter_input: TextArea<'a>,
    pub items: ItemsState,
    pub config: PickerConfig,

    pub mode: MenuMode,
    pub ui_flags: UiFlags,

    /// Preview text of the line it was last computed for.
    pub preview_cache: Option<(String, String)>,

    /// Set when the user ends the pick with an accepting key.
    pub outcome: Option<Selection>,
    pub should_exit: bool,
}

impl<'a> MenuState<'a> {
    pub fn new(items: Vec<String>, config: PickerConfig) -> Self {
        let mut filter_input = TextArea::default();
        filter_input.set_cursor_line_style(Style::default());

        Self {
            filter_input,
            items: ItemsState::new(items),
            ui_flags: UiFlags::new(config.preview.is_some(), config.multi),
            config,
            mode: MenuMode::Normal,
            preview_cache: None,
            outcome: None,
            should_exit: false,
        }
    }

    pub fn filter_text(&self) -> String {
        self.filter_input.lines().join("\n")
    }

    /// Applies `operation` to the filter input and re-filters the items.
    pub fn handle_filter_input<F>(&mut self, operation: F)
    where
        F: FnOnce(&mut TextArea),
    {
        operation(&mut self.filter_input);
        let text = self.filter_text();
        self.items.update_filter_and_reset(&text);
    }
}
