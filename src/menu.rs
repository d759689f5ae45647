//! Built-in full-screen fuzzy picker, used when fzf is unavailable.
pub mod action;
pub mod action_dispatcher;
pub mod event_handler;
pub mod items_state;
pub mod preview;
pub mod renderer;
pub mod state;
pub mod ui_flags;

use std::time::Duration;

use anyhow::Result;
use crossterm::event;
use ratatui::DefaultTerminal;

use crate::menu::{
    action_dispatcher::{ActionDispatcher, DefaultActionDispatcher},
    event_handler::{DefaultEventHandler, EventHandler},
    renderer::{DefaultMenuRenderer, MenuRenderer},
    state::MenuState,
};
use crate::picker::{PickerConfig, Selection, Selector};
use crate::terminal_utils;
use crate::tmux::Tmux;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct Menu<'a> {
    state: MenuState<'a>,
    renderer: Box<dyn MenuRenderer>,
    event_handler: Box<dyn EventHandler>,
    action_dispatcher: Box<dyn ActionDispatcher>,
}

impl<'a> Menu<'a> {
    pub fn new(items: Vec<String>, config: PickerConfig) -> Self {
        Self {
            state: MenuState::new(items, config),
            renderer: Box::new(DefaultMenuRenderer::new(Tmux::new())),
            event_handler: Box::new(DefaultEventHandler),
            action_dispatcher: Box::new(DefaultActionDispatcher),
        }
    }

    /// Runs until the user accepts or aborts; `None` means aborted.
    pub fn run(
        mut self,
        terminal: &mut DefaultTerminal,
    ) -> Result<Option<Selection>> {
        while !self.state.should_exit {
            terminal
                .draw(|frame| self.renderer.draw(frame, &mut self.state))?;

            if event::poll(POLL_INTERVAL)? {
                let action = self
                    .event_handler
                    .handle_event(event::read()?, &self.state);
                self.action_dispatcher.dispatch(action, &mut self.state);
            }
        }

        Ok(self.state.outcome)
    }
}

/// [`Selector`] backed by [`Menu`].
#[derive(Debug, Default)]
pub struct MenuSelector;

impl MenuSelector {
    pub fn new() -> Self {
        Self
    }
}

impl Selector for MenuSelector {
    fn select(
        &mut self,
        candidates: &[String],
        config: &PickerConfig,
    ) -> Result<Option<Selection>> {
        if candidates.is_empty() {
            return Ok(None);
        }

        let menu = Menu::new(candidates.to_vec(), config.clone());
        terminal_utils::with_terminal(|terminal| menu.run(terminal))
    }
}
