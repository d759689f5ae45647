//! Interactive text prompts.
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Clear},
};
use tui_textarea::{CursorMove, TextArea};

use crate::terminal_utils;

const PROMPT_WIDTH: u16 = 50;

/// Asks the user for a line of text.
pub trait Prompter {
    /// Shows `label` with `initial` pre-filled.
    ///
    /// Returns `None` when the user cancels.
    fn prompt(&mut self, label: &str, initial: &str) -> Result<Option<String>>;
}

/// Single-line popup prompt drawn on the alternate screen.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        Self
    }
}

enum PromptStep {
    Continue,
    Confirm,
    Cancel,
}

impl Prompter for TerminalPrompter {
    fn prompt(&mut self, label: &str, initial: &str) -> Result<Option<String>> {
        let mut input = TextArea::new(vec![initial.to_string()]);
        input.set_cursor_line_style(Style::default());
        input.move_cursor(CursorMove::End);
        input.set_block(
            Block::default()
                .borders(Borders::ALL)
                .title(label.to_string())
                .style(Style::default().bg(Color::DarkGray)),
        );

        terminal_utils::with_terminal(|terminal| {
            loop {
                terminal.draw(|frame| draw_prompt(frame, &input))?;

                match handle_event(event::read()?, &mut input) {
                    PromptStep::Continue => {}
                    PromptStep::Confirm => {
                        return Ok(Some(input.lines().join("")));
                    }
                    PromptStep::Cancel => return Ok(None),
                }
            }
        })
    }
}

fn draw_prompt(frame: &mut Frame, input: &TextArea) {
    let vertical =
        Layout::vertical([Constraint::Length(3)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Length(PROMPT_WIDTH)])
        .flex(Flex::Center);
    let [area] = vertical.areas(frame.area());
    let [area] = horizontal.areas(area);

    frame.render_widget(Clear, area);
    frame.render_widget(input, area);
}

fn handle_event(event: Event, input: &mut TextArea) -> PromptStep {
    let Event::Key(key) = event else {
        return PromptStep::Continue;
    };

    if key.kind != KeyEventKind::Press {
        return PromptStep::Continue;
    }

    match (key.modifiers.contains(KeyModifiers::CONTROL), key.code) {
        (true, KeyCode::Char('c')) | (false, KeyCode::Esc) => {
            return PromptStep::Cancel;
        }
        (true, KeyCode::Char('w')) => {
            input.delete_word();
        }
        (true, KeyCode::Char('u')) => {
            input.move_cursor(CursorMove::End);
            input.delete_line_by_head();
        }
        (false, KeyCode::Enter) => return PromptStep::Confirm,
        (false, KeyCode::Char(c)) => input.insert_char(c),
        (false, KeyCode::Backspace) => {
            input.delete_char();
        }
        (false, KeyCode::Left) => input.move_cursor(CursorMove::Back),
        (false, KeyCode::Right) => input.move_cursor(CursorMove::Forward),
        _ => {}
    }

    PromptStep::Continue
}
