use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use crate::menu::preview::preview_text;
use crate::menu::state::{MenuMode, MenuState};
use crate::tmux::Multiplexer;

const MARK: &str = "● ";
const NO_MARK: &str = "  ";

pub trait MenuRenderer {
    fn draw(&self, frame: &mut Frame, state: &mut MenuState);
}

/// Draws the menu; pane previews are captured through `tmux`.
pub struct DefaultMenuRenderer<M> {
    tmux: M,
}

impl<M: Multiplexer> DefaultMenuRenderer<M> {
    pub fn new(tmux: M) -> Self {
        Self { tmux }
    }
}

impl<M: Multiplexer> MenuRenderer for DefaultMenuRenderer<M> {
    fn draw(&self, frame: &mut Frame, state: &mut MenuState) {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),
                Constraint::Length(1), // help hint
            ])
            .split(frame.area());

        let content_chunks = if state.ui_flags.show_preview {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Percentage(40),
                    Constraint::Percentage(60),
                ])
                .split(main_chunks[0])
        } else {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(100)])
                .split(main_chunks[0])
        };

        let left_content = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(3)])
            .split(content_chunks[0]);

        draw_results(frame, left_content[0], state);

        let input_block = Block::default()
            .borders(Borders::ALL)
            .title(state.config.prompt.trim_end().to_string());
        let input_area = input_block.inner(left_content[1]);
        frame.render_widget(input_block, left_content[1]);
        frame.render_widget(&state.filter_input, input_area);

        let hint = match &state.config.header {
            Some(header) => format!("{header} | C-h: Help | Esc: Quit"),
            None => "C-h: Help | Esc: Quit".to_string(),
        };
        let help_hint = Paragraph::new(hint)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help_hint, main_chunks[1]);

        if state.ui_flags.show_preview {
            draw_preview_pane(frame, content_chunks[1], &self.tmux, state);
        }

        if state.mode == MenuMode::HelpPopup {
            draw_help_popup(frame, state);
        }
    }
}

fn draw_results(frame: &mut Frame, area: Rect, state: &mut MenuState) {
    let title = format!(
        "Results {}/{}",
        state.items.filtered_items.len(),
        state.items.all_items.len()
    );
    let results_block = Block::default().borders(Borders::ALL).title(title);

    if state.items.filtered_items.is_empty() {
        frame.render_widget(
            Paragraph::new("No results...")
                .block(results_block)
                .style(Style::default().fg(Color::DarkGray)),
            area,
        );
        return;
    }

    let multi_select = state.ui_flags.multi_select;
    let items: Vec<ListItem> = state
        .items
        .filtered_items
        .iter()
        .map(|&idx| {
            let line = &state.items.all_items[idx];
            if !multi_select {
                return ListItem::new(line.as_str());
            }
            let mark = if state.items.marked.contains(&idx) {
                MARK
            } else {
                NO_MARK
            };
            ListItem::new(format!("{mark}{line}"))
        })
        .collect();

    let list = List::new(items)
        .block(results_block)
        .highlight_style(Style::default().bg(Color::Blue));

    frame.render_stateful_widget(list, area, &mut state.items.list_state);
}

fn generate_preview_content(
    tmux: &impl Multiplexer,
    state: &mut MenuState,
) -> String {
    let Some(preview) = &state.config.preview else {
        return String::new();
    };
    let Some(selection) = state.items.selected_item() else {
        return String::new();
    };

    if let Some((line, text)) = &state.preview_cache
        && line == selection
    {
        return text.clone();
    }

    let text = preview_text(tmux, preview, selection);
    state.preview_cache = Some((selection.to_string(), text.clone()));
    text
}

fn draw_preview_pane(
    frame: &mut Frame,
    chunk: Rect,
    tmux: &impl Multiplexer,
    state: &mut MenuState,
) {
    let preview_block = Block::default().borders(Borders::ALL).title("Preview");

    let preview_content = generate_preview_content(tmux, state);
    let preview = Paragraph::new(preview_content).block(preview_block);

    frame.render_widget(preview, chunk);
}

fn draw_help_popup(f: &mut Frame, state: &MenuState) {
    let popup_area = create_centered_rect(f.area(), 60, 9);

    f.render_widget(Clear, popup_area);

    let navigation_block = Block::default()
        .title("Navigation")
        .borders(Borders::ALL)
        .style(Style::default().bg(Color::DarkGray));

    let actions_block = Block::default()
        .title("Actions")
        .borders(Borders::ALL)
        .style(Style::default().bg(Color::DarkGray));

    let navigation_text = vec![
        Line::from("Esc/C-c → Close"),
        Line::from("↑/C-p   → Previous item"),
        Line::from("↓/C-n   → Next item"),
        Line::from("C-w     → Delete last word"),
        Line::from("C-t     → Toggle preview"),
    ];

    let mut actions_text = vec![Line::from("Enter → Select")];
    if state.ui_flags.multi_select {
        actions_text.push(Line::from("Tab   → Mark item"));
    }
    for key in &state.config.expect {
        actions_text.push(Line::from(format!("{} → Select", key.fzf_name())));
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(popup_area);

    f.render_widget(
        Paragraph::new(navigation_text).block(navigation_block),
        chunks[0],
    );
    f.render_widget(
        Paragraph::new(actions_text).block(actions_block),
        chunks[1],
    );
}

fn create_centered_rect(area: Rect, length_x: u16, length_y: u16) -> Rect {
    let vertical =
        Layout::vertical([Constraint::Length(length_y)]).flex(Flex::Center);
    let horizontal =
        Layout::horizontal([Constraint::Length(length_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}
