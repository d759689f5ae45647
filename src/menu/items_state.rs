use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use indexmap::IndexSet;
use ratatui::widgets::ListState;

/// Candidate lines, the subset matching the filter, and the user's marks.
pub struct ItemsState {
    pub all_items: Vec<String>,
    /// Indices into `all_items`, best match first.
    pub filtered_items: Vec<usize>,
    /// Indices into `all_items`, in the order they were marked.
    pub marked: IndexSet<usize>,
    pub list_state: ListState,

    matcher: SkimMatcherV2,
}

impl ItemsState {
    pub fn new(items: Vec<String>) -> Self {
        let mut list_state = ListState::default();
        list_state.select((!items.is_empty()).then_some(0));

        Self {
            filtered_items: (0..items.len()).collect(),
            marked: IndexSet::new(),
            all_items: items,
            list_state,
            matcher: SkimMatcherV2::default(),
        }
    }

    pub fn move_selection(&mut self, delta: i32) {
        if let Some(selection_idx) = self.list_state.selected() {
            let new_selected =
                usize::try_from((selection_idx as i32 + delta).max(0))
                    .unwrap_or(0);
            self.list_state.select(Some(
                new_selected.min(self.filtered_items.len().saturating_sub(1)),
            ));
        }
    }

    pub fn update_filter_and_reset(&mut self, input: &str) {
        self.update_filter(input);
        self.reset_position();
    }

    pub fn update_filter(&mut self, input: &str) {
        if input.is_empty() {
            self.filtered_items = (0..self.all_items.len()).collect();
            return;
        }

        let mut scored: Vec<(i64, usize)> = self
            .all_items
            .iter()
            .enumerate()
            .filter_map(|(idx, item)| {
                self.matcher.fuzzy_match(item, input).map(|score| (score, idx))
            })
            .collect();
        // Stable, so equal scores keep listing order.
        scored.sort_by_key(|(score, _)| std::cmp::Reverse(*score));

        self.filtered_items = scored.into_iter().map(|(_, idx)| idx).collect();
    }

    /// The highlighted line, if any.
    pub fn selected_item(&self) -> Option<&str> {
        let idx = *self.filtered_items.get(self.list_state.selected()?)?;
        Some(&self.all_items[idx])
    }

    /// Marks or unmarks the highlighted line and moves past it.
    pub fn toggle_mark(&mut self) {
        let Some(selection_idx) = self.list_state.selected() else {
            return;
        };
        let Some(&idx) = self.filtered_items.get(selection_idx) else {
            return;
        };

        if !self.marked.shift_remove(&idx) {
            self.marked.insert(idx);
        }
        self.move_selection(1);
    }

    /// Marked lines in the order they were marked, or the highlighted line
    /// when nothing is marked.
    pub fn picked(&self) -> Vec<String> {
        if !self.marked.is_empty() {
            return self
                .marked
                .iter()
                .map(|&idx| self.all_items[idx].clone())
                .collect();
        }

        self.selected_item().map(str::to_string).into_iter().collect()
    }

    fn reset_position(&mut self) {
        if self.filtered_items.is_empty() {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(0));
        }
    }
}
