pub struct UiFlags {
    pub show_preview: bool,
    pub multi_select: bool,
}

impl UiFlags {
    pub fn new(show_preview: bool, multi_select: bool) -> Self {
        Self {
            show_preview,
            multi_select,
        }
    }
}
