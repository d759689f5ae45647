//! Fuzzy selection front-ends.
//!
//! Both the external `fzf` and the built-in menu take a candidate list plus a
//! [`PickerConfig`] and hand back the key that ended the interaction together
//! with the picked lines.

pub mod fzf;

use std::path::PathBuf;

use anyhow::Result;
use clap::ValueEnum;
use tracing::debug;

use crate::menu::MenuSelector;

pub use fzf::FzfSelector;

/// Keys that can end a pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickerKey {
    Enter,
    CtrlX,
    CtrlR,
}

impl PickerKey {
    /// Name of the key in fzf's `--expect` syntax.
    pub fn fzf_name(self) -> &'static str {
        match self {
            PickerKey::Enter => "enter",
            PickerKey::CtrlX => "ctrl-x",
            PickerKey::CtrlR => "ctrl-r",
        }
    }

    pub fn from_fzf_name(name: &str) -> Option<Self> {
        match name {
            "" | "enter" => Some(PickerKey::Enter),
            "ctrl-x" => Some(PickerKey::CtrlX),
            "ctrl-r" => Some(PickerKey::CtrlR),
            _ => None,
        }
    }
}

/// What the preview panel shows for the highlighted line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    /// Contents of the tmux pane named by the line.
    Pane,
    /// Entries of the directory named by the line, relative to `root` when
    /// the line is a relative path.
    Directory { root: Option<PathBuf> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerConfig {
    pub prompt: String,
    pub header: Option<String>,
    /// Picker height, in fzf's syntax (`40%`, `20`).
    pub height: String,
    pub preview: Option<Preview>,
    /// Keys besides Enter that end the pick.
    pub expect: Vec<PickerKey>,
    pub multi: bool,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            prompt: "> ".into(),
            header: None,
            height: "40%".into(),
            preview: None,
            expect: Vec::new(),
            multi: false,
        }
    }
}

/// Result of a completed pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub key: PickerKey,
    pub lines: Vec<String>,
}

pub trait Selector {
    /// Lets the user pick among `candidates`.
    ///
    /// Returns `None` when the user aborts or picks nothing.
    fn select(
        &mut self,
        candidates: &[String],
        config: &PickerConfig,
    ) -> Result<Option<Selection>>;
}

/// Which selector front-end to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PickerKind {
    /// fzf when it is installed, the built-in menu otherwise
    #[default]
    Auto,
    Fzf,
    Builtin,
}

/// Builds the selector for `kind`.
pub fn selector_for(kind: PickerKind) -> Box<dyn Selector> {
    let use_fzf = match kind {
        PickerKind::Auto => FzfSelector::is_available(),
        PickerKind::Fzf => true,
        PickerKind::Builtin => false,
    };
    debug!(?kind, use_fzf, "picking selector");

    if use_fzf {
        Box::new(FzfSelector::new())
    } else {
        Box::new(MenuSelector::new())
    }
}

impl<S: Selector + ?Sized> Selector for Box<S> {
    fn select(
        &mut self,
        candidates: &[String],
        config: &PickerConfig,
    ) -> Result<Option<Selection>> {
        (**self).select(candidates, config)
    }
}
