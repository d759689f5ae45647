use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Separator between the session name and the window index.
pub const SESSION_SEPARATOR: char = ':';
/// Separator between the window index and the pane index.
pub const PANE_SEPARATOR: char = '.';

/// A pane addressed by what the user sees: session name plus the window and
/// pane *display indices*.
///
/// Display indices are renumbered by tmux whenever a sibling is removed, so a
/// `DisplayId` is only valid at the instant it was listed. Resolve it to a
/// [`StableId`] right before mutating anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayId {
    pub session: String,
    pub window_index: u32,
    pub pane_index: u32,
}

/// A pane addressed by identifiers tmux never reuses while it lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StableId {
    pub session: String,
    /// Window ID, e.g. `@3`.
    pub window_id: String,
    /// Pane ID, e.g. `%12`.
    pub pane_id: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TargetParseError {
    #[error("missing '{SESSION_SEPARATOR}' in pane target: {0}")]
    MissingSession(String),
    #[error("missing '{PANE_SEPARATOR}' in pane target: {0}")]
    MissingPane(String),
    #[error("invalid index in pane target: {0}")]
    InvalidIndex(String),
}

impl DisplayId {
    pub fn new(
        session: impl Into<String>,
        window_index: u32,
        pane_index: u32,
    ) -> Self {
        Self {
            session: session.into(),
            window_index,
            pane_index,
        }
    }

    /// Target string for the containing window, `session:window`.
    pub fn window_target(&self) -> String {
        format!("{}{}{}", self.session, SESSION_SEPARATOR, self.window_index)
    }
}

impl fmt::Display for DisplayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}",
            self.session,
            SESSION_SEPARATOR,
            self.window_index,
            PANE_SEPARATOR,
            self.pane_index
        )
    }
}

impl FromStr for DisplayId {
    type Err = TargetParseError;

    /// Parses `session:window.pane`.
    ///
    /// Session names never contain `:` or `.`, so the first `:` always ends
    /// the session name. Surrounding whitespace is ignored so raw picker
    /// output lines can be fed in directly.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (session, rest) = s
            .split_once(SESSION_SEPARATOR)
            .ok_or_else(|| TargetParseError::MissingSession(s.to_string()))?;
        let (window, pane) = rest
            .split_once(PANE_SEPARATOR)
            .ok_or_else(|| TargetParseError::MissingPane(s.to_string()))?;

        let parse_index = |value: &str| {
            value
                .parse::<u32>()
                .map_err(|_| TargetParseError::InvalidIndex(s.to_string()))
        };

        Ok(Self {
            session: session.to_string(),
            window_index: parse_index(window)?,
            pane_index: parse_index(pane)?,
        })
    }
}

impl StableId {
    pub fn new(
        session: impl Into<String>,
        window_id: impl Into<String>,
        pane_id: impl Into<String>,
    ) -> Self {
        Self {
            session: session.into(),
            window_id: window_id.into(),
            pane_id: pane_id.into(),
        }
    }
}

impl fmt::Display for StableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}",
            self.session,
            SESSION_SEPARATOR,
            self.window_id,
            PANE_SEPARATOR,
            self.pane_id
        )
    }
}
