//! In-memory tmux server for tests.
//!
//! Pane display indices are positions within their window, so removing a pane
//! renumbers its higher-indexed siblings the way tmux does.

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};

use crate::tmux::interface::{Multiplexer, TmuxError};
use crate::tmux::target::{DisplayId, StableId};

/// Recorded mutating call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TmuxCall {
    NewSession { name: String, work_dir: PathBuf },
    RenameSession { from: String, to: String },
    KillPane { pane_id: String },
    Attach { target: String },
}

#[derive(Debug, Clone)]
struct FakeWindow {
    index: u32,
    id: String,
    panes: Vec<String>,
}

#[derive(Debug, Clone)]
struct FakeSession {
    name: String,
    windows: Vec<FakeWindow>,
}

#[derive(Debug, Default)]
pub struct FakeTmux {
    sessions: RefCell<Vec<FakeSession>>,
    calls: RefCell<Vec<TmuxCall>>,
    current: RefCell<Option<StableId>>,
    next_id: Cell<u32>,
    renumber_windows: Cell<bool>,
}

impl FakeTmux {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a session whose windows hold the given number of panes each,
    /// with window indices counting from 0.
    pub fn with_session(self, name: &str, panes_per_window: &[usize]) -> Self {
        let windows = panes_per_window
            .iter()
            .enumerate()
            .map(|(index, &panes)| self.window(index as u32, panes))
            .collect();

        self.sessions.borrow_mut().push(FakeSession {
            name: name.to_string(),
            windows,
        });
        self
    }

    /// Mirrors tmux's `renumber-windows` option.
    pub fn with_renumber_windows(self) -> Self {
        self.renumber_windows.set(true);
        self
    }

    /// Adds a window with no panes, which tmux itself never reports.
    pub fn with_empty_window(self, session: &str, index: u32) -> Self {
        let window = self.window(index, 0);
        if let Some(s) = self
            .sessions
            .borrow_mut()
            .iter_mut()
            .find(|s| s.name == session)
        {
            s.windows.push(window);
        }
        self
    }

    /// Marks the pane at `target` as the one this process runs in.
    pub fn set_current(&self, target: &DisplayId) -> StableId {
        let stable = self
            .find_pane(target)
            .ok()
            .flatten()
            .unwrap_or_else(|| panic!("no pane at {target}"));
        *self.current.borrow_mut() = Some(stable.clone());
        stable
    }

    /// Stable ID of the pane currently at `target`.
    pub fn stable(&self, target: &str) -> StableId {
        let target: DisplayId = target.parse().unwrap();
        self.find_pane(&target)
            .ok()
            .flatten()
            .unwrap_or_else(|| panic!("no pane at {target}"))
    }

    /// Removes a pane without recording a call, as another client would.
    pub fn remove_externally(&self, pane_id: &str) {
        self.remove_pane(pane_id);
    }

    pub fn calls(&self) -> Vec<TmuxCall> {
        self.calls.borrow().clone()
    }

    /// Pane IDs in the order they were killed.
    pub fn killed(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                TmuxCall::KillPane { pane_id } => Some(pane_id.clone()),
                _ => None,
            })
            .collect()
    }

    /// IDs of every live pane, sorted.
    pub fn live_panes(&self) -> Vec<String> {
        let mut panes: Vec<String> = self
            .sessions
            .borrow()
            .iter()
            .flat_map(|s| s.windows.iter())
            .flat_map(|w| w.panes.iter().cloned())
            .collect();
        panes.sort();
        panes
    }

    fn window(&self, index: u32, panes: usize) -> FakeWindow {
        FakeWindow {
            index,
            id: format!("@{}", self.next()),
            panes: (0..panes).map(|_| format!("%{}", self.next())).collect(),
        }
    }

    fn next(&self) -> u32 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    fn remove_pane(&self, pane_id: &str) -> bool {
        let mut sessions = self.sessions.borrow_mut();
        let mut removed = false;

        for session in sessions.iter_mut() {
            for window in session.windows.iter_mut() {
                let before = window.panes.len();
                window.panes.retain(|p| p != pane_id);
                removed |= window.panes.len() != before;
            }

            let before = session.windows.len();
            session.windows.retain(|w| !w.panes.is_empty());
            if self.renumber_windows.get() && session.windows.len() != before {
                for (index, window) in session.windows.iter_mut().enumerate() {
                    window.index = index as u32;
                }
            }
        }

        sessions.retain(|s| !s.windows.is_empty());
        removed
    }

    fn record(&self, call: TmuxCall) {
        self.calls.borrow_mut().push(call);
    }

    fn missing(command: &str, target: &str) -> TmuxError {
        TmuxError::Failed {
            command: command.to_string(),
            stderr: format!("can't find {target}"),
        }
    }
}

impl Multiplexer for FakeTmux {
    fn list_sessions(&self) -> Result<Vec<String>, TmuxError> {
        Ok(self.sessions.borrow().iter().map(|s| s.name.clone()).collect())
    }

    fn list_windows(&self, session: &str) -> Result<Vec<u32>, TmuxError> {
        let sessions = self.sessions.borrow();
        let session = sessions
            .iter()
            .find(|s| s.name == session)
            .ok_or_else(|| Self::missing("list-windows", session))?;
        Ok(session.windows.iter().map(|w| w.index).collect())
    }

    fn list_panes(
        &self,
        session: &str,
        window_index: u32,
    ) -> Result<Vec<u32>, TmuxError> {
        let sessions = self.sessions.borrow();
        let window = sessions
            .iter()
            .find(|s| s.name == session)
            .and_then(|s| s.windows.iter().find(|w| w.index == window_index))
            .ok_or_else(|| Self::missing("list-panes", session))?;
        Ok((0..window.panes.len() as u32).collect())
    }

    fn find_pane(
        &self,
        target: &DisplayId,
    ) -> Result<Option<StableId>, TmuxError> {
        let sessions = self.sessions.borrow();
        let found = sessions
            .iter()
            .find(|s| s.name == target.session)
            .and_then(|s| {
                s.windows.iter().find(|w| w.index == target.window_index)
            })
            .and_then(|w| {
                w.panes.get(target.pane_index as usize).map(|pane| {
                    StableId::new(&target.session, &w.id, pane)
                })
            });
        Ok(found)
    }

    fn current_pane(&self) -> Result<Option<StableId>, TmuxError> {
        Ok(self.current.borrow().clone())
    }

    fn new_session(
        &self,
        name: &str,
        work_dir: &Path,
    ) -> Result<(), TmuxError> {
        if self.sessions.borrow().iter().any(|s| s.name == name) {
            return Err(TmuxError::Failed {
                command: "new-session".into(),
                stderr: format!("duplicate session: {name}"),
            });
        }

        let window = self.window(0, 1);
        self.sessions.borrow_mut().push(FakeSession {
            name: name.to_string(),
            windows: vec![window],
        });
        self.record(TmuxCall::NewSession {
            name: name.to_string(),
            work_dir: work_dir.to_path_buf(),
        });
        Ok(())
    }

    fn rename_session(&self, from: &str, to: &str) -> Result<(), TmuxError> {
        let mut sessions = self.sessions.borrow_mut();
        let session = sessions
            .iter_mut()
            .find(|s| s.name == from)
            .ok_or_else(|| Self::missing("rename-session", from))?;
        session.name = to.to_string();
        drop(sessions);

        self.record(TmuxCall::RenameSession {
            from: from.to_string(),
            to: to.to_string(),
        });
        Ok(())
    }

    fn kill_pane(&self, pane: &StableId) -> Result<(), TmuxError> {
        if !self.remove_pane(&pane.pane_id) {
            return Err(Self::missing("kill-pane", &pane.pane_id));
        }
        self.record(TmuxCall::KillPane {
            pane_id: pane.pane_id.clone(),
        });
        Ok(())
    }

    fn attach(&self, target: &str) -> Result<(), TmuxError> {
        self.record(TmuxCall::Attach {
            target: target.to_string(),
        });
        Ok(())
    }

    fn capture_pane(&self, target: &str) -> Result<String, TmuxError> {
        Ok(format!("contents of {target}"))
    }
}
