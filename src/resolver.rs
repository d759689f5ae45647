//! Turning picked display identifiers into tmux mutations.
//!
//! Display indices shift whenever a pane is removed, so nothing here resolves
//! a [`DisplayId`] ahead of time. Each kill looks its target up right before
//! issuing the kill, and kills run in an order where one kill cannot renumber
//! a target that is still pending.

use std::cmp::Reverse;

use anyhow::{Context, Result};
use indexmap::IndexSet;
use tracing::{debug, info, warn};

use crate::naming::sanitize_session_name;
use crate::prompt::Prompter;
use crate::tmux::{DisplayId, Multiplexer, StableId};

/// What to do with the picked targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetAction {
    Switch,
    Rename,
    Kill,
}

/// Summary of a finished batch.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Report {
    pub killed: usize,
    /// Targets that were already gone when their turn came.
    pub skipped: usize,
    pub renamed: usize,
    pub switched_to: Option<String>,
}

/// Applies `action` to `selected`.
///
/// `current_pane` is the pane this process runs in, if any. Killing it is
/// deferred until every other target is gone, since it may take this process
/// down with it.
pub fn resolve_and_act(
    tmux: &impl Multiplexer,
    prompter: &mut impl Prompter,
    selected: &[DisplayId],
    action: TargetAction,
    current_pane: Option<&StableId>,
) -> Result<Report> {
    match action {
        TargetAction::Kill => kill(tmux, selected, current_pane),
        TargetAction::Rename => rename(tmux, prompter, selected),
        TargetAction::Switch => switch(tmux, selected),
    }
}

/// Looks up the pane at `target`'s current display position.
///
/// Call this adjacent to the mutation it guards; the answer is stale after
/// any removal.
pub fn resolve(
    tmux: &impl Multiplexer,
    target: &DisplayId,
) -> Result<Option<StableId>> {
    tmux.find_pane(target)
        .with_context(|| format!("Failed to resolve pane {target}"))
}

/// Order in which kills cannot disturb each other's display indices.
///
/// Removing a pane only renumbers higher-indexed panes in its window, and
/// removing a window only renumbers higher-indexed windows in its session.
/// Walking each session from the highest window and pane index down keeps
/// every pending target where the user saw it. Duplicates are dropped so a
/// target is never killed twice under a shifted index.
fn kill_order(selected: &[DisplayId]) -> Vec<&DisplayId> {
    let sessions: IndexSet<&str> =
        selected.iter().map(|t| t.session.as_str()).collect();
    let mut unique: Vec<&DisplayId> =
        selected.iter().collect::<IndexSet<_>>().into_iter().collect();

    unique.sort_by_key(|t| {
        (
            sessions.get_index_of(t.session.as_str()),
            Reverse(t.window_index),
            Reverse(t.pane_index),
        )
    });
    unique
}

fn kill(
    tmux: &impl Multiplexer,
    selected: &[DisplayId],
    current_pane: Option<&StableId>,
) -> Result<Report> {
    let mut report = Report::default();
    let mut deferred_self = None;

    for target in kill_order(selected) {
        let Some(pane) = resolve(tmux, target)? else {
            warn!(%target, "pane already gone, skipping");
            report.skipped += 1;
            continue;
        };

        if current_pane.is_some_and(|current| current.pane_id == pane.pane_id)
        {
            debug!(%target, "deferring kill of the invoking pane");
            deferred_self = Some(pane);
            continue;
        }

        tmux.kill_pane(&pane)
            .with_context(|| format!("Failed to kill pane {target}"))?;
        report.killed += 1;
    }

    if let Some(pane) = deferred_self {
        info!(%pane, "killing the invoking pane last");
        tmux.kill_pane(&pane)
            .with_context(|| format!("Failed to kill pane {pane}"))?;
        report.killed += 1;
    }

    Ok(report)
}

fn rename(
    tmux: &impl Multiplexer,
    prompter: &mut impl Prompter,
    selected: &[DisplayId],
) -> Result<Report> {
    let mut report = Report::default();
    let sessions: IndexSet<&str> =
        selected.iter().map(|t| t.session.as_str()).collect();

    for session in sessions {
        let label = format!("Rename '{session}' to");
        let Some(answer) = prompter.prompt(&label, session)? else {
            debug!(session, "rename cancelled");
            continue;
        };

        let new_name = sanitize_session_name(answer.trim());
        if new_name.is_empty() || new_name == session {
            continue;
        }

        tmux.rename_session(session, &new_name).with_context(|| {
            format!("Failed to rename session '{session}' to '{new_name}'")
        })?;
        report.renamed += 1;
    }

    Ok(report)
}

fn switch(tmux: &impl Multiplexer, selected: &[DisplayId]) -> Result<Report> {
    let Some(target) = selected.first() else {
        return Ok(Report::default());
    };

    let target = target.to_string();
    tmux.attach(&target)
        .with_context(|| format!("Failed to switch to {target}"))?;

    Ok(Report {
        switched_to: Some(target),
        ..Report::default()
    })
}
