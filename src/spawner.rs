use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::naming::{allocate, base_name_for};
use crate::tmux::Multiplexer;

/// Creates a detached session `session_name` in `work_dir`, then attaches to
/// it (or switches to it from inside tmux).
///
/// `work_dir` must be an existing directory; callers validate it.
pub fn spawn_and_attach(
    tmux: &impl Multiplexer,
    session_name: &str,
    work_dir: &Path,
) -> Result<()> {
    tmux.new_session(session_name, work_dir)
        .with_context(|| format!("Failed to create session '{session_name}'"))?;

    tmux.attach(&format!("={session_name}"))
        .with_context(|| format!("Failed to attach to '{session_name}'"))?;

    Ok(())
}

/// Spawns a session for `work_dir` under the next free sequenced name and
/// returns that name.
///
/// Running sessions are listed right before allocating to keep the window
/// for a concurrent name clash small.
pub fn spawn_sequenced(
    tmux: &impl Multiplexer,
    work_dir: &Path,
) -> Result<String> {
    let running = tmux
        .list_sessions()
        .context("Failed to list running sessions")?;
    let session_name = allocate(&base_name_for(work_dir), &running);
    info!(%session_name, work_dir = %work_dir.display(), "spawning session");

    spawn_and_attach(tmux, &session_name, work_dir)?;
    Ok(session_name)
}
