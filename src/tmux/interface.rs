use std::env;
use std::path::Path;
use std::process::Command;

use thiserror::Error;
use tracing::{debug, info};

use crate::tmux::target::{DisplayId, StableId};

const TMUX_FIELD_SEPARATOR: char = '\t';
const TMUX_LINE_SEPARATOR: char = '\n';

/// Errors from talking to the tmux server.
#[derive(Debug, Error)]
pub enum TmuxError {
    #[error("failed to run 'tmux {command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("'tmux {command}' failed: {stderr}")]
    Failed { command: String, stderr: String },
    #[error("failed to parse tmux output '{line}': {reason}")]
    Parse { line: String, reason: String },
}

/// The narrow slice of tmux this tool relies on.
///
/// Every call is a blocking round-trip to the server. Implementations must
/// report "no server running" as an empty listing, not as an error.
pub trait Multiplexer {
    /// Names of all live sessions, in tmux listing order.
    fn list_sessions(&self) -> Result<Vec<String>, TmuxError>;

    /// Display indices of the windows of `session`, ascending.
    fn list_windows(&self, session: &str) -> Result<Vec<u32>, TmuxError>;

    /// Display indices of the panes of `session:window_index`, ascending.
    fn list_panes(
        &self,
        session: &str,
        window_index: u32,
    ) -> Result<Vec<u32>, TmuxError>;

    /// Looks up the pane currently sitting at `target`'s display position.
    ///
    /// Returns `Ok(None)` when nothing lives there anymore.
    fn find_pane(
        &self,
        target: &DisplayId,
    ) -> Result<Option<StableId>, TmuxError>;

    /// The pane this process runs in, if it runs inside tmux at all.
    fn current_pane(&self) -> Result<Option<StableId>, TmuxError>;

    fn new_session(
        &self,
        name: &str,
        work_dir: &Path,
    ) -> Result<(), TmuxError>;

    fn rename_session(&self, from: &str, to: &str) -> Result<(), TmuxError>;

    fn kill_pane(&self, pane: &StableId) -> Result<(), TmuxError>;

    /// Attaches to `target`, or switches the current client when already
    /// inside tmux.
    fn attach(&self, target: &str) -> Result<(), TmuxError>;

    /// Visible contents of the pane at `target`, as plain text.
    fn capture_pane(&self, target: &str) -> Result<String, TmuxError>;
}

/// [`Multiplexer`] backed by the `tmux` binary on `PATH`.
#[derive(Debug, Default, Clone)]
pub struct Tmux;

impl Tmux {
    pub fn new() -> Self {
        Self
    }

    /// Whether this process runs inside a tmux client.
    pub fn is_inside() -> bool {
        env::var_os("TMUX").is_some()
    }

    fn is_server_running(&self) -> Result<bool, TmuxError> {
        let status = Command::new("tmux")
            .arg("has-session")
            .output()
            .map_err(|source| TmuxError::Spawn {
                command: "has-session".into(),
                source,
            })?
            .status;

        Ok(status.success())
    }
}

impl Multiplexer for Tmux {
    fn list_sessions(&self) -> Result<Vec<String>, TmuxError> {
        if !self.is_server_running()? {
            debug!("tmux server not running");
            return Ok(Vec::new());
        }

        let output = run(&["list-sessions", "-F", "#{session_name}"])?;
        Ok(lines(&output).map(str::to_string).collect())
    }

    fn list_windows(&self, session: &str) -> Result<Vec<u32>, TmuxError> {
        let target = exact_session(session);
        let output =
            run(&["list-windows", "-t", &target, "-F", "#{window_index}"])?;
        lines(&output).map(parse_index).collect()
    }

    fn list_panes(
        &self,
        session: &str,
        window_index: u32,
    ) -> Result<Vec<u32>, TmuxError> {
        let target = format!("{}:{}", exact_session(session), window_index);
        let output =
            run(&["list-panes", "-t", &target, "-F", "#{pane_index}"])?;
        lines(&output).map(parse_index).collect()
    }

    fn find_pane(
        &self,
        target: &DisplayId,
    ) -> Result<Option<StableId>, TmuxError> {
        if !self.is_server_running()? {
            return Ok(None);
        }

        // Listing every pane rather than `-t session:window` keeps a vanished
        // window an empty result instead of a tmux error.
        let output = run(&[
            "list-panes",
            "-a",
            "-F",
            concat!(
                "#{session_name}\t#{window_index}\t#{pane_index}",
                "\t#{window_id}\t#{pane_id}"
            ),
        ])?;

        for line in lines(&output) {
            let (display, stable) = parse_pane_record(line)?;
            if &display == target {
                return Ok(Some(stable));
            }
        }

        Ok(None)
    }

    fn current_pane(&self) -> Result<Option<StableId>, TmuxError> {
        if !Tmux::is_inside() {
            return Ok(None);
        }

        let format = "#{session_name}\t#{window_id}\t#{pane_id}";
        let output = match env::var("TMUX_PANE") {
            Ok(pane) => run(&["display-message", "-p", "-t", &pane, format])?,
            Err(_) => run(&["display-message", "-p", format])?,
        };

        let line = output.trim_end_matches(TMUX_LINE_SEPARATOR);
        let mut parts = line.split(TMUX_FIELD_SEPARATOR);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(session), Some(window_id), Some(pane_id)) => {
                Ok(Some(StableId::new(session, window_id, pane_id)))
            }
            _ => Err(TmuxError::Parse {
                line: line.to_string(),
                reason: "expected session, window id and pane id".into(),
            }),
        }
    }

    fn new_session(
        &self,
        name: &str,
        work_dir: &Path,
    ) -> Result<(), TmuxError> {
        let work_dir = work_dir.to_string_lossy();
        run(&["new-session", "-d", "-s", name, "-c", &work_dir])?;
        info!(session = name, work_dir = %work_dir, "created session");
        Ok(())
    }

    fn rename_session(&self, from: &str, to: &str) -> Result<(), TmuxError> {
        run(&["rename-session", "-t", &exact_session(from), to])?;
        info!(from, to, "renamed session");
        Ok(())
    }

    fn kill_pane(&self, pane: &StableId) -> Result<(), TmuxError> {
        run(&["kill-pane", "-t", &pane.pane_id])?;
        info!(pane = %pane, "killed pane");
        Ok(())
    }

    fn attach(&self, target: &str) -> Result<(), TmuxError> {
        let attach_cmd = if Tmux::is_inside() {
            "switch-client"
        } else {
            "attach-session"
        };

        // Attaching takes over the terminal, so stdio must be inherited.
        let status = Command::new("tmux")
            .args([attach_cmd, "-t", target])
            .status()
            .map_err(|source| TmuxError::Spawn {
                command: attach_cmd.into(),
                source,
            })?;

        if !status.success() {
            return Err(TmuxError::Failed {
                command: format!("{attach_cmd} -t {target}"),
                stderr: status.to_string(),
            });
        }

        Ok(())
    }

    fn capture_pane(&self, target: &str) -> Result<String, TmuxError> {
        run(&["capture-pane", "-p", "-t", target])
    }
}

/// Runs `tmux <args>` and returns its stdout.
fn run(args: &[&str]) -> Result<String, TmuxError> {
    let command = args.join(" ");
    debug!(%command, "tmux");

    let output = Command::new("tmux").args(args).output().map_err(|source| {
        TmuxError::Spawn {
            command: command.clone(),
            source,
        }
    })?;

    if !output.status.success() {
        return Err(TmuxError::Failed {
            command,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// `=name` makes tmux match the session name exactly instead of by prefix.
fn exact_session(session: &str) -> String {
    format!("={session}")
}

fn lines(output: &str) -> impl Iterator<Item = &str> {
    output
        .split(TMUX_LINE_SEPARATOR)
        .filter(|line| !line.trim().is_empty())
}

fn parse_index(value: &str) -> Result<u32, TmuxError> {
    value.trim().parse().map_err(|_| TmuxError::Parse {
        line: value.to_string(),
        reason: "expected a numeric index".into(),
    })
}

fn parse_pane_record(line: &str) -> Result<(DisplayId, StableId), TmuxError> {
    let mut parts = line.split(TMUX_FIELD_SEPARATOR);

    match (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) {
        (
            Some(session),
            Some(window_index),
            Some(pane_index),
            Some(window_id),
            Some(pane_id),
        ) => Ok((
            DisplayId::new(
                session,
                parse_index(window_index)?,
                parse_index(pane_index)?,
            ),
            StableId::new(session, window_id, pane_id),
        )),
        _ => Err(TmuxError::Parse {
            line: line.to_string(),
            reason: "expected five tab-separated fields".into(),
        }),
    }
}
