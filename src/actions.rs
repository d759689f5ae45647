//! The `new` and `manage` flows, from picker to tmux.
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::CommandFactory;
use tracing::{debug, info};

use crate::cli::{Args, Commands};
use crate::dir_source::{DirectorySource, source_for};
use crate::error::AppError;
use crate::farewell::{Farewell, RandomFarewell};
use crate::picker::{PickerConfig, PickerKey, Preview, Selector, selector_for};
use crate::prompt::{Prompter, TerminalPrompter};
use crate::resolver::{Report, TargetAction, resolve_and_act};
use crate::spawner::spawn_sequenced;
use crate::tmux::{DisplayId, Multiplexer, Tmux};
use crate::topology::enumerate;

/// How a flow ended when it did not fail.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Spawned(String),
    Managed(Report),
    NoSessions,
    Cancelled(&'static str),
}

pub fn handle(args: Args) -> Result<()> {
    let tmux = Tmux::new();
    let mut farewell = RandomFarewell;

    let outcome = match args.command {
        Commands::New { dir: Some(dir), .. } => new_session_in(&tmux, &dir)?,
        Commands::New {
            dir: None,
            source,
            root,
        } => {
            let source =
                source_for(source.unwrap_or_default(), || match root {
                    Some(root) => validate_dir(&root),
                    None => home_dir(),
                })?;
            let mut selector = selector_for(args.picker);

            new_session(&tmux, &mut selector, source.as_ref(), &mut farewell)?
        }
        Commands::Manage => {
            let mut selector = selector_for(args.picker);
            manage(&tmux, &mut selector, &mut TerminalPrompter, &mut farewell)?
        }
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Args::command(),
                "tsesh",
                &mut io::stdout(),
            );
            return Ok(());
        }
    };

    report(&outcome);
    Ok(())
}

/// Opens a session in a directory picked from `source`.
pub fn new_session(
    tmux: &impl Multiplexer,
    selector: &mut impl Selector,
    source: &dyn DirectorySource,
    farewell: &mut impl Farewell,
) -> Result<Outcome> {
    let candidates = source.list()?;
    let config = PickerConfig {
        prompt: "dir> ".into(),
        preview: Some(source.preview()),
        ..PickerConfig::default()
    };

    let Some(selection) = selector.select(&candidates, &config)? else {
        return Ok(Outcome::Cancelled(farewell.message()));
    };
    let Some(line) = selection.lines.first() else {
        return Ok(Outcome::Cancelled(farewell.message()));
    };

    new_session_in(tmux, &source.resolve(line))
}

/// Opens a session in `dir` without asking.
pub fn new_session_in(tmux: &impl Multiplexer, dir: &Path) -> Result<Outcome> {
    let work_dir = validate_dir(dir)?;
    let name = spawn_sequenced(tmux, &work_dir)?;
    Ok(Outcome::Spawned(name))
}

/// Lets the user pick panes and switch to, rename or kill them.
pub fn manage(
    tmux: &impl Multiplexer,
    selector: &mut impl Selector,
    prompter: &mut impl Prompter,
    farewell: &mut impl Farewell,
) -> Result<Outcome> {
    let targets = enumerate(tmux).context("Failed to list tmux panes")?;
    if targets.is_empty() {
        return Ok(Outcome::NoSessions);
    }

    let candidates: Vec<String> =
        targets.iter().map(ToString::to_string).collect();
    let Some(selection) = selector.select(&candidates, &manage_config())?
    else {
        return Ok(Outcome::Cancelled(farewell.message()));
    };

    let selected = selection
        .lines
        .iter()
        .map(|line| {
            line.parse::<DisplayId>()
                .map_err(|_| AppError::BadTarget(line.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let action = match selection.key {
        PickerKey::Enter => TargetAction::Switch,
        PickerKey::CtrlX => TargetAction::Kill,
        PickerKey::CtrlR => TargetAction::Rename,
    };
    debug!(?action, count = selected.len(), "acting on selection");

    let current_pane =
        tmux.current_pane().context("Failed to query current pane")?;
    let report = resolve_and_act(
        tmux,
        prompter,
        &selected,
        action,
        current_pane.as_ref(),
    )?;

    Ok(Outcome::Managed(report))
}

fn manage_config() -> PickerConfig {
    PickerConfig {
        prompt: "tmux> ".into(),
        header: Some("Enter: switch | C-x: kill | C-r: rename".into()),
        preview: Some(Preview::Pane),
        expect: vec![PickerKey::CtrlX, PickerKey::CtrlR],
        multi: true,
        ..PickerConfig::default()
    }
}

/// Expands a leading `~`, checks that `dir` is an existing directory and
/// returns its canonical absolute path.
pub fn validate_dir(dir: &Path) -> Result<PathBuf> {
    let dir = expand_home(dir)?;

    if !dir.exists() {
        return Err(AppError::MissingDirectory(dir).into());
    }
    if !dir.is_dir() {
        return Err(AppError::NotADirectory(dir).into());
    }

    dir.canonicalize()
        .with_context(|| format!("Failed to resolve {}", dir.display()))
}

fn expand_home(dir: &Path) -> Result<PathBuf> {
    match dir.strip_prefix("~") {
        Ok(rest) => Ok(home_dir()?.join(rest)),
        Err(_) => Ok(dir.to_path_buf()),
    }
}

fn home_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .ok_or_else(|| anyhow::anyhow!("Failed to determine HOME directory"))
}

fn report(outcome: &Outcome) {
    match outcome {
        Outcome::Spawned(name) => info!(%name, "session ready"),
        Outcome::Managed(report) => info!(?report, "done"),
        Outcome::NoSessions => println!("No tmux sessions are running."),
        Outcome::Cancelled(message) => println!("{message}"),
    }
}
