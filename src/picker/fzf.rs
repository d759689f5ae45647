use std::borrow::Cow;
use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::{Context, Result, bail};
use shell_escape::escape;
use tracing::debug;

use crate::picker::{PickerConfig, PickerKey, Preview, Selection, Selector};

/// fzf exits with 1 when nothing matched and 130 when interrupted.
const FZF_NO_MATCH: i32 = 1;
const FZF_INTERRUPTED: i32 = 130;

/// [`Selector`] that runs the external `fzf` binary.
#[derive(Debug, Default)]
pub struct FzfSelector;

impl FzfSelector {
    pub fn new() -> Self {
        Self
    }

    pub fn is_available() -> bool {
        which::which("fzf").is_ok()
    }
}

impl Selector for FzfSelector {
    fn select(
        &mut self,
        candidates: &[String],
        config: &PickerConfig,
    ) -> Result<Option<Selection>> {
        let args = fzf_args(config);
        debug!(?args, candidates = candidates.len(), "running fzf");

        let mut child = Command::new("fzf")
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .context("Failed to spawn fzf")?;

        {
            let mut stdin =
                child.stdin.take().context("Failed to open fzf stdin")?;
            for candidate in candidates {
                writeln!(stdin, "{candidate}")
                    .context("Failed to write to fzf")?;
            }
        }

        let output = child.wait_with_output().context("Failed to run fzf")?;

        match output.status.code() {
            Some(0) => {}
            Some(FZF_NO_MATCH | FZF_INTERRUPTED) | None => return Ok(None),
            Some(code) => bail!("fzf exited with status {code}"),
        }

        let stdout = String::from_utf8(output.stdout)
            .context("Failed to convert fzf output to UTF-8 string")?;
        parse_output(&stdout)
    }
}

fn fzf_args(config: &PickerConfig) -> Vec<String> {
    let mut args = vec![
        "--reverse".to_string(),
        format!("--height={}", config.height),
        format!("--prompt={}", config.prompt),
        // Always print the key line so the output layout never depends on
        // which key ended the pick.
        format!("--expect={}", expect_list(&config.expect)),
    ];

    if let Some(header) = &config.header {
        args.push(format!("--header={header}"));
    }

    if config.multi {
        args.push("--multi".into());
    }

    if let Some(preview) = &config.preview {
        args.push(format!("--preview={}", preview_command(preview)));
        args.push("--preview-window=right:60%".into());
    }

    args
}

fn expect_list(expect: &[PickerKey]) -> String {
    let mut keys = vec![PickerKey::Enter];
    keys.extend(expect.iter().filter(|k| **k != PickerKey::Enter));
    keys.iter()
        .map(|k| k.fzf_name())
        .collect::<Vec<_>>()
        .join(",")
}

/// Shell command fzf runs for the preview; fzf substitutes and quotes `{}`.
fn preview_command(preview: &Preview) -> String {
    match preview {
        Preview::Pane => "tmux capture-pane -e -p -t {}".into(),
        Preview::Directory { root: None } => "ls -A -- {}".into(),
        Preview::Directory { root: Some(root) } => format!(
            "cd {} && ls -A -- {{}}",
            escape(Cow::from(root.to_string_lossy()))
        ),
    }
}

/// Splits fzf's `--expect` output: the key line, then one line per pick.
fn parse_output(stdout: &str) -> Result<Option<Selection>> {
    let mut lines = stdout.lines();

    let key_name = lines.next().unwrap_or_default();
    let Some(key) = PickerKey::from_fzf_name(key_name) else {
        bail!("Unexpected key reported by fzf: '{key_name}'");
    };

    let lines: Vec<String> = lines
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if lines.is_empty() {
        return Ok(None);
    }

    Ok(Some(Selection { key, lines }))
}
