//! Where candidate directories for a new session come from.
use std::path::PathBuf;
use std::process::Command;

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use tracing::debug;

use crate::picker::Preview;

/// Binaries tried, in order, for the recursive walk.
const WALKERS: [&str; 2] = ["fd", "fdfind"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SourceKind {
    /// Recursive walk of the root directory, honoring ignore files (fd)
    #[default]
    Walk,
    /// Frecency-ranked directories (zoxide)
    Zoxide,
}

pub trait DirectorySource {
    /// Candidate lines for the picker.
    fn list(&self) -> Result<Vec<String>>;

    /// Directory a picked line stands for.
    fn resolve(&self, line: &str) -> PathBuf;

    fn preview(&self) -> Preview;
}

/// Every directory below `root`, listed relative to it.
#[derive(Debug, Clone)]
pub struct Walk {
    pub root: PathBuf,
}

impl DirectorySource for Walk {
    fn list(&self) -> Result<Vec<String>> {
        let Some(walker) = WALKERS.iter().find(|w| which::which(w).is_ok())
        else {
            bail!("Neither fd nor fdfind is installed");
        };

        let output = Command::new(walker)
            .args(["--type", "d", "--hidden", "--exclude", ".git"])
            .arg("--base-directory")
            .arg(&self.root)
            .output()
            .with_context(|| format!("Failed to run {walker}"))?;

        if !output.status.success() {
            bail!(
                "{walker} failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        let mut dirs = vec![".".to_string()];
        dirs.extend(parse_lines(&output.stdout));
        debug!(root = %self.root.display(), count = dirs.len(), "walked");
        Ok(dirs)
    }

    fn resolve(&self, line: &str) -> PathBuf {
        let line = line.trim_end_matches('/');
        if line == "." {
            return self.root.clone();
        }
        self.root.join(line)
    }

    fn preview(&self) -> Preview {
        Preview::Directory {
            root: Some(self.root.clone()),
        }
    }
}

/// Directories known to zoxide, most frecent first.
#[derive(Debug, Clone, Default)]
pub struct Zoxide;

impl DirectorySource for Zoxide {
    fn list(&self) -> Result<Vec<String>> {
        let output = Command::new("zoxide")
            .args(["query", "--list"])
            .output()
            .context("Failed to run zoxide")?;

        if !output.status.success() {
            bail!(
                "zoxide failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(parse_lines(&output.stdout))
    }

    fn resolve(&self, line: &str) -> PathBuf {
        PathBuf::from(line)
    }

    fn preview(&self) -> Preview {
        Preview::Directory { root: None }
    }
}

/// Builds the source for `kind`. `root` is only consulted by the walk.
pub fn source_for(
    kind: SourceKind,
    root: impl FnOnce() -> Result<PathBuf>,
) -> Result<Box<dyn DirectorySource>> {
    let source: Box<dyn DirectorySource> = match kind {
        SourceKind::Walk => Box::new(Walk { root: root()? }),
        SourceKind::Zoxide => Box::new(Zoxide),
    };
    Ok(source)
}

/// Directory lines from a walker's stdout, without trailing slashes.
fn parse_lines(stdout: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(|line| line.trim_end_matches('/'))
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_resolves_relative_to_root() {
        let walk = Walk {
            root: PathBuf::from("/home/u"),
        };

        assert_eq!(walk.resolve("."), PathBuf::from("/home/u"));
        assert_eq!(walk.resolve("src/app/"), PathBuf::from("/home/u/src/app"));
    }

    #[test]
    fn zoxide_lines_are_absolute() {
        assert_eq!(Zoxide.resolve("/srv/www"), PathBuf::from("/srv/www"));
        assert_eq!(Zoxide.preview(), Preview::Directory { root: None });
    }

    #[test]
    fn strips_trailing_slashes_and_blank_lines() {
        assert_eq!(parse_lines(b"a/\n\nb/c/\n"), vec!["a", "b/c"]);
    }

    #[test]
    fn zoxide_listing_keeps_frecency_order() {
        let stdout = b"/home/u/work\n/srv/www\n/home/u\n";
        assert_eq!(
            parse_lines(stdout),
            vec!["/home/u/work", "/srv/www", "/home/u"]
        );
    }

    #[test]
    fn zoxide_never_asks_for_a_root() {
        let source = source_for(SourceKind::Zoxide, || {
            anyhow::bail!("root must not be resolved")
        })
        .unwrap();

        assert_eq!(source.preview(), Preview::Directory { root: None });
    }

    #[test]
    fn walk_uses_the_given_root() {
        let source =
            source_for(SourceKind::Walk, || Ok("/home/u".into())).unwrap();

        assert_eq!(source.resolve("."), PathBuf::from("/home/u"));
    }

    #[test]
    fn walk_reports_a_bad_root() {
        let result =
            source_for(SourceKind::Walk, || anyhow::bail!("no such root"));

        assert!(result.is_err());
    }
}
