use std::path::PathBuf;

use thiserror::Error;

/// Failures the user caused and can fix, as opposed to tool failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("directory does not exist: {}", .0.display())]
    MissingDirectory(PathBuf),
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("picked an unknown pane target: {0}")]
    BadTarget(String),
}
