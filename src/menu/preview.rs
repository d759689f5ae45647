use std::fs;
use std::path::Path;

use crate::picker::Preview;
use crate::tmux::Multiplexer;

/// Preview text for `line`. Failures are rendered as text, not returned.
pub fn preview_text(
    tmux: &impl Multiplexer,
    preview: &Preview,
    line: &str,
) -> String {
    match preview {
        Preview::Pane => {
            tmux.capture_pane(line).unwrap_or_else(|e| e.to_string())
        }
        Preview::Directory { root } => {
            let path = match root {
                Some(root) => root.join(line),
                None => Path::new(line).to_path_buf(),
            };
            list_directory(&path)
        }
    }
}

fn list_directory(path: &Path) -> String {
    let entries = match fs::read_dir(path) {
        Ok(entries) => entries,
        Err(e) => return format!("{}: {e}", path.display()),
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            match entry.file_type() {
                Ok(file_type) if file_type.is_dir() => format!("{name}/"),
                _ => name,
            }
        })
        .collect();
    names.sort();

    names.join("\n")
}
