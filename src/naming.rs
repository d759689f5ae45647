//! Session naming: sanitizing and sequence allocation.
use std::path::Path;

use regex::Regex;

/// Characters tmux uses as target separators (`session:window.pane`).
const RESERVED_CHARS: [char; 2] = ['.', ':'];
const RESERVED_REPLACEMENT: char = '_';

/// Replaces characters a session name cannot carry with `_`.
///
/// # Examples
/// ```
/// # use tsesh::naming::sanitize_session_name;
/// assert_eq!(sanitize_session_name("my.app:v2"), "my_app_v2");
/// ```
pub fn sanitize_session_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if RESERVED_CHARS.contains(&c) {
                RESERVED_REPLACEMENT
            } else {
                c
            }
        })
        .collect()
}

/// Returns the next free `<base> - S<NN>` name.
///
/// The sequence is one past the highest sequence already held by a running
/// session with the same base, or `01` if there is none. Gaps are never
/// filled. Sequences above 99 simply grow wider.
///
/// The result is only collision-free against `running_sessions`, so list them
/// right before calling this and spawn right after.
///
/// # Examples
/// ```
/// # use tsesh::naming::allocate;
/// let running = ["proj - S01".to_string(), "proj - S02".to_string()];
/// assert_eq!(allocate("proj", &running), "proj - S03");
/// assert_eq!(allocate("other", &running), "other - S01");
/// ```
pub fn allocate(base_name: &str, running_sessions: &[String]) -> String {
    let base = sanitize_session_name(base_name);
    let pattern = format!(r"^{} - S(\d+)$", regex::escape(&base));
    let re = Regex::new(&pattern).unwrap();

    let next = running_sessions
        .iter()
        .filter_map(|name| re.captures(name))
        .filter_map(|caps| caps[1].parse::<u64>().ok())
        .max()
        .map_or(1, |max| max + 1);

    format!("{base} - S{next:02}")
}

/// Base session name for a directory: its final component, or the whole
/// path when there is none (e.g. `/`).
pub fn base_name_for(dir: &Path) -> String {
    dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sessions(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn first_session_for_base() {
        assert_eq!(allocate("proj", &[]), "proj - S01");
        assert_eq!(
            allocate("proj", &sessions(&["other - S01", "proj", "misc"])),
            "proj - S01"
        );
    }

    #[yare::parameterized(
        one = { 1 },
        four = { 4 },
        nine = { 9 },
    )]
    fn follows_existing_sequence(k: u32) {
        let mut running: Vec<String> =
            (1..=k).map(|n| format!("b - S{n:02}")).collect();
        running.push("unrelated".into());
        running.push("bb - S07".into());

        assert_eq!(allocate("b", &running), format!("b - S{:02}", k + 1));
    }

    #[test]
    fn continues_after_running_sessions() {
        let running = sessions(&["proj - S01", "proj - S02", "other"]);
        assert_eq!(allocate("proj", &running), "proj - S03");
    }

    #[test]
    fn uses_max_not_count() {
        let running = sessions(&["proj - S07", "proj - S02"]);
        assert_eq!(allocate("proj", &running), "proj - S08");
    }

    #[test]
    fn ignores_leading_zeros_and_grows_past_two_digits() {
        assert_eq!(allocate("p", &sessions(&["p - S009"])), "p - S10");
        assert_eq!(allocate("p", &sessions(&["p - S99"])), "p - S100");
        assert_eq!(allocate("p", &sessions(&["p - S100"])), "p - S101");
    }

    #[test]
    fn sanitizes_reserved_characters() {
        let running = sessions(&["a_b_c - S01", "a.b:c - S05"]);
        assert_eq!(allocate("a.b:c", &running), allocate("a_b_c", &running));
        assert_eq!(allocate("a.b:c", &running), "a_b_c - S02");
    }

    #[test]
    fn treats_base_as_literal_text() {
        let running = sessions(&["a+b - S03", "aab - S09"]);
        assert_eq!(allocate("a+b", &running), "a+b - S04");
    }

    #[test]
    fn rejects_suffix_lookalikes() {
        let running = sessions(&["proj - S02 copy", "proj - Sxx", "proj -S04"]);
        assert_eq!(allocate("proj", &running), "proj - S01");
    }

    #[test]
    fn base_name_from_directory() {
        assert_eq!(base_name_for(Path::new("/home/u/work")), "work");
        assert_eq!(base_name_for(Path::new("/home/u/my.app/")), "my.app");
        assert_eq!(base_name_for(Path::new("/")), "/");
    }
}
