use tracing::debug;

use crate::tmux::{DisplayId, Multiplexer, TmuxError};

/// Lists every live pane as a [`DisplayId`], session by session, then window
/// by window, then pane by pane.
///
/// The result is a snapshot for a picker; it goes stale as soon as any pane
/// is removed.
pub fn enumerate(tmux: &impl Multiplexer) -> Result<Vec<DisplayId>, TmuxError> {
    let mut targets = Vec::new();

    for session in tmux.list_sessions()? {
        for window_index in tmux.list_windows(&session)? {
            let panes = tmux.list_panes(&session, window_index)?;
            if panes.is_empty() {
                debug!(%session, window_index, "skipping window without panes");
                continue;
            }

            targets.extend(
                panes
                    .into_iter()
                    .map(|pane| DisplayId::new(&session, window_index, pane)),
            );
        }
    }

    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tmux::fake::FakeTmux;

    fn rendered(targets: &[DisplayId]) -> Vec<String> {
        targets.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn no_server_means_no_targets() {
        assert!(enumerate(&FakeTmux::new()).unwrap().is_empty());
    }

    #[test]
    fn walks_sessions_windows_then_panes() {
        let tmux = FakeTmux::new()
            .with_session("proj - S01", &[2, 1])
            .with_session("other", &[1]);

        assert_eq!(
            rendered(&enumerate(&tmux).unwrap()),
            vec![
                "proj - S01:0.0",
                "proj - S01:0.1",
                "proj - S01:1.0",
                "other:0.0",
            ]
        );
    }

    #[test]
    fn skips_windows_without_panes() {
        let tmux = FakeTmux::new()
            .with_session("work", &[1])
            .with_empty_window("work", 5);

        assert_eq!(rendered(&enumerate(&tmux).unwrap()), vec!["work:0.0"]);
    }
}
