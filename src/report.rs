//! Text formatting for `list`, `listwin` and the `gui_switch` picker.
//!
//! Row layouts are kept byte-for-byte compatible with existing scripts that
//! scrape this output:
//!
//! ```text
//!   0  -  3  main
//!   1  *  0  mail
//! 0x03800004   1  Terminal
//! ```

use crate::state::{DesktopState, Window, Workspace};
use crate::traits::PickRow;
use std::fmt::Write;

/// `<index 3-wide>  <*|->  <window count 2-wide>  <name>`
pub fn workspace_row(ws: &Workspace, current: bool, windows: usize) -> String {
    let marker = if current { '*' } else { '-' };
    format!("{:>3}  {} {:>2}  {}", ws.index, marker, windows, ws.name)
}

/// `<id> <assigned index 3-wide>  <title>`
pub fn window_row(w: &Window) -> String {
    format!("{} {:>3}  {}", w.id, w.assigned.to_string(), w.name)
}

/// One row per workspace.  Unassigned windows are not counted anywhere.
pub fn workspace_table(state: &DesktopState) -> String {
    let mut out = String::new();
    for ws in &state.workspaces {
        let row = workspace_row(ws, ws.index == state.current, state.window_count(ws.index));
        let _ = writeln!(out, "{}", row);
    }
    out
}

/// One row per window, in the order given.
pub fn window_table(windows: &[Window]) -> String {
    let mut out = String::new();
    for w in windows {
        let _ = writeln!(out, "{}", window_row(w));
    }
    out
}

/// Rows for the workspace picker, current one marked.
pub fn pick_rows(state: &DesktopState) -> Vec<PickRow> {
    state
        .workspaces
        .iter()
        .map(|ws| PickRow {
            index: ws.index,
            label: ws.name.clone(),
            current: ws.index == state.current,
        })
        .collect()
}
