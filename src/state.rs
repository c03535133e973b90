//! Desktop State model and the StateReader that builds it.
//!
//! A [`DesktopState`] is a strongly-typed snapshot of the environment: the
//! ordered workspaces, the current index and every window.  It is read once
//! at the start of each operation and never re-parsed inside the engine.
//!
//! The environment reports its state as `wmctrl`-style text tables.  The
//! parsers here are defensive: short or malformed rows are skipped (and
//! logged at debug level) rather than treated as errors, because the
//! environment occasionally emits partial rows while it is settling.

use crate::traits::Desktop;
use log::{debug, warn};
use std::fmt;

/// Opaque handle the environment uses to address a window (e.g.
/// `0x03800004`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(String);

impl WindowId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which workspace a window lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Assignment {
    /// Pinned outside the workspace set (panels, docks, sticky windows).
    /// Never touched by any reorder operation.
    Unassigned,
    /// Assigned to the workspace at this index.
    Workspace(usize),
}

impl Assignment {
    /// Map the environment's desktop number to an assignment.  Negative
    /// numbers are the "unassigned" sentinel.
    pub fn from_raw(raw: i64) -> Self {
        usize::try_from(raw)
            .map(Assignment::Workspace)
            .unwrap_or(Assignment::Unassigned)
    }

    pub fn index(self) -> Option<usize> {
        match self {
            Assignment::Unassigned => None,
            Assignment::Workspace(i) => Some(i),
        }
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Assignment::Unassigned => write!(f, "-1"),
            Assignment::Workspace(i) => write!(f, "{}", i),
        }
    }
}

/// One named, indexed virtual desktop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    pub index: usize,
    pub name: String,
}

/// A managed window and the slot it is assigned to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    pub id: WindowId,
    pub assigned: Assignment,
    pub name: String,
}

impl Window {
    /// Whether this window is assigned to the workspace at `index`.
    pub fn is_on(&self, index: usize) -> bool {
        self.assigned == Assignment::Workspace(index)
    }
}

/// Which windows [`read_windows`] should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowFilter {
    All,
    On(usize),
}

/// A full snapshot of the environment.
///
/// Invariants after every completed operation: workspace indices are
/// `0..len`, `current < len`, and every assigned window points below `len`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopState {
    pub workspaces: Vec<Workspace>,
    pub current: usize,
    pub windows: Vec<Window>,
}

impl DesktopState {
    /// Read a fresh snapshot from `desktop`.
    pub fn read<D: Desktop>(desktop: &D) -> Result<Self, D::Error> {
        let (mut workspaces, current) = desktop.workspaces()?;
        workspaces.sort_by_key(|w| w.index);
        if workspaces.iter().enumerate().any(|(i, w)| w.index != i) {
            warn!("workspace indices reported by the environment are not contiguous");
        }
        let windows = desktop.windows()?;
        debug!(
            "snapshot: {} workspace(s), current {}, {} window(s)",
            workspaces.len(),
            current,
            windows.len()
        );
        Ok(Self {
            workspaces,
            current,
            windows,
        })
    }

    /// Number of workspaces.
    pub fn len(&self) -> usize {
        self.workspaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workspaces.is_empty()
    }

    /// Name of the workspace at `index`.
    pub fn name(&self, index: usize) -> Option<&str> {
        self.workspaces.get(index).map(|w| w.name.as_str())
    }

    /// Names of all workspaces in order.
    pub fn names(&self) -> Vec<&str> {
        self.workspaces.iter().map(|w| w.name.as_str()).collect()
    }

    /// Windows assigned to the workspace at `index`.
    pub fn windows_on(&self, index: usize) -> impl Iterator<Item = &Window> {
        self.windows.iter().filter(move |w| w.is_on(index))
    }

    /// Ids of the windows assigned to the workspace at `index`.
    pub fn window_ids_on(&self, index: usize) -> Vec<WindowId> {
        self.windows_on(index).map(|w| w.id.clone()).collect()
    }

    pub fn window_count(&self, index: usize) -> usize {
        self.windows_on(index).count()
    }

    /// Describe the first broken invariant, if any.
    pub fn invariant_violation(&self) -> Option<String> {
        if self.workspaces.is_empty() {
            return Some("no workspaces left".into());
        }
        if let Some((i, w)) = self
            .workspaces
            .iter()
            .enumerate()
            .find(|(i, w)| w.index != *i)
        {
            return Some(format!("workspace at position {} has index {}", i, w.index));
        }
        if self.current >= self.len() {
            return Some(format!(
                "current workspace {} out of range (have {})",
                self.current,
                self.len()
            ));
        }
        self.windows
            .iter()
            .find(|w| matches!(w.assigned.index(), Some(i) if i >= self.len()))
            .map(|w| format!("window {} assigned to missing workspace {}", w.id, w.assigned))
    }
}

/// Read the windows matching `filter`, in the order the environment reports
/// them.
pub fn read_windows<D: Desktop>(desktop: &D, filter: WindowFilter) -> Result<Vec<Window>, D::Error> {
    let windows = desktop.windows()?;
    Ok(match filter {
        WindowFilter::All => windows,
        WindowFilter::On(index) => windows.into_iter().filter(|w| w.is_on(index)).collect(),
    })
}

//  Text table parsing

/// Split off the first whitespace-delimited field, returning it and the
/// untouched remainder.
fn split_field(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    match s.find(char::is_whitespace) {
        Some(end) => Some((&s[..end], &s[end..])),
        None => Some((s, "")),
    }
}

/// Parse one `wmctrl -d` row:
///
/// ```text
/// 0  * DG: 1920x1080  VP: 0,0  WA: 0,0 1920x1052  main
/// ```
///
/// The name is everything after the work-area geometry, which is either
/// `<pos> <size>` or the single token `N/A`.
fn parse_workspace_row(line: &str) -> Option<(Workspace, bool)> {
    let (index, rest) = split_field(line)?;
    let index: usize = index.parse().ok()?;
    let (marker, mut rest) = split_field(rest)?;

    loop {
        let (field, tail) = split_field(rest)?;
        rest = tail;
        if field == "WA:" {
            break;
        }
    }
    let (area, tail) = split_field(rest)?;
    rest = tail;
    if area != "N/A" {
        let (_size, tail) = split_field(rest)?;
        rest = tail;
    }

    // wmctrl separates the name with exactly two spaces; anything beyond
    // that belongs to the name.
    let name = rest
        .strip_prefix("  ")
        .unwrap_or_else(|| rest.trim_start())
        .trim_end_matches(['\r', '\n'])
        .to_string();
    Some((Workspace { index, name }, marker == "*"))
}

/// Parse the full `wmctrl -d` table into workspaces plus the current index.
pub fn parse_workspace_table(text: &str) -> (Vec<Workspace>, usize) {
    let mut workspaces = Vec::new();
    let mut current = None;
    for line in text.lines() {
        match parse_workspace_row(line) {
            Some((ws, is_current)) => {
                debug!("workspace {} = [{}]", ws.index, ws.name);
                if is_current {
                    current = Some(ws.index);
                }
                workspaces.push(ws);
            }
            None if line.trim().is_empty() => {}
            None => debug!("skipping workspace row {:?}", line),
        }
    }
    let current = current.unwrap_or_else(|| {
        if !workspaces.is_empty() {
            warn!("no workspace is marked current, assuming 0");
        }
        0
    });
    (workspaces, current)
}

/// Parse one `wmctrl -l` row:
///
/// ```text
/// 0x03800004  1 myhost Terminal - bash
/// ```
fn parse_window_row(line: &str) -> Option<Window> {
    let (id, rest) = split_field(line)?;
    let (desktop, rest) = split_field(rest)?;
    let desktop: i64 = desktop.parse().ok()?;
    let (_host, rest) = split_field(rest)?;
    Some(Window {
        id: WindowId::new(id),
        assigned: Assignment::from_raw(desktop),
        name: rest.trim_start().trim_end_matches(['\r', '\n']).to_string(),
    })
}

/// Parse the full `wmctrl -l` table.
pub fn parse_window_table(text: &str) -> Vec<Window> {
    text.lines()
        .filter_map(|line| {
            let parsed = parse_window_row(line);
            match &parsed {
                Some(w) => debug!("window {} on {} = [{}]", w.id, w.assigned, w.name),
                None if line.trim().is_empty() => {}
                None => debug!("skipping window row {:?}", line),
            }
            parsed
        })
        .collect()
}
