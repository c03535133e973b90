//! Core traits that decouple wsorder from any specific desktop environment
//! or dialog toolkit.
//!
//! Every concrete backend (MATE via `wmctrl`/`gsettings`, zenity dialogs, an
//! in-memory test double, …) implements one of these traits.  The
//! [`Reorderer`](crate::engine::Reorderer) only depends on [`Desktop`].

use crate::state::{Window, WindowId, Workspace};

/// Abstraction over the environment that owns the workspaces.
///
/// The write side is deliberately narrow: the environment can only grow or
/// shrink the workspace array from its tail, rename a slot by index, move a
/// single window to a slot by index and switch the current slot.  Anything
/// richer (insert, delete, swap, move) is synthesised by the
/// [`Reorderer`](crate::engine::Reorderer) on top of these calls.
pub trait Desktop {
    /// The error type produced by this environment.
    type Error: std::error::Error + Send + 'static;

    /// Return every workspace in index order plus the index of the current
    /// one.
    fn workspaces(&self) -> Result<(Vec<Workspace>, usize), Self::Error>;

    /// Return every window the environment manages, including windows that
    /// are not assigned to any workspace.
    fn windows(&self) -> Result<Vec<Window>, Self::Error>;

    /// Set the number of workspaces.
    ///
    /// Growing appends unnamed slots at the tail; shrinking truncates from
    /// the tail.  Existing slots are never reordered or renamed.
    fn resize(&self, count: usize) -> Result<(), Self::Error>;

    /// Rename the slot at `index` in place.
    fn rename(&self, index: usize, name: &str) -> Result<(), Self::Error>;

    /// Move one window to the slot at `index`.
    fn reassign_window(&self, window: &WindowId, index: usize) -> Result<(), Self::Error>;

    /// Make the slot at `index` the current one.
    fn set_current(&self, index: usize) -> Result<(), Self::Error>;
}

/// One row offered by [`Dialog::pick`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickRow {
    /// Value returned when this row is chosen.
    pub index: usize,
    /// Text shown to the user.
    pub label: String,
    /// Whether the row is pre-selected.
    pub current: bool,
}

/// Abstraction over the interactive dialogs used by `gui_switch` and
/// `gui_rename`.
///
/// Both methods return `Ok(None)` when the user dismisses the dialog.
pub trait Dialog {
    /// The error type produced by this dialog backend.
    type Error: std::error::Error + Send + 'static;

    /// Let the user pick one of `rows` and return its [`PickRow::index`].
    fn pick(&self, title: &str, rows: &[PickRow]) -> Result<Option<usize>, Self::Error>;

    /// Ask for free text, pre-filled with `initial`.
    fn prompt(&self, title: &str, initial: &str) -> Result<Option<String>, Self::Error>;
}
