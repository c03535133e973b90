//! In-memory [`Desktop`] used by unit tests.
//!
//! Behaves like a Marco session driven through `wmctrl`: shrinking pushes
//! windows from removed slots onto the new last slot, renaming a slot that
//! does not exist is silently ignored, and every write is recorded so tests
//! can assert on the exact primitive sequence.

use crate::plan::Primitive;
use crate::state::{Assignment, DesktopState, Window, WindowId, Workspace};
use crate::traits::Desktop;
use std::cell::RefCell;

#[derive(Debug, thiserror::Error)]
#[error("fake desktop: {0}")]
pub struct FakeError(pub String);

#[derive(Debug)]
pub struct FakeDesktop {
    state: RefCell<DesktopState>,
    next_window: RefCell<u32>,
    log: RefCell<Vec<Primitive>>,
    /// Fail the write with this zero-based position in the log.
    fail_at: RefCell<Option<usize>>,
}

impl FakeDesktop {
    /// A desktop with the given workspace names, `current` selected, and a
    /// single unassigned panel window.
    pub fn new(names: &[&str], current: usize) -> Self {
        let fake = Self {
            state: RefCell::new(DesktopState {
                workspaces: names
                    .iter()
                    .enumerate()
                    .map(|(index, n)| Workspace {
                        index,
                        name: n.to_string(),
                    })
                    .collect(),
                current,
                windows: Vec::new(),
            }),
            next_window: RefCell::new(1),
            log: RefCell::new(Vec::new()),
            fail_at: RefCell::new(None),
        };
        fake.open_window(Assignment::Unassigned, "Bottom Panel");
        fake
    }

    /// Open a window and return its id.
    pub fn open_window(&self, assigned: Assignment, name: &str) -> WindowId {
        let mut next = self.next_window.borrow_mut();
        let id = WindowId::new(format!("0x{:08X}", *next));
        *next += 1;
        self.state.borrow_mut().windows.push(Window {
            id: id.clone(),
            assigned,
            name: name.to_string(),
        });
        id
    }

    /// Open a window on workspace `index`.
    pub fn open_on(&self, index: usize, name: &str) -> WindowId {
        self.open_window(Assignment::Workspace(index), name)
    }

    pub fn state(&self) -> DesktopState {
        self.state.borrow().clone()
    }

    pub fn names(&self) -> Vec<String> {
        self.state
            .borrow()
            .workspaces
            .iter()
            .map(|w| w.name.clone())
            .collect()
    }

    pub fn current(&self) -> usize {
        self.state.borrow().current
    }

    /// Where the window `id` currently lives.
    pub fn assignment(&self, id: &WindowId) -> Option<Assignment> {
        self.state
            .borrow()
            .windows
            .iter()
            .find(|w| w.id == *id)
            .map(|w| w.assigned)
    }

    pub fn log(&self) -> Vec<Primitive> {
        self.log.borrow().clone()
    }

    /// Make the `n`th write from now fail.
    pub fn fail_at(&self, n: usize) {
        *self.fail_at.borrow_mut() = Some(self.log.borrow().len() + n);
    }

    fn record(&self, primitive: Primitive) -> Result<(), FakeError> {
        let mut log = self.log.borrow_mut();
        if *self.fail_at.borrow() == Some(log.len()) {
            return Err(FakeError(format!("refused to {}", primitive)));
        }
        log.push(primitive);
        Ok(())
    }
}

impl Desktop for FakeDesktop {
    type Error = FakeError;

    fn workspaces(&self) -> Result<(Vec<Workspace>, usize), FakeError> {
        let s = self.state.borrow();
        Ok((s.workspaces.clone(), s.current))
    }

    fn windows(&self) -> Result<Vec<Window>, FakeError> {
        Ok(self.state.borrow().windows.clone())
    }

    fn resize(&self, count: usize) -> Result<(), FakeError> {
        self.record(Primitive::Resize(count))?;
        let mut s = self.state.borrow_mut();
        let old = s.workspaces.len();
        s.workspaces.truncate(count);
        s.workspaces.extend((old..count).map(|index| Workspace {
            index,
            name: String::new(),
        }));
        let last = count.saturating_sub(1);
        for w in &mut s.windows {
            if matches!(w.assigned.index(), Some(i) if i >= count) {
                w.assigned = Assignment::Workspace(last);
            }
        }
        s.current = s.current.min(last);
        Ok(())
    }

    fn rename(&self, index: usize, name: &str) -> Result<(), FakeError> {
        self.record(Primitive::Rename(index, name.to_string()))?;
        if let Some(ws) = self.state.borrow_mut().workspaces.get_mut(index) {
            ws.name = name.to_string();
        }
        Ok(())
    }

    fn reassign_window(&self, window: &WindowId, index: usize) -> Result<(), FakeError> {
        self.record(Primitive::ReassignWindow(window.clone(), index))?;
        let mut s = self.state.borrow_mut();
        let win = s
            .windows
            .iter_mut()
            .find(|w| w.id == *window)
            .ok_or_else(|| FakeError(format!("no window {}", window)))?;
        win.assigned = Assignment::Workspace(index);
        Ok(())
    }

    fn set_current(&self, index: usize) -> Result<(), FakeError> {
        self.record(Primitive::SetCurrent(index))?;
        self.state.borrow_mut().current = index;
        Ok(())
    }
}
