//! Command dispatch.
//!
//! [`App`] maps each [`Command`] onto the engine, the reporting functions or
//! a dialog, and returns the text to print.  It owns the settling delay:
//! the environment may not show a write to the very next read, so after a
//! mutating command the app waits before returning control to the caller.

use crate::command::{Command, CommandError, Target, HELP};
use crate::engine::{EngineError, Reorderer};
use crate::report::{pick_rows, window_table, workspace_table};
use crate::state::{read_windows, WindowFilter};
use crate::traits::{Desktop, Dialog};
use log::debug;
use std::time::Duration;

/// Errors surfaced to the user as `Error: <message>`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("dialog failed: {0}")]
    Dialog(String),
}

pub struct App<D: Desktop, G: Dialog> {
    engine: Reorderer<D>,
    dialog: G,
    settle_delay: Duration,
}

impl<D: Desktop, G: Dialog> App<D, G> {
    pub fn new(engine: Reorderer<D>, dialog: G) -> Self {
        Self {
            engine,
            dialog,
            settle_delay: Duration::ZERO,
        }
    }

    /// Wait this long after every successful mutating command.
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn engine(&self) -> &Reorderer<D> {
        &self.engine
    }

    /// Run one command and return its output.
    pub fn run(&self, command: &Command) -> Result<String, AppError> {
        let out = self.dispatch(command)?;
        if command.mutates() && !self.settle_delay.is_zero() {
            debug!("settling for {:?}", self.settle_delay);
            std::thread::sleep(self.settle_delay);
        }
        Ok(out)
    }

    fn dispatch(&self, command: &Command) -> Result<String, AppError> {
        let e = &self.engine;
        match command {
            Command::Help => return Ok(HELP.to_string()),
            Command::List => return Ok(workspace_table(&e.snapshot()?)),
            Command::ListWindows(index) => {
                let filter = index.map(WindowFilter::On).unwrap_or(WindowFilter::All);
                let windows = read_windows(e.desktop(), filter)
                    .map_err(|err| EngineError::Environment(err.to_string()))?;
                return Ok(window_table(&windows));
            }
            Command::Switch(index) => e.switch(*index)?,
            Command::Rename { target, name } => e.rename(Target::Index(*target), name)?,
            Command::Insert(target) => e.insert_before(*target)?,
            Command::Delete(target) => e.delete(*target)?,
            Command::MoveWindows { source, dest } => e.move_windows(*source, *dest)?,
            Command::Swap(i, j) => e.swap(*i, *j)?,
            Command::SwapLeft => e.swap_left()?,
            Command::SwapRight => e.swap_right()?,
            Command::Move { source, dest } => e.move_workspace(*source, *dest)?,
            Command::GuiSwitch => self.gui_switch()?,
            Command::GuiRename => self.gui_rename()?,
        }
        Ok(String::new())
    }

    fn gui_switch(&self) -> Result<(), AppError> {
        let state = self.engine.snapshot()?;
        let picked = self
            .dialog
            .pick("Switch workspace", &pick_rows(&state))
            .map_err(|e| AppError::Dialog(e.to_string()))?;
        match picked {
            Some(index) => self.engine.switch(index)?,
            None => debug!("workspace picker cancelled"),
        }
        Ok(())
    }

    fn gui_rename(&self) -> Result<(), AppError> {
        let state = self.engine.snapshot()?;
        let current = state.current;
        let name = state.name(current).unwrap_or_default();
        let entered = self
            .dialog
            .prompt("Rename workspace", name)
            .map_err(|e| AppError::Dialog(e.to_string()))?;
        match entered {
            Some(new_name) => self.engine.rename(Target::Index(current), &new_name)?,
            None => debug!("rename dialog cancelled"),
        }
        Ok(())
    }
}
