//! [`Desktop`] implementation for MATE's Marco window manager.
//!
//! Reads and most writes go through `wmctrl`.  Marco keeps workspace names
//! in GSettings rather than in the EWMH hints `wmctrl` can set, so renames
//! go through `gsettings` instead.  Programs are spawned directly, never
//! through a shell, so names need no shell quoting.

use crate::config::BackendConfig;
use crate::state::{parse_window_table, parse_workspace_table, Window, WindowId, Workspace};
use crate::traits::Desktop;
use log::debug;
use std::process::Command;

/// Marco-backed desktop.
///
/// Every method spawns one short-lived child process.
pub struct MateDesktop {
    config: BackendConfig,
}

/// A helper program failed or could not be started.  The message is shown
/// to the user verbatim.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct MateError(String);

impl MateDesktop {
    pub fn new(config: BackendConfig) -> Self {
        Self { config }
    }

    fn wmctrl(&self, args: &[&str]) -> Result<String, MateError> {
        run(&self.config.wmctrl, args)
    }
}

/// Run `program` with `args` and return its stdout.
fn run(program: &str, args: &[&str]) -> Result<String, MateError> {
    debug!("run: {} {:?}", program, args);
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| MateError(format!("failed to run {}: {}", program, e)))?;
    if !output.status.success() {
        let code = output
            .status
            .code()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "signal".into());
        return Err(MateError(format!(
            "code {}: {}",
            code,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Serialise `s` as a GVariant string literal for `gsettings set`.
fn gvariant_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        if c == '\\' || c == '\'' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('\'');
    out
}

/// GSettings key for workspace `index`; the schema counts from 1.
fn name_key(index: usize) -> String {
    format!("name-{}", index + 1)
}

impl Desktop for MateDesktop {
    type Error = MateError;

    fn workspaces(&self) -> Result<(Vec<Workspace>, usize), MateError> {
        Ok(parse_workspace_table(&self.wmctrl(&["-d"])?))
    }

    fn windows(&self) -> Result<Vec<Window>, MateError> {
        Ok(parse_window_table(&self.wmctrl(&["-l"])?))
    }

    fn resize(&self, count: usize) -> Result<(), MateError> {
        self.wmctrl(&["-n", &count.to_string()]).map(drop)
    }

    fn rename(&self, index: usize, name: &str) -> Result<(), MateError> {
        run(
            &self.config.gsettings,
            &[
                "set",
                &self.config.names_schema,
                &name_key(index),
                &gvariant_string(name),
            ],
        )
        .map(drop)
    }

    fn reassign_window(&self, window: &WindowId, index: usize) -> Result<(), MateError> {
        self.wmctrl(&["-i", "-r", window.as_str(), "-t", &index.to_string()])
            .map(drop)
    }

    fn set_current(&self, index: usize) -> Result<(), MateError> {
        self.wmctrl(&["-s", &index.to_string()]).map(drop)
    }
}
