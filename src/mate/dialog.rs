//! [`Dialog`] implementation backed by `zenity`.
//!
//! The picker is a `--list --radiolist` dialog fed on stdin, one cell per
//! line (`TRUE|FALSE`, index, name), printing the index column of the
//! chosen row.  The prompt is an `--entry` dialog pre-filled with the
//! current text.  Zenity exits with status 1 when the user cancels.

use crate::traits::{Dialog, PickRow};
use log::debug;
use std::io::Write;
use std::process::{Command, Stdio};

pub struct ZenityDialog {
    program: String,
}

#[derive(Debug, thiserror::Error)]
#[error("zenity: {0}")]
pub struct ZenityError(String);

impl ZenityDialog {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Run the dialog, feeding `input` on stdin.  `Ok(None)` on cancel.
    fn run(&self, args: &[&str], input: &str) -> Result<Option<String>, ZenityError> {
        debug!("run: {} {:?}", self.program, args);
        let mut child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ZenityError(format!("failed to run {}: {}", self.program, e)))?;
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(input.as_bytes())
                .map_err(|e| ZenityError(format!("write: {}", e)))?;
        }
        let output = child
            .wait_with_output()
            .map_err(|e| ZenityError(format!("wait: {}", e)))?;
        match output.status.code() {
            Some(0) => Ok(Some(
                String::from_utf8_lossy(&output.stdout)
                    .trim_end_matches(['\r', '\n'])
                    .to_string(),
            )),
            Some(1) => Ok(None),
            code => Err(ZenityError(format!(
                "exit {:?}: {}",
                code,
                String::from_utf8_lossy(&output.stderr).trim()
            ))),
        }
    }
}

/// Newline-delimited cells for the radiolist: marker, index, name.
fn pick_input(rows: &[PickRow]) -> String {
    let mut out = String::new();
    for row in rows {
        out.push_str(if row.current { "TRUE\n" } else { "FALSE\n" });
        out.push_str(&row.index.to_string());
        out.push('\n');
        out.push_str(&row.label.replace(['\r', '\n'], " "));
        out.push('\n');
    }
    out
}

/// Parse the printed index column.  Some zenity versions print the value
/// twice separated by `|`.
fn parse_pick(output: &str) -> Option<usize> {
    output.split('|').next()?.trim().parse().ok()
}

impl Dialog for ZenityDialog {
    type Error = ZenityError;

    fn pick(&self, title: &str, rows: &[PickRow]) -> Result<Option<usize>, ZenityError> {
        let args = [
            "--list",
            "--radiolist",
            "--title",
            title,
            "--column",
            "",
            "--column",
            "#",
            "--column",
            "Name",
            "--print-column",
            "2",
        ];
        Ok(self.run(&args, &pick_input(rows))?.as_deref().and_then(parse_pick))
    }

    fn prompt(&self, title: &str, initial: &str) -> Result<Option<String>, ZenityError> {
        let args = [
            "--entry",
            "--title",
            title,
            "--text",
            "New name:",
            "--entry-text",
            initial,
        ];
        self.run(&args, "")
    }
}
