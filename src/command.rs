//! Commands and types used throughout wsorder.
//!
//! This module defines the vocabulary that all components share:
//! [`Command`] describes every action the tool can perform, [`Target`] and
//! [`Direction`] provide the supporting argument types, and [`Invocation`]
//! parses a command line into them.
//!
//! The command line is `[debug] <command> [args...]`.  A leading `debug`
//! token is not an argument; it only turns on verbose tracing.

use std::fmt;

/// Direction for neighbour swaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

/// A workspace argument that may be omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Whatever workspace is current when the operation reads its snapshot.
    Current,
    Index(usize),
}

/// Every action the tool can perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    /// Print the workspace table.
    List,
    /// Print the window table, optionally only for one workspace.
    ListWindows(Option<usize>),
    Switch(usize),
    Rename { target: usize, name: String },
    /// Insert a new workspace before the target.
    Insert(Target),
    Delete(Target),
    MoveWindows { source: usize, dest: usize },
    Swap(usize, usize),
    SwapLeft,
    SwapRight,
    /// Move workspace `source` to just before `dest`.
    Move { source: usize, dest: usize },
    GuiRename,
    GuiSwitch,
}

impl Command {
    /// Whether the command writes to the environment.
    pub fn mutates(&self) -> bool {
        !matches!(
            self,
            Command::Help | Command::List | Command::ListWindows(_)
        )
    }
}

/// Errors from parsing the command line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),
    #[error("{command}: missing {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error("invalid workspace index: {0}")]
    InvalidIndex(String),
}

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Verbose tracing was requested with a leading `debug` token.
    pub debug: bool,
    pub command: Command,
}

/// Positional arguments after the command word.
struct Args<'a> {
    command: &'static str,
    rest: &'a [String],
}

impl<'a> Args<'a> {
    fn get(&self, n: usize) -> Option<&'a str> {
        self.rest.get(n).map(String::as_str)
    }

    fn index(&self, n: usize, argument: &'static str) -> Result<usize, CommandError> {
        let raw = self.get(n).ok_or(CommandError::MissingArgument {
            command: self.command,
            argument,
        })?;
        parse_index(raw)
    }

    /// An index that defaults to `None` when omitted or given as `none`.
    fn optional_index(&self, n: usize) -> Result<Option<usize>, CommandError> {
        match self.get(n) {
            None | Some("none") => Ok(None),
            Some(raw) => parse_index(raw).map(Some),
        }
    }

    fn target(&self, n: usize) -> Result<Target, CommandError> {
        Ok(self
            .optional_index(n)?
            .map(Target::Index)
            .unwrap_or(Target::Current))
    }
}

fn parse_index(raw: &str) -> Result<usize, CommandError> {
    raw.trim()
        .parse()
        .map_err(|_| CommandError::InvalidIndex(raw.to_string()))
}

impl Invocation {
    /// Parse the arguments that follow the program name.
    ///
    /// An empty command line is `help`.
    pub fn parse(args: &[String]) -> Result<Self, CommandError> {
        let (debug, args) = match args.split_first() {
            Some((first, rest)) if first == "debug" => (true, rest),
            _ => (false, args),
        };
        let Some((word, rest)) = args.split_first() else {
            return Ok(Self {
                debug,
                command: Command::Help,
            });
        };

        let command = match word.as_str() {
            "help" => Command::Help,
            "list" => Command::List,
            "listwin" => {
                Command::ListWindows(Args { command: "listwin", rest }.optional_index(0)?)
            }
            "switch" => Command::Switch(Args { command: "switch", rest }.index(0, "index")?),
            "rename" => {
                let a = Args { command: "rename", rest };
                let target = a.index(0, "index")?;
                let name = a.get(1).ok_or(CommandError::MissingArgument {
                    command: "rename",
                    argument: "name",
                })?;
                Command::Rename {
                    target,
                    name: name.to_string(),
                }
            }
            "insert" => Command::Insert(Args { command: "insert", rest }.target(0)?),
            "delete" => Command::Delete(Args { command: "delete", rest }.target(0)?),
            "movewins" => {
                let a = Args { command: "movewins", rest };
                Command::MoveWindows {
                    source: a.index(0, "source")?,
                    dest: a.index(1, "destination")?,
                }
            }
            "swap" => {
                let a = Args { command: "swap", rest };
                Command::Swap(a.index(0, "first index")?, a.index(1, "second index")?)
            }
            "swapleft" => Command::SwapLeft,
            "swapright" => Command::SwapRight,
            "move" => {
                let a = Args { command: "move", rest };
                Command::Move {
                    source: a.index(0, "source")?,
                    dest: a.index(1, "destination")?,
                }
            }
            "gui_rename" => Command::GuiRename,
            "gui_switch" => Command::GuiSwitch,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Self { debug, command })
    }
}

/// Usage text printed by `help`.
pub const HELP: &str = "
Examples:
  -------------------------------------------------------------------------
  | workspace help               | Display this help.                     |
  | workspace list               | List all workspaces.                   |
  | workspace listwin            | List all windows.                      |
  | workspace listwin 8          | List all windows in workspace 8.       |
  | workspace switch 4           | Switch to workspace 4.                 |
  | workspace rename 3 \"foo bar\" | Rename workspace 3 to \"foo bar\".       |
  | workspace insert             | Insert a workspace before the current. |
  | workspace insert 3           | Insert a workspace before workspace 3. |
  | workspace delete             | Delete the current workspace.          |
  | workspace delete 3           | Delete workspace 3.                    |
  | workspace movewins 7 8       | Moves all windows from desktop 7 to 8. |
  | workspace swap 3 5           | Swap the order of workspace 3 and 5.   |
  | workspace swapleft           | Swap the current workspace to the left.|
  | workspace swapright          | Swap the curr workspace to the right.  |
  | workspace move 3 5           | Move workspace 3 to just before 5.     |
  | workspace gui_rename         | Rename the current workspace (dialog). |
  | workspace gui_switch         | Pick a workspace to switch to (dialog).|
  | workspace debug command      | Print debugging while running command. |
  -------------------------------------------------------------------------
";

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Invocation, CommandError> {
        let args: Vec<String> = line.split_whitespace().map(String::from).collect();
        Invocation::parse(&args)
    }

    fn command(line: &str) -> Command {
        parse(line).unwrap().command
    }

    #[test]
    fn empty_is_help() {
        assert_eq!(command(""), Command::Help);
        assert_eq!(command("help"), Command::Help);
    }

    #[test]
    fn leading_debug_is_not_an_argument() {
        let inv = parse("debug").unwrap();
        assert!(inv.debug);
        assert_eq!(inv.command, Command::Help);

        let inv = parse("debug move 1 2").unwrap();
        assert!(inv.debug);
        assert_eq!(inv.command, Command::Move { source: 1, dest: 2 });

        assert!(!parse("move 1 2").unwrap().debug);
    }

    #[test]
    fn optional_targets_default_to_current() {
        assert_eq!(command("insert"), Command::Insert(Target::Current));
        assert_eq!(command("insert 3"), Command::Insert(Target::Index(3)));
        assert_eq!(command("delete"), Command::Delete(Target::Current));
        assert_eq!(command("delete none"), Command::Delete(Target::Current));
        assert_eq!(command("listwin"), Command::ListWindows(None));
        assert_eq!(command("listwin 8"), Command::ListWindows(Some(8)));
    }

    #[test]
    fn required_arguments() {
        assert_eq!(
            parse("move 1").unwrap_err(),
            CommandError::MissingArgument {
                command: "move",
                argument: "destination"
            }
        );
        assert!(parse("swap").is_err());
        assert!(parse("switch").is_err());
        assert!(parse("movewins 1").is_err());
        assert_eq!(
            parse("rename 3").unwrap_err().to_string(),
            "rename: missing name"
        );
    }

    #[test]
    fn rename_keeps_name_with_spaces() {
        let args = vec!["rename".to_string(), "3".to_string(), "foo bar".to_string()];
        assert_eq!(
            Invocation::parse(&args).unwrap().command,
            Command::Rename {
                target: 3,
                name: "foo bar".into()
            }
        );
    }

    #[test]
    fn malformed_indices_are_rejected() {
        assert_eq!(
            parse("swap 1 x").unwrap_err(),
            CommandError::InvalidIndex("x".into())
        );
        assert!(parse("insert -1").is_err());
    }

    #[test]
    fn unknown_command() {
        assert_eq!(
            parse("shuffle").unwrap_err().to_string(),
            "Unknown command: shuffle"
        );
    }

    #[test]
    fn all_commands_parse() {
        assert_eq!(command("list"), Command::List);
        assert_eq!(command("switch 4"), Command::Switch(4));
        assert_eq!(command("movewins 7 8"), Command::MoveWindows { source: 7, dest: 8 });
        assert_eq!(command("swap 3 5"), Command::Swap(3, 5));
        assert_eq!(command("swapleft"), Command::SwapLeft);
        assert_eq!(command("swapright"), Command::SwapRight);
        assert_eq!(command("gui_rename"), Command::GuiRename);
        assert_eq!(command("gui_switch"), Command::GuiSwitch);
    }

    #[test]
    fn read_only_commands() {
        assert!(!Command::List.mutates());
        assert!(!Command::ListWindows(None).mutates());
        assert!(!Command::Help.mutates());
        assert!(Command::SwapLeft.mutates());
        assert!(Command::GuiSwitch.mutates());
    }

    #[test]
    fn direction_display() {
        assert_eq!(Direction::Left.to_string(), "left");
        assert_eq!(Direction::Right.to_string(), "right");
    }
}
