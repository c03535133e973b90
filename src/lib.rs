//! **wsorder**: rearrange virtual desktops without losing their windows.
//!
//! The desktop environment only exposes an array-like primitive set: resize
//! the workspace list from its tail, rename a slot by index, move one
//! window to a slot by index, and switch the current slot.  wsorder builds
//! insert-before, delete, swap and move on top of those primitives while
//! keeping window assignments and the current workspace consistent.
//!
//! # Architecture
//!
//! The crate is organised around two core traits:
//!
//! * [`traits::Desktop`]: the read side (workspace and window tables) plus
//!   the four write primitives, so the engine is not coupled to any
//!   specific window manager.
//! * [`traits::Dialog`]: the pick-one and free-text dialogs used by the
//!   interactive commands.
//!
//! [`engine::Reorderer`] turns a [`state::DesktopState`] snapshot into a
//! [`plan::Plan`] of primitive calls, validates it in memory and issues it.
//! Concrete implementations of both traits live in [`mate`].

pub mod app;
pub mod command;
pub mod config;
pub mod engine;
pub mod mate;
pub mod plan;
pub mod report;
pub mod state;
pub mod traits;

#[cfg(test)]
pub(crate) mod fake;
