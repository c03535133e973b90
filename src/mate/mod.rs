//! MATE-specific implementations.
//!
//! This module provides concrete backends for the
//! [`Desktop`](crate::traits::Desktop) and [`Dialog`](crate::traits::Dialog)
//! traits: workspaces and windows through `wmctrl`, workspace names through
//! Marco's GSettings schema, and dialogs through `zenity`.
//!
//! Nothing outside this module should reference these programs directly.

pub mod desktop;
pub mod dialog;
