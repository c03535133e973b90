//! Primitive call plans.
//!
//! Every high-level operation is first expressed as a [`Plan`]: the exact
//! sequence of [`Primitive`] calls it will issue, computed from a single
//! snapshot.  Before anything is sent to the environment the plan is
//! replayed against an in-memory copy of that snapshot with
//! [`DesktopState::apply`].  A plan that would address a missing slot, drop
//! a slot that still holds windows, or leave the state inconsistent is
//! rejected as a whole and nothing is issued.
//!
//! Replaying also lets composite operations (move) chain sub-plans without
//! re-reading the environment in between.

use crate::state::{Assignment, DesktopState, WindowId, Workspace};
use crate::traits::Desktop;
use log::debug;
use std::fmt;

/// One call into the environment's primitive interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Primitive {
    Resize(usize),
    Rename(usize, String),
    ReassignWindow(WindowId, usize),
    SetCurrent(usize),
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::Resize(n) => write!(f, "resize to {}", n),
            Primitive::Rename(i, name) => write!(f, "rename {} -> [{}]", i, name),
            Primitive::ReassignWindow(id, i) => write!(f, "move window {} -> {}", id, i),
            Primitive::SetCurrent(i) => write!(f, "switch to {}", i),
        }
    }
}

impl Primitive {
    /// Issue this call against `desktop`.
    pub fn issue<D: Desktop>(&self, desktop: &D) -> Result<(), D::Error> {
        debug!("{}", self);
        match self {
            Primitive::Resize(n) => desktop.resize(*n),
            Primitive::Rename(i, name) => desktop.rename(*i, name),
            Primitive::ReassignWindow(id, i) => desktop.reassign_window(id, *i),
            Primitive::SetCurrent(i) => desktop.set_current(*i),
        }
    }
}

/// Reason a plan was rejected during simulation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("step {step} ({primitive}): {reason}")]
pub struct PlanRejected {
    pub step: usize,
    pub primitive: String,
    pub reason: String,
}

/// An ordered list of primitive calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    steps: Vec<Primitive>,
}

impl Plan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.steps.push(primitive);
    }

    /// Append every step of `other`.
    pub fn extend(&mut self, other: Plan) {
        self.steps.extend(other.steps);
    }

    /// Reassign every window in `ids` to `dest`.
    pub fn move_windows(&mut self, ids: Vec<WindowId>, dest: usize) {
        self.steps
            .extend(ids.into_iter().map(|id| Primitive::ReassignWindow(id, dest)));
    }

    pub fn steps(&self) -> &[Primitive] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Replay the plan on a copy of `state` and return the resulting state.
    ///
    /// Fails if any step is invalid at the point it would be issued, or if
    /// the final state breaks an invariant.
    pub fn simulate(&self, state: &DesktopState) -> Result<DesktopState, PlanRejected> {
        let mut sim = state.clone();
        for (step, primitive) in self.steps.iter().enumerate() {
            sim.apply(primitive).map_err(|reason| PlanRejected {
                step,
                primitive: primitive.to_string(),
                reason,
            })?;
        }
        if let Some(reason) = sim.invariant_violation() {
            return Err(PlanRejected {
                step: self.steps.len(),
                primitive: "final state".into(),
                reason,
            });
        }
        Ok(sim)
    }
}

impl DesktopState {
    /// Apply one primitive with the environment's semantics.
    pub fn apply(&mut self, primitive: &Primitive) -> Result<(), String> {
        match primitive {
            Primitive::Resize(count) => {
                let count = *count;
                if count == 0 {
                    return Err("cannot remove every workspace".into());
                }
                if let Some(w) = self
                    .windows
                    .iter()
                    .find(|w| matches!(w.assigned.index(), Some(i) if i >= count))
                {
                    return Err(format!(
                        "window {} would be orphaned on workspace {}",
                        w.id, w.assigned
                    ));
                }
                let old = self.workspaces.len();
                self.workspaces.truncate(count);
                self.workspaces.extend((old..count).map(|index| Workspace {
                    index,
                    name: String::new(),
                }));
                self.current = self.current.min(count - 1);
            }
            Primitive::Rename(index, name) => {
                let ws = self
                    .workspaces
                    .get_mut(*index)
                    .ok_or_else(|| format!("no workspace {}", index))?;
                ws.name = name.clone();
            }
            Primitive::ReassignWindow(id, index) => {
                if *index >= self.workspaces.len() {
                    return Err(format!("no workspace {}", index));
                }
                let win = self
                    .windows
                    .iter_mut()
                    .find(|w| w.id == *id)
                    .ok_or_else(|| format!("unknown window {}", id))?;
                if win.assigned == Assignment::Unassigned {
                    return Err(format!("window {} is not on any workspace", id));
                }
                win.assigned = Assignment::Workspace(*index);
            }
            Primitive::SetCurrent(index) => {
                if *index >= self.workspaces.len() {
                    return Err(format!("no workspace {}", index));
                }
                self.current = *index;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Window;

    fn state() -> DesktopState {
        DesktopState {
            workspaces: vec![
                Workspace {
                    index: 0,
                    name: "main".into(),
                },
                Workspace {
                    index: 1,
                    name: "mail".into(),
                },
            ],
            current: 1,
            windows: vec![
                Window {
                    id: WindowId::new("0x01"),
                    assigned: Assignment::Unassigned,
                    name: "panel".into(),
                },
                Window {
                    id: WindowId::new("0x02"),
                    assigned: Assignment::Workspace(1),
                    name: "mutt".into(),
                },
            ],
        }
    }

    #[test]
    fn resize_grows_with_empty_names_and_clamps_current() {
        let mut s = state();
        s.apply(&Primitive::Resize(3)).unwrap();
        assert_eq!(s.names(), vec!["main", "mail", ""]);
        s.apply(&Primitive::ReassignWindow(WindowId::new("0x02"), 0)).unwrap();
        s.apply(&Primitive::Resize(1)).unwrap();
        assert_eq!(s.names(), vec!["main"]);
        assert_eq!(s.current, 0);
    }

    #[test]
    fn shrinking_over_windows_is_rejected() {
        let mut s = state();
        assert!(s.apply(&Primitive::Resize(1)).is_err());
        assert!(s.apply(&Primitive::Resize(0)).is_err());
    }

    #[test]
    fn out_of_range_steps_are_rejected() {
        let mut s = state();
        assert!(s.apply(&Primitive::Rename(2, "x".into())).is_err());
        assert!(s.apply(&Primitive::SetCurrent(2)).is_err());
        assert!(s
            .apply(&Primitive::ReassignWindow(WindowId::new("0x02"), 5))
            .is_err());
        assert!(s
            .apply(&Primitive::ReassignWindow(WindowId::new("0xff"), 0))
            .is_err());
    }

    #[test]
    fn unassigned_windows_cannot_be_reassigned() {
        let mut s = state();
        let err = s
            .apply(&Primitive::ReassignWindow(WindowId::new("0x01"), 0))
            .unwrap_err();
        assert!(err.contains("not on any workspace"));
    }

    #[test]
    fn simulate_reports_failing_step() {
        let mut plan = Plan::new();
        plan.push(Primitive::Rename(0, "a".into()));
        plan.push(Primitive::SetCurrent(9));
        let err = plan.simulate(&state()).unwrap_err();
        assert_eq!(err.step, 1);
        assert_eq!(err.primitive, "switch to 9");
    }

    #[test]
    fn simulate_leaves_input_untouched() {
        let s = state();
        let mut plan = Plan::new();
        plan.push(Primitive::Rename(0, "renamed".into()));
        let out = plan.simulate(&s).unwrap();
        assert_eq!(out.name(0), Some("renamed"));
        assert_eq!(s.name(0), Some("main"));
    }

    #[test]
    fn primitive_display() {
        assert_eq!(Primitive::Resize(4).to_string(), "resize to 4");
        assert_eq!(
            Primitive::Rename(1, "web".into()).to_string(),
            "rename 1 -> [web]"
        );
        assert_eq!(
            Primitive::ReassignWindow(WindowId::new("0x02"), 3).to_string(),
            "move window 0x02 -> 3"
        );
        assert_eq!(Primitive::SetCurrent(0).to_string(), "switch to 0");
    }
}
