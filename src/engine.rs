//! The reorder engine.
//!
//! [`Reorderer`] synthesises insert, delete, swap and move out of the
//! environment's tail-only [`Desktop`] primitives.  Each operation:
//!
//! 1. reads one fresh [`DesktopState`] snapshot,
//! 2. builds a [`Plan`] from that snapshot alone,
//! 3. replays the plan in memory and refuses it if any step is invalid,
//! 4. issues the steps in order, stopping at the first environment error.
//!
//! There is no rollback: a failure in step 4 leaves whatever was already
//! issued in place and is reported as [`EngineError::Environment`].
//!
//! The planners are plain functions over a snapshot so they can be chained
//! ([`plan_move`] is insert + swap + delete) and tested without a desktop.

use crate::command::{Direction, Target};
use crate::plan::{Plan, PlanRejected, Primitive};
use crate::state::DesktopState;
use crate::traits::Desktop;
use log::{info, warn};

/// Name given to a freshly inserted workspace.
pub const DEFAULT_NEW_NAME: &str = "new-desktop";

/// Possible errors from the engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("workspace {index} out of range (have {count})")]
    OutOfRange { index: usize, count: usize },

    /// Insert positions may equal the count (append).
    #[error("position {index} out of range (max {count})")]
    PositionOutOfRange { index: usize, count: usize },

    #[error("Close or move the windows first")]
    NotEmpty { index: usize, windows: usize },

    #[error("cannot delete the only workspace")]
    LastWorkspace,

    #[error("no workspace to the {direction} of {index}")]
    NoNeighbour { direction: Direction, index: usize },

    #[error("refusing inconsistent plan: {0}")]
    Plan(#[from] PlanRejected),

    /// The environment rejected a primitive call.  Carries its message
    /// verbatim.
    #[error("{0}")]
    Environment(String),
}

//  Planners

fn check_index(state: &DesktopState, index: usize) -> Result<usize, EngineError> {
    if index < state.len() {
        Ok(index)
    } else {
        Err(EngineError::OutOfRange {
            index,
            count: state.len(),
        })
    }
}

fn check_position(state: &DesktopState, index: usize) -> Result<usize, EngineError> {
    if index <= state.len() {
        Ok(index)
    } else {
        Err(EngineError::PositionOutOfRange {
            index,
            count: state.len(),
        })
    }
}

/// Resolve a [`Target`] against a snapshot.
pub fn resolve(state: &DesktopState, target: Target) -> usize {
    match target {
        Target::Current => state.current,
        Target::Index(i) => i,
    }
}

/// Open a new slot named `name` at `index`, shifting `index..` right.
pub fn plan_insert(state: &DesktopState, index: usize, name: &str) -> Result<Plan, EngineError> {
    let index = check_position(state, index)?;
    let n = state.len();
    let mut plan = Plan::new();
    plan.push(Primitive::Resize(n + 1));
    // Descending: slot i+1 must be vacated before slot i is copied into it.
    for i in (index..n).rev() {
        plan.move_windows(state.window_ids_on(i), i + 1);
        plan.push(Primitive::Rename(i + 1, state.workspaces[i].name.clone()));
    }
    plan.push(Primitive::Rename(index, name.to_string()));
    if index <= state.current {
        plan.push(Primitive::SetCurrent(state.current + 1));
    }
    Ok(plan)
}

/// Remove the empty slot at `index`, shifting `index+1..` left.
pub fn plan_delete(state: &DesktopState, index: usize) -> Result<Plan, EngineError> {
    let index = check_index(state, index)?;
    let n = state.len();
    if n == 1 {
        return Err(EngineError::LastWorkspace);
    }
    let windows = state.window_count(index);
    if windows > 0 {
        return Err(EngineError::NotEmpty { index, windows });
    }
    let mut plan = Plan::new();
    // Ascending: slot i+1 is read before anything overwrites it.
    for i in index..n - 1 {
        plan.move_windows(state.window_ids_on(i + 1), i);
        plan.push(Primitive::Rename(i, state.workspaces[i + 1].name.clone()));
    }
    plan.push(Primitive::Resize(n - 1));
    let current = state.current;
    if index < current || (index == current && current > 0) {
        plan.push(Primitive::SetCurrent(current - 1));
    }
    Ok(plan)
}

/// Exchange the contents and names of slots `i` and `j` through a temporary
/// tail slot.  The current index is left alone.
pub fn plan_swap(state: &DesktopState, i: usize, j: usize) -> Result<Plan, EngineError> {
    let i = check_index(state, i)?;
    let j = check_index(state, j)?;
    let n = state.len();
    let on_i = state.window_ids_on(i);
    let on_j = state.window_ids_on(j);

    let mut plan = Plan::new();
    plan.push(Primitive::Resize(n + 1));
    plan.move_windows(on_i.clone(), n);
    plan.move_windows(on_j, i);
    plan.move_windows(on_i, j);
    plan.push(Primitive::Resize(n));
    plan.push(Primitive::Rename(i, state.workspaces[j].name.clone()));
    plan.push(Primitive::Rename(j, state.workspaces[i].name.clone()));
    Ok(plan)
}

/// Swap the current slot with its neighbour and follow it.
pub fn plan_swap_neighbour(state: &DesktopState, direction: Direction) -> Result<Plan, EngineError> {
    let current = state.current;
    let other = match direction {
        Direction::Left => current.checked_sub(1),
        Direction::Right => Some(current + 1).filter(|&o| o < state.len()),
    }
    .ok_or(EngineError::NoNeighbour {
        direction,
        index: current,
    })?;
    let mut plan = plan_swap(state, current, other)?;
    plan.push(Primitive::SetCurrent(other));
    Ok(plan)
}

/// Move slot `source` so that it ends up just before what is now slot
/// `dest` (`dest == len` means after the last slot).
///
/// Built as insert at `dest`, swap the source into the hole, delete the
/// slot the source left behind.  Each stage is planned against the
/// simulated result of the previous one.
pub fn plan_move(
    state: &DesktopState,
    source: usize,
    dest: usize,
    new_name: &str,
) -> Result<Plan, EngineError> {
    let source = check_index(state, source)?;
    let dest = check_position(state, dest)?;
    if source == dest {
        return Ok(Plan::new());
    }

    let mut plan = plan_insert(state, dest, new_name)?;
    let inserted = plan.simulate(state)?;

    let shifted = if dest <= source { source + 1 } else { source };
    let swap = plan_swap(&inserted, shifted, dest)?;
    let swapped = swap.simulate(&inserted)?;
    plan.extend(swap);

    let delete = plan_delete(&swapped, shifted)?;
    let deleted = delete.simulate(&swapped)?;
    plan.extend(delete);

    if state.current == source {
        let landed = if dest <= source { dest } else { dest - 1 };
        if deleted.current != landed {
            plan.push(Primitive::SetCurrent(landed));
        }
    }
    Ok(plan)
}

/// Reassign every window on `source` to `dest`.
pub fn plan_move_windows(state: &DesktopState, source: usize, dest: usize) -> Result<Plan, EngineError> {
    let source = check_index(state, source)?;
    let dest = check_index(state, dest)?;
    let mut plan = Plan::new();
    if source != dest {
        plan.move_windows(state.window_ids_on(source), dest);
    }
    Ok(plan)
}

//  Engine

/// Runs reorder operations against a [`Desktop`].
///
/// The engine holds no state between operations; every call starts from a
/// fresh snapshot.
///
/// ```ignore
/// let engine = Reorderer::new(MateDesktop::new(BackendConfig::default()));
/// engine.insert_before(Target::Current)?;
/// engine.move_workspace(3, 1)?;
/// ```
pub struct Reorderer<D: Desktop> {
    desktop: D,
    new_name: String,
}

impl<D: Desktop> Reorderer<D> {
    pub fn new(desktop: D) -> Self {
        Self {
            desktop,
            new_name: DEFAULT_NEW_NAME.to_string(),
        }
    }

    /// Use `name` for freshly inserted workspaces.
    pub fn with_new_name(mut self, name: impl Into<String>) -> Self {
        self.new_name = name.into();
        self
    }

    pub fn desktop(&self) -> &D {
        &self.desktop
    }

    /// Read a fresh snapshot.
    pub fn snapshot(&self) -> Result<DesktopState, EngineError> {
        DesktopState::read(&self.desktop).map_err(|e| EngineError::Environment(e.to_string()))
    }

    /// Validate `plan` against `state`, then issue it step by step.
    fn execute(&self, state: &DesktopState, plan: Plan) -> Result<(), EngineError> {
        if plan.is_empty() {
            return Ok(());
        }
        plan.simulate(state)?;
        let total = plan.len();
        for (done, step) in plan.steps().iter().enumerate() {
            if let Err(e) = step.issue(&self.desktop) {
                if done > 0 {
                    warn!("stopped after {} of {} calls, state may be inconsistent", done, total);
                }
                return Err(EngineError::Environment(e.to_string()));
            }
        }
        Ok(())
    }

    pub fn insert_before(&self, target: Target) -> Result<(), EngineError> {
        let state = self.snapshot()?;
        let index = resolve(&state, target);
        info!("insert before {}", index);
        let plan = plan_insert(&state, index, &self.new_name)?;
        self.execute(&state, plan)
    }

    pub fn delete(&self, target: Target) -> Result<(), EngineError> {
        let state = self.snapshot()?;
        let index = resolve(&state, target);
        info!("delete {}", index);
        let plan = plan_delete(&state, index)?;
        self.execute(&state, plan)
    }

    pub fn swap(&self, i: usize, j: usize) -> Result<(), EngineError> {
        let state = self.snapshot()?;
        info!("swap {} and {}", i, j);
        let plan = plan_swap(&state, i, j)?;
        self.execute(&state, plan)
    }

    pub fn swap_left(&self) -> Result<(), EngineError> {
        self.swap_neighbour(Direction::Left)
    }

    pub fn swap_right(&self) -> Result<(), EngineError> {
        self.swap_neighbour(Direction::Right)
    }

    fn swap_neighbour(&self, direction: Direction) -> Result<(), EngineError> {
        let state = self.snapshot()?;
        info!("swap {} with {} neighbour", state.current, direction);
        let plan = plan_swap_neighbour(&state, direction)?;
        self.execute(&state, plan)
    }

    pub fn move_workspace(&self, source: usize, dest: usize) -> Result<(), EngineError> {
        let state = self.snapshot()?;
        info!("move {} before {}", source, dest);
        let plan = plan_move(&state, source, dest, &self.new_name)?;
        self.execute(&state, plan)
    }

    pub fn move_windows(&self, source: usize, dest: usize) -> Result<(), EngineError> {
        let state = self.snapshot()?;
        info!("move windows from {} to {}", source, dest);
        let plan = plan_move_windows(&state, source, dest)?;
        self.execute(&state, plan)
    }

    pub fn rename(&self, target: Target, name: &str) -> Result<(), EngineError> {
        let state = self.snapshot()?;
        let index = check_index(&state, resolve(&state, target))?;
        info!("rename {} -> [{}]", index, name);
        let mut plan = Plan::new();
        plan.push(Primitive::Rename(index, name.to_string()));
        self.execute(&state, plan)
    }

    pub fn switch(&self, index: usize) -> Result<(), EngineError> {
        let state = self.snapshot()?;
        let index = check_index(&state, index)?;
        info!("switch to {}", index);
        let mut plan = Plan::new();
        plan.push(Primitive::SetCurrent(index));
        self.execute(&state, plan)
    }
}

//  Tests
