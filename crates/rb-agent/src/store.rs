//! Core robot storage: `RobotStore`, one `Vec` per attribute.
//!
//! # Path stacks
//!
//! `path[i]` is consumed from the far end: the next cell to enter is
//! `path[i].last()`, and the destination sits at index 0.  Waiting in place
//! is expressed by pushing the robot's own coordinate on top, so a wait is
//! just another step that happens to go nowhere.
//!
//! # Authoritative position
//!
//! `coord[i]` changes only when a step completes ([`RobotStore::complete_step`]).
//! While a step is under way the robot still "is" at its departure cell; the
//! cell it is entering is tracked by `rb-mobility`.

use rb_core::{Coord, RobotId, SimEvent};

use crate::{RobotError, RobotResult, TaskState};

/// Structure-of-Arrays storage for all robot state.
///
/// Every `Vec` field has exactly `count` elements and is indexed by
/// `RobotId`:
///
/// ```ignore
/// let here = store.coord[robot.index()];
/// ```
#[derive(Clone, Debug, Default)]
pub struct RobotStore {
    /// Number of robots.  Equals the length of every SoA `Vec`.
    pub count: usize,

    // ── Position ──────────────────────────────────────────────────────────
    /// Current cell.  Updated only when a step completes.
    pub coord: Vec<Coord>,

    /// Start cell the robot was created on and parks at.
    pub home: Vec<Coord>,

    // ── Task ──────────────────────────────────────────────────────────────
    pub task_state: Vec<TaskState>,

    /// Pending cells, next step last.
    pub path: Vec<Vec<Coord>>,

    /// Cell the current plan leads to: a package, a delivery point, or home.
    pub target: Vec<Option<Coord>>,

    /// Package claimed while EMPTY and carried while FULL.
    pub cargo: Vec<Option<Coord>>,

    /// Package dropped at the most recent delivery.
    pub delivered: Vec<Option<Coord>>,

    /// `true` once `Parked` has been raised and until the robot takes a new
    /// package.  Guards against raising it twice.
    pub parked: Vec<bool>,

    /// `true` while the robot's last assignment found no reachable target.
    pub stalled: Vec<bool>,

    // ── History ───────────────────────────────────────────────────────────
    /// Every cell entered during the run, starting with `home`.  Wait steps
    /// are not recorded.
    pub trail: Vec<Vec<Coord>>,
}

impl RobotStore {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `RobotId`s in ascending (processing) order.
    pub fn robot_ids(&self) -> impl Iterator<Item = RobotId> + '_ {
        (0..self.count as u32).map(RobotId)
    }

    pub fn check(&self, robot: RobotId) -> RobotResult<()> {
        if robot.index() < self.count {
            Ok(())
        } else {
            Err(RobotError::UnknownRobot(robot))
        }
    }

    /// Append a robot at `home`.  Used by the builder; returns the new id.
    pub fn push_robot(&mut self, home: Coord) -> RobotId {
        let id = RobotId(self.count as u32);
        self.count += 1;
        self.coord.push(home);
        self.home.push(home);
        self.task_state.push(TaskState::Empty);
        self.path.push(Vec::new());
        self.target.push(None);
        self.cargo.push(None);
        self.delivered.push(None);
        self.parked.push(false);
        self.stalled.push(false);
        self.trail.push(vec![home]);
        id
    }

    // ── Plan access ───────────────────────────────────────────────────────

    /// The cell the robot will enter next, if any.
    #[inline]
    pub fn next_step(&self, robot: RobotId) -> Option<Coord> {
        self.path[robot.index()].last().copied()
    }

    /// `true` if the robot has no pending steps.
    #[inline]
    pub fn is_idle(&self, robot: RobotId) -> bool {
        self.path[robot.index()].is_empty()
    }

    /// `true` if `cell` is anywhere in the robot's pending path.
    pub fn path_contains(&self, robot: RobotId, cell: Coord) -> bool {
        self.path[robot.index()].contains(&cell)
    }

    /// Pending cells in travel order (next step first).
    pub fn pending(&self, robot: RobotId) -> impl Iterator<Item = Coord> + '_ {
        self.path[robot.index()].iter().rev().copied()
    }

    #[inline]
    pub fn is_home(&self, robot: RobotId) -> bool {
        self.coord[robot.index()] == self.home[robot.index()]
    }

    // ── Plan mutation ─────────────────────────────────────────────────────

    /// Replace the robot's plan.  `stack` is in path-stack order (see
    /// `rb_spatial::Plan::into_stack`); an empty stack with a target means
    /// the robot is already where it wants to be.
    pub fn adopt_plan(&mut self, robot: RobotId, target: Coord, stack: Vec<Coord>) {
        let i = robot.index();
        self.path[i] = stack;
        self.target[i] = Some(target);
    }

    /// Drop the plan and target; the robot becomes idle.
    pub fn clear_plan(&mut self, robot: RobotId) {
        let i = robot.index();
        self.path[i].clear();
        self.target[i] = None;
    }

    /// Record whether the latest assignment attempt stalled.  Returns `true`
    /// when this call starts a new stall.
    pub fn mark_stalled(&mut self, robot: RobotId, stalled: bool) -> bool {
        let i = robot.index();
        let started = stalled && !self.stalled[i];
        self.stalled[i] = stalled;
        started
    }

    /// Wait one step: the current coordinate goes on top of the path.
    pub fn push_wait(&mut self, robot: RobotId) {
        let i = robot.index();
        let here = self.coord[i];
        self.path[i].push(here);
    }

    /// Record that the robot claimed `package`.  A claim means the robot is
    /// leaving, so any earlier park no longer holds.
    pub fn take_package(&mut self, robot: RobotId, package: Coord) {
        let i = robot.index();
        self.cargo[i] = Some(package);
        self.parked[i] = false;
    }

    /// Forget a claimed but not yet collected package.  Returns it so the
    /// caller can put it back on the grid.  A FULL robot keeps its cargo.
    pub fn abandon_package(&mut self, robot: RobotId) -> Option<Coord> {
        let i = robot.index();
        match self.task_state[i] {
            TaskState::Empty => self.cargo[i].take(),
            TaskState::Full => None,
        }
    }

    // ── Movement ──────────────────────────────────────────────────────────

    /// Pop the next cell off the path and move there.
    ///
    /// # Errors
    ///
    /// [`RobotError::NoPendingStep`] if the path is empty and
    /// [`RobotError::NotAdjacent`] if the popped cell is neither the current
    /// cell (a wait) nor one of its orthogonal neighbours.  The path is left
    /// untouched on error.
    pub fn complete_step(&mut self, robot: RobotId) -> RobotResult<Coord> {
        self.check(robot)?;
        let i = robot.index();
        let from = self.coord[i];
        let to = self.next_step(robot).ok_or(RobotError::NoPendingStep(robot))?;
        if to != from && !to.is_adjacent(from) {
            return Err(RobotError::NotAdjacent { robot, from, to });
        }
        self.path[i].pop();
        if to != from {
            self.trail[i].push(to);
        }
        self.coord[i] = to;
        Ok(to)
    }

    /// Run the end-of-path transition for a robot whose path just ran out.
    ///
    /// * EMPTY at its claimed package → FULL, `ArrivedAtPackage`.
    /// * FULL at any of `ends` → EMPTY, cargo moves to `delivered`,
    ///   `ArrivedAtDelivery`.
    /// * EMPTY at home with `packages_left == false`, not already parked →
    ///   `Parked`.
    ///
    /// The target is cleared in every case.
    pub fn finish_movement(
        &mut self,
        robot:         RobotId,
        ends:          &[Coord],
        packages_left: bool,
    ) -> Option<SimEvent> {
        let i = robot.index();
        let here = self.coord[i];
        self.target[i] = None;

        match self.task_state[i] {
            TaskState::Empty if self.cargo[i] == Some(here) => {
                self.task_state[i] = TaskState::Full;
                Some(SimEvent::ArrivedAtPackage(robot))
            }
            TaskState::Full if ends.contains(&here) => {
                self.task_state[i] = TaskState::Empty;
                self.delivered[i] = self.cargo[i].take();
                Some(SimEvent::ArrivedAtDelivery(robot))
            }
            TaskState::Empty if here == self.home[i] && !packages_left && !self.parked[i] => {
                self.parked[i] = true;
                Some(SimEvent::Parked(robot))
            }
            _ => None,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Send every robot home with no plan, no cargo and a fresh trail.
    pub fn reset(&mut self) {
        for i in 0..self.count {
            let home = self.home[i];
            self.coord[i] = home;
            self.task_state[i] = TaskState::Empty;
            self.path[i].clear();
            self.target[i] = None;
            self.cargo[i] = None;
            self.delivered[i] = None;
            self.parked[i] = false;
            self.stalled[i] = false;
            self.trail[i].clear();
            self.trail[i].push(home);
        }
    }

    /// Remove every robot.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
