//! The `RobotController`: task assignment, shortest-of-many search and
//! collision avoidance.
//!
//! # Determinism
//!
//! Callers process robots in ascending id order, and every choice made here
//! is order-stable: candidates are tried in grid declaration order and the
//! first of several equally short plans wins.

use rb_agent::{RobotStore, TaskState};
use rb_core::{Coord, RobotId};
use rb_mobility::MobilityStore;
use rb_spatial::{Grid, ObstacleSet, PathPlanner, Plan, SpatialError, SpatialResult};
use tracing::{debug, warn};

use crate::{Assignment, ControlResult, Resolution};

/// Assigns tasks and paths, and resolves conflicts before steps begin.
///
/// # Type parameter
///
/// `P` is the grid search, normally [`rb_spatial::AStarPlanner`].
pub struct RobotController<P: PathPlanner> {
    pub planner: P,
}

impl<P: PathPlanner> RobotController<P> {
    pub fn new(planner: P) -> Self {
        Self { planner }
    }

    // ── Task assignment ───────────────────────────────────────────────────

    /// Give `robot` a new plan according to its task state.
    ///
    /// * EMPTY with packages available: the nearest available package is
    ///   claimed and becomes the target.
    /// * FULL: the nearest delivery point (delivery points are shared, never
    ///   claimed).
    /// * EMPTY with nothing available: home.
    ///
    /// If no candidate is reachable the robot is left idle with no target
    /// and nothing is claimed.  The first stall is logged at `warn`, repeats
    /// at `debug` until an assignment succeeds.
    ///
    /// # Errors
    ///
    /// `TaskClaimFailed` if the chosen package was not available, which
    /// means assignment ran out of order; fatal.
    pub fn define_path_of(
        &self,
        robot:  RobotId,
        robots: &mut RobotStore,
        grid:   &mut Grid,
    ) -> ControlResult<Assignment> {
        robots.check(robot)?;
        let i = robot.index();
        let here = robots.coord[i];
        let state = robots.task_state[i];
        let seeking_package = state == TaskState::Empty && !grid.available_packages().is_empty();

        let candidates: Vec<Coord> = match state {
            TaskState::Empty if seeking_package => grid.available_packages().to_vec(),
            TaskState::Empty => vec![robots.home[i]],
            TaskState::Full => grid.ends().to_vec(),
        };

        let plan = match self.find_shortest_path(here, &candidates, grid) {
            Ok(plan) => plan,
            Err(SpatialError::NoPath { candidates, .. }) => {
                if robots.mark_stalled(robot, true) {
                    warn!(%robot, at = %here, candidates, ?state, "no reachable target, robot stalls");
                } else {
                    debug!(%robot, at = %here, candidates, "still stalled");
                }
                robots.clear_plan(robot);
                return Ok(Assignment::Stalled);
            }
            Err(e) => return Err(e.into()),
        };

        // A non-empty plan always has a destination.
        let Some(target) = plan.destination() else {
            robots.clear_plan(robot);
            return Ok(Assignment::Stalled);
        };
        let steps = plan.steps();

        let assignment = match state {
            TaskState::Empty if seeking_package => {
                grid.claim_package(target)?;
                robots.take_package(robot, target);
                debug!(%robot, package = %target, steps, "claimed package");
                Assignment::Package { target, steps }
            }
            TaskState::Empty => {
                debug!(%robot, home = %target, steps, "heading home");
                Assignment::Home { target, steps }
            }
            TaskState::Full => {
                debug!(%robot, delivery = %target, steps, "heading to delivery");
                Assignment::Delivery { target, steps }
            }
        };

        robots.mark_stalled(robot, false);
        robots.adopt_plan(robot, target, plan.into_stack());
        Ok(assignment)
    }

    // ── Collision avoidance ───────────────────────────────────────────────

    /// Check `robot`'s next step against every other robot before it moves.
    ///
    /// If another robot stands on (or is stepping into) the next cell:
    ///
    /// * the blocker's pending path does not contain this robot's cell, so
    ///   it will move away: wait one step in place;
    /// * otherwise the two want each other's cells: block the contested cell
    ///   for one query and route around it to the same target.
    ///
    /// Only the blocker's path is inspected.  Longer chains (A waits for B
    /// who waits for C who waits for A) are not detected.
    pub fn prevent_collision_of(
        &self,
        robot:    RobotId,
        robots:   &mut RobotStore,
        mobility: &MobilityStore,
        grid:     &mut Grid,
    ) -> ControlResult<Resolution> {
        robots.check(robot)?;
        let Some(next) = robots.next_step(robot) else {
            return Ok(Resolution::Clear);
        };
        let Some(blocker) = self.robot_at(next, robot, mobility) else {
            return Ok(Resolution::Clear);
        };

        let here = robots.coord[robot.index()];
        if !robots.path_contains(blocker, here) {
            robots.push_wait(robot);
            debug!(%robot, %blocker, cell = %next, "waiting for cell to clear");
            return Ok(Resolution::Wait { blocker });
        }

        let Some(target) = robots.target[robot.index()] else {
            robots.push_wait(robot);
            return Ok(Resolution::Wait { blocker });
        };

        grid.push_collidable(next);
        let detour = self.find_shortest_path(here, &[target], grid);
        grid.pop_collidable();

        match detour {
            Ok(plan) => {
                debug!(%robot, %blocker, around = %next, steps = plan.steps(), "detouring");
                robots.adopt_plan(robot, target, plan.into_stack());
                // The detour may lead straight into a third robot.
                if let Some(first) = robots.next_step(robot) {
                    if self.is_collision_imminent(first, robot, mobility) {
                        robots.push_wait(robot);
                    }
                }
                Ok(Resolution::Detour { blocker })
            }
            Err(SpatialError::NoPath { .. }) => {
                if let Some(package) = robots.abandon_package(robot) {
                    grid.release_package(package);
                }
                robots.clear_plan(robot);
                warn!(%robot, %blocker, cell = %next, "no detour, plan dropped");
                Ok(Resolution::Abandoned { blocker })
            }
            Err(e) => Err(e.into()),
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Shortest plan from `origin` to any of `destinations`.
    ///
    /// Each candidate is searched with the grid's collidables as obstacles,
    /// minus that candidate.  Unreachable candidates are skipped; among the
    /// rest the fewest steps win, ties going to the earlier candidate.
    ///
    /// # Errors
    ///
    /// [`SpatialError::NoPath`] if no candidate is reachable (including an
    /// empty candidate list), or an out-of-bounds endpoint.
    pub fn find_shortest_path(
        &self,
        origin:       Coord,
        destinations: &[Coord],
        grid:         &Grid,
    ) -> SpatialResult<Plan> {
        let base: ObstacleSet = grid.collidables().collect();
        let plans = self.search_all(origin, destinations, base)?;

        let mut best: Option<Plan> = None;
        for plan in plans.into_iter().filter(|p| !p.is_empty()) {
            if best.as_ref().is_none_or(|b| plan.steps() < b.steps()) {
                best = Some(plan);
            }
        }
        best.ok_or(SpatialError::NoPath { from: origin, candidates: destinations.len() })
    }

    #[cfg(not(feature = "parallel"))]
    fn search_all(
        &self,
        origin:       Coord,
        destinations: &[Coord],
        mut base:     ObstacleSet,
    ) -> SpatialResult<Vec<Plan>> {
        destinations
            .iter()
            .map(|&dest| {
                let unblocked = base.remove(dest);
                let plan = self.planner.find_path(origin, dest, &base);
                if unblocked {
                    base.insert(dest);
                }
                plan
            })
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn search_all(
        &self,
        origin:       Coord,
        destinations: &[Coord],
        base:         ObstacleSet,
    ) -> SpatialResult<Vec<Plan>> {
        use rayon::prelude::*;

        // Indexed collect keeps candidate order.
        destinations
            .par_iter()
            .map(|&dest| {
                let mut obstacles = base.clone();
                obstacles.remove(dest);
                self.planner.find_path(origin, dest, &obstacles)
            })
            .collect()
    }

    /// The robot, other than `except`, standing on or stepping into `cell`.
    /// Lowest id first.
    pub fn robot_at(&self, cell: Coord, except: RobotId, mobility: &MobilityStore) -> Option<RobotId> {
        mobility.occupant(cell, except)
    }

    /// `true` if some other robot holds `next`.
    pub fn is_collision_imminent(&self, next: Coord, robot: RobotId, mobility: &MobilityStore) -> bool {
        self.robot_at(next, robot, mobility).is_some()
    }
}
