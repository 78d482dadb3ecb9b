//! Scenario tests for rb-sim.

use rb_agent::RobotStore;
use rb_core::{Coord, Elapsed, RobotId, SimConfig, SimEvent, Tick};
use rb_mobility::MobilityStore;
use rb_spatial::{parse_layout, AStarPlanner};

use crate::{NoopObserver, Sim, SimBuilder, SimObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn c(col: i32, row: i32) -> Coord {
    Coord::new(col, row)
}

/// One tick per step, 10 ms per tick, small horizon.
fn fast_config() -> SimConfig {
    SimConfig {
        tick_duration_ms:      10,
        ticks_per_step:        1,
        speed_multiplier:      1.0,
        max_ticks:             500,
        output_interval_ticks: 1,
    }
}

fn sim(layout: &str, config: SimConfig) -> Sim<AStarPlanner> {
    let grid = parse_layout(layout).unwrap();
    let planner = AStarPlanner::for_grid(&grid);
    SimBuilder::new(config, grid, planner).build().unwrap()
}

/// 3x3, start top-left, package bottom-right, delivery bottom-left.
const THREE_BY_THREE: &str = "\
S..
...
E.P
";

/// Two robots sharing a one-wide corridor with a single delivery pocket in
/// the middle: the second robot has to hold back while the first uses it.
const T_JUNCTION: &str = "\
###E###
SP...PS
";

/// Records events, snapshot count, and checks that no two robots ever hold
/// the same cell.
#[derive(Default)]
struct Recorder {
    events:    Vec<(Tick, SimEvent)>,
    snapshots: usize,
    ended:     Option<(Tick, Elapsed)>,
}

impl SimObserver for Recorder {
    fn on_event(&mut self, tick: Tick, event: SimEvent) {
        self.events.push((tick, event));
    }

    fn on_snapshot(&mut self, tick: Tick, robots: &RobotStore, mobility: &MobilityStore) {
        self.snapshots += 1;
        for a in 0..robots.count {
            for b in (a + 1)..robots.count {
                assert_ne!(robots.coord[a], robots.coord[b], "{tick}: robots {a} and {b} share a cell");
                let (sa, sb) = (&mobility.states[a], &mobility.states[b]);
                if sa.in_transit {
                    assert!(!sb.occupies(sa.to), "{tick}: robot {a} steps into robot {b}");
                }
                if sb.in_transit {
                    assert!(!sa.occupies(sb.to), "{tick}: robot {b} steps into robot {a}");
                }
            }
        }
    }

    fn on_sim_end(&mut self, final_tick: Tick, elapsed: Elapsed) {
        self.ended = Some((final_tick, elapsed));
    }
}

// ── SimBuilder ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use rb_agent::RobotStoreBuilder;

    use super::*;
    use crate::{RunState, SimError};

    #[test]
    fn one_robot_per_start_in_declaration_order() {
        let s = sim("S.S\n...\nS.E\n", fast_config());
        assert_eq!(s.robots.count, 3);
        assert_eq!(s.robots.home, vec![c(0, 0), c(2, 0), c(0, 2)]);
        assert_eq!(s.state, RunState::Idle);
        assert_eq!(s.park_times.len(), 3);
        assert_eq!(s.mobility.store.len(), 3);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let grid = parse_layout(THREE_BY_THREE).unwrap();
        let planner = AStarPlanner::for_grid(&grid);
        let config = SimConfig { ticks_per_step: 0, ..fast_config() };
        assert!(matches!(
            SimBuilder::new(config, grid, planner).build(),
            Err(SimError::Core(_))
        ));
    }

    #[test]
    fn robots_off_the_grid_are_rejected() {
        let grid = parse_layout(THREE_BY_THREE).unwrap();
        let planner = AStarPlanner::for_grid(&grid);
        let robots = RobotStoreBuilder::new().with_robot(c(5, 5)).build();
        assert!(matches!(
            SimBuilder::new(fast_config(), grid, planner).robots(robots).build(),
            Err(SimError::Config(_))
        ));
    }

    #[test]
    fn supplied_robots_are_used() {
        let grid = parse_layout(THREE_BY_THREE).unwrap();
        let planner = AStarPlanner::for_grid(&grid);
        let robots = RobotStoreBuilder::new().with_robot(c(1, 1)).build();
        let s = SimBuilder::new(fast_config(), grid, planner).robots(robots).build().unwrap();
        assert_eq!(s.robots.home, vec![c(1, 1)]);
    }
}

// ── Full runs ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scenarios {
    use rb_agent::TaskState;
    use rb_spatial::Cell;

    use super::*;

    #[test]
    fn three_by_three_pickup_deliver_park() {
        let mut s = sim(THREE_BY_THREE, fast_config());
        let mut rec = Recorder::default();
        s.run(&mut rec).unwrap();

        let r = RobotId(0);
        assert_eq!(
            rec.events,
            vec![
                (Tick(4), SimEvent::ArrivedAtPackage(r)),
                (Tick(6), SimEvent::ArrivedAtDelivery(r)),
                (Tick(8), SimEvent::Parked(r)),
            ]
        );
        assert!(s.is_finished());
        assert!(s.all_packages_were_delivered());
        assert!(s.all_robots_are_parked());
        assert_eq!(s.clock.current_tick, Tick(8), "clock stops on the finishing tick");
        assert_eq!(s.elapsed().to_string(), "00:00:08");
        assert_eq!(s.park_time(r), Some(Elapsed::from_millis(80)));
        assert_eq!(rec.ended, Some((Tick(8), Elapsed::from_millis(80))));

        assert_eq!(
            s.robots.trail[0],
            vec![c(0, 0), c(1, 0), c(2, 0), c(2, 1), c(2, 2), c(1, 2), c(0, 2), c(0, 1), c(0, 0)]
        );
        assert_eq!(s.robots.task_state[0], TaskState::Empty);
        assert_eq!(s.grid.cell(c(2, 2)).unwrap(), Cell::Empty, "package picked up");
        assert!(s.delivered.contains(&c(2, 2)));
    }

    #[test]
    fn step_length_scales_time_not_route() {
        let mut s = sim(THREE_BY_THREE, SimConfig { ticks_per_step: 10, ..fast_config() });
        s.run(&mut NoopObserver).unwrap();
        assert!(s.is_finished());
        assert_eq!(s.clock.current_tick, Tick(80));
        assert_eq!(s.elapsed().to_string(), "00:00:80");
        assert_eq!(s.robots.trail[0].len(), 9);
    }

    #[test]
    fn second_robot_defers_in_the_corridor() {
        let mut s = sim(T_JUNCTION, fast_config());
        let mut rec = Recorder::default();
        s.run(&mut rec).unwrap();

        assert!(s.is_finished());
        assert_eq!(s.clock.current_tick, Tick(12));
        assert_eq!(
            s.robots.trail[0],
            vec![c(0, 1), c(1, 1), c(2, 1), c(3, 1), c(3, 0), c(3, 1), c(2, 1), c(1, 1), c(0, 1)]
        );
        assert_eq!(
            s.robots.trail[1],
            vec![c(6, 1), c(5, 1), c(4, 1), c(3, 1), c(3, 0), c(3, 1), c(4, 1), c(5, 1), c(6, 1)]
        );
        // Robot 1 reached the junction four ticks after it could have.
        let delivery_ticks: Vec<Tick> = rec
            .events
            .iter()
            .filter(|(_, e)| matches!(e, SimEvent::ArrivedAtDelivery(_)))
            .map(|(t, _)| *t)
            .collect();
        assert_eq!(delivery_ticks, vec![Tick(4), Tick(8)]);
        assert_eq!(s.park_time(RobotId(0)).unwrap().to_string(), "00:00:08");
        assert_eq!(s.park_time(RobotId(1)).unwrap().to_string(), "00:00:12");
    }

    #[test]
    fn runs_are_deterministic() {
        let layout = "\
S...P..
.##.#..
P...#.E
..#....
S..P..S
";
        let mut a = sim(layout, fast_config());
        let mut b = sim(layout, fast_config());
        let mut rec_a = Recorder::default();
        let mut rec_b = Recorder::default();
        a.run(&mut rec_a).unwrap();
        b.run(&mut rec_b).unwrap();
        assert_eq!(rec_a.events, rec_b.events);
        assert_eq!(a.robots.trail, b.robots.trail);
        assert_eq!(a.clock.current_tick, b.clock.current_tick);
    }

    #[test]
    fn each_package_is_picked_up_once_and_delivered_once() {
        let layout = "\
S...P..
.##.#..
P...#.E
..#....
S..P..S
";
        let mut s = sim(layout, fast_config());
        let mut rec = Recorder::default();
        s.run(&mut rec).unwrap();
        assert!(s.is_finished());

        let pickups = rec.events.iter().filter(|(_, e)| matches!(e, SimEvent::ArrivedAtPackage(_))).count();
        let drops = rec.events.iter().filter(|(_, e)| matches!(e, SimEvent::ArrivedAtDelivery(_))).count();
        assert_eq!(pickups, 3);
        assert_eq!(drops, 3);
        assert_eq!(s.delivered.len(), 3);
        assert!(s.grid.available_packages().is_empty());
        assert!(s.park_times.iter().all(Option::is_some));
    }

    #[test]
    fn nothing_to_do_finishes_on_tick_zero() {
        let mut s = sim("S.E\n...\n..S\n", fast_config());
        let mut rec = Recorder::default();
        s.run(&mut rec).unwrap();
        assert!(s.is_finished());
        assert_eq!(s.clock.current_tick, Tick::ZERO);
        assert_eq!(rec.events.len(), 2, "each robot parks once");
        assert_eq!(s.elapsed().to_string(), "00:00:00");
    }

    #[test]
    fn unreachable_package_stalls_until_horizon() {
        let mut s = sim("S.#P\n..#E\n", SimConfig { max_ticks: 50, ..fast_config() });
        let mut rec = Recorder::default();
        s.run(&mut rec).unwrap();
        assert!(!s.is_finished());
        assert!(s.state.is_running());
        assert_eq!(s.clock.current_tick, Tick(50));
        assert!(rec.events.is_empty());
        assert_eq!(s.grid.available_packages(), &[c(3, 0)], "never claimed");
        assert_eq!(s.robots.coord[0], c(0, 0));
        assert!(s.robots.stalled[0]);
    }

    #[test]
    fn pickup_and_drop_on_the_same_tick_clear_the_package_cell() {
        // The package sits on a delivery point: pickup and drop both fire
        // on the arrival tick, before the events are drained.
        let mut grid = parse_layout("S.P\n...\n").unwrap();
        grid.set_state(c(2, 0), Cell::End).unwrap();
        let planner = AStarPlanner::for_grid(&grid);
        let mut s = SimBuilder::new(fast_config(), grid, planner).build().unwrap();
        let mut rec = Recorder::default();
        s.run(&mut rec).unwrap();

        let r = RobotId(0);
        assert_eq!(
            rec.events,
            vec![
                (Tick(2), SimEvent::ArrivedAtPackage(r)),
                (Tick(2), SimEvent::ArrivedAtDelivery(r)),
                (Tick(5), SimEvent::Parked(r)),
            ]
        );
        assert_eq!(s.grid.cell(c(2, 0)).unwrap(), Cell::Empty, "package picked up");
        assert!(s.delivered.contains(&c(2, 0)));
        assert!(s.is_finished());
    }

    #[test]
    fn parked_robot_on_the_only_route_blocks_forever() {
        // Robot 1 parks on its home at T0, which is the only way to the
        // package.  Robot 0 waits behind it until the horizon; nothing
        // asks a parked robot to make way.
        let mut s = sim("SS.PE\n", SimConfig { max_ticks: 100, ..fast_config() });
        let mut rec = Recorder::default();
        s.run(&mut rec).unwrap();

        assert!(!s.is_finished());
        assert_eq!(s.clock.current_tick, Tick(100));
        assert_eq!(rec.events, vec![(Tick(0), SimEvent::Parked(RobotId(1)))]);
        assert_eq!(s.robots.coord[0], c(0, 0));
        assert_eq!(s.robots.cargo[0], Some(c(3, 0)), "claim is held while waiting");
        assert!(s.grid.available_packages().is_empty());
        assert_eq!(s.robots.coord[1], c(1, 0));
    }
}

// ── Session control ───────────────────────────────────────────────────────────

#[cfg(test)]
mod session {
    use std::time::Duration;

    use super::*;
    use crate::{RunState, SimError};

    #[test]
    fn tick_does_nothing_until_started() {
        let mut s = sim(THREE_BY_THREE, fast_config());
        s.tick(&mut NoopObserver).unwrap();
        assert_eq!(s.clock.current_tick, Tick::ZERO);
        s.start().unwrap();
        s.tick(&mut NoopObserver).unwrap();
        assert_eq!(s.clock.current_tick, Tick(1));
    }

    #[test]
    fn stop_keeps_plans_and_resume_continues() {
        let mut s = sim(THREE_BY_THREE, fast_config());
        s.start().unwrap();
        s.run_ticks(2, &mut NoopObserver).unwrap();
        s.stop();
        assert_eq!(s.state, RunState::Paused);

        let before = s.robot_views();
        s.run_ticks(5, &mut NoopObserver).unwrap();
        s.tick(&mut NoopObserver).unwrap();
        assert_eq!(s.clock.current_tick, Tick(2));
        assert_eq!(s.robot_views(), before);

        s.resume().unwrap();
        s.run(&mut NoopObserver).unwrap();
        assert!(s.is_finished());
        assert_eq!(s.clock.current_tick, Tick(8), "pausing cost no simulated time");
    }

    #[test]
    fn reset_restores_the_authored_grid() {
        let mut s = sim(THREE_BY_THREE, fast_config());
        s.run(&mut NoopObserver).unwrap();
        assert!(s.is_finished());

        s.reset();
        assert_eq!(s.state, RunState::Idle);
        assert_eq!(s.clock.current_tick, Tick::ZERO);
        assert_eq!(s.grid.available_packages(), s.grid.packages());
        assert_eq!(s.grid.cell(c(2, 2)).unwrap(), rb_spatial::Cell::Package);
        assert!(s.robots.is_empty());
        assert!(s.delivered.is_empty());
        assert!(s.events.is_empty());
        assert!(s.park_times.is_empty());
        assert!(s.robot_views().is_empty());
    }

    #[test]
    fn rerun_after_reset_repeats_the_run() {
        let mut s = sim(T_JUNCTION, fast_config());
        let mut first = Recorder::default();
        s.run(&mut first).unwrap();
        let trails = s.robots.trail.clone();

        s.reset();
        let mut second = Recorder::default();
        s.run(&mut second).unwrap();
        assert_eq!(first.events, second.events);
        assert_eq!(s.robots.trail, trails);
    }

    #[test]
    fn reset_mid_run_clears_plans() {
        let mut s = sim(THREE_BY_THREE, fast_config());
        s.start().unwrap();
        s.run_ticks(3, &mut NoopObserver).unwrap();
        assert_eq!(s.robots.target[0], Some(c(2, 2)));
        s.reset();
        s.start().unwrap();
        assert!(s.robots.robot_ids().all(|r| s.robots.is_idle(r)));
        assert!(s.robots.target.iter().all(Option::is_none));
        assert_eq!(s.robots.coord, s.robots.home);
    }

    #[test]
    fn finished_run_cannot_start_again_without_reset() {
        let mut s = sim(THREE_BY_THREE, fast_config());
        s.run(&mut NoopObserver).unwrap();
        assert!(matches!(s.start(), Err(SimError::InvalidState { .. })));
        assert!(matches!(s.resume(), Err(SimError::InvalidState { .. })));
        s.reset();
        assert!(s.start().is_ok());
    }

    #[test]
    fn speed_multiplier_changes_pacing_only() {
        let mut s = sim(THREE_BY_THREE, fast_config());
        let secs = |d: Duration| d.as_secs_f64();
        assert!((secs(s.tick_interval()) - 0.010).abs() < 1e-9);
        s.set_speed_multiplier(2.0).unwrap();
        assert!((secs(s.tick_interval()) - 0.005).abs() < 1e-9);
        assert!(s.set_speed_multiplier(0.0).is_err());
        assert!(s.set_speed_multiplier(f32::NAN).is_err());
        assert_eq!(s.config.speed_multiplier, 2.0);

        s.run(&mut NoopObserver).unwrap();
        assert_eq!(s.elapsed().to_string(), "00:00:08");
    }
}

// ── Presentation feed & observers ─────────────────────────────────────────────

#[cfg(test)]
mod feed {
    use rb_agent::TaskState;

    use super::*;

    #[test]
    fn views_show_plan_and_step_progress() {
        let mut s = sim(THREE_BY_THREE, SimConfig { ticks_per_step: 4, ..fast_config() });
        s.start().unwrap();
        s.run_ticks(2, &mut NoopObserver).unwrap();

        let views = s.robot_views();
        assert_eq!(views.len(), 1);
        let v = &views[0];
        assert_eq!(v.id, RobotId(0));
        assert_eq!(v.coord, c(0, 0));
        assert_eq!(v.task_state, TaskState::Empty);
        assert_eq!(v.target, Some(c(2, 2)));
        assert_eq!(v.plan, vec![c(1, 0), c(2, 0), c(2, 1), c(2, 2)]);
        let (from, to, progress) = v.step.unwrap();
        assert_eq!((from, to), (c(0, 0), c(1, 0)));
        assert!((progress - 0.5).abs() < 1e-6, "two of four ticks done");
    }

    #[test]
    fn snapshot_interval_is_respected() {
        let mut s = sim(THREE_BY_THREE, SimConfig { output_interval_ticks: 3, ..fast_config() });
        let mut rec = Recorder::default();
        s.run(&mut rec).unwrap();
        // Ticks 0, 3, 6 and the finishing tick 8.
        assert_eq!(rec.snapshots, 4);
    }

    #[test]
    fn zero_interval_disables_snapshots() {
        let mut s = sim(THREE_BY_THREE, SimConfig { output_interval_ticks: 0, ..fast_config() });
        let mut rec = Recorder::default();
        s.run(&mut rec).unwrap();
        assert_eq!(rec.snapshots, 0);
        assert!(s.is_finished());
    }

    #[test]
    fn tick_hooks_bracket_every_tick() {
        #[derive(Default)]
        struct Counter {
            starts: u64,
            ends:   u64,
            moving: usize,
        }
        impl SimObserver for Counter {
            fn on_tick_start(&mut self, _t: Tick) {
                self.starts += 1;
            }
            fn on_tick_end(&mut self, _t: Tick, moving: usize) {
                self.ends += 1;
                self.moving = self.moving.max(moving);
            }
        }

        let mut s = sim(T_JUNCTION, fast_config());
        let mut counter = Counter::default();
        s.run(&mut counter).unwrap();
        assert_eq!(counter.starts, 13, "ticks 0 through 12");
        assert_eq!(counter.ends, 13);
        assert_eq!(counter.moving, 2);
    }
}
