//! Unit tests for rb-agent.

#[cfg(test)]
mod builder {
    use rb_core::{Coord, RobotId};

    use crate::{RobotStoreBuilder, TaskState};

    #[test]
    fn builds_one_robot_per_home() {
        let store = RobotStoreBuilder::new()
            .with_robot(Coord::new(0, 0))
            .with_homes([Coord::new(3, 1), Coord::new(2, 2)])
            .build();
        assert_eq!(store.count, 3);
        assert_eq!(store.robot_ids().collect::<Vec<_>>(), vec![RobotId(0), RobotId(1), RobotId(2)]);
        for i in 0..3 {
            assert_eq!(store.coord[i], store.home[i]);
            assert_eq!(store.task_state[i], TaskState::Empty);
            assert!(store.path[i].is_empty());
            assert_eq!(store.trail[i], vec![store.home[i]]);
        }
        assert_eq!(store.home[1], Coord::new(3, 1));
    }

    #[test]
    fn empty_builder_gives_empty_store() {
        let store = RobotStoreBuilder::new().build();
        assert!(store.is_empty());
        assert!(store.check(RobotId(0)).is_err());
    }
}

#[cfg(test)]
mod movement {
    use rb_core::{Coord, RobotId};

    use crate::{RobotError, RobotStore, RobotStoreBuilder};

    const R: RobotId = RobotId(0);

    fn one_robot() -> RobotStore {
        RobotStoreBuilder::new().with_robot(Coord::new(0, 0)).build()
    }

    #[test]
    fn steps_pop_from_the_top() {
        let mut s = one_robot();
        // Destination (2,0) at the bottom, next step (1,0) on top.
        s.adopt_plan(R, Coord::new(2, 0), vec![Coord::new(2, 0), Coord::new(1, 0)]);
        assert_eq!(s.next_step(R), Some(Coord::new(1, 0)));
        assert_eq!(s.pending(R).collect::<Vec<_>>(), vec![Coord::new(1, 0), Coord::new(2, 0)]);

        assert_eq!(s.complete_step(R).unwrap(), Coord::new(1, 0));
        assert_eq!(s.complete_step(R).unwrap(), Coord::new(2, 0));
        assert!(s.is_idle(R));
        assert_eq!(s.trail[0], vec![Coord::new(0, 0), Coord::new(1, 0), Coord::new(2, 0)]);
        assert!(matches!(s.complete_step(R), Err(RobotError::NoPendingStep(_))));
    }

    #[test]
    fn wait_is_a_step_in_place() {
        let mut s = one_robot();
        s.adopt_plan(R, Coord::new(1, 0), vec![Coord::new(1, 0)]);
        s.push_wait(R);
        assert_eq!(s.next_step(R), Some(Coord::new(0, 0)));
        assert_eq!(s.complete_step(R).unwrap(), Coord::new(0, 0));
        assert_eq!(s.next_step(R), Some(Coord::new(1, 0)));
        // Waiting leaves no mark on the trail.
        assert_eq!(s.trail[0], vec![Coord::new(0, 0)]);
    }

    #[test]
    fn jump_is_rejected_and_path_kept() {
        let mut s = one_robot();
        s.adopt_plan(R, Coord::new(2, 2), vec![Coord::new(2, 2)]);
        assert!(matches!(s.complete_step(R), Err(RobotError::NotAdjacent { .. })));
        assert_eq!(s.next_step(R), Some(Coord::new(2, 2)));
        assert_eq!(s.coord[0], Coord::new(0, 0));
    }

    #[test]
    fn clear_plan_makes_idle() {
        let mut s = one_robot();
        s.adopt_plan(R, Coord::new(1, 0), vec![Coord::new(1, 0)]);
        assert!(s.path_contains(R, Coord::new(1, 0)));
        s.clear_plan(R);
        assert!(s.is_idle(R));
        assert_eq!(s.target[0], None);
    }

    #[test]
    fn unknown_robot_is_an_error() {
        let mut s = one_robot();
        assert!(matches!(s.complete_step(RobotId(5)), Err(RobotError::UnknownRobot(_))));
    }
}

#[cfg(test)]
mod state_machine {
    use rb_core::{Coord, RobotId, SimEvent};

    use crate::{RobotStore, RobotStoreBuilder, TaskState};

    const R: RobotId = RobotId(0);
    const HOME: Coord = Coord::new(0, 0);
    const PKG: Coord = Coord::new(1, 0);
    const END: Coord = Coord::new(2, 0);

    fn walk_to(s: &mut RobotStore, to: Coord) {
        s.adopt_plan(R, to, vec![to]);
        s.complete_step(R).unwrap();
    }

    #[test]
    fn full_cycle_raises_each_event_once() {
        let mut s = RobotStoreBuilder::new().with_robot(HOME).build();
        let ends = [END];

        s.take_package(R, PKG);
        walk_to(&mut s, PKG);
        assert_eq!(s.finish_movement(R, &ends, false), Some(SimEvent::ArrivedAtPackage(R)));
        assert_eq!(s.task_state[0], TaskState::Full);
        assert_eq!(s.cargo[0], Some(PKG));
        assert_eq!(s.target[0], None);

        walk_to(&mut s, END);
        assert_eq!(s.finish_movement(R, &ends, false), Some(SimEvent::ArrivedAtDelivery(R)));
        assert_eq!(s.task_state[0], TaskState::Empty);
        assert_eq!(s.cargo[0], None);
        assert_eq!(s.delivered[0], Some(PKG));

        walk_to(&mut s, PKG);
        walk_to(&mut s, HOME);
        assert_eq!(s.finish_movement(R, &ends, false), Some(SimEvent::Parked(R)));
        assert!(s.parked[0]);
        // Already parked: nothing more.
        assert_eq!(s.finish_movement(R, &ends, false), None);
    }

    #[test]
    fn full_robot_off_a_delivery_point_stays_full() {
        let mut s = RobotStoreBuilder::new().with_robot(HOME).build();
        s.take_package(R, PKG);
        walk_to(&mut s, PKG);
        s.finish_movement(R, &[END], false);
        walk_to(&mut s, Coord::new(1, 1));
        assert_eq!(s.finish_movement(R, &[END], false), None);
        assert_eq!(s.task_state[0], TaskState::Full);
    }

    #[test]
    fn no_park_while_packages_remain() {
        let mut s = RobotStoreBuilder::new().with_robot(HOME).build();
        assert_eq!(s.finish_movement(R, &[END], true), None);
        assert!(!s.parked[0]);
        assert_eq!(s.finish_movement(R, &[END], false), Some(SimEvent::Parked(R)));
    }

    #[test]
    fn claim_unparks_and_abandon_returns_claim() {
        let mut s = RobotStoreBuilder::new().with_robot(HOME).build();
        s.finish_movement(R, &[END], false);
        assert!(s.parked[0]);
        s.take_package(R, PKG);
        assert!(!s.parked[0]);
        assert_eq!(s.abandon_package(R), Some(PKG));
        assert_eq!(s.cargo[0], None);
    }

    #[test]
    fn full_robot_keeps_cargo_on_abandon() {
        let mut s = RobotStoreBuilder::new().with_robot(HOME).build();
        s.take_package(R, PKG);
        walk_to(&mut s, PKG);
        s.finish_movement(R, &[END], false);
        assert_eq!(s.abandon_package(R), None);
        assert_eq!(s.cargo[0], Some(PKG));
    }

    #[test]
    fn reset_restores_everything() {
        let mut s = RobotStoreBuilder::new().with_robot(HOME).build();
        s.take_package(R, PKG);
        walk_to(&mut s, PKG);
        s.finish_movement(R, &[END], false);
        s.adopt_plan(R, END, vec![END]);

        s.reset();
        assert_eq!(s.coord[0], HOME);
        assert_eq!(s.task_state[0], TaskState::Empty);
        assert!(s.is_idle(R));
        assert_eq!(s.target[0], None);
        assert_eq!(s.cargo[0], None);
        assert_eq!(s.trail[0], vec![HOME]);
    }

    #[test]
    fn stall_starts_once_until_cleared() {
        let mut s = RobotStoreBuilder::new().with_robot(HOME).build();
        assert!(s.mark_stalled(R, true));
        assert!(!s.mark_stalled(R, true));
        assert!(s.stalled[0]);
        assert!(!s.mark_stalled(R, false));
        assert!(s.mark_stalled(R, true));
        s.reset();
        assert!(!s.stalled[0]);
    }
}
