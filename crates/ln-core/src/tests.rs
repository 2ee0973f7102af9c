//! Unit tests for ln-core primitives.

#[cfg(test)]
mod ids {
    use crate::AgentId;

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn default_is_invalid() {
        assert_eq!(AgentId::default(), AgentId::INVALID);
        assert_eq!(AgentId::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::{CoreError, Direction, Position, Relative};

    #[test]
    fn manhattan_distance() {
        let a = Position::new(0, 0, 0);
        let b = Position::new(3, -2, 4);
        assert_eq!(a.manhattan(b), 9);
        assert_eq!(b.manhattan(a), 9);
        assert_eq!(a.manhattan(a), 0);
    }

    #[test]
    fn multi_manhattan_picks_nearest() {
        let p = Position::new(0, 0, 0);
        let targets = [Position::new(10, 0, 0), Position::new(0, 0, -3), Position::new(5, 5, 5)];
        assert_eq!(p.multi_manhattan(&targets), Some(3));
        assert_eq!(p.multi_manhattan(&[]), None);
    }

    #[test]
    fn vector_lookup_roundtrip() {
        for d in Direction::ALL {
            assert!(d.vector().is_unit());
            assert_eq!(Direction::from_vector(d.vector()), Ok(d));
        }
    }

    #[test]
    fn non_unit_vector_is_rejected() {
        let v = Position::new(1, 1, 0);
        assert_eq!(Direction::from_vector(v), Err(CoreError::NotUnitVector(v)));
        assert!(Direction::from_vector(Position::ORIGIN).is_err());
        assert!(Direction::from_vector(Position::new(2, 0, 0)).is_err());
    }

    #[test]
    fn neighbors_are_unit_steps() {
        let p = Position::new(4, -1, 7);
        for (d, n) in p.neighbors() {
            assert_eq!(p.manhattan(n), 1);
            assert_eq!(Direction::from_vector(n - p), Ok(d));
        }
    }

    #[test]
    fn arithmetic_saturates_at_the_range_edge() {
        let edge = Position::new(i32::MAX, 0, i32::MIN);
        assert_eq!(edge.step(Direction::East), edge);
        assert_eq!(edge.step(Direction::South), Position::new(i32::MAX, 0, i32::MIN + 1));
        assert_eq!(edge.step(Direction::North), edge);
        assert_eq!(edge.step(Direction::West), Position::new(i32::MAX - 1, 0, i32::MIN));

        let far = Position::new(i32::MIN, i32::MIN, i32::MIN);
        let near = Position::new(i32::MAX, i32::MAX, i32::MAX);
        assert_eq!(far.manhattan(near), u32::MAX);
        assert_eq!(near - far, Position::new(i32::MAX, i32::MAX, i32::MAX));
        assert!(!far.is_unit());
        assert_eq!(far.multi_manhattan(&[near, far]), Some(0));
    }

    #[test]
    fn opposite_is_involution() {
        for d in Direction::ALL {
            assert_ne!(d.opposite(), d);
            assert_eq!(d.opposite().opposite(), d);
            assert_eq!(d.vector() + d.opposite().vector(), Position::ORIGIN);
        }
    }

    #[test]
    fn rotate_clockwise() {
        assert_eq!(Direction::North.rotate(1), Direction::East);
        assert_eq!(Direction::North.rotate(-1), Direction::West);
        assert_eq!(Direction::West.rotate(1), Direction::North);
        assert_eq!(Direction::East.rotate(2), Direction::West);
        assert_eq!(Direction::Up.rotate(1), Direction::Up);
    }

    #[test]
    fn relative_directions_facing_north() {
        let f = Direction::North;
        assert_eq!(Direction::North.relative_to(f), Relative::Front);
        assert_eq!(Direction::East.relative_to(f), Relative::Right);
        assert_eq!(Direction::South.relative_to(f), Relative::Back);
        assert_eq!(Direction::West.relative_to(f), Relative::Left);
        assert_eq!(Direction::Up.relative_to(f), Relative::Up);
        assert_eq!(Direction::Down.relative_to(f), Relative::Down);
    }

    #[test]
    fn relative_directions_facing_west() {
        let f = Direction::West;
        assert_eq!(Direction::West.relative_to(f), Relative::Front);
        assert_eq!(Direction::North.relative_to(f), Relative::Right);
        assert_eq!(Direction::East.relative_to(f), Relative::Back);
        assert_eq!(Direction::South.relative_to(f), Relative::Left);
    }

    #[test]
    fn vertical_moves_keep_facing() {
        assert_eq!(Direction::Up.facing_after(Direction::East), Direction::East);
        assert_eq!(Direction::Down.facing_after(Direction::South), Direction::South);
        assert_eq!(Direction::West.facing_after(Direction::East), Direction::West);
    }

    #[test]
    fn quarter_turns() {
        assert_eq!(Relative::Front.quarter_turns(), 0);
        assert_eq!(Relative::Up.quarter_turns(), 0);
        assert_eq!(Relative::Left.quarter_turns(), 1);
        assert_eq!(Relative::Right.quarter_turns(), 1);
        assert_eq!(Relative::Back.quarter_turns(), 2);
    }

    #[test]
    fn position_key_roundtrip() {
        let p = Position::new(-3, 12, 0);
        assert_eq!(p.key(), "-3,12,0");
        assert_eq!("-3,12,0".parse::<Position>(), Ok(p));
        assert_eq!(" 1, 2 ,3".parse::<Position>(), Ok(Position::new(1, 2, 3)));
        assert!("1,2".parse::<Position>().is_err());
        assert!("1,2,3,4".parse::<Position>().is_err());
        assert!("a,b,c".parse::<Position>().is_err());
    }

    #[test]
    fn direction_parse() {
        assert_eq!("north".parse::<Direction>(), Ok(Direction::North));
        assert_eq!("UP".parse::<Direction>(), Ok(Direction::Up));
        assert!("sideways".parse::<Direction>().is_err());
    }
}

#[cfg(test)]
mod flow {
    use crate::{Direction, Flow, classify_flow};

    #[test]
    fn equal_is_with_flow() {
        for d in Direction::ALL {
            assert_eq!(classify_flow(d, d), Flow::WithFlow, "{d}");
        }
    }

    #[test]
    fn opposites_are_against_flow() {
        for d in Direction::ALL {
            assert_eq!(classify_flow(d, d.opposite()), Flow::AgainstFlow, "{d}");
        }
    }

    #[test]
    fn perpendicular_horizontal_is_cross_flow() {
        assert_eq!(classify_flow(Direction::North, Direction::East), Flow::CrossFlow);
        assert_eq!(classify_flow(Direction::North, Direction::West), Flow::CrossFlow);
        assert_eq!(classify_flow(Direction::South, Direction::East), Flow::CrossFlow);
    }

    #[test]
    fn vertical_with_horizontal_is_cross_flow() {
        for h in Direction::HORIZONTAL {
            assert_eq!(classify_flow(Direction::Up, h), Flow::CrossFlow);
            assert_eq!(classify_flow(h, Direction::Down), Flow::CrossFlow);
        }
    }

    #[test]
    fn total_over_all_pairs() {
        let mut with = 0;
        let mut against = 0;
        let mut cross = 0;
        for a in Direction::ALL {
            for m in Direction::ALL {
                match classify_flow(a, m) {
                    Flow::WithFlow => with += 1,
                    Flow::AgainstFlow => against += 1,
                    Flow::CrossFlow => cross += 1,
                }
            }
        }
        assert_eq!(with, 6);
        assert_eq!(against, 6);
        assert_eq!(cross, 36 - 12);
    }
}

#[cfg(test)]
mod agent {
    use crate::{Agent, AgentId};

    #[test]
    fn fuel_reserve_gate() {
        let a = Agent::new(AgentId(1), 20);
        assert_eq!(a.step_budget(), 10);
        assert!(a.can_expand(0));
        assert!(a.can_expand(9));
        assert!(!a.can_expand(10));
    }

    #[test]
    fn zero_fuel_never_expands() {
        assert!(!Agent::new(AgentId(0), 0).can_expand(0));
    }

    #[test]
    fn odd_fuel_rounds_down() {
        let a = Agent::new(AgentId(0), 7);
        assert_eq!(a.step_budget(), 3);
        assert!(a.can_expand(2));
        assert!(!a.can_expand(3));
    }

    #[test]
    fn builder_flags() {
        let a = Agent::new(AgentId(3), 10).with_dig(true).with_non_conformist(true);
        assert!(a.can_dig);
        assert!(a.non_conformist);
    }
}

#[cfg(test)]
mod time {
    use crate::{Clock, FixedClock, SystemClock, Timestamp};

    #[test]
    fn timestamp_arithmetic() {
        let t = Timestamp(1_000);
        assert_eq!(t + 500, Timestamp(1_500));
        assert_eq!(Timestamp(1_500) - t, 500);
        assert_eq!(t - Timestamp(1_500), 0);
        assert_eq!(Timestamp(u64::MAX) + 1, Timestamp(u64::MAX));
    }

    #[test]
    fn fixed_clock_is_fixed() {
        let c = FixedClock::at(42);
        assert_eq!(c.now(), Timestamp(42));
        assert_eq!(c.now(), c.now());
    }

    #[test]
    fn system_clock_is_after_2020() {
        assert!(SystemClock.now() > Timestamp(1_577_836_800_000));
    }
}
