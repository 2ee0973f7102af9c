//! Unit tests for ln-map.
//!
//! All tests use hand-built maps so expected waits can be read off directly.

#[cfg(test)]
mod reservation {
    use ln_core::{Direction, Timestamp};
    use crate::Reservation;

    #[test]
    fn window_covers_inclusive_bounds() {
        let r = Reservation::window(Direction::East, 1_000, 1_500);
        assert!(!r.covers(Timestamp(999)));
        assert!(r.covers(Timestamp(1_000)));
        assert!(r.covers(Timestamp(1_200)));
        assert!(r.covers(Timestamp(1_500)));
        assert!(!r.covers(Timestamp(1_501)));
    }

    #[test]
    fn indefinite_covers_everything_after_arrival() {
        let r = Reservation::indefinite(Direction::North, Timestamp(100));
        assert!(r.is_indefinite());
        assert!(!r.covers(Timestamp(99)));
        assert!(r.covers(Timestamp(u64::MAX)));
    }

    #[test]
    fn well_formed() {
        assert!(Reservation::window(Direction::East, 5, 5).is_well_formed());
        assert!(!Reservation::window(Direction::East, 6, 5).is_well_formed());
        assert!(Reservation::indefinite(Direction::East, Timestamp(6)).is_well_formed());
    }
}

#[cfg(test)]
mod admission {
    use ln_core::{AgentId, Direction, Timestamp};
    use crate::{Admission, Cell, Reservation, admit};

    const ME: AgentId = AgentId(1);
    const B: AgentId = AgentId(2);
    const C: AgentId = AgentId(3);

    fn cell_with(rs: &[(AgentId, Reservation)]) -> Cell {
        let mut cell = Cell::open();
        for (id, r) in rs {
            cell.reservations.insert(*id, *r);
        }
        cell
    }

    #[test]
    fn empty_cell_is_clear() {
        let a = admit(&Cell::open(), ME, Timestamp(10), 50);
        assert_eq!(a, Admission::Clear { arrive: Timestamp(10), waited_ms: 0, waits: 0 });
    }

    #[test]
    fn waits_past_window_plus_margin() {
        let cell = cell_with(&[(B, Reservation::window(Direction::East, 1_000, 1_500))]);
        let a = admit(&cell, ME, Timestamp(1_200), 50);
        assert_eq!(a, Admission::Clear { arrive: Timestamp(1_550), waited_ms: 350, waits: 1 });
    }

    #[test]
    fn arrival_outside_window_is_clear() {
        let cell = cell_with(&[(B, Reservation::window(Direction::East, 1_000, 1_500))]);
        assert_eq!(
            admit(&cell, ME, Timestamp(900), 50),
            Admission::Clear { arrive: Timestamp(900), waited_ms: 0, waits: 0 }
        );
        assert_eq!(
            admit(&cell, ME, Timestamp(1_600), 50),
            Admission::Clear { arrive: Timestamp(1_600), waited_ms: 0, waits: 0 }
        );
    }

    #[test]
    fn indefinite_overlap_blocks() {
        let cell = cell_with(&[(B, Reservation::indefinite(Direction::East, Timestamp(1_000)))]);
        assert_eq!(admit(&cell, ME, Timestamp(1_200), 50), Admission::Blocked { by: B });
    }

    #[test]
    fn indefinite_in_future_does_not_block() {
        let cell = cell_with(&[(B, Reservation::indefinite(Direction::East, Timestamp(5_000)))]);
        assert!(!admit(&cell, ME, Timestamp(1_200), 50).is_blocked());
    }

    #[test]
    fn chained_waits_across_back_to_back_windows() {
        let cell = cell_with(&[
            (C, Reservation::window(Direction::North, 1_520, 2_000)),
            (B, Reservation::window(Direction::East, 1_000, 1_500)),
        ]);
        // 1_200 → wait for B → 1_550, now inside C → 2_050.
        let a = admit(&cell, ME, Timestamp(1_200), 50);
        assert_eq!(a, Admission::Clear { arrive: Timestamp(2_050), waited_ms: 850, waits: 2 });
    }

    #[test]
    fn wait_into_indefinite_blocks() {
        let cell = cell_with(&[
            (B, Reservation::window(Direction::East, 1_000, 1_500)),
            (C, Reservation::indefinite(Direction::East, Timestamp(1_540))),
        ]);
        assert_eq!(admit(&cell, ME, Timestamp(1_200), 50), Admission::Blocked { by: C });
    }

    #[test]
    fn own_reservation_is_ignored() {
        let cell = cell_with(&[(ME, Reservation::indefinite(Direction::East, Timestamp(0)))]);
        assert!(!admit(&cell, ME, Timestamp(10), 50).is_blocked());
        assert_eq!(cell.co_located(ME, Timestamp(10)).count(), 0);
        assert_eq!(cell.co_located(B, Timestamp(10)).count(), 1);
    }

    #[test]
    fn co_located_only_counts_covering_windows() {
        let cell = cell_with(&[
            (B, Reservation::window(Direction::East, 0, 10)),
            (C, Reservation::window(Direction::West, 100, 200)),
        ]);
        let at = |t| cell.co_located(ME, Timestamp(t)).map(|(id, _)| id).collect::<Vec<_>>();
        assert_eq!(at(5), vec![B]);
        assert_eq!(at(50), Vec::<AgentId>::new());
        assert_eq!(at(200), vec![C]);
    }
}

#[cfg(test)]
mod world_map {
    use ln_core::{AgentId, Direction, Position, Timestamp};
    use crate::{MapError, MapView, Reservation, WorldMap, WorldMapBuilder};

    #[test]
    fn absent_cell_is_open() {
        let map = WorldMap::new();
        assert!(map.cell(Position::new(1, 2, 3)).is_none());
        assert!(!map.is_blocked(Position::new(1, 2, 3)));
        assert!(map.is_empty());
    }

    #[test]
    fn builder_block_region() {
        let map = WorldMapBuilder::new()
            .block_region(Position::new(0, 0, 0), Position::new(2, 1, 0))
            .clear(Position::new(1, 0, 0))
            .build();
        assert_eq!(map.len(), 5);
        assert!(map.is_blocked(Position::new(2, 1, 0)));
        assert!(!map.is_blocked(Position::new(1, 0, 0)));
    }

    #[test]
    fn reserve_rejects_inverted_window() {
        let mut map = WorldMap::new();
        let err = map
            .reserve(Position::ORIGIN, AgentId(1), Reservation::window(Direction::East, 10, 5))
            .unwrap_err();
        assert!(matches!(err, MapError::InvertedWindow { .. }));
        assert!(map.is_empty());
    }

    #[test]
    fn reserve_upserts() {
        let mut map = WorldMap::new();
        let p = Position::new(1, 0, 0);
        map.reserve(p, AgentId(1), Reservation::window(Direction::East, 0, 10)).unwrap();
        map.reserve(p, AgentId(1), Reservation::window(Direction::West, 20, 30)).unwrap();
        let r = map.cell(p).unwrap().reservation(AgentId(1)).unwrap();
        assert_eq!(r.facing, Direction::West);
        assert_eq!(r.arrive, Timestamp(20));
        assert_eq!(map.cell(p).unwrap().reservations.len(), 1);
    }

    #[test]
    fn release_drops_vacant_cells_only() {
        let mut map = WorldMapBuilder::new()
            .flow(Position::new(0, 0, 0), Direction::North)
            .build();
        map.reserve(Position::new(0, 0, 0), AgentId(1), Reservation::window(Direction::East, 0, 1)).unwrap();
        map.reserve(Position::new(1, 0, 0), AgentId(1), Reservation::window(Direction::East, 1, 2)).unwrap();
        map.reserve(Position::new(1, 0, 0), AgentId(2), Reservation::window(Direction::East, 5, 6)).unwrap();
        map.reserve(Position::new(2, 0, 0), AgentId(1), Reservation::window(Direction::East, 2, 3)).unwrap();

        assert_eq!(map.release(AgentId(1)), 3);
        // (0,0,0) keeps its flow; (1,0,0) keeps agent 2; (2,0,0) is gone.
        assert_eq!(map.len(), 2);
        assert!(map.cell(Position::new(2, 0, 0)).is_none());
        assert_eq!(map.release(AgentId(1)), 0);
    }

    #[test]
    fn reservations_of_sorted_by_arrival() {
        let mut map = WorldMap::new();
        map.reserve(Position::new(2, 0, 0), AgentId(1), Reservation::window(Direction::East, 200, 300)).unwrap();
        map.reserve(Position::new(1, 0, 0), AgentId(1), Reservation::window(Direction::East, 100, 200)).unwrap();
        map.reserve(Position::new(3, 0, 0), AgentId(1), Reservation::indefinite(Direction::East, Timestamp(300))).unwrap();
        let rs = map.reservations_of(AgentId(1));
        let order: Vec<_> = rs.iter().map(|(p, _)| p.x).collect();
        assert_eq!(order, vec![1, 2, 3]);
        assert!(map.reservations_of(AgentId(2)).is_empty());
    }

    #[test]
    fn clearing_block_prunes_cell() {
        let mut map = WorldMapBuilder::new().block(Position::ORIGIN).build();
        map.set_blocked(Position::ORIGIN, false);
        assert!(map.is_empty());
    }
}
