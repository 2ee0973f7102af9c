//! World map representation and builder.
//!
//! # Data layout
//!
//! The lattice is unbounded, so the map is sparse: an `FxHashMap` from
//! [`Position`] to [`Cell`].  Any position not present is an open cell.
//! FxHash is used because keys are small integer triples; SipHash's DoS
//! resistance buys nothing here and costs noticeably on the search's hot
//! path (one lookup per neighbour).
//!
//! # Read path vs write path
//!
//! Planning only needs [`MapView`], a read-only lookup.  Writes
//! (committing a planned path's reservations, releasing an agent) happen
//! through `&mut WorldMap` and therefore never overlap a running search on
//! the same map.

use rustc_hash::FxHashMap;
use tracing::trace;

use ln_core::{AgentId, Direction, Position};

use crate::{Cell, MapError, MapResult, Reservation};

// ── MapView ───────────────────────────────────────────────────────────────────

/// Read-only cell lookup consumed by the planner.
///
/// Implement this to plan directly against an externally owned map.
/// Implementations must be `Sync` so that several planners can read the same
/// map from different threads.
pub trait MapView: Sync {
    /// The cell at `pos`, or `None` if nothing is known about it (open).
    fn cell(&self, pos: Position) -> Option<&Cell>;

    /// `true` if `pos` is known to be impassable.
    fn is_blocked(&self, pos: Position) -> bool {
        self.cell(pos).is_some_and(|c| c.blocked)
    }
}

// ── WorldMap ──────────────────────────────────────────────────────────────────

/// Sparse lattice map: blocked cells, ambient flow, and reservations.
#[derive(Clone, Debug, Default)]
pub struct WorldMap {
    cells: FxHashMap<Position, Cell>,
}

impl MapView for WorldMap {
    #[inline]
    fn cell(&self, pos: Position) -> Option<&Cell> {
        self.cells.get(&pos)
    }
}

impl WorldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cells carrying any information.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Mutable access to the cell at `pos`, creating an open cell if absent.
    pub fn cell_mut(&mut self, pos: Position) -> &mut Cell {
        self.cells.entry(pos).or_default()
    }

    pub fn set_blocked(&mut self, pos: Position, blocked: bool) {
        self.cell_mut(pos).blocked = blocked;
        self.prune(pos);
    }

    pub fn set_flow(&mut self, pos: Position, flow: Option<Direction>) {
        self.cell_mut(pos).flow = flow;
        self.prune(pos);
    }

    /// Upsert `agent`'s reservation at `pos`.
    ///
    /// # Errors
    ///
    /// Rejects a window whose leave time precedes its arrive time.
    pub fn reserve(&mut self, pos: Position, agent: AgentId, r: Reservation) -> MapResult<()> {
        if let Some(leave) = r.leave.filter(|l| *l < r.arrive) {
            return Err(MapError::InvertedWindow { agent, at: pos, arrive: r.arrive, leave });
        }
        self.cell_mut(pos).reservations.insert(agent, r);
        Ok(())
    }

    /// Drop every reservation held by `agent`.  Returns how many were removed.
    ///
    /// Cells left with no information are removed from the map.
    pub fn release(&mut self, agent: AgentId) -> usize {
        let mut removed = 0;
        self.cells.retain(|_, cell| {
            if cell.reservations.remove(&agent).is_some() {
                removed += 1;
            }
            !cell.is_vacant()
        });
        trace!(%agent, removed, "released reservations");
        removed
    }

    /// All reservations held by `agent`, ordered by arrival time.
    pub fn reservations_of(&self, agent: AgentId) -> Vec<(Position, Reservation)> {
        let mut out: Vec<(Position, Reservation)> = self
            .cells
            .iter()
            .filter_map(|(pos, cell)| cell.reservation(agent).map(|r| (*pos, *r)))
            .collect();
        out.sort_unstable_by_key(|(pos, r)| (r.arrive, *pos));
        out
    }

    /// Iterator over every known cell.
    pub fn iter(&self) -> impl Iterator<Item = (&Position, &Cell)> + '_ {
        self.cells.iter()
    }

    fn prune(&mut self, pos: Position) {
        if self.cells.get(&pos).is_some_and(Cell::is_vacant) {
            self.cells.remove(&pos);
        }
    }
}

// ── WorldMapBuilder ───────────────────────────────────────────────────────────

/// Construct a [`WorldMap`] fluently, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use ln_core::{AgentId, Direction, Position};
/// use ln_map::{MapView, Reservation, WorldMapBuilder};
///
/// let map = WorldMapBuilder::new()
///     .block(Position::new(2, 0, 0))
///     .flow(Position::new(3, 0, 0), Direction::East)
///     .reserve(Position::new(4, 0, 0), AgentId(9), Reservation::window(Direction::East, 1_000, 1_500))
///     .build();
/// assert!(map.is_blocked(Position::new(2, 0, 0)));
/// assert_eq!(map.len(), 3);
/// ```
#[derive(Default)]
pub struct WorldMapBuilder {
    map: WorldMap,
}

impl WorldMapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block(mut self, pos: Position) -> Self {
        self.map.set_blocked(pos, true);
        self
    }

    /// Block every cell in the inclusive box `min..=max`.
    pub fn block_region(mut self, min: Position, max: Position) -> Self {
        for x in min.x..=max.x {
            for y in min.y..=max.y {
                for z in min.z..=max.z {
                    self.map.set_blocked(Position::new(x, y, z), true);
                }
            }
        }
        self
    }

    /// Unblock one cell (e.g. to carve a corridor out of a blocked region).
    pub fn clear(mut self, pos: Position) -> Self {
        self.map.set_blocked(pos, false);
        self
    }

    pub fn flow(mut self, pos: Position, dir: Direction) -> Self {
        self.map.set_flow(pos, Some(dir));
        self
    }

    /// Add a reservation.  Inverted windows are clamped to indefinite rather
    /// than rejected, since builders are used for fixtures.
    pub fn reserve(mut self, pos: Position, agent: AgentId, r: Reservation) -> Self {
        let r = if r.is_well_formed() { r } else { Reservation::indefinite(r.facing, r.arrive) };
        self.map.cell_mut(pos).reservations.insert(agent, r);
        self
    }

    pub fn build(self) -> WorldMap {
        self.map
    }
}
