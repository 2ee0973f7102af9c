//! Planned paths and how they are committed back to the map.

use ln_core::{AgentId, Direction, Position, Relative, Timestamp};
use ln_map::{MapResult, Reservation, WorldMap};

// ── SearchStats ───────────────────────────────────────────────────────────────

/// Counters for one planning call, nested probe work included.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Nodes popped from the frontier.
    pub expanded: u64,
    /// Nodes pushed onto the frontier.
    pub pushed:   u64,
    /// Reachability probes launched.
    pub probes:   u32,
    /// Checkpoints handed to the host.
    pub yields:   u64,
}

// ── PathStep ──────────────────────────────────────────────────────────────────

/// One cell of a planned path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathStep {
    pub position: Position,

    /// Absolute direction of the move into this cell.
    pub direction: Direction,

    /// The same move relative to the facing held before it.
    pub relative: Relative,

    /// The owning agent's claim on this cell.  `reservation.facing` is the
    /// facing held after the move; `leave` is the next step's arrival.
    pub reservation: Reservation,

    /// Time spent waiting for other agents before entering this cell.
    pub wait_ms: u64,

    /// `true` only for the destination step.
    pub is_final: bool,
}

impl PathStep {
    #[inline]
    pub fn arrive(&self) -> Timestamp {
        self.reservation.arrive
    }

    #[inline]
    pub fn facing(&self) -> Direction {
        self.reservation.facing
    }
}

// ── Path ──────────────────────────────────────────────────────────────────────

/// The result of a successful planning call.
///
/// `steps` exclude the start cell and end at a destination.  Consecutive
/// positions (starting from `start`) differ by exactly one unit move.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    pub agent:         AgentId,
    pub start:         Position,
    pub start_facing:  Direction,
    /// Time the agent was planned to set off from `start`.
    pub depart:        Timestamp,
    pub steps:         Vec<PathStep>,
    /// Sum of `steps[i].wait_ms`.
    pub total_wait_ms: u64,
    /// Quarter turns taken along the path.
    pub turn_count:    u32,
    /// Blocked cells dug through.
    pub dig_count:     u32,
    /// Fuel consumed: one per step plus one per dug cell.
    pub fuel_cost:     u32,
    /// Cumulative search score at the destination.
    pub score:         i64,
    pub stats:         SearchStats,
}

impl Path {
    /// A path for an agent already standing on a destination.
    pub(crate) fn trivial(agent: AgentId, start: Position, facing: Direction, depart: Timestamp) -> Self {
        Self {
            agent,
            start,
            start_facing: facing,
            depart,
            steps: Vec::new(),
            total_wait_ms: 0,
            turn_count: 0,
            dig_count: 0,
            fuel_cost: 0,
            score: 0,
            stats: SearchStats::default(),
        }
    }

    /// Number of steps (moves).
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// `true` if the agent started on a destination.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Where the path ends: the final step, or `start` for an empty path.
    pub fn destination(&self) -> Position {
        self.steps.last().map_or(self.start, |s| s.position)
    }

    /// Arrival time at the destination.
    pub fn arrival(&self) -> Timestamp {
        self.steps.last().map_or(self.depart, PathStep::arrive)
    }

    /// Positions visited, start excluded.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.steps.iter().map(|s| s.position)
    }

    /// Write every step's reservation into `map` under `self.agent`.
    ///
    /// Call only after the plan succeeded and no search is reading `map`.
    /// Returns the number of reservations written.
    pub fn commit(&self, map: &mut WorldMap) -> MapResult<usize> {
        for step in &self.steps {
            map.reserve(step.position, self.agent, step.reservation)?;
        }
        Ok(self.steps.len())
    }
}
