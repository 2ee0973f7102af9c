//! Per-agent fleet state.

use ln_core::{Agent, Direction, Position, Timestamp};

/// Where one agent is and where it is heading.
///
/// An agent is either **stationary** (standing on `position`,
/// `in_transit = false`) or **in transit** along its committed path from
/// `position` to `destination`.  While in transit `position` and `facing`
/// still describe the departure cell; [`Dispatcher::location`] walks the
/// path for the cell occupied at a given time.
///
/// [`Dispatcher::location`]: crate::Dispatcher::location
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentState {
    pub agent: Agent,

    /// The cell the agent departed from (or stands on if `!in_transit`).
    pub position: Position,

    /// Horizontal facing held at `position`.
    pub facing: Direction,

    /// `true` while the agent follows a committed path.
    pub in_transit: bool,

    /// The path's final cell.  Equals `position` when `!in_transit`.
    pub destination: Position,

    /// Departure time of the current path.  Equals `arrival` when
    /// `!in_transit`.
    pub departed: Timestamp,

    /// Arrival time at `destination`.
    pub arrival: Timestamp,
}

impl AgentState {
    /// A stationary state at `position` as of `at`.
    #[inline]
    pub fn stationary(agent: Agent, position: Position, facing: Direction, at: Timestamp) -> Self {
        Self {
            agent,
            position,
            facing,
            in_transit:  false,
            destination: position,
            departed:    at,
            arrival:     at,
        }
    }

    /// Fraction of the journey completed at `now`, in `[0.0, 1.0]`.
    ///
    /// Returns `1.0` for stationary agents or when `now >= arrival`.
    pub fn progress(&self, now: Timestamp) -> f32 {
        let span = self.arrival.since(self.departed);
        if !self.in_transit || span == 0 {
            return 1.0;
        }
        now.since(self.departed).min(span) as f32 / span as f32
    }
}
