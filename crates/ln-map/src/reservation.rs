//! Reservations and arrival admission.
//!
//! # Model
//!
//! A [`Reservation`] claims a cell for one agent over `[arrive, leave]`.
//! `leave = None` is the indefinite-occupancy sentinel: the agent arrives
//! and stays for an unknown time (typically the last step of its path).
//!
//! [`admit`] decides whether an agent arriving at a cell at time `t` can
//! enter it, and if so how long it must wait first:
//!
//! ```text
//! for each other reservation, ordered by (arrive, agent):
//!     if arrive <= t <= leave          → wait: t = leave + margin
//!     if arrive <= t and leave is None → blocked, no safe window
//! ```
//!
//! Visiting reservations in ascending arrival order means one pass is
//! enough: `t` only ever moves forward, so a window already passed can
//! never cover `t` again.

use ln_core::{AgentId, Direction, Timestamp};

use crate::Cell;

// ── Reservation ───────────────────────────────────────────────────────────────

/// One agent's claim on one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reservation {
    /// Facing the agent holds while in the cell.
    pub facing: Direction,
    pub arrive: Timestamp,
    /// `None` means indefinite occupancy.
    pub leave: Option<Timestamp>,
}

impl Reservation {
    #[inline]
    pub fn new(facing: Direction, arrive: Timestamp, leave: Option<Timestamp>) -> Self {
        Self { facing, arrive, leave }
    }

    /// A reservation with a known window.
    #[inline]
    pub fn window(facing: Direction, arrive: u64, leave: u64) -> Self {
        Self::new(facing, Timestamp(arrive), Some(Timestamp(leave)))
    }

    /// A reservation with no known leave time.
    #[inline]
    pub fn indefinite(facing: Direction, arrive: Timestamp) -> Self {
        Self::new(facing, arrive, None)
    }

    #[inline]
    pub fn is_indefinite(&self) -> bool {
        self.leave.is_none()
    }

    /// `leave >= arrive`, or indefinite.
    #[inline]
    pub fn is_well_formed(&self) -> bool {
        self.leave.is_none_or(|l| l >= self.arrive)
    }

    /// `true` if `t` falls inside `[arrive, leave]`.
    #[inline]
    pub fn covers(&self, t: Timestamp) -> bool {
        self.arrive <= t && self.leave.is_none_or(|l| t <= l)
    }
}

// ── Admission ─────────────────────────────────────────────────────────────────

/// Outcome of trying to enter a cell at a given time.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Admission {
    /// The cell can be entered at `arrive` after waiting `waited_ms` in total
    /// across `waits` separate reservations.
    Clear {
        arrive:    Timestamp,
        waited_ms: u64,
        waits:     u32,
    },

    /// Another agent holds the cell indefinitely over the arrival time.
    Blocked { by: AgentId },
}

impl Admission {
    #[inline]
    pub fn is_blocked(&self) -> bool {
        matches!(self, Admission::Blocked { .. })
    }
}

/// Decide whether `agent` may enter `cell` when arriving at `arrive`.
///
/// The agent's own reservations never conflict with itself.  Any it holds
/// belong to the plan being replaced, and committing the new plan releases
/// them first, so they can never overlap the new path on the map.  Each
/// resolved conflict pushes the arrival to the other agent's leave time plus
/// `margin_ms`.
pub fn admit(cell: &Cell, agent: AgentId, arrive: Timestamp, margin_ms: u64) -> Admission {
    let mut others: Vec<(AgentId, &Reservation)> = cell.others(agent).collect();
    if others.is_empty() {
        return Admission::Clear { arrive, waited_ms: 0, waits: 0 };
    }
    others.sort_unstable_by_key(|(id, r)| (r.arrive, *id));

    let mut t = arrive;
    let mut waits = 0;
    for (id, r) in others {
        if !r.covers(t) {
            continue;
        }
        match r.leave {
            None => return Admission::Blocked { by: id },
            Some(leave) => {
                t = leave + margin_ms;
                waits += 1;
            }
        }
    }

    Admission::Clear { arrive: t, waited_ms: t - arrive, waits }
}
