//! A single lattice cell.

use std::collections::BTreeMap;

use ln_core::{AgentId, Direction, Timestamp};

use crate::Reservation;

/// Everything the planner may know about one cell.
///
/// A cell that is absent from the map behaves like `Cell::default()`: open,
/// no ambient flow, no reservations.
///
/// Reservations live in a `BTreeMap` so iteration is ordered by `AgentId`,
/// which keeps planning deterministic for identical maps.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    /// Impassable unless the agent is allowed to dig.
    pub blocked: bool,

    /// Ambient traffic direction, if any.
    pub flow: Option<Direction>,

    pub reservations: BTreeMap<AgentId, Reservation>,
}

impl Cell {
    pub fn open() -> Self {
        Self::default()
    }

    pub fn solid() -> Self {
        Self { blocked: true, ..Self::default() }
    }

    pub fn flowing(dir: Direction) -> Self {
        Self { flow: Some(dir), ..Self::default() }
    }

    /// Reservations held by agents other than `agent`.
    pub fn others(&self, agent: AgentId) -> impl Iterator<Item = (AgentId, &Reservation)> + '_ {
        self.reservations
            .iter()
            .filter(move |(id, _)| **id != agent)
            .map(|(id, r)| (*id, r))
    }

    /// Other agents whose reservation here covers `t`.
    pub fn co_located(&self, agent: AgentId, t: Timestamp) -> impl Iterator<Item = (AgentId, &Reservation)> + '_ {
        self.others(agent).filter(move |(_, r)| r.covers(t))
    }

    pub fn reservation(&self, agent: AgentId) -> Option<&Reservation> {
        self.reservations.get(&agent)
    }

    /// `true` if the cell carries no information and can be dropped from a map.
    pub fn is_vacant(&self) -> bool {
        !self.blocked && self.flow.is_none() && self.reservations.is_empty()
    }
}
