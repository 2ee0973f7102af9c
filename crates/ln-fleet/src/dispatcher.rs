//! Plan-then-commit dispatch over a shared map.

use tracing::{debug, warn};

use ln_core::{Agent, AgentId, Direction, Position, Timestamp};
use ln_map::WorldMap;
use ln_search::{Path, PlanRequest, Planner, SearchControl};

use crate::{AgentState, FleetResult, FleetStore};

/// Wraps a [`Planner`] and a [`FleetStore`] to dispatch agents one at a
/// time against a shared [`WorldMap`].
///
/// # Type parameter
///
/// `P` must implement [`Planner`] (e.g. [`ln_search::LatticePlanner`]).
/// Swap it for a scripted planner in tests with no change to dispatch
/// logic.
pub struct Dispatcher<P: Planner> {
    pub planner: P,
    pub store:   FleetStore,
}

impl<P: Planner> Dispatcher<P> {
    /// A dispatcher with `agent_count` unplaced slots.
    pub fn new(planner: P, agent_count: usize) -> Self {
        Self { planner, store: FleetStore::new(agent_count) }
    }

    /// Put `agent` on `position` without planning (initial placement).
    ///
    /// Replaces any previous state for the same id.  Reservations the agent
    /// already holds on a map are untouched; call [`release`](Self::release)
    /// first when re-placing a dispatched agent.
    pub fn place(&mut self, agent: Agent, position: Position, facing: Direction, at: Timestamp) -> FleetResult<()> {
        if facing.is_vertical() {
            return Err(ln_search::PlanError::InvalidFacing(facing).into());
        }
        self.store.paths.remove(&agent.id);
        self.store.set(AgentState::stationary(agent, position, facing, at))
    }

    /// Plan `agent` toward any of `destinations`, departing at `depart`, and
    /// commit the result to `map`.
    ///
    /// The plan starts from wherever the agent stands at `depart`, so an
    /// agent still in transit is replanned mid-path.  Its previous
    /// reservations are released only once the new plan succeeds; on error
    /// the agent's state and the map are unchanged.
    ///
    /// Returns the arrival time at the chosen destination.
    pub fn dispatch(
        &mut self,
        agent:        AgentId,
        destinations: Vec<Position>,
        depart:       Timestamp,
        map:          &mut WorldMap,
        control:      &mut dyn SearchControl,
    ) -> FleetResult<Timestamp> {
        let state = *self.store.get(agent)?;
        let (start, facing) = self.store.location(agent, depart)?;

        let request = PlanRequest::new(start, facing, destinations, state.agent).departing_at(depart);
        let path = self.planner.plan(&request, &*map, control)?;

        let released = map.release(agent);
        if state.in_transit {
            warn!(%agent, released, "replanning an agent in transit");
        } else if released > 0 {
            debug!(%agent, released, "released parked reservations");
        }
        let committed = path.commit(map)?;
        debug!(
            %agent,
            %start,
            destination = %path.destination(),
            steps = committed,
            wait_ms = path.total_wait_ms,
            arrival = %path.arrival(),
            "dispatched",
        );

        self.store.begin(path)
    }

    /// Advance every agent whose arrival time is `<= now`.
    ///
    /// Returns `(AgentId, Position)` for each agent that arrived, in id
    /// order.  Their final reservations stay on the map: an arrived agent
    /// keeps holding its cell.
    pub fn arrivals(&mut self, now: Timestamp) -> Vec<(AgentId, Position)> {
        let arriving: Vec<AgentId> = self
            .store
            .states
            .iter()
            .flatten()
            .filter(|s| s.in_transit && s.arrival <= now)
            .map(|s| s.agent.id)
            .collect();

        let arrived: Vec<(AgentId, Position)> = arriving
            .into_iter()
            .filter_map(|agent| self.store.arrive(agent, now).ok().map(|pos| (agent, pos)))
            .collect();

        if !arrived.is_empty() {
            debug!(%now, count = arrived.len(), "arrivals");
        }
        arrived
    }

    /// Drop every reservation `agent` holds on `map` and stop it where it
    /// stands at `now`.  Returns how many reservations were removed.
    pub fn release(&mut self, agent: AgentId, map: &mut WorldMap, now: Timestamp) -> FleetResult<usize> {
        let state = *self.store.get(agent)?;
        let (position, facing) = self.store.location(agent, now)?;
        self.store.paths.remove(&agent);
        self.store.set(AgentState::stationary(state.agent, position, facing, now))?;
        Ok(map.release(agent))
    }

    /// The cell and facing `agent` occupies at `now`.
    pub fn location(&self, agent: AgentId, now: Timestamp) -> FleetResult<(Position, Direction)> {
        self.store.location(agent, now)
    }

    /// The committed path of an agent in transit.
    pub fn path(&self, agent: AgentId) -> Option<&Path> {
        self.store.paths.get(&agent)
    }

    /// Current state of `agent`.
    pub fn state(&self, agent: AgentId) -> FleetResult<&AgentState> {
        self.store.get(agent)
    }
}
