//! The `FleetStore` — per-agent state and sparse path cache.

use rustc_hash::FxHashMap;

use ln_core::{AgentId, Direction, Position, Timestamp};
use ln_search::Path;

use crate::{AgentState, FleetError, FleetResult};

/// Holds state for every agent slot plus the committed paths of agents in
/// transit.
///
/// `states` is indexed by `AgentId` and is always length `agent_count`;
/// `None` marks a slot that has not been placed yet.  `paths` is sparse:
/// only agents in transit have an entry, removed on arrival.
#[derive(Debug, Clone, Default)]
pub struct FleetStore {
    pub states: Vec<Option<AgentState>>,
    pub paths:  FxHashMap<AgentId, Path>,
}

impl FleetStore {
    /// A store with `agent_count` unplaced slots.
    pub fn new(agent_count: usize) -> Self {
        Self {
            states: vec![None; agent_count],
            paths:  FxHashMap::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// The placed state of `agent`.
    pub fn get(&self, agent: AgentId) -> FleetResult<&AgentState> {
        self.states
            .get(agent.index())
            .ok_or(FleetError::UnknownAgent(agent))?
            .as_ref()
            .ok_or(FleetError::NotPlaced(agent))
    }

    /// Overwrite `agent`'s slot.
    pub fn set(&mut self, state: AgentState) -> FleetResult<()> {
        let id = state.agent.id;
        let slot = self.states.get_mut(id.index()).ok_or(FleetError::UnknownAgent(id))?;
        *slot = Some(state);
        Ok(())
    }

    /// Record `path` as `agent`'s committed journey.
    ///
    /// An empty path leaves the agent stationary where it is.
    pub fn begin(&mut self, path: Path) -> FleetResult<Timestamp> {
        let mut state = *self.get(path.agent)?;
        state.position = path.start;
        state.facing   = path.start_facing;

        if path.is_empty() {
            let state = AgentState::stationary(state.agent, path.start, path.start_facing, path.depart);
            self.set(state)?;
            self.paths.remove(&path.agent);
            return Ok(path.depart);
        }

        state.in_transit  = true;
        state.destination = path.destination();
        state.departed    = path.depart;
        state.arrival     = path.arrival();
        self.set(state)?;

        let arrival = state.arrival;
        self.paths.insert(path.agent, path);
        Ok(arrival)
    }

    /// Complete `agent`'s journey, returning the destination cell.
    ///
    /// The agent becomes stationary at the destination, facing the way it
    /// faced on the final step.
    pub fn arrive(&mut self, agent: AgentId, now: Timestamp) -> FleetResult<Position> {
        let state = *self.get(agent)?;
        let facing = self
            .paths
            .remove(&agent)
            .and_then(|p| p.steps.last().map(|s| s.facing()))
            .unwrap_or(state.facing);
        self.set(AgentState::stationary(state.agent, state.destination, facing, now))?;
        Ok(state.destination)
    }

    /// The cell and facing `agent` occupies at `now`.
    ///
    /// Along a committed path this is the last step already reached (the
    /// agent holds each cell until the next arrival), or the departure cell
    /// before the first arrival.
    pub fn location(&self, agent: AgentId, now: Timestamp) -> FleetResult<(Position, Direction)> {
        let state = self.get(agent)?;
        let Some(path) = self.paths.get(&agent).filter(|_| state.in_transit) else {
            return Ok((state.position, state.facing));
        };
        let reached = path.steps.iter().take_while(|s| s.arrive() <= now).last();
        Ok(reached.map_or((path.start, path.start_facing), |s| (s.position, s.facing())))
    }

    #[inline]
    pub fn in_transit(&self, agent: AgentId) -> bool {
        self.get(agent).is_ok_and(|s| s.in_transit)
    }
}
