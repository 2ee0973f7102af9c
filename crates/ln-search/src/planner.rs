//! Planner trait and the default lattice planner.
//!
//! # Pluggability
//!
//! Fleet code calls planning through the [`Planner`] trait, so a caller can
//! swap in a different search (or a scripted stub in tests) without
//! touching dispatch logic.  [`LatticePlanner`] is the reservation-aware
//! best-first search.
//!
//! # Call contract
//!
//! 1. Inputs are validated before any search work: empty destination sets,
//!    vertical start facings, and impossible fuel budgets fail fast.
//! 2. The map is only read.  Committing the returned path's reservations
//!    ([`Path::commit`]) is a separate step for the caller.
//! 3. The search yields to `control` every `yield_interval` expansions.

use tracing::debug;

use ln_core::{Agent, Clock, Direction, Position, SystemClock, Timestamp};
use ln_map::MapView;

use crate::engine::{Failure, Mode, Search};
use crate::{
    Path, PlanError, PlanOptions, PlanResult, PlannerConfig, SearchControl, SearchStats, Unbounded,
};

// ── PlanRequest ───────────────────────────────────────────────────────────────

/// One agent's planning question.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanRequest {
    pub start:        Position,
    /// Must be horizontal.
    pub facing:       Direction,
    /// Any one of these ends the plan.  Must not be empty.
    pub destinations: Vec<Position>,
    pub agent:        Agent,
    /// Departure time; `None` reads the planner's clock.
    pub depart:       Option<Timestamp>,
}

impl PlanRequest {
    pub fn new(start: Position, facing: Direction, destinations: Vec<Position>, agent: Agent) -> Self {
        Self { start, facing, destinations, agent, depart: None }
    }

    pub fn departing_at(mut self, depart: Timestamp) -> Self {
        self.depart = Some(depart);
        self
    }
}

// ── Planner trait ─────────────────────────────────────────────────────────────

/// Pluggable planning engine.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so one planner can serve several
/// agents planning concurrently against a shared map.
pub trait Planner: Send + Sync {
    fn plan(
        &self,
        request: &PlanRequest,
        map:     &dyn MapView,
        control: &mut dyn SearchControl,
    ) -> PlanResult<Path>;
}

// ── LatticePlanner ────────────────────────────────────────────────────────────

/// Reservation-aware best-first search over the 3-D lattice.
#[derive(Clone, Debug)]
pub struct LatticePlanner<C: Clock = SystemClock> {
    config: PlannerConfig,
    clock:  C,
}

impl LatticePlanner<SystemClock> {
    /// A planner reading departure times from the wall clock.
    pub fn new(config: PlannerConfig) -> PlanResult<Self> {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> LatticePlanner<C> {
    /// A planner with an injected clock (use `FixedClock` for reproducible
    /// timestamps).
    pub fn with_clock(config: PlannerConfig, clock: C) -> PlanResult<Self> {
        config.validate()?;
        Ok(Self { config, clock })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }
}

impl<C: Clock> Planner for LatticePlanner<C> {
    fn plan(
        &self,
        request: &PlanRequest,
        map:     &dyn MapView,
        control: &mut dyn SearchControl,
    ) -> PlanResult<Path> {
        let PlanRequest { start, facing, ref destinations, agent, depart } = *request;

        let Some(distance) = start.multi_manhattan(destinations) else {
            return Err(PlanError::NoDestinations);
        };
        if facing.is_vertical() {
            return Err(PlanError::InvalidFacing(facing));
        }

        let depart = depart.unwrap_or_else(|| self.clock.now());
        if distance == 0 {
            return Ok(Path::trivial(agent.id, start, facing, depart));
        }
        if !agent.can_expand(0) || distance > agent.step_budget() {
            return Err(PlanError::NoFuel {
                agent:    agent.id,
                fuel:     agent.fuel,
                required: distance.saturating_mul(2),
            });
        }

        debug!(
            agent = %agent.id,
            %start,
            %facing,
            destinations = destinations.len(),
            distance,
            fuel = agent.fuel,
            "planning",
        );

        let search = Search {
            config: &self.config,
            map,
            agent,
            destinations: destinations.as_slice(),
            mode: Mode::Plan,
        };
        let mut stats = SearchStats::default();

        match search.run(start, facing, depart, control, &mut stats) {
            Ok(path) => {
                debug!(
                    agent = %agent.id,
                    steps = path.len(),
                    wait_ms = path.total_wait_ms,
                    expanded = stats.expanded,
                    probes = stats.probes,
                    "plan found",
                );
                Ok(path)
            }
            Err(Failure::Aborted) => {
                debug!(agent = %agent.id, expanded = stats.expanded, "plan aborted");
                Err(PlanError::Aborted { agent: agent.id, expanded: stats.expanded })
            }
            Err(failure) => {
                let by_probe = failure == Failure::ProbeFailed;
                debug!(agent = %agent.id, expanded = stats.expanded, by_probe, "unreachable");
                Err(PlanError::Unreachable { agent: agent.id, expanded: stats.expanded, by_probe })
            }
        }
    }
}

// ── Convenience entry point ───────────────────────────────────────────────────

/// Plan once with default costs, the wall clock, and no cancellation.
pub fn plan(
    start:        Position,
    facing:       Direction,
    destinations: &[Position],
    agent:        Agent,
    map:          &dyn MapView,
    options:      PlanOptions,
) -> PlanResult<Path> {
    let planner = LatticePlanner::new(PlannerConfig::with_options(options))?;
    let request = PlanRequest::new(start, facing, destinations.to_vec(), agent);
    planner.plan(&request, map, &mut Unbounded)
}
