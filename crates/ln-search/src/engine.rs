//! The best-first search loop.
//!
//! # States
//!
//! ```text
//! Initialize ─► Expand loop ─┬─► goal popped     → reconstruct path
//!                            ├─► frontier empty  → Exhausted
//!                            ├─► probe failed    → ProbeFailed
//!                            └─► checkpoint veto → Aborted
//! ```
//!
//! # Scoring
//!
//! A neighbour's score is
//!
//! ```text
//! parent.score + h(neighbour) + step_cost + turn + dig + flow + traffic + wait
//! ```
//!
//! where `h` is the multi-target Manhattan distance.  The heuristic is
//! added at every step rather than replacing the previous one, so the score
//! is not an admissible `g + h` and the first path found is not guaranteed
//! shortest.  Flow and wait penalties are tuned against this scoring; keep it.
//!
//! # Relaxation
//!
//! `best[pos]` holds the lowest score pushed for each position in this call
//! and only ever decreases.  A candidate is pushed only if it beats it.
//! Popped nodes are not filtered against `best`: a node with a higher score
//! but a different facing can still seed cheaper neighbours.

use rustc_hash::FxHashMap;
use tracing::trace;

use ln_core::{Agent, Direction, Flow, Position, Relative, Timestamp, classify_flow};
use ln_map::{Admission, Cell, MapView, Reservation, admit};

use crate::heap::{MinHeap, Scored};
use crate::{Path, PathStep, PlannerConfig, SearchControl, SearchStats};

// ── Node types ────────────────────────────────────────────────────────────────

/// Whether this invocation is a real plan or a reachability probe.
///
/// A probe models neither flow nor other agents, and never launches a
/// probe of its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Mode {
    Plan,
    Probe,
}

/// One state on the frontier.  Index into the search's node arena.
pub(crate) type NodeIdx = usize;

#[derive(Clone, Copy, Debug)]
pub(crate) struct SearchNode {
    pub position:      Position,
    pub facing:        Direction,
    /// Direction of the move into this node (the start facing for the root).
    pub moved:         Direction,
    pub relative:      Relative,
    pub step_count:    u32,
    pub turn_count:    u32,
    pub dig_count:     u32,
    pub fuel_cost:     u32,
    pub score:         i64,
    /// Wait incurred entering this node.
    pub wait_ms:       u64,
    pub total_wait_ms: u64,
    /// The owning agent's claim on this cell; `leave` is filled in on
    /// reconstruction.
    pub reservation:   Reservation,
    pub parent:        Option<NodeIdx>,
}

impl SearchNode {
    #[inline]
    pub fn arrive(&self) -> Timestamp {
        self.reservation.arrive
    }
}

#[derive(Clone, Copy, Debug)]
struct Frontier {
    score: i64,
    node:  NodeIdx,
}

impl Scored for Frontier {
    #[inline]
    fn score(&self) -> i64 {
        self.score
    }
}

/// Why an invocation ended without reaching a destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Failure {
    Exhausted,
    ProbeFailed,
    Aborted,
}

/// Everything the search reached, plus the arena index of the goal node.
pub(crate) struct Found {
    pub nodes: Vec<SearchNode>,
    pub goal:  NodeIdx,
}

// ── Search ────────────────────────────────────────────────────────────────────

/// One search invocation.  Holds only borrowed, read-only inputs, so the
/// same map can serve concurrent searches and a probe can nest inside a
/// plan without sharing mutable state.
pub(crate) struct Search<'a> {
    pub config:       &'a PlannerConfig,
    pub map:          &'a dyn MapView,
    pub agent:        Agent,
    pub destinations: &'a [Position],
    pub mode:         Mode,
}

impl Search<'_> {
    /// Digging requires both the agent's permission and the planner option.
    #[inline]
    pub fn dig_allowed(&self) -> bool {
        self.agent.can_dig && self.config.options.dig_enabled
    }

    #[inline]
    pub fn heuristic(&self, pos: Position) -> u32 {
        pos.multi_manhattan(self.destinations).unwrap_or(0)
    }

    /// Search from `start` and build the path to the first destination popped.
    pub fn run(
        &self,
        start:   Position,
        facing:  Direction,
        depart:  Timestamp,
        control: &mut dyn SearchControl,
        stats:   &mut SearchStats,
    ) -> Result<Path, Failure> {
        let found = self.explore(&[start], facing, depart, control, stats)?;
        Ok(self.reconstruct(&found, start, facing, depart, *stats))
    }

    /// The expand loop, seeded with one root per distinct cell of `origins`.
    ///
    /// A plan has a single origin.  A reverse search seeds every destination,
    /// so it succeeds if any of them connects.
    pub fn explore(
        &self,
        origins: &[Position],
        facing:  Direction,
        depart:  Timestamp,
        control: &mut dyn SearchControl,
        stats:   &mut SearchStats,
    ) -> Result<Found, Failure> {
        let mut nodes: Vec<SearchNode> = Vec::with_capacity(origins.len());
        let mut best: FxHashMap<Position, i64> = FxHashMap::default();
        let mut frontier = MinHeap::with_capacity(64);

        for &origin in origins {
            let h0 = i64::from(self.heuristic(origin));
            if best.insert(origin, h0).is_some() {
                continue;
            }
            nodes.push(SearchNode {
                position:      origin,
                facing,
                moved:         facing,
                relative:      Relative::Front,
                step_count:    0,
                turn_count:    0,
                dig_count:     0,
                fuel_cost:     0,
                score:         h0,
                wait_ms:       0,
                total_wait_ms: 0,
                reservation:   Reservation::indefinite(facing, depart),
                parent:        None,
            });
            frontier.push(Frontier { score: h0, node: nodes.len() - 1 });
            stats.pushed += 1;
        }

        let yield_every = self.config.yield_interval.max(1);
        let mut expanded_here: u64 = 0;
        let mut reachable = false;

        while let Some(Frontier { node: idx, .. }) = frontier.pop() {
            let current = nodes[idx];
            stats.expanded += 1;
            expanded_here += 1;

            if self.destinations.contains(&current.position) {
                return Ok(Found { nodes, goal: idx });
            }

            if stats.expanded.is_multiple_of(yield_every) {
                stats.yields += 1;
                trace!(expanded = stats.expanded, frontier = frontier.len(), "checkpoint");
                if !control.checkpoint(stats) {
                    return Err(Failure::Aborted);
                }
            }

            if !reachable && self.probe_due(expanded_here, &current) {
                match self.probe(origins, facing, depart, control, stats) {
                    Ok(()) => reachable = true,
                    Err(Failure::Aborted) => return Err(Failure::Aborted),
                    Err(_) => return Err(Failure::ProbeFailed),
                }
            }

            if !self.agent.can_expand(current.step_count) {
                continue;
            }

            for (dir, pos) in current.position.neighbors() {
                let Some(mut next) = self.expand(&current, dir, pos) else {
                    continue;
                };
                if best.get(&pos).is_some_and(|&b| next.score >= b) {
                    continue;
                }
                best.insert(pos, next.score);
                next.parent = Some(idx);
                nodes.push(next);
                frontier.push(Frontier { score: next.score, node: nodes.len() - 1 });
                stats.pushed += 1;
            }
        }

        Err(Failure::Exhausted)
    }

    /// Score and time the move from `current` to its neighbour `pos`.
    ///
    /// `None` means the neighbour is discarded outright.
    fn expand(&self, current: &SearchNode, dir: Direction, pos: Position) -> Option<SearchNode> {
        let costs = &self.config.costs;
        let cell = self.map.cell(pos);

        let relative = dir.relative_to(current.facing);
        let facing = dir.facing_after(current.facing);

        let mut penalty: i64 = 0;
        let mut arrive = current.arrive() + costs.move_time_ms;
        let mut dig_count = current.dig_count;

        if cell.is_some_and(|c| c.blocked) {
            if !self.dig_allowed() {
                return None;
            }
            penalty += costs.dig_penalty;
            arrive += costs.dig_delay_ms;
            dig_count += 1;
        }

        let turns = relative.quarter_turns();
        penalty += costs.turn_penalty * i64::from(turns);
        arrive += costs.turn_delay_ms * u64::from(turns);

        let mut wait_ms = 0;
        if let (Mode::Plan, Some(cell)) = (self.mode, cell) {
            penalty += self.traffic_penalty(cell, dir, arrive)?;

            match admit(cell, self.agent.id, arrive, costs.wait_margin_ms) {
                Admission::Blocked { .. } => return None,
                Admission::Clear { arrive: cleared, waited_ms, .. } => {
                    arrive = cleared;
                    wait_ms = waited_ms;
                    penalty += costs.wait_penalty(waited_ms);
                }
            }
        }

        let score = current.score
            + i64::from(self.heuristic(pos))
            + costs.step_cost
            + penalty;

        Some(SearchNode {
            position:      pos,
            facing,
            moved:         dir,
            relative,
            step_count:    current.step_count + 1,
            turn_count:    current.turn_count + turns,
            dig_count,
            fuel_cost:     current.fuel_cost + 1 + (dig_count - current.dig_count),
            score,
            wait_ms,
            total_wait_ms: current.total_wait_ms + wait_ms,
            reservation:   Reservation::indefinite(facing, arrive),
            parent:        None,
        })
    }

    /// Flow and co-located-agent bias for entering `cell` in `dir` at
    /// `arrive` (before any wait).
    ///
    /// An agent is co-located when its reservation on the cell covers
    /// `arrive`; expired or future windows contribute nothing.  Conformist
    /// agents take ambient flow into account (an against-flow move is
    /// discarded unless penalty-only is configured) plus a traffic bias per
    /// co-located agent, using that agent's reserved facing.  The combined
    /// bias never goes below `-with_flow_bonus`, so with a validated config a
    /// move never lowers the score.  Non-conformists ignore flow and pay a
    /// flat penalty per co-located agent.
    fn traffic_penalty(&self, cell: &Cell, dir: Direction, arrive: Timestamp) -> Option<i64> {
        let costs = &self.config.costs;
        let co_located = cell.co_located(self.agent.id, arrive);

        if self.agent.non_conformist {
            return Some(costs.interaction_penalty * co_located.count() as i64);
        }

        let mut penalty = 0;
        if let Some(ambient) = cell.flow {
            match classify_flow(ambient, dir) {
                Flow::WithFlow => penalty -= costs.with_flow_bonus,
                Flow::CrossFlow => penalty += costs.cross_flow_penalty,
                Flow::AgainstFlow if self.config.options.allow_against_flow_penalty_only => {
                    penalty += costs.against_flow_penalty;
                }
                Flow::AgainstFlow => return None,
            }
        }

        penalty += co_located
            .map(|(_, other)| match classify_flow(other.facing, dir) {
                Flow::WithFlow => -costs.with_flow_bonus,
                Flow::CrossFlow => costs.cross_flow_penalty,
                Flow::AgainstFlow => costs.against_flow_penalty,
            })
            .sum::<i64>();
        Some(penalty.max(-costs.with_flow_bonus))
    }

    /// Walk parent links from the goal back to (not including) the start.
    fn reconstruct(
        &self,
        found:  &Found,
        start:  Position,
        facing: Direction,
        depart: Timestamp,
        stats:  SearchStats,
    ) -> Path {
        let mut chain = Vec::new();
        let mut i = found.goal;
        while let Some(parent) = found.nodes[i].parent {
            chain.push(i);
            i = parent;
        }
        chain.reverse();

        let continues = self.config.options.continue_past_destination;
        let move_time = self.config.costs.move_time_ms;

        let steps: Vec<PathStep> = chain
            .iter()
            .enumerate()
            .map(|(k, &idx)| {
                let node = &found.nodes[idx];
                let leave = match chain.get(k + 1) {
                    Some(&next) => Some(found.nodes[next].arrive()),
                    None if continues => Some(node.arrive() + move_time),
                    None => None,
                };
                PathStep {
                    position:    node.position,
                    direction:   node.moved,
                    relative:    node.relative,
                    reservation: Reservation::new(node.facing, node.arrive(), leave),
                    wait_ms:     node.wait_ms,
                    is_final:    k + 1 == chain.len(),
                }
            })
            .collect();

        let goal = &found.nodes[found.goal];
        Path {
            agent:         self.agent.id,
            start,
            start_facing:  facing,
            depart,
            steps,
            total_wait_ms: goal.total_wait_ms,
            turn_count:    goal.turn_count,
            dig_count:     goal.dig_count,
            fuel_cost:     goal.fuel_cost,
            score:         goal.score,
            stats,
        }
    }
}
