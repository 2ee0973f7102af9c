//! Reachability probe.
//!
//! A long plan whose frontier score has drifted far above the pure distance
//! heuristic is usually circling a wall.  Every `probe_interval` expansions
//! such a plan launches a cheap reverse search:
//!
//! - start: every destination at once, as separate roots
//! - goal:  the plan's start
//! - facing: the plan's start facing, reversed
//! - no flow, no reservations, no nested probe
//!
//! Seeding all destinations together means one sealed destination cannot
//! hide another that is open.  If that search finds nothing, no amount of
//! waiting or detouring will, and the plan stops with `Unreachable`.  Once a probe succeeds the plan
//! never probes again, since reachability ignoring traffic cannot change
//! within one call.
//!
//! Probes are skipped when digging is allowed: any blocked cell can then be
//! dug through, so the question is moot.

use tracing::trace;

use ln_core::{Direction, Position, Timestamp};

use crate::engine::{Failure, Mode, Search, SearchNode};
use crate::{SearchControl, SearchStats};

impl Search<'_> {
    /// Whether the node just popped should trigger a probe.
    pub(crate) fn probe_due(&self, expanded_here: u64, current: &SearchNode) -> bool {
        self.mode == Mode::Plan
            && !self.dig_allowed()
            && expanded_here.is_multiple_of(self.config.probe_interval.max(1))
            && current.score > 2 * i64::from(self.heuristic(current.position))
    }

    /// Run the reverse search back to `origins`.  `Ok(())` means some
    /// destination connects to them.
    pub(crate) fn probe(
        &self,
        origins: &[Position],
        facing:  Direction,
        depart:  Timestamp,
        control: &mut dyn SearchControl,
        stats:   &mut SearchStats,
    ) -> Result<(), Failure> {
        if self.destinations.is_empty() {
            return Err(Failure::Exhausted);
        }

        stats.probes += 1;
        trace!(
            agent = %self.agent.id,
            sources = self.destinations.len(),
            to = ?origins,
            "launching reachability probe",
        );

        let probe = Search {
            config:       self.config,
            map:          self.map,
            agent:        self.agent,
            destinations: origins,
            mode:         Mode::Probe,
        };
        let outcome = probe
            .explore(self.destinations, facing.opposite(), depart, control, stats)
            .map(|_| ());

        trace!(agent = %self.agent.id, reachable = outcome.is_ok(), "probe finished");
        outcome
    }
}
