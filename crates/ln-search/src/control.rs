//! Cooperative checkpoints: yielding, cancellation, deadlines.
//!
//! The search calls [`SearchControl::checkpoint`] every
//! `PlannerConfig::yield_interval` expansions, including expansions made
//! by a nested reachability probe.  Returning `false` aborts the call with
//! [`PlanError::Aborted`](crate::PlanError::Aborted).  No search state is
//! touched while the host holds control.
//!
//! Any `FnMut(&SearchStats) -> bool` closure is a `SearchControl`, so a host
//! scheduler can interleave work inline:
//!
//! ```rust,ignore
//! planner.plan(&req, &map, &mut |_: &SearchStats| {
//!     std::thread::yield_now();
//!     true
//! })?;
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use ln_core::{Clock, Timestamp};

use crate::SearchStats;

/// Host hook invoked at the fixed expansion cadence.
pub trait SearchControl {
    /// Return `false` to abandon the search.
    fn checkpoint(&mut self, stats: &SearchStats) -> bool;
}

impl<F: FnMut(&SearchStats) -> bool> SearchControl for F {
    fn checkpoint(&mut self, stats: &SearchStats) -> bool {
        self(stats)
    }
}

/// Never aborts.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unbounded;

impl SearchControl for Unbounded {
    fn checkpoint(&mut self, _stats: &SearchStats) -> bool {
        true
    }
}

/// A shareable cancellation token.
///
/// Clone it, hand the clone to another thread, and call
/// [`cancel`](Self::cancel); the search aborts at its next checkpoint.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

impl SearchControl for CancelFlag {
    fn checkpoint(&mut self, _stats: &SearchStats) -> bool {
        !self.is_cancelled()
    }
}

/// Aborts once `clock` reaches `at`.
#[derive(Clone, Debug)]
pub struct Deadline<C: Clock> {
    pub clock: C,
    pub at:    Timestamp,
}

impl<C: Clock> Deadline<C> {
    pub fn new(clock: C, at: Timestamp) -> Self {
        Self { clock, at }
    }
}

impl<C: Clock> SearchControl for Deadline<C> {
    fn checkpoint(&mut self, _stats: &SearchStats) -> bool {
        self.clock.now() < self.at
    }
}
