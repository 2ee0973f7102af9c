//! Planning time model.
//!
//! # Design
//!
//! Time is an absolute millisecond counter, `Timestamp`.  Planning calls
//! take their start time from an injected [`Clock`]:
//!
//! - [`SystemClock`] reads the Unix wall clock (production).
//! - [`FixedClock`] always returns the same instant (tests, replays).
//!
//! Using integer milliseconds keeps reservation arithmetic exact and
//! comparisons O(1).

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

// ── Timestamp ────────────────────────────────────────────────────────────────

/// An absolute instant in milliseconds.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp(0);

    /// Milliseconds elapsed from `earlier` to `self`, zero if `earlier` is later.
    #[inline]
    pub fn since(self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Timestamp {
    type Output = Timestamp;
    #[inline]
    fn add(self, rhs: u64) -> Timestamp {
        Timestamp(self.0.saturating_add(rhs))
    }
}

impl std::ops::AddAssign<u64> for Timestamp {
    #[inline]
    fn add_assign(&mut self, rhs: u64) {
        self.0 = self.0.saturating_add(rhs);
    }
}

impl std::ops::Sub for Timestamp {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Timestamp) -> u64 {
        self.since(rhs)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

// ── Clocks ────────────────────────────────────────────────────────────────────

/// Source of "now" for planning calls and deadlines.
///
/// Must be `Send + Sync` so a planner holding one can be shared between
/// threads planning for different agents.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Unix wall-clock time.
#[derive(Copy, Clone, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        // A clock set before 1970 reads as the epoch rather than failing.
        let ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Timestamp(ms)
    }
}

/// A clock frozen at one instant.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FixedClock(pub Timestamp);

impl FixedClock {
    pub fn at(ms: u64) -> Self {
        Self(Timestamp(ms))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}
