//! `ln-core` — foundational types for the `lattice_nav` multi-agent planner.
//!
//! This crate is a dependency of every other `ln-*` crate.  It intentionally
//! has no `ln-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                 |
//! |-------------|----------------------------------------------------------|
//! | [`geo`]     | `Position`, `Direction`, `Relative`, Manhattan heuristics |
//! | [`flow`]    | `Flow`, `classify_flow`                                  |
//! | [`ids`]     | `AgentId`                                                |
//! | [`agent`]   | `Agent` descriptor (fuel, dig, conformity)               |
//! | [`time`]    | `Timestamp`, `Clock`, `SystemClock`, `FixedClock`        |
//! | [`error`]   | `CoreError`, `CoreResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public data types.   |

pub mod agent;
pub mod error;
pub mod flow;
pub mod geo;
pub mod ids;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use agent::Agent;
pub use error::{CoreError, CoreResult};
pub use flow::{Flow, classify_flow};
pub use geo::{Direction, Position, Relative};
pub use ids::AgentId;
pub use time::{Clock, FixedClock, SystemClock, Timestamp};
