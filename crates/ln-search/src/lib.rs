//! `ln-search` — reservation-aware best-first search over the 3-D lattice.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                      |
//! |-------------|---------------------------------------------------------------|
//! | [`heap`]    | `MinHeap<T: Scored>` — binary min-heap on an `i64` score      |
//! | [`config`]  | `PlannerConfig`, `PlanOptions`, `CostModel`                   |
//! | [`control`] | `SearchControl` checkpoints: `Unbounded`, `CancelFlag`, `Deadline` |
//! | [`path`]    | `Path`, `PathStep`, `SearchStats`, `Path::commit`             |
//! | [`planner`] | `Planner` trait, `LatticePlanner`, `PlanRequest`, `plan()`    |
//! | [`error`]   | `PlanError`, `PlanResult<T>`                                  |
//!
//! The search loop itself (`engine`) and the reachability probe (`probe`)
//! are private; they are reached through [`Planner::plan`].
//!
//! # Quick-start
//!
//! ```
//! use ln_core::{Agent, AgentId, Direction, FixedClock, Position, Timestamp};
//! use ln_map::WorldMap;
//! use ln_search::{LatticePlanner, PlanRequest, Planner, PlannerConfig, Unbounded};
//!
//! let mut map = WorldMap::new();
//! let planner = LatticePlanner::with_clock(PlannerConfig::default(), FixedClock::at(0)).unwrap();
//! let request = PlanRequest::new(
//!     Position::new(0, 0, 0),
//!     Direction::East,
//!     vec![Position::new(4, 0, 0)],
//!     Agent::new(AgentId(1), 20),
//! );
//! let path = planner.plan(&request, &map, &mut Unbounded).unwrap();
//! assert_eq!(path.len(), 4);
//! path.commit(&mut map).unwrap();
//! ```
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                        |
//! |---------|---------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on paths, requests, configs. |

pub mod config;
pub mod control;
pub mod error;
pub mod heap;
pub mod path;
pub mod planner;

mod engine;
mod probe;


pub use config::{CostModel, PlanOptions, PlannerConfig};
pub use control::{CancelFlag, Deadline, SearchControl, Unbounded};
pub use error::{PlanError, PlanResult};
pub use heap::{MinHeap, Scored};
pub use path::{Path, PathStep, SearchStats};
pub use planner::{LatticePlanner, PlanRequest, Planner, plan};
