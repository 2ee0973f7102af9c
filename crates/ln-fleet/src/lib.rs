//! `ln-fleet` — agent placement, dispatch, and arrival tracking.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                       |
//! |----------------|----------------------------------------------------------------|
//! | [`state`]      | `AgentState` — where an agent is, where it is heading          |
//! | [`store`]      | `FleetStore` — `Vec<Option<AgentState>>` + sparse path cache   |
//! | [`dispatcher`] | `Dispatcher<P>` — plan-then-commit dispatch, arrivals          |
//! | [`error`]      | `FleetError`, `FleetResult<T>`                                 |
//!
//! # Dispatch order
//!
//! Agents are planned one at a time, in call order.  Each successful plan is
//! committed to the shared [`WorldMap`](ln_map::WorldMap) before the next
//! agent plans, so the first agent to plan reserves the cells it passes
//! through and later agents wait for or route around it.
//!
//! 1. `Dispatcher::place` puts an agent on a cell with a facing.
//! 2. `Dispatcher::dispatch` plans from the agent's location at the
//!    departure time, releases its previous reservations, and commits the
//!    new path.  The agent is in transit until the path's arrival time.
//! 3. `Dispatcher::arrivals(now)` marks every agent whose arrival time has
//!    passed as stationary at its destination.

pub mod dispatcher;
pub mod error;
pub mod state;
pub mod store;


pub use dispatcher::Dispatcher;
pub use error::{FleetError, FleetResult};
pub use state::AgentState;
pub use store::FleetStore;
