//! Planning error type.

use thiserror::Error;

use ln_core::{AgentId, CoreError, Direction};

/// Why a planning call produced no path.
///
/// Contention that can be waited out never surfaces here; only the outcomes
/// below end a call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// No destination can be reached.  Definitive for the given map; do not
    /// retry without changing inputs.  `by_probe` is `true` when the
    /// reverse reachability probe proved it before the frontier emptied.
    #[error("no route for {agent} after {expanded} expansions")]
    Unreachable {
        agent:    AgentId,
        expanded: u64,
        by_probe: bool,
    },

    /// The host declined to continue at a checkpoint.  May be retried.
    #[error("planning for {agent} aborted after {expanded} expansions")]
    Aborted { agent: AgentId, expanded: u64 },

    /// The fuel budget cannot cover the trip out plus the reserve for the
    /// trip back.
    #[error("{agent} has fuel {fuel}, needs at least {required}")]
    NoFuel {
        agent:    AgentId,
        fuel:     u32,
        required: u32,
    },

    #[error("destination set is empty")]
    NoDestinations,

    #[error("start facing must be horizontal, got {0}")]
    InvalidFacing(Direction),

    #[error(transparent)]
    Config(#[from] CoreError),
}

pub type PlanResult<T> = Result<T, PlanError>;
