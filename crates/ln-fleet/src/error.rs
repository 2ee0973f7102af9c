use ln_core::AgentId;
use ln_map::MapError;
use ln_search::PlanError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FleetError {
    #[error("{0} is outside this fleet")]
    UnknownAgent(AgentId),

    #[error("{0} has not been placed on the map")]
    NotPlaced(AgentId),

    #[error("planning failed: {0}")]
    Planning(#[from] PlanError),

    #[error("commit failed: {0}")]
    Map(#[from] MapError),
}

pub type FleetResult<T> = Result<T, FleetError>;
