//! Map-subsystem error type.

use thiserror::Error;

use ln_core::{AgentId, Position, Timestamp};

/// Errors produced by `ln-map`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MapError {
    #[error("reservation for {agent} at {at} leaves at {leave} before arriving at {arrive}")]
    InvertedWindow {
        agent:  AgentId,
        at:     Position,
        arrive: Timestamp,
        leave:  Timestamp,
    },
}

pub type MapResult<T> = Result<T, MapError>;
