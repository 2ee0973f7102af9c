//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `From`.

use thiserror::Error;

use crate::{Direction, Position};

/// Errors raised by the geometry and configuration primitives.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("vector {0} is not a unit axis-aligned move")]
    NotUnitVector(Position),

    #[error("facing must be horizontal, got {0}")]
    VerticalFacing(Direction),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for all `ln-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
