//! Traffic-flow classification.
//!
//! A move is compared against a reference direction: either a cell's
//! ambient flow or the facing of another agent holding the cell.

use crate::Direction;

/// How a move relates to a reference traffic direction.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Flow {
    WithFlow,
    AgainstFlow,
    CrossFlow,
}

/// Classify `movement` against the reference direction `ambient`.
///
/// | Pair                                  | Result        |
/// |---------------------------------------|---------------|
/// | equal                                 | `WithFlow`    |
/// | up vs down                            | `AgainstFlow` |
/// | horizontal, cycle distance 2          | `AgainstFlow` |
/// | everything else                       | `CrossFlow`   |
pub fn classify_flow(ambient: Direction, movement: Direction) -> Flow {
    if ambient == movement {
        return Flow::WithFlow;
    }

    if ambient.is_vertical() || movement.is_vertical() {
        return if ambient.opposite() == movement && movement.is_vertical() {
            Flow::AgainstFlow
        } else {
            Flow::CrossFlow
        };
    }

    match ambient.rotation_distance(movement) {
        Some(2) => Flow::AgainstFlow,
        _ => Flow::CrossFlow,
    }
}
