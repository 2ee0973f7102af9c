//! `ln-map` — world map, reservations, and arrival admission.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                |
//! |-----------------|---------------------------------------------------------|
//! | [`cell`]        | `Cell` — blocked flag, ambient flow, reservations       |
//! | [`reservation`] | `Reservation`, `Admission`, `admit`                     |
//! | [`map`]         | `MapView` trait, `WorldMap` (sparse), `WorldMapBuilder` |
//! | [`error`]       | `MapError`, `MapResult<T>`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `Cell` and `Reservation`. |

pub mod cell;
pub mod error;
pub mod map;
pub mod reservation;

#[cfg(test)]
mod tests;

pub use cell::Cell;
pub use error::{MapError, MapResult};
pub use map::{MapView, WorldMap, WorldMapBuilder};
pub use reservation::{Admission, Reservation, admit};
