//! House cusps and the horizon/meridian angles.

pub mod calculator;
pub mod geometry;
pub mod systems;
pub mod types;

pub use calculator::{compute_cusps, compute_houses};
pub use types::{HouseCusps, HousePositions, HouseSystem};
