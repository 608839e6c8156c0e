//! Chart assembly: bodies, houses, angles and aspects in one immutable value.

pub mod assembler;
pub mod data;
pub mod settings;

pub use assembler::ChartAssembler;
pub use data::{Chart, HouseCusp, ResolvedPoint};
pub use settings::ChartSettings;
