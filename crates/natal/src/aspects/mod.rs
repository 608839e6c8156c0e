pub mod calculator;
pub mod types;

pub use calculator::{detect, AspectCalculator, AspectPoint};
pub use types::{Aspect, AspectDefinition, AspectKind, AspectSettings, DEFAULT_ORB};
