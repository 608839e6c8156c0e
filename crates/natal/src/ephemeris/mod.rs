pub mod analytic;
#[cfg(feature = "swisseph")]
pub mod adapter;
pub mod types;

pub use analytic::AnalyticEphemeris;
#[cfg(feature = "swisseph")]
pub use adapter::SwissEphemerisAdapter;
pub use types::{BodyPosition, EphemerisError, GeoLocation, GeoPosition};

use crate::points::Body;
use crate::time::Instant;

/// Source of geocentric ecliptic body positions.
///
/// Implementations must be deterministic for a fixed instant and return
/// longitudes normalized to [0, 360). The chart angles never come from here;
/// they are produced by the house calculator.
pub trait EphemerisProvider: Send + Sync {
    /// Short provider name used in logs and errors.
    fn name(&self) -> &str;

    fn position_of(&self, body: Body, instant: &Instant) -> Result<BodyPosition, EphemerisError>;
}

impl<P: EphemerisProvider + ?Sized> EphemerisProvider for &P {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn position_of(&self, body: Body, instant: &Instant) -> Result<BodyPosition, EphemerisError> {
        (**self).position_of(body, instant)
    }
}
