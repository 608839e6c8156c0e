//! Natal chart computation.
//!
//! Resolves a civil birth time and place to an instant, looks up body
//! positions from an [`EphemerisProvider`], divides the sky into houses and
//! detects aspects, producing an immutable [`Chart`] and its JSON
//! [`ChartDocument`].

pub mod aspects;
pub mod birth;
pub mod chart;
pub mod ephemeris;
pub mod error;
pub mod houses;
pub mod math;
pub mod output;
pub mod points;
pub mod time;
pub mod western;

pub use aspects::{detect, Aspect, AspectDefinition, AspectKind, AspectPoint, AspectSettings};
pub use birth::{resolve_birth, BirthRequest, Geocoder, OffsetLookup, ResolvedBirth, TimezoneLookup};
pub use chart::{Chart, ChartAssembler, ChartSettings, HouseCusp, ResolvedPoint};
pub use ephemeris::{AnalyticEphemeris, BodyPosition, EphemerisError, EphemerisProvider, GeoPosition};
pub use error::{BodyFailure, ChartError};
pub use houses::{compute_cusps, compute_houses, HouseCusps, HousePositions, HouseSystem};
pub use output::{ChartDocument, Subject};
pub use points::{Angle, Body, ChartPoint};
pub use time::Instant;
pub use western::{house_of, house_of_longitudes, sign_of, Sign};
