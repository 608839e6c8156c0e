//! Sign and house classification of ecliptic longitudes.

pub mod classify;
pub mod zodiac;

pub use classify::{house_of, house_of_longitudes};
pub use zodiac::{degree_in_sign, sign_of, Element, Sign};
