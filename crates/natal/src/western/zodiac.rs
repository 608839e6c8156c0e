//! Tropical zodiac signs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::math::normalize_deg;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

/// One of the twelve 30° divisions of the ecliptic, counted from the vernal
/// equinox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl Sign {
    pub const ALL: [Sign; 12] = [
        Sign::Aries,
        Sign::Taurus,
        Sign::Gemini,
        Sign::Cancer,
        Sign::Leo,
        Sign::Virgo,
        Sign::Libra,
        Sign::Scorpio,
        Sign::Sagittarius,
        Sign::Capricorn,
        Sign::Aquarius,
        Sign::Pisces,
    ];

    /// Position in the zodiac, Aries = 0.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Sign::Aries => "Aries",
            Sign::Taurus => "Taurus",
            Sign::Gemini => "Gemini",
            Sign::Cancer => "Cancer",
            Sign::Leo => "Leo",
            Sign::Virgo => "Virgo",
            Sign::Libra => "Libra",
            Sign::Scorpio => "Scorpio",
            Sign::Sagittarius => "Sagittarius",
            Sign::Capricorn => "Capricorn",
            Sign::Aquarius => "Aquarius",
            Sign::Pisces => "Pisces",
        }
    }

    /// Fire, earth, air, water repeating from Aries.
    pub fn element(self) -> Element {
        match self.index() % 4 {
            0 => Element::Fire,
            1 => Element::Earth,
            2 => Element::Air,
            _ => Element::Water,
        }
    }

    /// Longitude where this sign begins.
    pub fn start_longitude(self) -> f64 {
        self.index() as f64 * 30.0
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Sign {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Sign::ALL
            .iter()
            .copied()
            .find(|sign| sign.name().eq_ignore_ascii_case(key))
            .ok_or_else(|| format!("Unknown sign: {}", s))
    }
}

/// Sign containing an ecliptic longitude. Any finite value is accepted.
pub fn sign_of(longitude: f64) -> Sign {
    let index = (normalize_deg(longitude) / 30.0).floor() as usize;
    Sign::ALL[index.min(11)]
}

/// Degrees past the start of the containing sign, in [0, 30).
pub fn degree_in_sign(longitude: f64) -> f64 {
    let lon = normalize_deg(longitude);
    lon - sign_of(lon).start_longitude()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_boundaries() {
        assert_eq!(sign_of(0.0), Sign::Aries);
        assert_eq!(sign_of(29.999), Sign::Aries);
        assert_eq!(sign_of(30.0), Sign::Taurus);
        assert_eq!(sign_of(359.999), Sign::Pisces);
        assert_eq!(sign_of(-0.5), Sign::Pisces);
    }

    #[test]
    fn sign_is_periodic() {
        for i in 0..720 {
            let lon = i as f64 * 0.5;
            assert_eq!(sign_of(lon), sign_of(lon + 360.0));
            assert_eq!(sign_of(lon), sign_of(lon - 720.0));
        }
    }

    #[test]
    fn degree_and_element() {
        assert!((degree_in_sign(45.5) - 15.5).abs() < 1e-12);
        assert!((degree_in_sign(-1.0) - 29.0).abs() < 1e-12);
        assert_eq!(Sign::Leo.element(), Element::Fire);
        assert_eq!(Sign::Capricorn.element(), Element::Earth);
        assert_eq!(Sign::Aquarius.element(), Element::Air);
        assert_eq!(Sign::Pisces.element(), Element::Water);
        assert_eq!("scorpio".parse::<Sign>().unwrap(), Sign::Scorpio);
    }
}
