use crate::aspects::AspectSettings;
use crate::houses::HouseSystem;
use crate::points::{Angle, Body};

/// What to put on a chart and how to divide it.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSettings {
    pub house_system: HouseSystem,
    pub bodies: Vec<Body>,
    pub angles: Vec<Angle>,
    pub aspects: AspectSettings,
}

impl ChartSettings {
    pub fn with_house_system(mut self, house_system: HouseSystem) -> Self {
        self.house_system = house_system;
        self
    }
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            house_system: HouseSystem::default(),
            bodies: Body::PLANETS.to_vec(),
            angles: Angle::ALL.to_vec(),
            aspects: AspectSettings::default(),
        }
    }
}
