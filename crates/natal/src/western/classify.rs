use crate::error::ChartError;
use crate::houses::HouseCusps;

/// House (1-12) containing `longitude` for an already validated cusp set.
///
/// A longitude exactly on a cusp belongs to the house that cusp opens. The
/// wrap from house 12 back to house 1 is handled like every other boundary.
pub fn house_of(longitude: f64, cusps: &HouseCusps) -> u8 {
    cusps.house_of(longitude)
}

/// Like [`house_of`], for raw cusp longitudes that have not been validated.
///
/// Cusps that do not advance around the circle in order are reported as
/// `HouseSystemDegenerate` rather than classified by guesswork.
pub fn house_of_longitudes(longitude: f64, cusps: &[f64; 12]) -> Result<u8, ChartError> {
    let cusps = HouseCusps::new(*cusps)?;
    Ok(cusps.house_of(longitude))
}
