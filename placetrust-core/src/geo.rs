//! Distance and proximity on raw decimal degrees.

use thiserror::Error;

use crate::entities::*;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeoError {
    #[error(transparent)]
    InvalidCoordinate(#[from] InvalidCoordinate),
    #[error("Radius must be positive, but was {0} m")]
    InvalidRadius(f64),
}

type Result<T> = std::result::Result<T, GeoError>;

pub fn distance_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Result<f64> {
    let p1 = MapPoint::try_from_lat_lng_deg(lat1, lon1)?;
    let p2 = MapPoint::try_from_lat_lng_deg(lat2, lon2)?;
    Ok(MapPoint::distance(p1, p2).to_meters())
}

pub fn within_radius(
    lat1: f64,
    lon1: f64,
    lat2: f64,
    lon2: f64,
    radius_meters: f64,
) -> Result<bool> {
    let radius = validate_radius(Distance::from_meters(radius_meters))?;
    let p1 = MapPoint::try_from_lat_lng_deg(lat1, lon1)?;
    let p2 = MapPoint::try_from_lat_lng_deg(lat2, lon2)?;
    Ok(MapPoint::within_radius(p1, p2, radius))
}

pub fn validate_radius(radius: Distance) -> Result<Distance> {
    if radius.is_positive() {
        Ok(radius)
    } else {
        Err(GeoError::InvalidRadius(radius.to_meters()))
    }
}
