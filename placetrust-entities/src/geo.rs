use itertools::Itertools;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("Invalid coordinate: lat = {lat}, lng = {lng}")]
pub struct InvalidCoordinate {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapPointParseError {
    #[error("Expected 'lat,lng' but got '{0}'")]
    Format(String),
    #[error("Invalid number '{0}'")]
    Number(String),
    #[error("Invalid latitude degrees: {0}")]
    Latitude(String),
    #[error("Invalid longitude degrees: {0}")]
    Longitude(String),
}

/// Latitude in decimal degrees within [-90, 90].
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct LatCoord(f64);

impl LatCoord {
    const DEG_MAX: f64 = 90.0;
    const DEG_MIN: f64 = -90.0;

    pub const fn max() -> Self {
        Self(Self::DEG_MAX)
    }

    pub const fn min() -> Self {
        Self(Self::DEG_MIN)
    }

    pub fn is_valid_deg(deg: f64) -> bool {
        deg.is_finite() && (Self::DEG_MIN..=Self::DEG_MAX).contains(&deg)
    }

    pub fn from_deg<T: Into<f64>>(deg: T) -> Self {
        let deg = deg.into();
        debug_assert!(Self::is_valid_deg(deg));
        Self(deg)
    }

    pub fn try_from_deg<T: Into<f64>>(deg: T) -> Option<Self> {
        let deg = deg.into();
        Self::is_valid_deg(deg).then_some(Self(deg))
    }

    pub const fn to_deg(self) -> f64 {
        self.0
    }

    pub fn to_rad(self) -> f64 {
        self.0.to_radians()
    }
}

impl std::fmt::Display for LatCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.to_deg())
    }
}

/// Longitude in decimal degrees within [-180, 180].
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct LngCoord(f64);

impl LngCoord {
    const DEG_MAX: f64 = 180.0;
    const DEG_MIN: f64 = -180.0;

    pub const fn max() -> Self {
        Self(Self::DEG_MAX)
    }

    pub const fn min() -> Self {
        Self(Self::DEG_MIN)
    }

    pub fn is_valid_deg(deg: f64) -> bool {
        deg.is_finite() && (Self::DEG_MIN..=Self::DEG_MAX).contains(&deg)
    }

    pub fn from_deg<T: Into<f64>>(deg: T) -> Self {
        let deg = deg.into();
        debug_assert!(Self::is_valid_deg(deg));
        Self(deg)
    }

    pub fn try_from_deg<T: Into<f64>>(deg: T) -> Option<Self> {
        let deg = deg.into();
        Self::is_valid_deg(deg).then_some(Self(deg))
    }

    pub const fn to_deg(self) -> f64 {
        self.0
    }

    pub fn to_rad(self) -> f64 {
        self.0.to_radians()
    }
}

impl std::fmt::Display for LngCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.to_deg())
    }
}

/// A validated geographical location.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapPoint {
    lat: LatCoord,
    lng: LngCoord,
}

impl MapPoint {
    pub const fn new(lat: LatCoord, lng: LngCoord) -> Self {
        Self { lat, lng }
    }

    pub const fn lat(self) -> LatCoord {
        self.lat
    }

    pub const fn lng(self) -> LngCoord {
        self.lng
    }

    pub fn to_lat_lng_rad(self) -> (f64, f64) {
        (self.lat.to_rad(), self.lng.to_rad())
    }

    pub fn to_lat_lng_deg(self) -> (f64, f64) {
        (self.lat.to_deg(), self.lng.to_deg())
    }

    pub fn is_valid(self) -> bool {
        LatCoord::is_valid_deg(self.lat.to_deg()) && LngCoord::is_valid_deg(self.lng.to_deg())
    }

    pub fn from_lat_lng_deg<LAT: Into<f64>, LNG: Into<f64>>(lat: LAT, lng: LNG) -> Self {
        Self::new(LatCoord::from_deg(lat), LngCoord::from_deg(lng))
    }

    pub fn try_from_lat_lng_deg<LAT: Into<f64>, LNG: Into<f64>>(
        lat: LAT,
        lng: LNG,
    ) -> Result<Self, InvalidCoordinate> {
        let (lat, lng) = (lat.into(), lng.into());
        match (LatCoord::try_from_deg(lat), LngCoord::try_from_deg(lng)) {
            (Some(lat), Some(lng)) => Ok(Self::new(lat, lng)),
            _ => Err(InvalidCoordinate { lat, lng }),
        }
    }

    fn parse_lat_lng_deg(lat_deg_str: &str, lng_deg_str: &str) -> Result<Self, MapPointParseError> {
        let lat_deg = lat_deg_str
            .trim()
            .parse::<f64>()
            .map_err(|_| MapPointParseError::Number(lat_deg_str.to_owned()))?;
        let lng_deg = lng_deg_str
            .trim()
            .parse::<f64>()
            .map_err(|_| MapPointParseError::Number(lng_deg_str.to_owned()))?;
        let lat = LatCoord::try_from_deg(lat_deg)
            .ok_or_else(|| MapPointParseError::Latitude(lat_deg_str.to_owned()))?;
        let lng = LngCoord::try_from_deg(lng_deg)
            .ok_or_else(|| MapPointParseError::Longitude(lng_deg_str.to_owned()))?;
        Ok(MapPoint::new(lat, lng))
    }
}

impl std::fmt::Display for MapPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

impl std::str::FromStr for MapPoint {
    type Err = MapPointParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((lat_deg_str, lng_deg_str)) = s.split(',').collect_tuple() {
            MapPoint::parse_lat_lng_deg(lat_deg_str, lng_deg_str)
        } else {
            Err(MapPointParseError::Format(s.to_owned()))
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Distance(f64);

impl Distance {
    pub const fn from_meters(meters: f64) -> Self {
        Self(meters)
    }

    pub fn from_km(km: f64) -> Self {
        Self(km * 1_000.0)
    }

    pub const fn to_meters(self) -> f64 {
        self.0
    }

    pub fn is_valid(self) -> bool {
        self.0 >= 0.0
    }

    /// A usable search or verification radius.
    pub fn is_positive(self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }

    /// Inclusive comparison against a limit.
    ///
    /// Computed distances to a point placed exactly at the limit
    /// may exceed it by rounding errors of a few nanometers.
    pub fn is_within(self, limit: Distance) -> bool {
        self.0 <= limit.0 + DISTANCE_TOLERANCE_METERS
    }
}

const DISTANCE_TOLERANCE_METERS: f64 = 1e-6;

impl std::fmt::Display for Distance {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(f, "{:.1} m", self.0)
    }
}

pub const MEAN_EARTH_RADIUS: Distance = Distance::from_meters(6_371_000.0);

impl MapPoint {
    /// Great-circle distance on a spherical earth (haversine formula).
    /// Reference: <https://en.wikipedia.org/wiki/Haversine_formula>
    pub fn distance(p1: MapPoint, p2: MapPoint) -> Distance {
        let (lat1_rad, lng1_rad) = p1.to_lat_lng_rad();
        let (lat2_rad, lng2_rad) = p2.to_lat_lng_rad();

        let dlat_half_sin = ((lat2_rad - lat1_rad) / 2.0).sin();
        let dlng_half_sin = ((lng2_rad - lng1_rad) / 2.0).sin();

        let a = dlat_half_sin * dlat_half_sin
            + lat1_rad.cos() * lat2_rad.cos() * dlng_half_sin * dlng_half_sin;
        // Rounding errors might push `a` slightly out of [0, 1]
        let a = a.clamp(0.0, 1.0);
        let c = 2.0 * a.sqrt().asin();

        Distance::from_meters(MEAN_EARTH_RADIUS.to_meters() * c)
    }

    pub fn within_radius(p1: MapPoint, p2: MapPoint, radius: Distance) -> bool {
        Self::distance(p1, p2).is_within(radius)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapBbox {
    sw: MapPoint,
    ne: MapPoint,
}

impl MapBbox {
    pub const fn new(sw: MapPoint, ne: MapPoint) -> Self {
        Self { sw, ne }
    }

    pub const fn southwest(&self) -> MapPoint {
        self.sw
    }

    pub const fn northeast(&self) -> MapPoint {
        self.ne
    }

    pub fn is_valid(&self) -> bool {
        self.sw.lat() <= self.ne.lat()
    }

    /// Longitudes wrap around the antimeridian.
    pub fn is_inverse(&self) -> bool {
        self.sw.lng() > self.ne.lng()
    }

    /// Smallest bounding box that contains all points
    /// within `radius` around `center`.
    ///
    /// The box might be larger than necessary near the poles
    /// and covers all longitudes if a pole is within reach.
    pub fn around(center: MapPoint, radius: Distance) -> Self {
        debug_assert!(radius.is_valid());
        let dlat_deg = (radius.to_meters() / MEAN_EARTH_RADIUS.to_meters()).to_degrees();
        let (lat_deg, lng_deg) = center.to_lat_lng_deg();
        let south_west_lat_deg = LatCoord::min().to_deg().max(lat_deg - dlat_deg);
        let north_east_lat_deg = LatCoord::max().to_deg().min(lat_deg + dlat_deg);
        let max_abs_lat_rad = south_west_lat_deg
            .abs()
            .max(north_east_lat_deg.abs())
            .to_radians();
        let lng_full_range = LngCoord::max().to_deg() - LngCoord::min().to_deg();
        let cos_lat = max_abs_lat_rad.cos();
        let dlng_deg = if cos_lat > f64::EPSILON {
            dlat_deg / cos_lat
        } else {
            lng_full_range
        };
        let (mut south_west_lng_deg, mut north_east_lng_deg) = if dlng_deg * 2.0 >= lng_full_range
        {
            (LngCoord::min().to_deg(), LngCoord::max().to_deg())
        } else {
            (lng_deg - dlng_deg, lng_deg + dlng_deg)
        };
        if south_west_lng_deg < LngCoord::min().to_deg() {
            // wrap around
            south_west_lng_deg += lng_full_range;
        }
        if north_east_lng_deg > LngCoord::max().to_deg() {
            // wrap around
            north_east_lng_deg -= lng_full_range;
        }
        let bbox = MapBbox::new(
            MapPoint::from_lat_lng_deg(south_west_lat_deg, south_west_lng_deg),
            MapPoint::from_lat_lng_deg(north_east_lat_deg, north_east_lng_deg),
        );
        debug_assert!(bbox.is_valid());
        bbox
    }

    pub fn contains_point(&self, pt: MapPoint) -> bool {
        debug_assert!(self.is_valid());
        if pt.lat() < self.sw.lat() || pt.lat() > self.ne.lat() {
            return false;
        }
        if self.is_inverse() {
            // inverse (exclusive)
            !(pt.lng() > self.ne.lng() && pt.lng() < self.sw.lng())
        } else {
            // regular (inclusive)
            pt.lng() >= self.sw.lng() && pt.lng() <= self.ne.lng()
        }
    }
}

impl std::fmt::Display for MapBbox {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(f, "{},{}", self.sw, self.ne)
    }
}
