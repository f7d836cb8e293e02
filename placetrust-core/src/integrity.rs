//! GPS check-in verification of reviews.

use crate::entities::*;

pub const DEFAULT_MAX_CHECK_IN_DISTANCE: Distance = Distance::from_meters(200.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CheckInVerification {
    Verified { distance: Distance },
    TooFar { distance: Distance },
    /// No check-in location was provided.
    Unverifiable,
}

impl CheckInVerification {
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified { .. })
    }

    pub fn distance(&self) -> Option<Distance> {
        match self {
            Self::Verified { distance } | Self::TooFar { distance } => Some(*distance),
            Self::Unverifiable => None,
        }
    }

    /// The GPS fields to stamp onto the review.
    pub fn into_gps(self, check_in: Option<MapPoint>) -> GpsVerification {
        match (self, check_in) {
            (Self::Verified { .. }, Some(check_in)) => GpsVerification::Verified { check_in },
            _ => GpsVerification::Unverified,
        }
    }
}

/// The boundary is inclusive.
pub fn verify_check_in(
    place_pos: MapPoint,
    check_in: Option<MapPoint>,
    max_distance: Distance,
) -> CheckInVerification {
    let Some(check_in) = check_in else {
        return CheckInVerification::Unverifiable;
    };
    let distance = MapPoint::distance(place_pos, check_in);
    if distance.is_within(max_distance) {
        CheckInVerification::Verified { distance }
    } else {
        CheckInVerification::TooFar { distance }
    }
}

/// Verifies and derives the GPS fields in one step.
pub fn gps_verification(
    place_pos: MapPoint,
    check_in: Option<MapPoint>,
    max_distance: Distance,
) -> (CheckInVerification, GpsVerification) {
    let verification = verify_check_in(place_pos, check_in, max_distance);
    (verification, verification.into_gps(check_in))
}
