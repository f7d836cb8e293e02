use std::collections::BTreeMap;

use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive as _, ToPrimitive as _};
use strum::{AsRefStr, EnumCount, EnumIter, EnumString};
use thiserror::Error;

use crate::{dietary::*, geo::*, id::*, rating::*, time::*};

pub type ReviewStatusPrimitive = i16;

#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, FromPrimitive, ToPrimitive, AsRefStr, EnumIter, EnumCount, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ReviewStatus {
    Removed = -1,
    Flagged =  0,
    Active  =  1,
}

impl ReviewStatus {
    pub const fn default() -> Self {
        Self::Active
    }
}

#[derive(Debug, Error)]
#[error("Invalid review status primitive: {0}")]
pub struct InvalidReviewStatusPrimitive(pub ReviewStatusPrimitive);

impl TryFrom<ReviewStatusPrimitive> for ReviewStatus {
    type Error = InvalidReviewStatusPrimitive;
    fn try_from(from: ReviewStatusPrimitive) -> Result<Self, Self::Error> {
        Self::from_i16(from).ok_or(InvalidReviewStatusPrimitive(from))
    }
}

impl From<ReviewStatus> for ReviewStatusPrimitive {
    fn from(from: ReviewStatus) -> Self {
        from.to_i16().expect("Review status primitive")
    }
}

/// Outcome of the GPS check-in verification stamped onto a review.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GpsVerification {
    #[default]
    Unverified,
    Verified {
        check_in: MapPoint,
    },
}

impl GpsVerification {
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified { .. })
    }

    pub fn check_in(&self) -> Option<MapPoint> {
        match self {
            Self::Unverified => None,
            Self::Verified { check_in } => Some(*check_in),
        }
    }
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id                : Id,
    pub author_id         : Id,
    pub place_id          : Id,
    pub rating            : RatingValue,
    pub text              : String,
    pub photos            : Vec<String>,
    pub dietary_accuracy  : BTreeMap<DietaryType, DietaryAccuracy>,
    pub gps               : GpsVerification,
    pub helpful_count     : u64,
    pub not_helpful_count : u64,
    pub status            : ReviewStatus,
    pub deleted           : bool,
    pub created_at        : Timestamp,
    pub updated_at        : Timestamp,
}

impl Review {
    /// Occupies the single review slot of its author for the place.
    pub fn is_live(&self) -> bool {
        !self.deleted && self.status != ReviewStatus::Removed
    }

    /// Contributes to the rating aggregate of its place.
    pub fn counts_for_rating(&self) -> bool {
        !self.deleted && self.status == ReviewStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn review_status_primitives() {
        for status in ReviewStatus::iter() {
            let primitive = ReviewStatusPrimitive::from(status);
            assert_eq!(status, ReviewStatus::try_from(primitive).unwrap());
        }
        assert!(ReviewStatus::try_from(2).is_err());
        assert_eq!(Ok(ReviewStatus::Flagged), "FLAGGED".parse());
    }

    #[test]
    fn gps_verification_check_in() {
        assert_eq!(None, GpsVerification::Unverified.check_in());
        let check_in = MapPoint::from_lat_lng_deg(1.0, 2.0);
        let gps = GpsVerification::Verified { check_in };
        assert!(gps.is_verified());
        assert_eq!(Some(check_in), gps.check_in());
    }
}
