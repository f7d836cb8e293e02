use strum::{AsRefStr, Display, EnumCount, EnumIter};

use crate::{id::*, time::*};

/// Reputation-relevant slice of a user account.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id           : Id,
    pub points       : u32,
    pub review_count : u32,
    pub created_at   : Timestamp,
}

#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, AsRefStr, Display, EnumIter, EnumCount)]
#[strum(serialize_all = "lowercase")]
pub enum ReputationTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
}

impl ReputationTier {
    /// Minimum number of points required for this tier.
    pub const fn min_points(self) -> u32 {
        match self {
            Self::Bronze => 0,
            Self::Silver => 50,
            Self::Gold => 150,
            Self::Platinum => 300,
            Self::Diamond => 500,
        }
    }

    pub const fn from_points(points: u32) -> Self {
        if points >= Self::Diamond.min_points() {
            Self::Diamond
        } else if points >= Self::Platinum.min_points() {
            Self::Platinum
        } else if points >= Self::Gold.min_points() {
            Self::Gold
        } else if points >= Self::Silver.min_points() {
            Self::Silver
        } else {
            Self::Bronze
        }
    }
}

impl User {
    pub const fn tier(&self) -> ReputationTier {
        ReputationTier::from_points(self.points)
    }
}
