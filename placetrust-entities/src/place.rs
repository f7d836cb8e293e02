use std::{
    collections::{BTreeMap, BTreeSet},
    str::FromStr,
};

use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive as _, ToPrimitive as _};
use strum::{AsRefStr, EnumIter, EnumString};
use thiserror::Error;

use crate::{dietary::*, geo::*, id::*, rating::*, time::*};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct OpeningHours(String);

#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("Opening hours must have at least {} characters", OpeningHours::min_len())]
pub struct OpeningHoursParseError;

impl OpeningHours {
    pub const fn min_len() -> usize {
        4
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for OpeningHours {
    type Err = OpeningHoursParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.chars().count() < Self::min_len() {
            return Err(OpeningHoursParseError);
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl From<OpeningHours> for String {
    fn from(from: OpeningHours) -> Self {
        from.0
    }
}

/// Price tier from 1 (cheap) to 4 (expensive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PriceRange(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Price range {0} is out of range [1, 4]")]
pub struct InvalidPriceRange(pub i64);

impl PriceRange {
    pub const fn min() -> Self {
        Self(1)
    }

    pub const fn max() -> Self {
        Self(4)
    }

    pub fn new<I: Into<i64>>(val: I) -> Result<Self, InvalidPriceRange> {
        let val = val.into();
        if (i64::from(Self::min().0)..=i64::from(Self::max().0)).contains(&val) {
            Ok(Self(val as u8))
        } else {
            Err(InvalidPriceRange(val))
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl From<PriceRange> for i64 {
    fn from(from: PriceRange) -> Self {
        i64::from(from.0)
    }
}

pub type PlaceStatusPrimitive = i16;

#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, FromPrimitive, ToPrimitive, AsRefStr, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PlaceStatus {
    Closed   = -1,
    Inactive =  0,
    Active   =  1,
}

impl PlaceStatus {
    pub const fn default() -> Self {
        Self::Active
    }
}

#[derive(Debug, Error)]
#[error("Invalid place status primitive: {0}")]
pub struct InvalidPlaceStatusPrimitive(pub PlaceStatusPrimitive);

impl TryFrom<PlaceStatusPrimitive> for PlaceStatus {
    type Error = InvalidPlaceStatusPrimitive;
    fn try_from(from: PlaceStatusPrimitive) -> Result<Self, Self::Error> {
        Self::from_i16(from).ok_or(InvalidPlaceStatusPrimitive(from))
    }
}

impl From<PlaceStatus> for PlaceStatusPrimitive {
    fn from(from: PlaceStatus) -> Self {
        from.to_i16().expect("place status primitive")
    }
}

/// Normalizes a cuisine tag: trimmed and lower-cased.
pub fn normalize_cuisine(tag: &str) -> Option<String> {
    let tag = tag.trim();
    (!tag.is_empty()).then(|| tag.to_lowercase())
}

pub fn normalize_cuisines<'a>(tags: impl IntoIterator<Item = &'a str>) -> BTreeSet<String> {
    tags.into_iter().filter_map(normalize_cuisine).collect()
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub id             : Id,
    pub name           : String,
    pub address        : String,
    pub pos            : MapPoint,
    pub price_range    : PriceRange,
    pub cuisines       : BTreeSet<String>,
    pub dietary_tags   : BTreeMap<DietaryType, bool>,
    pub dietary_scores : BTreeMap<DietaryType, f64>,
    pub opening_hours  : Option<OpeningHours>,
    pub rating         : RatingAggregate,
    pub status         : PlaceStatus,
    pub deleted        : bool,
    pub claimed_by     : Option<Id>,
    pub verified       : bool,
    pub created_at     : Timestamp,
    pub updated_at     : Timestamp,
}

impl Place {
    /// Visible in search results and open for new reviews.
    pub fn is_listed(&self) -> bool {
        !self.deleted && self.status == PlaceStatus::Active
    }

    pub fn offers_dietary(&self, dietary_type: DietaryType) -> bool {
        self.dietary_tags
            .get(&dietary_type)
            .copied()
            .unwrap_or(false)
    }
}
