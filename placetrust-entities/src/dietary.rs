use std::str::FromStr;

use strum::{AsRefStr, Display, EnumCount, EnumIter, EnumString};
use thiserror::Error;

/// Closed set of dietary attributes that places advertise
/// and reviews judge.
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, AsRefStr, Display, EnumIter, EnumCount, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum DietaryType {
    Vegan,
    Vegetarian,
    GlutenFree,
    DairyFree,
    NutFree,
    Halal,
    Kosher,
    Pescatarian,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown dietary type: '{0}'")]
pub struct UnknownDietaryType(pub String);

impl DietaryType {
    pub fn parse(s: &str) -> Result<Self, UnknownDietaryType> {
        Self::from_str(s.trim()).map_err(|_| UnknownDietaryType(s.to_owned()))
    }
}

/// How accurately a place's dietary claim matched the reviewer's visit.
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DietaryAccuracy {
    Accurate,
    Inaccurate,
    Unsure,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown dietary accuracy: '{0}'")]
pub struct UnknownDietaryAccuracy(pub String);

impl DietaryAccuracy {
    pub fn parse(s: &str) -> Result<Self, UnknownDietaryAccuracy> {
        Self::from_str(s.trim()).map_err(|_| UnknownDietaryAccuracy(s.to_owned()))
    }
}
