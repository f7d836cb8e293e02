use std::fmt;

use rust_decimal::{prelude::ToPrimitive as _, Decimal, RoundingStrategy};
use thiserror::Error;

/// Star rating of a single review.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct RatingValue(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Rating {0} is out of range [1, 5]")]
pub struct InvalidRatingValue(pub i64);

impl RatingValue {
    pub const fn min() -> Self {
        Self(1)
    }

    pub const fn max() -> Self {
        Self(5)
    }

    pub fn new<I: Into<i64>>(val: I) -> Result<Self, InvalidRatingValue> {
        let val = val.into();
        if (i64::from(Self::min().0)..=i64::from(Self::max().0)).contains(&val) {
            Ok(Self(val as u8))
        } else {
            Err(InvalidRatingValue(val))
        }
    }

    pub fn is_valid(self) -> bool {
        self >= Self::min() && self <= Self::max()
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl From<RatingValue> for i64 {
    fn from(from: RatingValue) -> Self {
        i64::from(from.0)
    }
}

impl fmt::Display for RatingValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

const AVG_DECIMAL_PLACES: u32 = 2;

/// Fixed-point average rating with exactly two decimal places.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct AvgRatingValue(Decimal);

impl Default for AvgRatingValue {
    fn default() -> Self {
        Self::zero()
    }
}

impl AvgRatingValue {
    pub fn zero() -> Self {
        Self::from_decimal(Decimal::ZERO)
    }

    pub fn min() -> Self {
        Self::from_decimal(Decimal::ONE)
    }

    pub fn max() -> Self {
        Self::from_decimal(Decimal::from(RatingValue::max().0))
    }

    /// Rounds half away from zero to two decimal places.
    pub fn from_decimal(val: Decimal) -> Self {
        let mut val =
            val.round_dp_with_strategy(AVG_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
        val.rescale(AVG_DECIMAL_PLACES);
        Self(val)
    }

    /// Stored representation in hundredths, e.g. 4.25 -> 425.
    pub fn from_hundredths(hundredths: i64) -> Self {
        Self(Decimal::new(hundredths, AVG_DECIMAL_PLACES))
    }

    pub fn to_hundredths(self) -> i64 {
        let mut val = self.0;
        val.rescale(AVG_DECIMAL_PLACES);
        // Bounded by the rating range
        val.mantissa() as i64
    }

    pub const fn to_decimal(self) -> Decimal {
        self.0
    }

    pub fn to_f64(self) -> f64 {
        self.0.to_f64().unwrap_or_default()
    }

    pub fn clamp(self) -> Self {
        Self(self.0.max(Self::min().0).min(Self::max().0))
    }

    pub fn is_valid(self) -> bool {
        self.0 >= Decimal::ZERO && self <= Self::max()
    }
}

impl From<RatingValue> for AvgRatingValue {
    fn from(from: RatingValue) -> Self {
        Self::from_decimal(Decimal::from(from.0))
    }
}

impl fmt::Display for AvgRatingValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Derived rating fields of a place.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RatingAggregate {
    pub avg: AvgRatingValue,
    pub count: u64,
}

impl RatingAggregate {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Average is zero iff there are no ratings.
    pub fn is_valid(&self) -> bool {
        self.avg.is_valid() && ((self.count == 0) == (self.avg == AvgRatingValue::zero()))
    }
}

impl fmt::Display for RatingAggregate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.avg, self.count)
    }
}

/// Exact integer accumulator for averaging ratings.
#[derive(Debug, Default, Clone)]
pub struct AvgRatingValueBuilder {
    acc: i64,
    cnt: u64,
}

impl AvgRatingValueBuilder {
    pub fn add(&mut self, val: RatingValue) {
        debug_assert!(val.is_valid());
        self.acc += i64::from(val);
        self.cnt += 1;
    }

    pub fn build(self) -> RatingAggregate {
        if self.cnt == 0 {
            return RatingAggregate::empty();
        }
        let avg = Decimal::from(self.acc) / Decimal::from(self.cnt);
        RatingAggregate {
            avg: AvgRatingValue::from_decimal(avg).clamp(),
            count: self.cnt,
        }
    }
}

impl std::ops::AddAssign<RatingValue> for AvgRatingValueBuilder {
    fn add_assign(&mut self, rhs: RatingValue) {
        self.add(rhs);
    }
}

impl FromIterator<RatingValue> for AvgRatingValueBuilder {
    fn from_iter<T: IntoIterator<Item = RatingValue>>(iter: T) -> Self {
        let mut builder = Self::default();
        for val in iter {
            builder += val;
        }
        builder
    }
}
