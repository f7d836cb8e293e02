use rust_decimal::Decimal;

use crate::entities::*;

pub trait Rated {
    fn rating_aggregate(&self, _: &[Review]) -> RatingAggregate;
}

impl Rated for Place {
    fn rating_aggregate(&self, reviews: &[Review]) -> RatingAggregate {
        debug_assert_eq!(
            reviews.len(),
            reviews.iter().filter(|r| r.place_id == self.id).count()
        );
        recompute(reviews)
    }
}

/// Full recomputation from the reviews that count for the rating.
pub fn recompute<'a>(reviews: impl IntoIterator<Item = &'a Review>) -> RatingAggregate {
    reviews
        .into_iter()
        .filter(|r| r.counts_for_rating())
        .fold(AvgRatingValueBuilder::default(), |mut acc, r| {
            acc.add(r.rating);
            acc
        })
        .build()
}

/// A change of the ratings that contribute to a place's aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingChange {
    Created(RatingValue),
    Updated { old: RatingValue, new: RatingValue },
    Removed(RatingValue),
}

impl RatingChange {
    /// The change caused by moving a review between statuses.
    pub fn from_status_transition(
        rating: RatingValue,
        old: ReviewStatus,
        new: ReviewStatus,
    ) -> Option<Self> {
        match (old == ReviewStatus::Active, new == ReviewStatus::Active) {
            (true, false) => Some(Self::Removed(rating)),
            (false, true) => Some(Self::Created(rating)),
            _ => None,
        }
    }
}

/// Incremental update of an aggregate.
///
/// `new_avg = (old_avg * old_count + delta) / new_count`
pub fn apply_change(aggregate: RatingAggregate, change: RatingChange) -> RatingAggregate {
    let RatingAggregate { avg, count } = aggregate;
    let sum = avg.to_decimal() * Decimal::from(count);
    let (sum, count) = match change {
        RatingChange::Created(rating) => (sum + Decimal::from(i64::from(rating)), count + 1),
        RatingChange::Updated { old, new } => {
            if count == 0 {
                // Inconsistent aggregate, treat as a newly counted rating
                (Decimal::from(i64::from(new)), 1)
            } else {
                (
                    sum - Decimal::from(i64::from(old)) + Decimal::from(i64::from(new)),
                    count,
                )
            }
        }
        RatingChange::Removed(rating) => {
            if count <= 1 {
                return RatingAggregate::empty();
            }
            (sum - Decimal::from(i64::from(rating)), count - 1)
        }
    };
    RatingAggregate {
        avg: AvgRatingValue::from_decimal(sum / Decimal::from(count)).clamp(),
        count,
    }
}
