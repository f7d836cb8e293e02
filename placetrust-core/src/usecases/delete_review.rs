use super::{prelude::*, update_review::load_own_review};
use crate::rating::RatingChange;

#[derive(Debug, Clone, PartialEq)]
pub struct DeletedReview {
    pub review: Review,
    /// Must be applied to the aggregate of the reviewed place
    pub rating_change: Option<RatingChange>,
}

/// Soft-deletes a review on behalf of its author.
pub fn delete_review<R: ReviewRepo>(
    repo: &R,
    author_id: &str,
    review_id: &str,
    now: Timestamp,
) -> Result<DeletedReview> {
    let review = load_own_review(repo, author_id, review_id)?;
    let rating_change = review
        .counts_for_rating()
        .then_some(RatingChange::Removed(review.rating));
    repo.delete_review(review.id.as_str(), now)?;
    log::info!("Deleted review {} of place {}", review.id, review.place_id);
    Ok(DeletedReview {
        review: Review {
            deleted: true,
            updated_at: now,
            ..review
        },
        rating_change,
    })
}
