use super::prelude::*;
use crate::rating::RatingChange;

/// Moderation transitions between review statuses.
///
/// `Removed` is terminal.
pub const fn is_valid_status_transition(from: ReviewStatus, to: ReviewStatus) -> bool {
    use ReviewStatus::*;
    matches!(
        (from, to),
        (Active, Flagged) | (Active, Removed) | (Flagged, Active) | (Flagged, Removed)
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewStatusChange {
    pub review: Review,
    pub previous: ReviewStatus,
    /// Must be applied to the aggregate of the reviewed place
    pub rating_change: Option<RatingChange>,
}

impl ReviewStatusChange {
    pub fn is_removal(&self) -> bool {
        self.previous != ReviewStatus::Removed && self.review.status == ReviewStatus::Removed
    }
}

pub fn change_review_status<R: ReviewRepo>(
    repo: &R,
    review_id: &str,
    status: ReviewStatus,
    now: Timestamp,
) -> Result<ReviewStatusChange> {
    let mut review = repo.get_review(review_id)?;
    if review.deleted {
        return Err(RepoError::NotFound.into());
    }
    let previous = review.status;
    if previous == status {
        log::debug!("Review {} already has status {:?}", review.id, status);
        return Ok(ReviewStatusChange {
            review,
            previous,
            rating_change: None,
        });
    }
    if !is_valid_status_transition(previous, status) {
        return Err(Error::InvalidStatusTransition {
            from: previous,
            to: status,
        });
    }
    review.status = status;
    review.updated_at = now;
    repo.update_review(&review)?;
    log::info!(
        "Changed status of review {} from {:?} to {:?}",
        review.id,
        previous,
        status
    );
    let rating_change = RatingChange::from_status_transition(review.rating, previous, status);
    Ok(ReviewStatusChange {
        review,
        previous,
        rating_change,
    })
}
