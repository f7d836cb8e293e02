use crate::{id::*, time::*};

/// A single user's helpfulness judgment of a review.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpfulnessVote {
    pub id         : Id,
    pub review_id  : Id,
    pub voter_id   : Id,
    pub helpful    : bool,
    pub created_at : Timestamp,
    pub updated_at : Timestamp,
}
