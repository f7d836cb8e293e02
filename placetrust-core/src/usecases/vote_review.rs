use super::prelude::*;
use crate::{
    helpfulness::{vote_delta, HelpfulnessDelta},
    reputation::ReputationEvent,
};

#[derive(Debug, Clone, PartialEq)]
pub struct VoteOutcome {
    pub vote: HelpfulnessVote,
    pub delta: HelpfulnessDelta,
    /// The author whose reputation is affected
    pub author_id: Id,
    pub reputation_event: Option<ReputationEvent>,
}

fn reputation_event(delta: HelpfulnessDelta) -> Option<ReputationEvent> {
    match delta.helpful {
        1 => Some(ReputationEvent::HelpfulVoteAdded),
        -1 => Some(ReputationEvent::HelpfulVoteWithdrawn),
        _ => None,
    }
}

/// Records a helpfulness vote and adjusts the counters of the review.
///
/// Each user has at most one vote per review. Voting again with
/// the same value is a no-op, voting with a different value moves
/// the vote between the counters.
pub fn vote_review<D: ReviewRepo + HelpfulnessVoteRepo + UserRepo>(
    db: &D,
    review_id: &str,
    voter_id: &str,
    helpful: bool,
    now: Timestamp,
) -> Result<VoteOutcome> {
    let review = db.get_review(review_id)?;
    if !review.is_live() {
        return Err(RepoError::NotFound.into());
    }
    let voter = db.try_get_user(voter_id)?.ok_or(Error::UserDoesNotExist)?;
    if review.author_id == voter.id {
        log::debug!("User {} cannot vote on own review {}", voter.id, review.id);
        return Err(Error::Forbidden);
    }
    let mut existing = db.get_vote(review_id, voter_id)?;
    if existing.is_none() {
        let vote = HelpfulnessVote {
            id: Id::new(),
            review_id: review.id.clone(),
            voter_id: voter.id.clone(),
            helpful,
            created_at: now,
            updated_at: now,
        };
        match db.create_vote(&vote) {
            Ok(()) => {
                let delta = vote_delta(None, helpful);
                db.apply_helpfulness_delta(review_id, delta)?;
                log::debug!("User {} voted on review {}", voter.id, review.id);
                return Ok(VoteOutcome {
                    vote,
                    delta,
                    author_id: review.author_id,
                    reputation_event: reputation_event(delta),
                });
            }
            Err(RepoError::AlreadyExists) => {
                // Lost the race against a concurrent vote of the same user
                existing = db.get_vote(review_id, voter_id)?;
            }
            Err(err) => return Err(err.into()),
        }
    }
    let Some(mut vote) = existing else {
        return Err(RepoError::AlreadyExists.into());
    };
    let delta = vote_delta(Some(vote.helpful), helpful);
    if !delta.is_none() {
        vote.helpful = helpful;
        vote.updated_at = now;
        db.update_vote(&vote)?;
        db.apply_helpfulness_delta(review_id, delta)?;
        log::debug!("User {} changed vote on review {}", voter.id, review.id);
    }
    Ok(VoteOutcome {
        vote,
        delta,
        author_id: review.author_id,
        reputation_event: reputation_event(delta),
    })
}

#[cfg(test)]
mod tests {
    use super::{
        super::{tests::*, ErrorKind},
        *,
    };

    fn setup() -> (MockDb, Review) {
        let db = MockDb::default();
        db.add_user("author");
        db.add_user("u1");
        db.add_user("u2");
        let review = Review::build().author("author").finish();
        db.create_review(&review).unwrap();
        (db, review)
    }

    fn counters(db: &MockDb, review: &Review) -> (u64, u64) {
        let review = db.get_review(review.id.as_str()).unwrap();
        (review.helpful_count, review.not_helpful_count)
    }

    #[test]
    fn vote_twice_then_switch() {
        let (db, review) = setup();
        let id = review.id.as_str();
        let outcome = vote_review(&db, id, "u1", true, Timestamp::now()).unwrap();
        assert_eq!(
            Some(ReputationEvent::HelpfulVoteAdded),
            outcome.reputation_event
        );
        assert_eq!("author", outcome.author_id.as_str());
        assert_eq!((1, 0), counters(&db, &review));

        let outcome = vote_review(&db, id, "u1", true, Timestamp::now()).unwrap();
        assert!(outcome.delta.is_none());
        assert_eq!(None, outcome.reputation_event);
        assert_eq!((1, 0), counters(&db, &review));

        let outcome = vote_review(&db, id, "u1", false, Timestamp::now()).unwrap();
        assert_eq!(
            Some(ReputationEvent::HelpfulVoteWithdrawn),
            outcome.reputation_event
        );
        assert_eq!((0, 1), counters(&db, &review));
        assert_eq!(1, db.votes.borrow().len());
    }

    #[test]
    fn votes_of_different_users_add_up() {
        let (db, review) = setup();
        let id = review.id.as_str();
        vote_review(&db, id, "u1", true, Timestamp::now()).unwrap();
        vote_review(&db, id, "u2", false, Timestamp::now()).unwrap();
        assert_eq!((1, 1), counters(&db, &review));
    }

    #[test]
    fn concurrent_insert_is_handled_as_update() {
        let (db, review) = setup();
        let id = review.id.as_str();
        vote_review(&db, id, "u1", false, Timestamp::now()).unwrap();
        // Simulate a vote that becomes visible only after the lookup
        db.hide_votes_once.set(true);
        let outcome = vote_review(&db, id, "u1", true, Timestamp::now()).unwrap();
        assert_eq!(
            HelpfulnessDelta {
                helpful: 1,
                not_helpful: -1
            },
            outcome.delta
        );
        assert_eq!((1, 0), counters(&db, &review));
        assert_eq!(1, db.votes.borrow().len());
    }

    #[test]
    fn authors_cannot_vote_on_own_reviews() {
        let (db, review) = setup();
        assert!(matches!(
            vote_review(&db, review.id.as_str(), "author", true, Timestamp::now()),
            Err(Error::Forbidden)
        ));
    }

    #[test]
    fn cannot_vote_on_deleted_or_removed_reviews() {
        let (db, review) = setup();
        let removed = Review::build()
            .author("author")
            .status(ReviewStatus::Removed)
            .finish();
        db.create_review(&removed).unwrap();
        db.delete_review(review.id.as_str(), Timestamp::now()).unwrap();
        for id in [review.id.as_str(), removed.id.as_str()] {
            let err = vote_review(&db, id, "u1", true, Timestamp::now()).unwrap_err();
            assert_eq!(ErrorKind::NotFound, err.kind());
        }
        assert!(matches!(
            vote_review(&db, "unknown", "u1", true, Timestamp::now()),
            Err(Error::Repo(RepoError::NotFound))
        ));
    }

    #[test]
    fn unknown_voter() {
        let (db, review) = setup();
        assert!(matches!(
            vote_review(&db, review.id.as_str(), "nobody", true, Timestamp::now()),
            Err(Error::UserDoesNotExist)
        ));
    }
}
