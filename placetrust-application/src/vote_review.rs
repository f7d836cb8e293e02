use super::*;

/// Records a helpfulness vote of `voter_id`.
///
/// The reputation of the review's author follows its helpful votes.
pub fn vote_review(
    connections: &sqlite::Connections,
    settings: &ReviewSettings,
    review_id: &str,
    voter_id: &str,
    helpful: bool,
) -> Result<usecases::VoteOutcome> {
    let outcome = connections.exclusive()?.transaction(|conn| {
        usecases::vote_review(conn, review_id, voter_id, helpful, Timestamp::now()).map_err(
            |err| {
                warn!(
                    "Failed to record vote of user {} on review {}: {}",
                    voter_id, review_id, err
                );
                err
            },
        )
    })?;
    if let Some(event) = outcome.reputation_event {
        post_adjust_reputation(
            connections,
            &settings.reputation,
            &outcome.author_id,
            event,
        );
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use crate::tests::prelude::*;

    fn counters(fixture: &BackendFixture, review: &Review) -> (u64, u64) {
        let review = fixture.get_review(review.id.as_str());
        (review.helpful_count, review.not_helpful_count)
    }

    fn vote(fixture: &BackendFixture, review: &Review, voter_id: &str, helpful: bool) {
        flows::vote_review(
            &fixture.db_connections,
            &fixture.settings,
            review.id.as_str(),
            voter_id,
            helpful,
        )
        .unwrap();
    }

    #[test]
    fn vote_twice_then_switch() {
        let fixture = BackendFixture::new();
        let place_id = fixture.create_place("Green Bowl", 48.0, 9.0);
        fixture.create_user("author");
        fixture.create_user("u1");
        let review = fixture.create_review("author", &place_id, 5);

        vote(&fixture, &review, "u1", true);
        vote(&fixture, &review, "u1", true);
        assert_eq!((1, 0), counters(&fixture, &review));
        assert_eq!(12, fixture.get_user("author").points);

        vote(&fixture, &review, "u1", false);
        assert_eq!((0, 1), counters(&fixture, &review));
        assert_eq!(10, fixture.get_user("author").points);
    }

    #[test]
    fn votes_of_different_users() {
        let fixture = BackendFixture::new();
        let place_id = fixture.create_place("Green Bowl", 48.0, 9.0);
        fixture.create_user("author");
        fixture.create_user("u1");
        fixture.create_user("u2");
        let review = fixture.create_review("author", &place_id, 5);

        vote(&fixture, &review, "u1", true);
        vote(&fixture, &review, "u2", false);
        assert_eq!((1, 1), counters(&fixture, &review));
        assert_eq!(12, fixture.get_user("author").points);
    }

    #[test]
    fn authors_cannot_vote_on_own_reviews() {
        let fixture = BackendFixture::new();
        let place_id = fixture.create_place("Green Bowl", 48.0, 9.0);
        fixture.create_user("author");
        let review = fixture.create_review("author", &place_id, 5);
        let err = flows::vote_review(
            &fixture.db_connections,
            &fixture.settings,
            review.id.as_str(),
            "author",
            true,
        )
        .unwrap_err();
        assert_eq!(Some(usecases::ErrorKind::Forbidden), err.kind());
        assert_eq!((0, 0), counters(&fixture, &review));
    }
}
