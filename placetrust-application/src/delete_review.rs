use super::*;
use placetrust_core::reputation::ReputationEvent;

/// Soft-deletes a review on behalf of its author.
///
/// The author loses the points that were awarded for the review
/// unless it has already been removed by moderation.
pub fn delete_review(
    connections: &sqlite::Connections,
    settings: &ReviewSettings,
    author_id: &str,
    review_id: &str,
) -> Result<Review> {
    let usecases::DeletedReview {
        review,
        rating_change,
    } = connections.exclusive()?.transaction(|conn| {
        usecases::delete_review(conn, author_id, review_id, Timestamp::now()).map_err(|err| {
            warn!("Failed to delete review {}: {}", review_id, err);
            err
        })
    })?;
    if let Some(change) = rating_change {
        post_apply_rating_change(connections, &review.place_id, change);
    }
    if review.status != ReviewStatus::Removed {
        post_adjust_reputation(
            connections,
            &settings.reputation,
            &review.author_id,
            ReputationEvent::ReviewDeleted {
                gps_verified: review.gps.is_verified(),
            },
        );
    }
    Ok(review)
}

#[cfg(test)]
mod tests {
    use crate::tests::prelude::*;

    #[test]
    fn delete_own_review() {
        let fixture = BackendFixture::new();
        let place_id = fixture.create_place("Green Bowl", 48.0, 9.0);
        fixture.create_user("u1");
        fixture.create_user("u2");
        let review = fixture.create_review("u1", &place_id, 3);
        fixture.create_review("u2", &place_id, 5);

        let deleted = flows::delete_review(
            &fixture.db_connections,
            &fixture.settings,
            "u1",
            review.id.as_str(),
        )
        .unwrap();
        assert!(deleted.deleted);

        let rating = fixture.get_place(&place_id).rating;
        assert_eq!(AvgRatingValue::from_hundredths(500), rating.avg);
        assert_eq!(1, rating.count);

        let author = fixture.get_user("u1");
        assert_eq!(0, author.points);
        assert_eq!(0, author.review_count);

        // A new review is accepted after deletion
        fixture.create_review("u1", &place_id, 4);
    }

    #[test]
    fn delete_twice() {
        let fixture = BackendFixture::new();
        let place_id = fixture.create_place("Green Bowl", 48.0, 9.0);
        fixture.create_user("u1");
        let review = fixture.create_review("u1", &place_id, 3);
        flows::delete_review(
            &fixture.db_connections,
            &fixture.settings,
            "u1",
            review.id.as_str(),
        )
        .unwrap();
        let err = flows::delete_review(
            &fixture.db_connections,
            &fixture.settings,
            "u1",
            review.id.as_str(),
        )
        .unwrap_err();
        assert_eq!(Some(usecases::ErrorKind::NotFound), err.kind());
        assert_eq!(0, fixture.get_user("u1").points);
    }
}
