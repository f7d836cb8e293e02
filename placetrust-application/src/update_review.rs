use super::*;

pub fn update_review(
    connections: &sqlite::Connections,
    author_id: &str,
    review_id: &str,
    update: usecases::ReviewUpdate,
) -> Result<Review> {
    let usecases::UpdatedReview {
        review,
        rating_change,
    } = connections.exclusive()?.transaction(|conn| {
        usecases::update_review(conn, author_id, review_id, update, Timestamp::now()).map_err(
            |err| {
                warn!("Failed to update review {}: {}", review_id, err);
                err
            },
        )
    })?;
    if let Some(change) = rating_change {
        post_apply_rating_change(connections, &review.place_id, change);
    }
    Ok(review)
}

#[cfg(test)]
mod tests {
    use crate::tests::prelude::*;

    #[test]
    fn change_rating_of_own_review() {
        let fixture = BackendFixture::new();
        let place_id = fixture.create_place("Green Bowl", 48.0, 9.0);
        fixture.create_user("u1");
        fixture.create_user("u2");
        fixture.create_review("u1", &place_id, 5);
        let review = fixture.create_review("u2", &place_id, 3);

        let updated = flows::update_review(
            &fixture.db_connections,
            "u2",
            review.id.as_str(),
            usecases::ReviewUpdate {
                rating: Some(4),
                text: Some("Even better the second time".into()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(4, updated.rating.get());
        assert_eq!(updated, fixture.get_review(review.id.as_str()));
        let rating = fixture.get_place(&place_id).rating;
        assert_eq!(AvgRatingValue::from_hundredths(450), rating.avg);
        assert_eq!(2, rating.count);
    }

    #[test]
    fn only_the_author_may_update() {
        let fixture = BackendFixture::new();
        let place_id = fixture.create_place("Green Bowl", 48.0, 9.0);
        fixture.create_user("u1");
        let review = fixture.create_review("u1", &place_id, 5);
        let err = flows::update_review(
            &fixture.db_connections,
            "u2",
            review.id.as_str(),
            usecases::ReviewUpdate {
                rating: Some(1),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert_eq!(Some(usecases::ErrorKind::Forbidden), err.kind());
        assert_eq!(5, fixture.get_review(review.id.as_str()).rating.get());
    }
}
