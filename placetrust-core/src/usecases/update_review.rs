use super::{parse_dietary_accuracy, prelude::*};
use crate::{
    rating::RatingChange,
    util::validate::{AutoCorrect, Validate},
};

/// Changes of a review, `None` keeps the current value.
///
/// The GPS verification of a review never changes on update.
#[derive(Debug, Clone, Default)]
pub struct ReviewUpdate {
    pub rating: Option<i64>,
    pub text: Option<String>,
    pub photos: Option<Vec<String>>,
    pub dietary_accuracy: Option<Vec<(String, String)>>,
}

/// Loads a review that may be modified by its author.
pub(crate) fn load_own_review<R: ReviewRepo>(
    repo: &R,
    author_id: &str,
    review_id: &str,
) -> Result<Review> {
    let review = repo.get_review(review_id)?;
    if review.deleted {
        return Err(RepoError::NotFound.into());
    }
    if review.author_id != author_id {
        log::debug!(
            "User {} is not the author of review {}",
            author_id,
            review.id
        );
        return Err(Error::Forbidden);
    }
    Ok(review)
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdatedReview {
    pub review: Review,
    /// Must be applied to the aggregate of the reviewed place
    pub rating_change: Option<RatingChange>,
}

pub fn update_review<R: ReviewRepo>(
    repo: &R,
    author_id: &str,
    review_id: &str,
    update: ReviewUpdate,
    now: Timestamp,
) -> Result<UpdatedReview> {
    let ReviewUpdate {
        rating,
        text,
        photos,
        dietary_accuracy,
    } = update;
    let rating = rating.map(RatingValue::new).transpose()?;
    let dietary_accuracy = dietary_accuracy
        .as_deref()
        .map(parse_dietary_accuracy)
        .transpose()?;
    let old = load_own_review(repo, author_id, review_id)?;
    if old.status == ReviewStatus::Removed {
        return Err(Error::Forbidden);
    }
    let mut review = old.clone();
    if let Some(rating) = rating {
        review.rating = rating;
    }
    if let Some(text) = text {
        review.text = text;
    }
    if let Some(photos) = photos {
        review.photos = photos;
    }
    if let Some(dietary_accuracy) = dietary_accuracy {
        review.dietary_accuracy = dietary_accuracy;
    }
    let mut review = review.auto_correct();
    review.validate()?;
    if review == old {
        return Ok(UpdatedReview {
            review,
            rating_change: None,
        });
    }
    review.updated_at = now;
    repo.update_review(&review)?;
    let rating_change = (review.counts_for_rating() && review.rating != old.rating).then_some(
        RatingChange::Updated {
            old: old.rating,
            new: review.rating,
        },
    );
    log::info!("Updated review {}", review.id);
    Ok(UpdatedReview {
        review,
        rating_change,
    })
}

#[cfg(test)]
mod tests {
    use super::{
        super::{create_review::tests::new_review, tests::*, *},
        *,
    };
    use crate::integrity::DEFAULT_MAX_CHECK_IN_DISTANCE;

    fn setup() -> (MockDb, Review) {
        let db = MockDb::default();
        let place_id = db.add_place(MapPoint::from_lat_lng_deg(1.0, 1.0));
        db.add_user("u1");
        let created = create_review(
            &db,
            NewReview {
                check_in: Some((1.0, 1.0)),
                ..new_review("u1", &place_id, 3)
            },
            DEFAULT_MAX_CHECK_IN_DISTANCE,
            Timestamp::from_millis(1),
        )
        .unwrap();
        (db, created.review)
    }

    #[test]
    fn update_rating_and_text() {
        let (db, review) = setup();
        let updated = update_review(
            &db,
            "u1",
            review.id.as_str(),
            ReviewUpdate {
                rating: Some(5),
                text: Some("Even better ".into()),
                ..Default::default()
            },
            Timestamp::from_millis(2),
        )
        .unwrap();
        assert_eq!(
            Some(RatingChange::Updated {
                old: RatingValue::new(3).unwrap(),
                new: RatingValue::new(5).unwrap()
            }),
            updated.rating_change
        );
        let stored = db.get_review(review.id.as_str()).unwrap();
        assert_eq!("Even better", stored.text);
        assert_eq!(Timestamp::from_millis(2), stored.updated_at);
        // GPS fields are untouched
        assert_eq!(review.gps, stored.gps);
    }

    #[test]
    fn update_without_rating_change() {
        let (db, review) = setup();
        let updated = update_review(
            &db,
            "u1",
            review.id.as_str(),
            ReviewUpdate {
                text: Some("Changed".into()),
                ..Default::default()
            },
            Timestamp::from_millis(2),
        )
        .unwrap();
        assert_eq!(None, updated.rating_change);
    }

    #[test]
    fn only_the_author_may_update() {
        let (db, review) = setup();
        assert!(matches!(
            update_review(
                &db,
                "u2",
                review.id.as_str(),
                ReviewUpdate::default(),
                Timestamp::now()
            ),
            Err(Error::Forbidden)
        ));
    }

    #[test]
    fn reject_invalid_updates() {
        let (db, review) = setup();
        assert!(matches!(
            update_review(
                &db,
                "u1",
                review.id.as_str(),
                ReviewUpdate {
                    rating: Some(9),
                    ..Default::default()
                },
                Timestamp::now()
            ),
            Err(Error::RatingValue)
        ));
        assert!(matches!(
            update_review(
                &db,
                "u1",
                review.id.as_str(),
                ReviewUpdate {
                    text: Some("".into()),
                    ..Default::default()
                },
                Timestamp::now()
            ),
            Err(Error::EmptyText)
        ));
        assert_eq!(review, db.get_review(review.id.as_str()).unwrap());
    }

    #[test]
    fn flagged_reviews_do_not_change_the_aggregate() {
        let (db, mut review) = setup();
        review.status = ReviewStatus::Flagged;
        db.update_review(&review).unwrap();
        let updated = update_review(
            &db,
            "u1",
            review.id.as_str(),
            ReviewUpdate {
                rating: Some(1),
                ..Default::default()
            },
            Timestamp::now(),
        )
        .unwrap();
        assert_eq!(None, updated.rating_change);
    }
}
