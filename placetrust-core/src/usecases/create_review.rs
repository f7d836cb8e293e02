use super::{parse_dietary_accuracy, prelude::*};
use crate::{
    integrity::{gps_verification, CheckInVerification},
    util::validate::{AutoCorrect, Validate},
};

#[rustfmt::skip]
#[derive(Debug, Clone)]
pub struct NewReview {
    pub author_id        : String,
    pub place_id         : String,
    pub rating           : i64,
    pub text             : String,
    pub photos           : Vec<String>,
    /// Pairs of dietary type and accuracy judgment
    pub dietary_accuracy : Vec<(String, String)>,
    /// Latitude and longitude in decimal degrees
    pub check_in         : Option<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreatedReview {
    pub review: Review,
    pub verification: CheckInVerification,
}

/// Loads a place that accepts new reviews.
fn load_reviewable_place<R: PlaceRepo>(repo: &R, place_id: &str) -> Result<Place> {
    let place = repo.get_place(place_id)?;
    if place.deleted {
        return Err(RepoError::NotFound.into());
    }
    if place.status != PlaceStatus::Active {
        log::debug!(
            "Rejecting review of place {} with status {:?}",
            place.id,
            place.status
        );
        return Err(Error::PlaceNotActive);
    }
    Ok(place)
}

pub fn create_review<D: Db>(
    db: &D,
    new_review: NewReview,
    max_check_in_distance: Distance,
    now: Timestamp,
) -> Result<CreatedReview> {
    let NewReview {
        author_id,
        place_id,
        rating,
        text,
        photos,
        dietary_accuracy,
        check_in,
    } = new_review;
    let rating = RatingValue::new(rating)?;
    let dietary_accuracy = parse_dietary_accuracy(&dietary_accuracy)?;
    let check_in = check_in
        .map(|(lat, lng)| MapPoint::try_from_lat_lng_deg(lat, lng))
        .transpose()?;
    let place = load_reviewable_place(db, &place_id)?;
    let author = db
        .try_get_user(&author_id)?
        .ok_or(Error::UserDoesNotExist)?;
    if db
        .find_live_review(author.id.as_str(), place.id.as_str())?
        .is_some()
    {
        return Err(Error::ReviewExists);
    }
    let (verification, gps) = gps_verification(place.pos, check_in, max_check_in_distance);
    let review = Review {
        id: Id::new(),
        author_id: author.id,
        place_id: place.id,
        rating,
        text,
        photos,
        dietary_accuracy,
        gps,
        helpful_count: 0,
        not_helpful_count: 0,
        status: ReviewStatus::Active,
        deleted: false,
        created_at: now,
        updated_at: now,
    }
    .auto_correct();
    review.validate()?;
    db.create_review(&review).map_err(|err| match err {
        RepoError::AlreadyExists => Error::ReviewExists,
        err => err.into(),
    })?;
    log::info!(
        "Created review {} of place {} with rating {} ({:?})",
        review.id,
        review.place_id,
        review.rating,
        verification
    );
    Ok(CreatedReview {
        review,
        verification,
    })
}
