// Low-level database access traits.
// Each repository is responsible for a single entity and
// its relationships. Related entities are only referenced
// by their id and never modified or loaded by another
// repository.

use crate::{entities::*, helpfulness::HelpfulnessDelta};
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The requested object could not be found")]
    NotFound,
    #[error("The object already exists")]
    AlreadyExists,
    #[error("The version of the object is invalid")]
    InvalidVersion,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

type Result<T> = std::result::Result<T, Error>;

/// Coarse attribute pre-filter for places.
///
/// Implementations return only places that are listed, i.e.
/// not deleted and active. They may return a superset of the
/// matching places, the search engine applies all predicates
/// again.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceQuery {
    pub bbox: Option<MapBbox>,
    pub cuisines: Vec<String>,
    pub dietary_tags: Vec<DietaryType>,
    pub min_price: Option<PriceRange>,
    pub max_price: Option<PriceRange>,
    pub min_rating: Option<AvgRatingValue>,
}

pub trait PlaceRepo {
    fn create_place(&self, place: &Place) -> Result<()>;

    // Including deleted and inactive places
    fn get_place(&self, id: &str) -> Result<Place>;

    // Only listed places
    fn nearby_place_candidates(&self, bbox: &MapBbox) -> Result<Vec<Place>>;
    fn query_places(&self, query: &PlaceQuery) -> Result<Vec<Place>>;

    // All places ordered by id
    fn place_ids_after(&self, after: Option<&str>, limit: u64) -> Result<Vec<Id>>;

    /// Overwrites the rating aggregate of a place.
    ///
    /// If `expected` is given the aggregate is only written if the
    /// stored value still equals it, otherwise `InvalidVersion` is
    /// returned.
    fn update_rating_aggregate(
        &self,
        id: &str,
        expected: Option<&RatingAggregate>,
        aggregate: &RatingAggregate,
    ) -> Result<()>;
}

pub trait ReviewRepo {
    // Fails with `AlreadyExists` if the author already has
    // a live review for the place.
    fn create_review(&self, review: &Review) -> Result<()>;
    // The helpfulness counters are left untouched
    fn update_review(&self, review: &Review) -> Result<()>;
    fn delete_review(&self, id: &str, deleted_at: Timestamp) -> Result<()>;

    // Including deleted reviews
    fn get_review(&self, id: &str) -> Result<Review>;

    // Only reviews that count for the rating
    fn active_reviews_of_place(&self, place_id: &str) -> Result<Vec<Review>>;

    fn find_live_review(&self, author_id: &str, place_id: &str) -> Result<Option<Review>>;

    // Relative increments, the counters never become negative
    fn apply_helpfulness_delta(&self, id: &str, delta: HelpfulnessDelta) -> Result<()>;
}

pub trait HelpfulnessVoteRepo {
    // Fails with `AlreadyExists` if the voter already voted
    // on the review.
    fn create_vote(&self, vote: &HelpfulnessVote) -> Result<()>;
    fn update_vote(&self, vote: &HelpfulnessVote) -> Result<()>;

    fn get_vote(&self, review_id: &str, voter_id: &str) -> Result<Option<HelpfulnessVote>>;
}

pub trait UserRepo {
    fn create_user(&self, user: &User) -> Result<()>;
    fn update_user(&self, user: &User) -> Result<()>;

    fn get_user(&self, id: &str) -> Result<User>;
    fn try_get_user(&self, id: &str) -> Result<Option<User>> {
        match self.get_user(id) {
            Ok(user) => Ok(Some(user)),
            Err(Error::NotFound) => Ok(None),
            Err(err) => Err(err),
        }
    }
}
