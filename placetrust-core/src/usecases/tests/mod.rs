use std::cell::{Cell, RefCell};

use super::prelude::{
    HelpfulnessVote, HelpfulnessVoteRepo, Id, MapBbox, MapPoint, Place, PlaceQuery, PlaceRepo,
    RatingAggregate, RepoError, Review, ReviewRepo, Timestamp, User, UserRepo,
};
use crate::helpfulness::HelpfulnessDelta;

pub use placetrust_entities::builders::*;

type RepoResult<T> = std::result::Result<T, RepoError>;

trait Key {
    fn key(&self) -> &str;
}

impl Key for Place {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

impl Key for Review {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

impl Key for User {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

impl Key for HelpfulnessVote {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

#[derive(Default)]
pub struct MockDb {
    pub places: RefCell<Vec<Place>>,
    pub reviews: RefCell<Vec<Review>>,
    pub votes: RefCell<Vec<HelpfulnessVote>>,
    pub users: RefCell<Vec<User>>,
    /// Number of conditional aggregate updates that fail as if
    /// they were overtaken by a concurrent writer
    pub conflicting_aggregate_updates: Cell<usize>,
    /// Hides existing votes from the next lookup
    pub hide_votes_once: Cell<bool>,
}

impl MockDb {
    pub fn add_place(&self, pos: MapPoint) -> String {
        let place = Place::build().name("Test place").pos(pos).finish();
        let id = place.id.as_str().to_owned();
        self.create_place(&place).unwrap();
        id
    }

    pub fn add_user(&self, id: &str) {
        self.create_user(&User {
            id: id.into(),
            points: 0,
            review_count: 0,
            created_at: Timestamp::now(),
        })
        .unwrap();
    }
}

fn get<T: Clone + Key>(objects: &[T], id: &str) -> RepoResult<T> {
    match objects.iter().find(|x| x.key() == id) {
        Some(x) => Ok(x.clone()),
        None => Err(RepoError::NotFound),
    }
}

fn create<T: Clone + Key>(objects: &mut Vec<T>, e: T) -> RepoResult<()> {
    if objects.iter().any(|x| x.key() == e.key()) {
        return Err(RepoError::AlreadyExists);
    }
    objects.push(e);
    Ok(())
}

fn update<T: Clone + Key>(objects: &mut [T], e: &T) -> RepoResult<()> {
    if let Some(pos) = objects.iter().position(|x| x.key() == e.key()) {
        objects[pos] = e.clone();
    } else {
        return Err(RepoError::NotFound);
    }
    Ok(())
}

fn in_bbox(bbox: Option<&MapBbox>) -> impl Fn(&&Place) -> bool + '_ {
    move |p| bbox.is_none_or(|bbox| bbox.contains_point(p.pos))
}

impl PlaceRepo for MockDb {
    fn create_place(&self, place: &Place) -> RepoResult<()> {
        create(&mut self.places.borrow_mut(), place.clone())
    }

    fn get_place(&self, id: &str) -> RepoResult<Place> {
        get(&self.places.borrow(), id)
    }

    fn nearby_place_candidates(&self, bbox: &MapBbox) -> RepoResult<Vec<Place>> {
        Ok(self
            .places
            .borrow()
            .iter()
            .filter(|p| p.is_listed())
            .filter(in_bbox(Some(bbox)))
            .cloned()
            .collect())
    }

    fn query_places(&self, query: &PlaceQuery) -> RepoResult<Vec<Place>> {
        Ok(self
            .places
            .borrow()
            .iter()
            .filter(|p| p.is_listed())
            .filter(in_bbox(query.bbox.as_ref()))
            .cloned()
            .collect())
    }

    fn place_ids_after(&self, after: Option<&str>, limit: u64) -> RepoResult<Vec<Id>> {
        let mut ids: Vec<_> = self
            .places
            .borrow()
            .iter()
            .map(|p| p.id.clone())
            .filter(|id| after.is_none_or(|after| id.as_str() > after))
            .collect();
        ids.sort();
        ids.truncate(limit as usize);
        Ok(ids)
    }

    fn update_rating_aggregate(
        &self,
        id: &str,
        expected: Option<&RatingAggregate>,
        aggregate: &RatingAggregate,
    ) -> RepoResult<()> {
        let mut places = self.places.borrow_mut();
        let place = places
            .iter_mut()
            .find(|p| p.id.as_str() == id)
            .ok_or(RepoError::NotFound)?;
        if let Some(expected) = expected {
            let conflicts = self.conflicting_aggregate_updates.get();
            if conflicts > 0 {
                self.conflicting_aggregate_updates.set(conflicts - 1);
                return Err(RepoError::InvalidVersion);
            }
            if place.rating != *expected {
                return Err(RepoError::InvalidVersion);
            }
        }
        place.rating = *aggregate;
        Ok(())
    }
}

impl ReviewRepo for MockDb {
    fn create_review(&self, review: &Review) -> RepoResult<()> {
        let mut reviews = self.reviews.borrow_mut();
        if review.is_live()
            && reviews.iter().any(|r| {
                r.is_live() && r.author_id == review.author_id && r.place_id == review.place_id
            })
        {
            return Err(RepoError::AlreadyExists);
        }
        create(&mut reviews, review.clone())
    }

    fn update_review(&self, review: &Review) -> RepoResult<()> {
        let mut reviews = self.reviews.borrow_mut();
        let stored = get(&reviews, review.id.as_str())?;
        let review = Review {
            helpful_count: stored.helpful_count,
            not_helpful_count: stored.not_helpful_count,
            ..review.clone()
        };
        update(&mut reviews, &review)
    }

    fn delete_review(&self, id: &str, deleted_at: Timestamp) -> RepoResult<()> {
        let mut reviews = self.reviews.borrow_mut();
        let review = reviews
            .iter_mut()
            .find(|r| r.id.as_str() == id && !r.deleted)
            .ok_or(RepoError::NotFound)?;
        review.deleted = true;
        review.updated_at = deleted_at;
        Ok(())
    }

    fn get_review(&self, id: &str) -> RepoResult<Review> {
        get(&self.reviews.borrow(), id)
    }

    fn active_reviews_of_place(&self, place_id: &str) -> RepoResult<Vec<Review>> {
        Ok(self
            .reviews
            .borrow()
            .iter()
            .filter(|r| r.place_id.as_str() == place_id && r.counts_for_rating())
            .cloned()
            .collect())
    }

    fn find_live_review(&self, author_id: &str, place_id: &str) -> RepoResult<Option<Review>> {
        Ok(self
            .reviews
            .borrow()
            .iter()
            .find(|r| {
                r.is_live() && r.author_id.as_str() == author_id && r.place_id.as_str() == place_id
            })
            .cloned())
    }

    fn apply_helpfulness_delta(&self, id: &str, delta: HelpfulnessDelta) -> RepoResult<()> {
        let mut reviews = self.reviews.borrow_mut();
        let review = reviews
            .iter_mut()
            .find(|r| r.id.as_str() == id)
            .ok_or(RepoError::NotFound)?;
        let (helpful, not_helpful) =
            delta.apply_to(review.helpful_count, review.not_helpful_count);
        review.helpful_count = helpful;
        review.not_helpful_count = not_helpful;
        Ok(())
    }
}

impl HelpfulnessVoteRepo for MockDb {
    fn create_vote(&self, vote: &HelpfulnessVote) -> RepoResult<()> {
        let mut votes = self.votes.borrow_mut();
        if votes
            .iter()
            .any(|v| v.review_id == vote.review_id && v.voter_id == vote.voter_id)
        {
            return Err(RepoError::AlreadyExists);
        }
        create(&mut votes, vote.clone())
    }

    fn update_vote(&self, vote: &HelpfulnessVote) -> RepoResult<()> {
        update(&mut self.votes.borrow_mut(), vote)
    }

    fn get_vote(&self, review_id: &str, voter_id: &str) -> RepoResult<Option<HelpfulnessVote>> {
        if self.hide_votes_once.replace(false) {
            return Ok(None);
        }
        Ok(self
            .votes
            .borrow()
            .iter()
            .find(|v| v.review_id.as_str() == review_id && v.voter_id.as_str() == voter_id)
            .cloned())
    }
}

impl UserRepo for MockDb {
    fn create_user(&self, user: &User) -> RepoResult<()> {
        create(&mut self.users.borrow_mut(), user.clone())
    }

    fn update_user(&self, user: &User) -> RepoResult<()> {
        update(&mut self.users.borrow_mut(), user)
    }

    fn get_user(&self, id: &str) -> RepoResult<User> {
        get(&self.users.borrow(), id)
    }
}
